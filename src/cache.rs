use std::sync::Arc;

use tokio::sync::RwLock;
use tokio::time::{Duration, Instant};

use crate::schedule::Schedule;

pub struct Config {
    pub enabled: bool,
    pub ttl: Duration,
}

struct Entry {
    expires: Instant,
    schedule: Arc<Schedule>,
}

/// Single-slot TTL cache over the fetched schedule. There is only one
/// upstream resource, so one slot is all the keying needed. Disabled, every
/// call is a passthrough.
pub struct ScheduleCache {
    enabled: bool,
    ttl: Duration,
    slot: RwLock<Option<Entry>>,
}

impl ScheduleCache {
    pub fn new(config: Config) -> Self {
        Self {
            enabled: config.enabled,
            ttl: config.ttl,
            slot: RwLock::new(None),
        }
    }

    pub async fn get(&self) -> Option<Arc<Schedule>> {
        if !self.enabled {
            return None;
        }

        let slot = self.slot.read().await;

        slot.as_ref()
            .filter(|entry| entry.expires > Instant::now())
            .map(|entry| Arc::clone(&entry.schedule))
    }

    pub async fn store(&self, schedule: Schedule) -> Arc<Schedule> {
        let schedule = Arc::new(schedule);

        if !self.enabled {
            return schedule;
        }

        let mut slot = self.slot.write().await;
        *slot = Some(Entry {
            expires: Instant::now() + self.ttl,
            schedule: Arc::clone(&schedule),
        });

        schedule
    }
}
