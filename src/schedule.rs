use std::collections::HashMap;

use chrono::Month;
use log::warn;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// Top-level payload returned by the upstream schedule endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    pub calendar: Vec<CalendarMonth>,
    pub customer: Customer,
}

/// One server-reported bundle of actions for a (month, year) pair.
/// A `month` of `0` means "no month assigned" and is dropped by grouping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarMonth {
    pub month: u32,
    pub year: i32,
    pub actions: Vec<Action>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    #[serde(deserialize_with = "action_id")]
    pub id: String,
    pub name: String,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_start_window: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_end_window: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<Vendor>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
}

/// Lifecycle tag of an action. The upstream sends a free-form string; only
/// the canonical spellings map to a known variant, everything else is kept
/// as `Unknown` and takes the default presentation treatment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Status {
    Completed,
    Scheduled,
    Unscheduled,
    Unknown(String),
}

impl From<String> for Status {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "Completed" => Status::Completed,
            "Scheduled" => Status::Scheduled,
            "Unscheduled" => Status::Unscheduled,
            _ => Status::Unknown(raw),
        }
    }
}

impl Status {
    pub fn as_str(&self) -> &str {
        match self {
            Status::Completed => "Completed",
            Status::Scheduled => "Scheduled",
            Status::Unscheduled => "Unscheduled",
            Status::Unknown(raw) => raw,
        }
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// Upstream is loose about action ids and sends either a string or a number.
fn action_id<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(id) => id,
        Raw::Number(id) => id.to_string(),
    })
}

/// Synthesizes the `"March 2024"`-style group label for a 1-indexed month.
pub fn month_label(month: u32, year: i32) -> Result<String> {
    let name = u8::try_from(month)
        .ok()
        .and_then(|month| Month::try_from(month).ok())
        .map(|month| month.name())
        .ok_or(Error::InvalidMonth(month))?;

    Ok(format!("{name} {year}"))
}

/// Actions bucketed by month label, in the order the labels were first seen.
///
/// Insertion order is part of the contract, so this is an explicit parallel
/// structure rather than a plain map.
#[derive(Debug, Default)]
pub struct MonthGroups {
    entries: Vec<(String, Vec<Action>)>,
    index: HashMap<String, usize>,
}

impl MonthGroups {
    fn actions_mut(&mut self, label: &str) -> &mut Vec<Action> {
        let idx = match self.index.get(label) {
            Some(idx) => *idx,
            None => {
                self.index.insert(label.to_string(), self.entries.len());
                self.entries.push((label.to_string(), Vec::new()));
                self.entries.len() - 1
            }
        };

        &mut self.entries[idx].1
    }

    pub fn get(&self, label: &str) -> Option<&[Action]> {
        self.index
            .get(label)
            .map(|idx| self.entries[*idx].1.as_slice())
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(label, _)| label.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Action])> {
        self.entries
            .iter()
            .map(|(label, actions)| (label.as_str(), actions.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Buckets calendar entries by month label in first-seen order.
///
/// Entries with the `0` month sentinel contribute nothing. Entries sharing a
/// (month, year) pair merge, actions concatenated in input order. Months
/// outside `1..=12` are skipped with a warning rather than failing the whole
/// result.
pub fn group_actions(calendar: &[CalendarMonth]) -> MonthGroups {
    let mut groups = MonthGroups::default();

    for entry in calendar {
        if entry.month == 0 {
            continue;
        }

        let label = match month_label(entry.month, entry.year) {
            Ok(label) => label,
            Err(err) => {
                warn!("skipping calendar entry: {err}");
                continue;
            }
        };

        groups
            .actions_mut(&label)
            .extend(entry.actions.iter().cloned());
    }

    groups
}
