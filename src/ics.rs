use chrono::Utc;
use ics::properties::{Description, DtStart, Location, Summary};
use ics::{Event, ICalendar};

use crate::schedule::{Schedule, Status};
use crate::view::parse_scheduled;

/// Renders the schedule as an iCalendar feed. Only actions with a parseable
/// scheduled date become events; unscheduled work has nothing to put on a
/// calendar.
pub fn schedule_ics(schedule: &Schedule) -> ICalendar<'_> {
    let mut calendar = ICalendar::new("2.0", env!("CARGO_PKG_NAME"));

    for month in &schedule.calendar {
        for action in &month.actions {
            let Some(date) = action.scheduled_date.as_deref().and_then(parse_scheduled) else {
                continue;
            };

            let stamp = date
                .with_timezone(&Utc)
                .format("%Y%m%dT%H%M%SZ")
                .to_string();

            let mut event = Event::new(action.id.clone(), stamp.clone());
            event.push(DtStart::new(stamp));
            event.push(Summary::new(&action.name));

            if let Some(street) = &schedule.customer.street {
                event.push(Location::new(street));
            }

            if action.status != Status::Unscheduled {
                if let Some(vendor) = &action.vendor {
                    let contact = [vendor.vendor_name.as_deref(), vendor.phone_number.as_deref()]
                        .into_iter()
                        .flatten()
                        .collect::<Vec<_>>()
                        .join(" ");

                    if !contact.is_empty() {
                        event.push(Description::new(contact));
                    }
                }
            }

            calendar.add_event(event);
        }
    }

    calendar
}
