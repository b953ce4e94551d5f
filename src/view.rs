use chrono::{DateTime, Datelike, FixedOffset};
use serde::Serialize;

use crate::schedule::{group_actions, Action, Schedule, Status};

/// Display placeholder for an unknown or unparseable scheduled date.
pub const TBD: &str = "TBD";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusColor {
    Success,
    Accent,
    Neutral,
}

impl StatusColor {
    pub fn hex(self) -> &'static str {
        match self {
            StatusColor::Success => "#00B47D",
            StatusColor::Accent => "#006A4B",
            StatusColor::Neutral => "#011638",
        }
    }
}

/// Total over every status, known or not.
pub fn status_color(status: &Status) -> StatusColor {
    match status {
        Status::Completed => StatusColor::Success,
        Status::Scheduled => StatusColor::Accent,
        Status::Unscheduled | Status::Unknown(_) => StatusColor::Neutral,
    }
}

/// Unscheduled actions collapse their header to the day name alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderLayout {
    DayOnly,
    Full,
}

pub fn header_layout(status: &Status) -> HeaderLayout {
    match status {
        Status::Unscheduled => HeaderLayout::DayOnly,
        _ => HeaderLayout::Full,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusIcon {
    Done,
    Pending,
}

pub fn status_icon(status: &Status) -> StatusIcon {
    match status {
        Status::Completed => StatusIcon::Done,
        _ => StatusIcon::Pending,
    }
}

/// Central scheduled-date parser. Anything that is not RFC 3339 degrades to
/// `None`, which the formatting helpers render as the `"TBD"` sentinel.
pub fn parse_scheduled(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw).ok()
}

pub fn scheduled_day_name(raw: Option<&str>) -> String {
    match raw.and_then(parse_scheduled) {
        Some(date) => date.format("%a").to_string(),
        None => TBD.to_string(),
    }
}

pub fn scheduled_day_number(raw: Option<&str>) -> String {
    match raw.and_then(parse_scheduled) {
        Some(date) => date.day().to_string(),
        None => TBD.to_string(),
    }
}

pub fn status_line(action: &Action) -> String {
    if action.status == Status::Scheduled {
        format!(
            "Scheduled {} - {}",
            action.arrival_start_window.as_deref().unwrap_or_default(),
            action.arrival_end_window.as_deref().unwrap_or_default()
        )
    } else {
        "Schedule date & time TBD".to_string()
    }
}

/// The render-boundary contract: everything the presentation layer needs,
/// already derived, in month insertion order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleView {
    pub customer: CustomerView,
    pub months: Vec<MonthView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CustomerView {
    pub street: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthView {
    pub label: String,
    pub no_maintenance: bool,
    pub actions: Vec<ActionView>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionView {
    pub id: String,
    pub name: String,
    pub status: Status,
    pub color: &'static str,
    pub day_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<StatusIcon>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<VendorView>,
    pub status_line: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct VendorView {
    pub name: String,
    pub phone: String,
}

impl ActionView {
    fn from_action(action: &Action) -> Self {
        let date = action.scheduled_date.as_deref();

        let (day_number, icon) = match header_layout(&action.status) {
            HeaderLayout::DayOnly => (None, None),
            HeaderLayout::Full => (
                Some(scheduled_day_number(date)),
                Some(status_icon(&action.status)),
            ),
        };

        // Vendor contact is suppressed for unscheduled actions; when shown,
        // missing fields render as empty strings.
        let vendor = match action.status {
            Status::Unscheduled => None,
            _ => Some(VendorView {
                name: action
                    .vendor
                    .as_ref()
                    .and_then(|vendor| vendor.vendor_name.clone())
                    .unwrap_or_default(),
                phone: action
                    .vendor
                    .as_ref()
                    .and_then(|vendor| vendor.phone_number.clone())
                    .unwrap_or_default(),
            }),
        };

        ActionView {
            id: action.id.clone(),
            name: action.name.clone(),
            status: action.status.clone(),
            color: status_color(&action.status).hex(),
            day_name: scheduled_day_name(date),
            day_number,
            icon,
            vendor,
            status_line: status_line(action),
        }
    }
}

pub fn build_view(schedule: &Schedule) -> ScheduleView {
    let groups = group_actions(&schedule.calendar);

    let months = groups
        .iter()
        .map(|(label, actions)| MonthView {
            label: label.to_string(),
            no_maintenance: actions.is_empty(),
            actions: actions.iter().map(ActionView::from_action).collect(),
        })
        .collect();

    ScheduleView {
        customer: CustomerView {
            street: schedule.customer.street.clone().unwrap_or_default(),
        },
        months,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{CalendarMonth, Customer, Vendor};

    fn action(status: Status) -> Action {
        Action {
            id: "1".to_string(),
            name: "Window cleaning".to_string(),
            status,
            scheduled_date: None,
            arrival_start_window: None,
            arrival_end_window: None,
            vendor: None,
        }
    }

    #[test]
    fn status_color_is_total() {
        assert_eq!(status_color(&Status::Completed), StatusColor::Success);
        assert_eq!(status_color(&Status::Scheduled), StatusColor::Accent);
        assert_eq!(status_color(&Status::Unscheduled), StatusColor::Neutral);
        assert_eq!(
            status_color(&Status::Unknown("anything-else".to_string())),
            StatusColor::Neutral
        );
    }

    #[test]
    fn absent_date_formats_as_tbd() {
        assert_eq!(scheduled_day_name(None), TBD);
        assert_eq!(scheduled_day_number(None), TBD);
    }

    #[test]
    fn malformed_date_degrades_to_tbd() {
        assert_eq!(scheduled_day_name(Some("not-a-date")), TBD);
        assert_eq!(scheduled_day_number(Some("2024-13-40T99:00:00Z")), TBD);
    }

    #[test]
    fn valid_date_formats_day_name_and_number() {
        let raw = Some("2024-03-15T10:00:00.000Z");
        assert_eq!(scheduled_day_name(raw), "Fri");
        assert_eq!(scheduled_day_number(raw), "15");
    }

    #[test]
    fn unscheduled_header_shows_day_name_only() {
        assert_eq!(header_layout(&Status::Unscheduled), HeaderLayout::DayOnly);
        assert_eq!(header_layout(&Status::Completed), HeaderLayout::Full);
        assert_eq!(header_layout(&Status::Scheduled), HeaderLayout::Full);
        assert_eq!(
            header_layout(&Status::Unknown("OnHold".to_string())),
            HeaderLayout::Full
        );
    }

    #[test]
    fn icon_is_done_only_when_completed() {
        assert_eq!(status_icon(&Status::Completed), StatusIcon::Done);
        assert_eq!(status_icon(&Status::Scheduled), StatusIcon::Pending);
        assert_eq!(
            status_icon(&Status::Unknown("OnHold".to_string())),
            StatusIcon::Pending
        );
    }

    #[test]
    fn status_line_for_scheduled_actions() {
        let mut scheduled = action(Status::Scheduled);
        scheduled.arrival_start_window = Some("8AM".to_string());
        scheduled.arrival_end_window = Some("12PM".to_string());
        assert_eq!(status_line(&scheduled), "Scheduled 8AM - 12PM");

        scheduled.arrival_end_window = None;
        assert_eq!(status_line(&scheduled), "Scheduled 8AM - ");
    }

    #[test]
    fn status_line_falls_back_to_tbd_message() {
        assert_eq!(
            status_line(&action(Status::Unscheduled)),
            "Schedule date & time TBD"
        );
        assert_eq!(
            status_line(&action(Status::Completed)),
            "Schedule date & time TBD"
        );
    }

    #[test]
    fn vendor_body_suppressed_for_unscheduled() {
        let view = ActionView::from_action(&action(Status::Unscheduled));
        assert!(view.vendor.is_none());
        assert!(view.day_number.is_none());
        assert!(view.icon.is_none());
    }

    #[test]
    fn missing_vendor_fields_render_as_empty_strings() {
        let mut completed = action(Status::Completed);
        completed.vendor = Some(Vendor {
            vendor_name: Some("Acme Plumbing".to_string()),
            phone_number: None,
        });

        let view = ActionView::from_action(&completed);
        let vendor = view.vendor.unwrap();
        assert_eq!(vendor.name, "Acme Plumbing");
        assert_eq!(vendor.phone, "");

        // No vendor record at all still yields an empty body, not a crash.
        let view = ActionView::from_action(&action(Status::Completed));
        let vendor = view.vendor.unwrap();
        assert_eq!(vendor.name, "");
        assert_eq!(vendor.phone, "");
    }

    #[test]
    fn empty_month_flags_no_maintenance() {
        let schedule = Schedule {
            calendar: vec![
                CalendarMonth {
                    month: 6,
                    year: 2024,
                    actions: vec![],
                },
                CalendarMonth {
                    month: 7,
                    year: 2024,
                    actions: vec![action(Status::Scheduled)],
                },
            ],
            customer: Customer { street: None },
        };

        let view = build_view(&schedule);
        assert_eq!(view.customer.street, "");
        assert!(view.months[0].no_maintenance);
        assert!(!view.months[1].no_maintenance);
    }
}
