pub mod cache;
pub mod cli;
pub mod error;
pub mod fetch;
pub mod ics;
pub mod schedule;
pub mod server;
pub mod view;

pub use error::{Error, Result};
pub use schedule::{
    group_actions, Action, CalendarMonth, Customer, MonthGroups, Schedule, Status, Vendor,
};
pub use view::{build_view, ScheduleView};
