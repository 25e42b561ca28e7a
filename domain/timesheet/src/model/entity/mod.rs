pub mod assigned_personnel;
pub mod shift;
pub mod time_entry;
pub mod timesheet;
pub mod user;

#[rustfmt::skip]
pub use {
    assigned_personnel::AssignedPersonnel,
    shift::Shift,
    time_entry::TimeEntry,
    timesheet::{Timesheet, TimesheetStatus},
    user::{GrantScope, Role, UserAccess},
};
