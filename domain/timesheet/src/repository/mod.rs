mod assigned_personnel;
mod read_only;
mod shift;
mod timesheet;
mod user;

#[rustfmt::skip]
pub use {
    assigned_personnel::AssignedPersonnelRepo,
    read_only::ReadOnlyRepository,
    shift::ShiftRepo,
    timesheet::TimesheetRepo,
    user::UserRepo,
};
