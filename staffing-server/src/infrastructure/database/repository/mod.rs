mod assigned_personnel;
mod shift;
mod timesheet;
mod user;
