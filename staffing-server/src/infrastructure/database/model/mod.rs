//! Postgres tables backing the timesheet workflow.
pub mod assigned_personnel;
pub mod crew_chief_grant;
pub mod shift;
pub mod time_entry;
pub mod timesheet;
pub mod user;

pub mod prelude {
    #[rustfmt::skip]
    pub use super::{
        assigned_personnel::{
            ActiveModel as AssignedPersonnelActiveModel, Column as AssignedPersonnelColumn,
            Entity as AssignedPersonnelEntity, Model as AssignedPersonnelModel,
        },
        crew_chief_grant::{
            Column as CrewChiefGrantColumn, Entity as CrewChiefGrantEntity,
            Model as CrewChiefGrantModel,
        },
        shift::{Entity as ShiftEntity, Model as ShiftModel},
        time_entry::{
            ActiveModel as TimeEntryActiveModel, Column as TimeEntryColumn,
            Entity as TimeEntryEntity, Model as TimeEntryModel,
        },
        timesheet::{
            ActiveModel as TimesheetActiveModel, Column as TimesheetColumn,
            Entity as TimesheetEntity, Model as TimesheetModel,
        },
        user::{Entity as UserEntity, Model as UserModel},
    };
}
