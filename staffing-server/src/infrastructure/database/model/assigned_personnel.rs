use domain_timesheet::model::entity::{AssignedPersonnel, TimeEntry};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assigned_personnel")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(indexed)]
    pub shift_id: Uuid,
    pub employee_id: Uuid,
    pub employee_name: String,
    pub role_code: String,
    pub ended_at: Option<DateTimeUtc>,
    pub version: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Joins the row with its ledger, entries sorted by number.
    pub fn into_domain(self, mut time_entries: Vec<TimeEntry>) -> AssignedPersonnel {
        time_entries.sort_by_key(|e| e.entry_number);
        AssignedPersonnel {
            id: self.id,
            shift_id: self.shift_id,
            employee_id: self.employee_id,
            employee_name: self.employee_name,
            role_code: self.role_code,
            time_entries,
            ended_at: self.ended_at,
            version: self.version,
        }
    }
}
