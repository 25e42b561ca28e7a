use domain_timesheet::model::entity::TimeEntry;
use sea_orm::{entity::prelude::*, Set};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "time_entry")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(indexed)]
    pub assignment_id: Uuid,
    pub entry_number: i16,
    pub clock_in: Option<DateTimeUtc>,
    pub clock_out: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&TimeEntry> for ActiveModel {
    fn from(e: &TimeEntry) -> Self {
        Self {
            id: Set(e.id),
            assignment_id: Set(e.assignment_id),
            entry_number: Set(e.entry_number as i16),
            clock_in: Set(e.clock_in),
            clock_out: Set(e.clock_out),
        }
    }
}

impl TryFrom<Model> for TimeEntry {
    type Error = anyhow::Error;

    fn try_from(m: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: m.id,
            assignment_id: m.assignment_id,
            entry_number: u8::try_from(m.entry_number)?,
            clock_in: m.clock_in,
            clock_out: m.clock_out,
        })
    }
}
