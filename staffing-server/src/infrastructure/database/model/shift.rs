use domain_timesheet::model::entity::Shift;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "shift")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub client_company_id: Uuid,
    pub job_id: Uuid,
    pub date: Date,
    pub start_time: Time,
    pub end_time: Time,
    pub requested_workers: i32,
    pub location: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Shift {
    type Error = anyhow::Error;

    fn try_from(m: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: m.id,
            client_company_id: m.client_company_id,
            job_id: m.job_id,
            date: m.date,
            start_time: m.start_time,
            end_time: m.end_time,
            requested_workers: u32::try_from(m.requested_workers)?,
            location: m.location,
        })
    }
}
