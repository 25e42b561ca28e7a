use domain_timesheet::model::entity::GrantScope;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "crew_chief_grant")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(indexed)]
    pub user_id: Uuid,
    /// 0 client company, 1 job, 2 shift.
    pub scope: i32,
    pub target_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for GrantScope {
    type Error = anyhow::Error;

    fn try_from(m: Model) -> Result<Self, Self::Error> {
        Ok(match m.scope {
            0 => GrantScope::Client(m.target_id),
            1 => GrantScope::Job(m.target_id),
            2 => GrantScope::Shift(m.target_id),
            other => anyhow::bail!("Wrong grant scope: {other} of grant: {}", m.id),
        })
    }
}
