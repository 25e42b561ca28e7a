use domain_timesheet::{
    model::entity::Shift,
    repository::{ReadOnlyRepository, ShiftRepo},
};
use sea_orm::prelude::*;

use crate::infrastructure::database::{model::prelude::*, OrmRepo};

#[async_trait::async_trait]
impl ReadOnlyRepository<Shift> for OrmRepo {
    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Shift>> {
        ShiftEntity::find_by_id(id)
            .one(self.db.get_connection())
            .await?
            .map(Shift::try_from)
            .transpose()
    }
}

impl ShiftRepo for OrmRepo {}
