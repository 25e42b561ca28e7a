use domain_timesheet::{
    model::entity::Timesheet,
    repository::{ReadOnlyRepository, TimesheetRepo},
};
use sea_orm::{prelude::*, sea_query::OnConflict, ActiveValue, QueryFilter};

use crate::infrastructure::database::{model::prelude::*, OrmRepo};

#[async_trait::async_trait]
impl ReadOnlyRepository<Timesheet> for OrmRepo {
    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Timesheet>> {
        TimesheetEntity::find_by_id(id)
            .one(self.db.get_connection())
            .await?
            .map(Timesheet::try_from)
            .transpose()
    }
}

#[async_trait::async_trait]
impl TimesheetRepo for OrmRepo {
    async fn get_by_shift_id(&self, shift_id: Uuid) -> anyhow::Result<Option<Timesheet>> {
        TimesheetEntity::find()
            .filter(TimesheetColumn::ShiftId.eq(shift_id))
            .one(self.db.get_connection())
            .await?
            .map(Timesheet::try_from)
            .transpose()
    }

    async fn insert_for_shift(&self, entity: &Timesheet) -> anyhow::Result<bool> {
        let active_model = TimesheetModel::try_from(entity)?.into_set();
        let rows_affected = TimesheetEntity::insert(active_model)
            .on_conflict(
                OnConflict::column(TimesheetColumn::ShiftId)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(self.db.get_connection())
            .await?;
        Ok(rows_affected > 0)
    }

    async fn update_with_lock(&self, entity: &Timesheet) -> anyhow::Result<bool> {
        let mut active_model = TimesheetModel::try_from(entity)?.into_set();
        active_model.id = ActiveValue::NotSet;
        active_model.shift_id = ActiveValue::NotSet;
        active_model.version = ActiveValue::Set(entity.version + 1);
        let rows_affected = TimesheetEntity::update_many()
            .set(active_model)
            .filter(TimesheetColumn::Id.eq(entity.id))
            .filter(TimesheetColumn::Version.eq(entity.version))
            .exec(self.db.get_connection())
            .await?
            .rows_affected;
        Ok(rows_affected > 0)
    }
}
