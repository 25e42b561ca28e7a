use std::collections::HashMap;

use domain_timesheet::{
    model::entity::{AssignedPersonnel, TimeEntry},
    repository::{AssignedPersonnelRepo, ReadOnlyRepository},
};
use sea_orm::{
    prelude::*,
    sea_query::{Expr, OnConflict},
    Insert, QueryFilter, QueryOrder, TransactionTrait,
};

use crate::infrastructure::database::{model::prelude::*, OrmRepo};

impl OrmRepo {
    async fn time_entries_of(
        &self,
        assignment_ids: Vec<Uuid>,
    ) -> anyhow::Result<HashMap<Uuid, Vec<TimeEntry>>> {
        let mut ledgers: HashMap<Uuid, Vec<TimeEntry>> = HashMap::new();
        if assignment_ids.is_empty() {
            return Ok(ledgers);
        }
        let entries = TimeEntryEntity::find()
            .filter(TimeEntryColumn::AssignmentId.is_in(assignment_ids))
            .order_by_asc(TimeEntryColumn::EntryNumber)
            .all(self.db.get_connection())
            .await?;
        for entry in entries {
            let entry = TimeEntry::try_from(entry)?;
            ledgers.entry(entry.assignment_id).or_default().push(entry);
        }
        Ok(ledgers)
    }
}

/// Inserts new entries and closes open ones. Ledger rows are never deleted.
fn ledger_upsert(entity: &AssignedPersonnel) -> Option<Insert<TimeEntryActiveModel>> {
    if entity.time_entries.is_empty() {
        return None;
    }
    Some(
        TimeEntryEntity::insert_many(entity.time_entries.iter().map(TimeEntryActiveModel::from))
            .on_conflict(
                OnConflict::column(TimeEntryColumn::Id)
                    .update_column(TimeEntryColumn::ClockOut)
                    .to_owned(),
            ),
    )
}

#[async_trait::async_trait]
impl ReadOnlyRepository<AssignedPersonnel> for OrmRepo {
    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<AssignedPersonnel>> {
        let Some(model) = AssignedPersonnelEntity::find_by_id(id)
            .one(self.db.get_connection())
            .await?
        else {
            return Ok(None);
        };
        let mut ledgers = self.time_entries_of(vec![id]).await?;
        Ok(Some(model.into_domain(ledgers.remove(&id).unwrap_or_default())))
    }
}

#[async_trait::async_trait]
impl AssignedPersonnelRepo for OrmRepo {
    async fn get_by_shift_id(&self, shift_id: Uuid) -> anyhow::Result<Vec<AssignedPersonnel>> {
        let models = AssignedPersonnelEntity::find()
            .filter(AssignedPersonnelColumn::ShiftId.eq(shift_id))
            .order_by_asc(AssignedPersonnelColumn::EmployeeName)
            .all(self.db.get_connection())
            .await?;
        let mut ledgers = self
            .time_entries_of(models.iter().map(|m| m.id).collect())
            .await?;
        Ok(models
            .into_iter()
            .map(|m| {
                let entries = ledgers.remove(&m.id).unwrap_or_default();
                m.into_domain(entries)
            })
            .collect())
    }

    async fn update_with_lock(&self, entity: &AssignedPersonnel) -> anyhow::Result<bool> {
        let txn = self.db.get_connection().begin().await?;
        let rows_affected = AssignedPersonnelEntity::update_many()
            .col_expr(AssignedPersonnelColumn::EndedAt, Expr::value(entity.ended_at))
            .col_expr(AssignedPersonnelColumn::Version, Expr::value(entity.version + 1))
            .filter(AssignedPersonnelColumn::Id.eq(entity.id))
            .filter(AssignedPersonnelColumn::Version.eq(entity.version))
            .exec(&txn)
            .await?
            .rows_affected;
        if rows_affected == 0 {
            txn.rollback().await?;
            return Ok(false);
        }
        if let Some(upsert) = ledger_upsert(entity) {
            upsert.exec_without_returning(&txn).await?;
        }
        txn.commit().await?;
        Ok(true)
    }
}
