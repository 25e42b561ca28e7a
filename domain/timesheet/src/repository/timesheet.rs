use async_trait::async_trait;
use uuid::Uuid;

use super::ReadOnlyRepository;
use crate::model::entity::Timesheet;

#[async_trait]
pub trait TimesheetRepo: ReadOnlyRepository<Timesheet> + Send + Sync {
    async fn get_by_shift_id(&self, shift_id: Uuid) -> anyhow::Result<Option<Timesheet>>;

    /// Inserts the timesheet unless the shift already has one.
    ///
    /// Returns `false` when a timesheet for `entity.shift_id` exists.
    async fn insert_for_shift(&self, entity: &Timesheet) -> anyhow::Result<bool>;

    /// Same contract as [`AssignedPersonnelRepo::update_with_lock`](super::AssignedPersonnelRepo::update_with_lock).
    async fn update_with_lock(&self, entity: &Timesheet) -> anyhow::Result<bool>;
}
