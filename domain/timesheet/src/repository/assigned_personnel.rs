use async_trait::async_trait;
use uuid::Uuid;

use super::ReadOnlyRepository;
use crate::model::entity::AssignedPersonnel;

#[async_trait]
pub trait AssignedPersonnelRepo: ReadOnlyRepository<AssignedPersonnel> + Send + Sync {
    /// Roster of a shift, ordered by employee name.
    async fn get_by_shift_id(&self, shift_id: Uuid) -> anyhow::Result<Vec<AssignedPersonnel>>;

    /// Writes the assignment together with its whole time entry ledger, only if the stored
    /// version still equals `entity.version`; the stored version is then incremented.
    ///
    /// Returns `false` when another writer got there first.
    async fn update_with_lock(&self, entity: &AssignedPersonnel) -> anyhow::Result<bool>;
}
