use super::ReadOnlyRepository;
use crate::model::entity::Shift;

/// Shifts are owned by scheduling, this system only reads them.
pub trait ShiftRepo: ReadOnlyRepository<Shift> + Send + Sync {}
