use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    exception::TimesheetResult,
    model::vo::{BulkEndShiftReport, ClockAction, WorkerSnapshot},
};

/// Worker level transitions, each one persisted as a single versioned write.
#[async_trait]
pub trait ClockService: Send + Sync {
    async fn clock_action(
        &self,
        user_id: Uuid,
        assignment_id: Uuid,
        action: ClockAction,
    ) -> TimesheetResult<WorkerSnapshot>;

    /// Idempotent, ending an already ended worker returns its state unchanged.
    async fn end_shift(&self, user_id: Uuid, assignment_id: Uuid)
        -> TimesheetResult<WorkerSnapshot>;

    /// Ends every worker still active on the shift, each independently of the others.
    async fn end_all_shifts(
        &self,
        user_id: Uuid,
        shift_id: Uuid,
    ) -> TimesheetResult<BulkEndShiftReport>;
}
