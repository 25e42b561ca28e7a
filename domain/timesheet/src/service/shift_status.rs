use async_trait::async_trait;
use uuid::Uuid;

use crate::{exception::TimesheetResult, model::vo::ShiftSummary};

#[async_trait]
pub trait ShiftStatusService: Send + Sync {
    async fn get_shift_status(&self, user_id: Uuid, shift_id: Uuid)
        -> TimesheetResult<ShiftSummary>;
}
