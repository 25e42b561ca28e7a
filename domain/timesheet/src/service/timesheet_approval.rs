use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    exception::TimesheetResult,
    model::{entity::Timesheet, vo::ApprovalType},
};

#[async_trait]
pub trait TimesheetApprovalService: Send + Sync {
    /// Creates the timesheet of a complete shift, or resubmits a rejected one.
    async fn finalize_timesheet(&self, user_id: Uuid, shift_id: Uuid)
        -> TimesheetResult<Timesheet>;

    /// `signature` holds the decoded image bytes.
    async fn approve_timesheet(
        &self,
        user_id: Uuid,
        timesheet_id: Uuid,
        approval_type: ApprovalType,
        signature: Vec<u8>,
    ) -> TimesheetResult<Timesheet>;

    async fn reject_timesheet(
        &self,
        user_id: Uuid,
        timesheet_id: Uuid,
        reason: String,
    ) -> TimesheetResult<Timesheet>;

    async fn get_timesheet(&self, user_id: Uuid, timesheet_id: Uuid)
        -> TimesheetResult<Timesheet>;

    async fn get_signature(
        &self,
        user_id: Uuid,
        timesheet_id: Uuid,
        kind: ApprovalType,
    ) -> TimesheetResult<Vec<u8>>;

    /// CSV rendering of the frozen totals of a completed timesheet.
    async fn export_timesheet(&self, user_id: Uuid, timesheet_id: Uuid)
        -> TimesheetResult<String>;
}
