use std::sync::Arc;

use async_trait::async_trait;
use domain_timesheet::{
    exception::{TimesheetException, TimesheetResult},
    model::vo::{Capability, ShiftSummary},
    repository::{AssignedPersonnelRepo, ShiftRepo},
    service::{PermissionService, ShiftStatusService},
};
use typed_builder::TypedBuilder;
use uuid::Uuid;

#[derive(TypedBuilder)]
pub struct ShiftStatusServiceImpl {
    shift_repo: Arc<dyn ShiftRepo>,
    assignment_repo: Arc<dyn AssignedPersonnelRepo>,
    permission_service: Arc<dyn PermissionService>,
}

#[async_trait]
impl ShiftStatusService for ShiftStatusServiceImpl {
    #[tracing::instrument(skip(self))]
    async fn get_shift_status(
        &self,
        user_id: Uuid,
        shift_id: Uuid,
    ) -> TimesheetResult<ShiftSummary> {
        let shift = self
            .shift_repo
            .get_by_id(shift_id)
            .await?
            .ok_or(TimesheetException::NotFound {
                entity: "Shift",
                id: shift_id,
            })?;
        self.permission_service
            .authorize(user_id, &shift, Capability::ViewShift)
            .await?;
        let roster = self.assignment_repo.get_by_shift_id(shift_id).await?;
        Ok(ShiftSummary::compute(&shift, &roster))
    }
}
