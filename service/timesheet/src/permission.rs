use std::sync::Arc;

use async_trait::async_trait;
use domain_timesheet::{
    exception::{TimesheetException, TimesheetResult},
    model::{
        entity::{Shift, UserAccess},
        vo::Capability,
    },
    repository::UserRepo,
    service::PermissionService,
};
use typed_builder::TypedBuilder;
use uuid::Uuid;

#[derive(TypedBuilder)]
pub struct PermissionServiceImpl {
    user_repo: Arc<dyn UserRepo>,
}

#[async_trait]
impl PermissionService for PermissionServiceImpl {
    async fn authorize(
        &self,
        user_id: Uuid,
        shift: &Shift,
        capability: Capability,
    ) -> TimesheetResult<UserAccess> {
        let denied = TimesheetException::PermissionDenied {
            user_id,
            action: capability,
        };
        let Some(access) = self.user_repo.get_access(user_id).await? else {
            tracing::warn!("Unknown user: {user_id} tried to {capability} on shift: {}", shift.id);
            return Err(denied);
        };
        if !access.can(capability, shift) {
            tracing::warn!(
                "User: {user_id} with role {:?} may not {capability} on shift: {}",
                access.role,
                shift.id
            );
            return Err(denied);
        }
        Ok(access)
    }
}
