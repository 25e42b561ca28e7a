use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    exception::TimesheetResult,
    model::{
        entity::{Shift, UserAccess},
        vo::Capability,
    },
};

#[async_trait]
pub trait PermissionService: Send + Sync {
    /// Resolves the caller and checks it holds `capability` on `shift`.
    ///
    /// Fails with `PermissionDenied` for unknown users too, so callers learn nothing
    /// about which users exist.
    async fn authorize(
        &self,
        user_id: Uuid,
        shift: &Shift,
        capability: Capability,
    ) -> TimesheetResult<UserAccess>;
}
