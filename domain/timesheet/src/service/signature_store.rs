use async_trait::async_trait;
use uuid::Uuid;

use crate::model::vo::{ApprovalType, SignatureRef};

/// Opaque storage of signature images.
#[async_trait]
pub trait SignatureStore: Send + Sync {
    async fn put(
        &self,
        timesheet_id: Uuid,
        kind: ApprovalType,
        image: &[u8],
    ) -> anyhow::Result<SignatureRef>;

    async fn get(&self, reference: &SignatureRef) -> anyhow::Result<Vec<u8>>;

    /// Removing a reference that does not exist is not an error.
    async fn delete(&self, reference: &SignatureRef) -> anyhow::Result<()>;
}
