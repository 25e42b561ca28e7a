use async_trait::async_trait;
use uuid::Uuid;

use crate::model::entity::UserAccess;

#[async_trait]
pub trait UserRepo: Send + Sync {
    /// Role, company and crew chief grants of a user, `None` for unknown users.
    async fn get_access(&self, user_id: Uuid) -> anyhow::Result<Option<UserAccess>>;
}
