use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait ReadOnlyRepository<T>: Send + Sync
where
    T: Send,
{
    /// `Ok(None)` when no record has the id.
    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<T>>;
}
