use async_trait::async_trait;

use crate::model::vo::TimesheetEvent;

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Hands the event over for delivery. An error here never undoes the transition
    /// that produced the event.
    async fn notify(&self, event: TimesheetEvent) -> anyhow::Result<()>;
}
