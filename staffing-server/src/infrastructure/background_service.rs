use async_trait::async_trait;

/// Long running task spawned next to the web host and aborted on shutdown.
#[async_trait]
pub trait BackgroundService: Send + Sync {
    async fn run(&self);
}
