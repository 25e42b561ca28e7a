use std::time::Duration;

use async_trait::async_trait;
use domain_timesheet::{model::vo::TimesheetEvent, service::Notifier};

use super::{background_service::BackgroundService, config::NotificationConfig};

/// Queues events for [`WebhookDelivery`], never waiting on the network.
pub struct WebhookNotifier {
    sender: flume::Sender<TimesheetEvent>,
}

impl WebhookNotifier {
    /// Returns the notifier and the background task draining its queue.
    pub fn new(config: &NotificationConfig) -> anyhow::Result<(Self, WebhookDelivery)> {
        let (sender, receiver) = flume::bounded(*config.capacity());
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(*config.timeout_secs()))
            .build()?;
        Ok((
            Self { sender },
            WebhookDelivery {
                receiver,
                client,
                endpoint: config.endpoint().to_owned(),
            },
        ))
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, event: TimesheetEvent) -> anyhow::Result<()> {
        self.sender
            .try_send(event)
            .map_err(|e| anyhow::anyhow!("Could not queue notification: {e}"))
    }
}

pub struct WebhookDelivery {
    receiver: flume::Receiver<TimesheetEvent>,
    client: reqwest::Client,
    endpoint: String,
}

impl WebhookDelivery {
    async fn deliver(&self, event: &TimesheetEvent) -> anyhow::Result<()> {
        self.client
            .post(&self.endpoint)
            .json(event)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[async_trait]
impl BackgroundService for WebhookDelivery {
    async fn run(&self) {
        while let Ok(event) = self.receiver.recv_async().await {
            tracing::trace!("Delivering notification: {event:?}.");
            if let Err(e) = self.deliver(&event).await {
                tracing::error!("Notification {event:?} was not delivered: {e}");
            }
        }
        tracing::info!("Notification queue closed.");
    }
}

/// Used when no webhook is configured.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, event: TimesheetEvent) -> anyhow::Result<()> {
        tracing::info!("Timesheet event: {}", serde_json::to_string(&event)?);
        Ok(())
    }
}
