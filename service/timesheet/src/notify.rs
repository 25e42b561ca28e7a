use domain_timesheet::{model::vo::TimesheetEvent, service::Notifier};

/// Delivery problems are logged and swallowed, the transition is already persisted.
pub(crate) async fn publish(notifier: &dyn Notifier, event: TimesheetEvent) {
    if let Err(e) = notifier.notify(event.clone()).await {
        tracing::warn!("Failed to publish {event:?}: {e}");
    }
}
