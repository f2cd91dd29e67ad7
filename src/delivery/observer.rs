//! Delivery events.
//!
//! The coordinator reports what it does through [`DeliveryObserver`] instead of
//! logging directly, so callers and tests decide where events go.

use crate::client::{ClientError, NotificationResponse};
use crate::delivery::coordinator::DeliveryError;
use crate::notification::Notification;

/// Receives the semantic events of one delivery run.
pub trait DeliveryObserver {
    /// About to submit `record` (emitted once per run).
    fn sending(&self, record: &Notification);

    /// The HA API accepted the notification.
    fn received_response(&self, response: &NotificationResponse);

    /// Attempt failed with a retryable error; `retry` is the 1-based retry about to run.
    fn retrying(&self, retry: u32, error: &ClientError);

    /// The HA API already had this notification.
    fn already_delivered(&self);

    /// No attempts remain, or the run was cancelled.
    fn gave_up(&self, error: &DeliveryError);
}

/// Emits delivery events through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl DeliveryObserver for TracingObserver {
    fn sending(&self, record: &Notification) {
        tracing::info!(
            hostname = %record.hostname(),
            generated_time = %record.generated_at(),
            notification = ?record,
            "Sending notification"
        );
    }

    fn received_response(&self, response: &NotificationResponse) {
        tracing::info!(
            notification_uuid = response.notification_uuid.as_deref().unwrap_or("-"),
            status = response.status.as_deref().unwrap_or("-"),
            response = ?response,
            "Received response"
        );
    }

    fn retrying(&self, retry: u32, error: &ClientError) {
        tracing::warn!(retry, error = %error, "Retrying notification");
    }

    fn already_delivered(&self) {
        tracing::info!("Notification already sent, skipping retries");
    }

    fn gave_up(&self, error: &DeliveryError) {
        tracing::error!(error = %error, detail = ?error, "Giving up on notification");
    }
}
