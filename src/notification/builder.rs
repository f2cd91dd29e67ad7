//! Notification construction.

use chrono::{DateTime, Utc};

use crate::notification::types::{Notification, NotificationType, Payload};

/// Build the stopped-host notification for `hostname`, stamped with `now`.
///
/// The hostname is taken verbatim. The caller rejects an empty argument.
pub fn build(hostname: &str, now: DateTime<Utc>) -> Notification {
    Notification::new(
        NotificationType::ComputeHost,
        hostname.to_string(),
        now,
        Payload::host_stopped(),
    )
}
