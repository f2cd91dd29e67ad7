//! Notification record types and their wire representation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Resource type a notification reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    /// Failure of a whole compute host.
    ComputeHost,
}

/// Event carried in the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Event {
    Stopped,
    Started,
}

/// Cluster membership status of the failed host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClusterStatus {
    Offline,
    Online,
}

/// Host health marker reported alongside the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HostStatus {
    Normal,
    Unknown,
    Maintenance,
}

/// Event details nested inside a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    pub event: Event,
    pub cluster_status: ClusterStatus,
    pub host_status: HostStatus,
}

impl Payload {
    /// Payload describing a host that stopped and dropped out of the cluster.
    pub const fn host_stopped() -> Self {
        Self {
            event: Event::Stopped,
            cluster_status: ClusterStatus::Offline,
            host_status: HostStatus::Normal,
        }
    }
}

/// Immutable host-failure notification.
///
/// Fields are private so a record cannot be altered between delivery attempts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    #[serde(rename = "type")]
    kind: NotificationType,
    hostname: String,
    #[serde(rename = "generated_time")]
    generated_at: DateTime<Utc>,
    payload: Payload,
}

impl Notification {
    pub(crate) fn new(
        kind: NotificationType,
        hostname: String,
        generated_at: DateTime<Utc>,
        payload: Payload,
    ) -> Self {
        Self {
            kind,
            hostname,
            generated_at,
            payload,
        }
    }

    pub fn kind(&self) -> NotificationType {
        self.kind
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_wire_format() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        let record = Notification::new(
            NotificationType::ComputeHost,
            "compute-1".to_string(),
            at,
            Payload::host_stopped(),
        );

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "COMPUTE_HOST");
        assert_eq!(json["hostname"], "compute-1");
        assert_eq!(json["generated_time"], "2024-05-01T12:30:00Z");
        assert_eq!(json["payload"]["event"], "STOPPED");
        assert_eq!(json["payload"]["cluster_status"], "OFFLINE");
        assert_eq!(json["payload"]["host_status"], "NORMAL");
    }

    #[test]
    fn test_other_enumerants_serialize() {
        assert_eq!(serde_json::to_value(Event::Started).unwrap(), "STARTED");
        assert_eq!(serde_json::to_value(ClusterStatus::Online).unwrap(), "ONLINE");
        assert_eq!(serde_json::to_value(HostStatus::Maintenance).unwrap(), "MAINTENANCE");
    }
}
