//! Client capability, response and error definitions.

use std::future::Future;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::notification::Notification;

/// The single operation the delivery coordinator needs from the HA API.
pub trait NotificationClient {
    /// Submit `notification`. A 409 from the API must surface as [`ClientError::Conflict`].
    fn create_notification(
        &self,
        notification: &Notification,
    ) -> impl Future<Output = ClientResult<NotificationResponse>> + Send;
}

/// `{"notification": ...}` wrapper used by the HA API in both directions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationEnvelope<T> {
    pub notification: T,
}

/// Notification as recorded by the HA API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationResponse {
    pub notification_uuid: Option<String>,
    pub status: Option<String>,
    pub source_host_uuid: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub hostname: Option<String>,
    pub generated_time: Option<String>,
    pub payload: Option<serde_json::Value>,
}

/// Errors returned by a [`NotificationClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// Content-identical notification was already accepted (HTTP 409).
    #[error("notification already exists (409 Conflict)")]
    Conflict,

    /// Keystone rejected the credentials or returned no usable token.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// No matching HA endpoint in the service catalog.
    #[error("HA endpoint not found: {0}")]
    EndpointNotFound(String),

    /// HA API answered with a non-success status.
    #[error("HA API returned {status}: {body}")]
    Http { status: u16, body: String },

    /// Connection, TLS or timeout failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// Response body could not be decoded.
    #[error("invalid response: {0}")]
    Decode(String),
}

impl ClientError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, ClientError::Conflict)
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ClientError::Decode(e.to_string())
        } else if e.is_timeout() {
            ClientError::Transport(format!("request timed out: {}", e))
        } else {
            ClientError::Transport(e.to_string())
        }
    }
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
