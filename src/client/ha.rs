//! HA notification API client.

use reqwest::StatusCode;
use url::Url;

use crate::client::keystone::KeystoneSession;
use crate::client::types::{
    ClientError, ClientResult, NotificationClient, NotificationEnvelope, NotificationResponse,
};
use crate::config::ApiConfig;
use crate::notification::Notification;

const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";

/// Authenticated client for `POST {ha endpoint}/notifications`.
pub struct HaClient {
    http: reqwest::Client,
    session: KeystoneSession,
}

impl HaClient {
    /// Create a client. No network traffic happens until the first notification.
    pub fn new(config: &ApiConfig) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .user_agent(concat!("ha-notify/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            session: KeystoneSession::new(http.clone(), config.clone()),
            http,
        })
    }
}

impl NotificationClient for HaClient {
    async fn create_notification(
        &self,
        notification: &Notification,
    ) -> ClientResult<NotificationResponse> {
        let token = self.session.token().await?;
        let url = notifications_url(&token.endpoint);

        let res = self
            .http
            .post(url)
            .header(AUTH_TOKEN_HEADER, &token.value)
            .json(&NotificationEnvelope { notification })
            .send()
            .await?;

        let status = res.status();
        match status {
            StatusCode::CONFLICT => {
                let body = res.text().await.unwrap_or_default();
                tracing::debug!(body = %body, "HA API reported a conflicting notification");
                Err(ClientError::Conflict)
            }
            StatusCode::UNAUTHORIZED => {
                self.session.invalidate().await;
                Err(ClientError::Auth("HA API rejected the token".to_string()))
            }
            s if !s.is_success() => {
                let body = res.text().await.unwrap_or_default();
                Err(ClientError::Http {
                    status: s.as_u16(),
                    body,
                })
            }
            _ => {
                let envelope: NotificationEnvelope<NotificationResponse> = res.json().await?;
                Ok(envelope.notification)
            }
        }
    }
}

fn notifications_url(endpoint: &Url) -> Url {
    let mut url = endpoint.clone();
    let path = format!("{}/notifications", endpoint.path().trim_end_matches('/'));
    url.set_path(&path);
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notifications_url() {
        let endpoint = Url::parse("http://ha:15868/v1/abc123").unwrap();
        assert_eq!(notifications_url(&endpoint).as_str(), "http://ha:15868/v1/abc123/notifications");

        let endpoint = Url::parse("http://ha:15868/v1/").unwrap();
        assert_eq!(notifications_url(&endpoint).as_str(), "http://ha:15868/v1/notifications");

        let endpoint = Url::parse("http://ha:15868").unwrap();
        assert_eq!(notifications_url(&endpoint).as_str(), "http://ha:15868/notifications");
    }

    #[test]
    fn test_client_construction_is_offline() {
        let mut config = ApiConfig::default();
        config.auth_url = "http://127.0.0.1:9/v3".into();
        assert!(HaClient::new(&config).is_ok());
    }
}
