//! Keystone v3 password authentication and catalog lookup.
//!
//! # Responsibilities
//! - Exchange configured credentials for a project-scoped token
//! - Resolve the HA endpoint from the token's service catalog
//! - Cache the token until the HA API rejects it

use serde::Deserialize;
use serde_json::json;
use tokio::sync::Mutex;
use url::Url;

use crate::client::types::{ClientError, ClientResult};
use crate::config::ApiConfig;

/// Catalog service type of the HA notification API.
pub const HA_SERVICE_TYPE: &str = "ha";

const SUBJECT_TOKEN_HEADER: &str = "X-Subject-Token";

/// Token plus the HA endpoint it was issued for.
#[derive(Clone)]
pub struct AuthToken {
    pub value: String,
    pub endpoint: Url,
}

impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthToken")
            .field("endpoint", &self.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct TokenBody {
    token: TokenInfo,
}

#[derive(Debug, Deserialize)]
struct TokenInfo {
    #[serde(default)]
    catalog: Vec<CatalogEntry>,
}

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    #[serde(rename = "type")]
    service_type: String,
    #[serde(default)]
    endpoints: Vec<CatalogEndpoint>,
}

#[derive(Debug, Deserialize)]
struct CatalogEndpoint {
    interface: String,
    #[serde(default)]
    region: Option<String>,
    #[serde(default)]
    region_id: Option<String>,
    url: String,
}

/// Lazily authenticated Keystone session.
pub struct KeystoneSession {
    http: reqwest::Client,
    config: ApiConfig,
    cached: Mutex<Option<AuthToken>>,
}

impl KeystoneSession {
    pub fn new(http: reqwest::Client, config: ApiConfig) -> Self {
        Self {
            http,
            config,
            cached: Mutex::new(None),
        }
    }

    /// Return the cached token, authenticating first if there is none.
    pub async fn token(&self) -> ClientResult<AuthToken> {
        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref() {
            return Ok(token.clone());
        }

        let token = self.authenticate().await?;
        *cached = Some(token.clone());
        Ok(token)
    }

    /// Drop the cached token so the next call re-authenticates.
    pub async fn invalidate(&self) {
        *self.cached.lock().await = None;
    }

    async fn authenticate(&self) -> ClientResult<AuthToken> {
        let url = tokens_url(&self.config.auth_url)?;
        tracing::debug!(url = %url, username = %self.config.username, "Requesting Keystone token");

        let body = json!({
            "auth": {
                "identity": {
                    "methods": ["password"],
                    "password": {
                        "user": {
                            "name": self.config.username,
                            "domain": { "id": self.config.user_domain_id },
                            "password": self.config.password,
                        }
                    }
                },
                "scope": {
                    "project": {
                        "name": self.config.project_name,
                        "domain": { "id": self.config.project_domain_id },
                    }
                }
            }
        });

        let res = self.http.post(url).json(&body).send().await?;
        let status = res.status();
        if !status.is_success() {
            let text = res.text().await.unwrap_or_default();
            return Err(ClientError::Auth(format!("Keystone returned {}: {}", status, text)));
        }

        let value = res
            .headers()
            .get(SUBJECT_TOKEN_HEADER)
            .and_then(|h| h.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| ClientError::Auth(format!("missing {} header", SUBJECT_TOKEN_HEADER)))?;

        let body: TokenBody = res.json().await?;
        let endpoint = find_endpoint(
            &body.token.catalog,
            HA_SERVICE_TYPE,
            &self.config.interface,
            self.config.region_name.as_deref(),
        )?;

        tracing::debug!(endpoint = %endpoint, "Keystone token issued");
        Ok(AuthToken { value, endpoint })
    }
}

/// `{auth_url}/auth/tokens`, inserting `/v3` when the URL carries no version.
fn tokens_url(auth_url: &str) -> ClientResult<Url> {
    let base = auth_url.trim_end_matches('/');
    let full = if base.ends_with("/v3") {
        format!("{}/auth/tokens", base)
    } else {
        format!("{}/v3/auth/tokens", base)
    };
    Url::parse(&full).map_err(|e| ClientError::Auth(format!("invalid auth_url '{}': {}", auth_url, e)))
}

fn find_endpoint(
    catalog: &[CatalogEntry],
    service_type: &str,
    interface: &str,
    region: Option<&str>,
) -> ClientResult<Url> {
    let service = catalog
        .iter()
        .find(|entry| entry.service_type == service_type)
        .ok_or_else(|| ClientError::EndpointNotFound(format!("no '{}' service in catalog", service_type)))?;

    let endpoint = service
        .endpoints
        .iter()
        .filter(|ep| ep.interface == interface)
        .find(|ep| match region {
            Some(region) => {
                ep.region.as_deref() == Some(region) || ep.region_id.as_deref() == Some(region)
            }
            None => true,
        })
        .ok_or_else(|| {
            ClientError::EndpointNotFound(format!(
                "no {} endpoint for '{}'{}",
                interface,
                service_type,
                region.map(|r| format!(" in region {}", r)).unwrap_or_default()
            ))
        })?;

    Url::parse(&endpoint.url)
        .map_err(|e| ClientError::EndpointNotFound(format!("invalid endpoint URL '{}': {}", endpoint.url, e)))
}
