//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from the config file.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::delivery::RetryPolicy;

/// Root configuration for the notification driver.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Log file path. Logs go to stdout when unset.
    pub log_file: Option<PathBuf>,

    /// Log level filter (trace, debug, info, warn, error).
    pub log_level: String,

    /// HA API credentials and retry tuning.
    pub api: ApiConfig,
}

/// Credentials and endpoint selection for the HA notification API.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Keystone endpoint (e.g., "http://keystone:5000/v3").
    pub auth_url: String,

    /// Project the token is scoped to.
    pub project_name: String,

    pub project_domain_id: String,

    pub username: String,

    pub user_domain_id: String,

    pub password: String,

    /// Restrict catalog lookup to this region.
    pub region_name: Option<String>,

    /// Catalog endpoint interface (public, internal, admin).
    pub interface: String,

    /// Per-request HTTP timeout in seconds.
    pub request_timeout_secs: u64,

    /// Maximum number of retries after the first attempt.
    pub api_retry_max: u32,

    /// Pause between attempts in seconds.
    pub api_retry_interval: u64,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            log_file: None,
            log_level: "info".to_string(),
            api: ApiConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            auth_url: String::new(),
            project_name: String::new(),
            project_domain_id: String::new(),
            username: String::new(),
            user_domain_id: String::new(),
            password: String::new(),
            region_name: None,
            interface: "public".to_string(),
            request_timeout_secs: 30,
            api_retry_max: 12,
            api_retry_interval: 10,
        }
    }
}

impl ApiConfig {
    /// Retry policy described by `api_retry_max` and `api_retry_interval`.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.api_retry_max,
            Duration::from_secs(self.api_retry_interval),
        )
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

// Never print the password.
impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("auth_url", &self.auth_url)
            .field("project_name", &self.project_name)
            .field("project_domain_id", &self.project_domain_id)
            .field("username", &self.username)
            .field("user_domain_id", &self.user_domain_id)
            .field("region_name", &self.region_name)
            .field("interface", &self.interface)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("api_retry_max", &self.api_retry_max)
            .field("api_retry_interval", &self.api_retry_interval)
            .finish()
    }
}
