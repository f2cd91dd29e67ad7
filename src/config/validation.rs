//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Require every credential the Keystone password flow needs
//! - Validate value ranges and enumerations
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: DriverConfig → Result<(), Vec<ValidationError>>

use url::Url;

use crate::config::schema::DriverConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required field is empty or missing.
    Missing(&'static str),
    /// `auth_url` is not an absolute http(s) URL.
    InvalidAuthUrl(String),
    /// Unknown endpoint interface.
    InvalidInterface(String),
    /// Request timeout must be positive.
    ZeroTimeout,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Missing(field) => write!(f, "api.{} is required", field),
            ValidationError::InvalidAuthUrl(url) => write!(f, "api.auth_url '{}' is not a valid http(s) URL", url),
            ValidationError::InvalidInterface(name) => {
                write!(f, "api.interface '{}' must be one of public, internal, admin", name)
            }
            ValidationError::ZeroTimeout => write!(f, "api.request_timeout_secs must be greater than 0"),
        }
    }
}

/// Check a parsed configuration, collecting every problem found.
pub fn validate_config(config: &DriverConfig) -> Result<(), Vec<ValidationError>> {
    let api = &config.api;
    let mut errors = Vec::new();

    if api.auth_url.trim().is_empty() {
        errors.push(ValidationError::Missing("auth_url"));
    } else {
        match Url::parse(&api.auth_url) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            _ => errors.push(ValidationError::InvalidAuthUrl(api.auth_url.clone())),
        }
    }

    let required = [
        ("project_name", &api.project_name),
        ("project_domain_id", &api.project_domain_id),
        ("username", &api.username),
        ("user_domain_id", &api.user_domain_id),
        ("password", &api.password),
    ];
    for (name, value) in required {
        if value.is_empty() {
            errors.push(ValidationError::Missing(name));
        }
    }

    if !matches!(api.interface.as_str(), "public" | "internal" | "admin") {
        errors.push(ValidationError::InvalidInterface(api.interface.clone()));
    }

    if api.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> DriverConfig {
        let mut config = DriverConfig::default();
        config.api.auth_url = "http://keystone:5000/v3".into();
        config.api.project_name = "service".into();
        config.api.project_domain_id = "default".into();
        config.api.username = "masakari".into();
        config.api.user_domain_id = "default".into();
        config.api.password = "secret".into();
        config
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = valid_config();
        config.api.username.clear();
        config.api.password.clear();
        config.api.interface = "private".into();
        config.api.request_timeout_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::Missing("username")));
        assert!(errors.contains(&ValidationError::Missing("password")));
        assert!(errors.contains(&ValidationError::InvalidInterface("private".into())));
        assert!(errors.contains(&ValidationError::ZeroTimeout));
    }

    #[test]
    fn test_rejects_non_http_auth_url() {
        let mut config = valid_config();
        config.api.auth_url = "ftp://keystone/v3".into();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::InvalidAuthUrl("ftp://keystone/v3".into())]);
    }
}
