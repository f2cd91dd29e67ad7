//! Configuration loading from disk.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::DriverConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "HA_NOTIFY_CONFIG";

/// File name looked up next to the executable.
pub const CONFIG_FILE_NAME: &str = "ha-notify.toml";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "cannot read {}: {}", path.display(), e),
            ConfigError::Parse(e) => write!(f, "malformed TOML: {}", e),
            ConfigError::Validation(errors) => {
                let reasons: Vec<String> = errors.iter().map(ToString::to_string).collect();
                write!(f, "invalid configuration: {}", reasons.join("; "))
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Resolve the config path: `$HA_NOTIFY_CONFIG`, else `ha-notify.toml` beside the binary.
pub fn default_config_path() -> PathBuf {
    if let Some(path) = env::var_os(CONFIG_ENV) {
        return PathBuf::from(path);
    }

    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_FILE_NAME)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<DriverConfig, ConfigError> {
    let config: DriverConfig = toml::from_str(content).map_err(ConfigError::Parse)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<DriverConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
    parse_config(&content)
}
