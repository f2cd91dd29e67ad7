//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber from `DriverConfig`
//! - Route output to stdout or to `log_file`
//!
//! # Design Decisions
//! - Plain fmt layer; ANSI colours only on stdout
//! - File output goes through a non-blocking writer; keep the guard alive until exit

use std::path::Path;

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::DriverConfig;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("cannot open log file {path}: {reason}")]
    File { path: String, reason: String },

    #[error("failed to install tracing subscriber: {0}")]
    Init(String),
}

/// Flushes buffered file output when dropped.
#[must_use = "dropping the guard stops file logging"]
pub struct LogGuard {
    _worker: Option<WorkerGuard>,
}

/// Install the global subscriber.
pub fn init_logging(config: &DriverConfig) -> Result<LogGuard, LoggingError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    match &config.log_file {
        Some(path) => {
            let appender = file_appender(path)?;
            let (writer, guard) = tracing_appender::non_blocking(appender);

            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(writer).with_ansi(false))
                .try_init()
                .map_err(|e| LoggingError::Init(e.to_string()))?;

            Ok(LogGuard { _worker: Some(guard) })
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .try_init()
                .map_err(|e| LoggingError::Init(e.to_string()))?;

            Ok(LogGuard { _worker: None })
        }
    }
}

/// Append-only appender writing to exactly `path`.
fn file_appender(path: &Path) -> Result<RollingFileAppender, LoggingError> {
    let file_error = |reason: String| LoggingError::File {
        path: path.display().to_string(),
        reason,
    };

    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| file_error("path has no file name".to_string()))?;
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(name)
        .build(dir)
        .map_err(|e| file_error(e.to_string()))
}
