//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Delivery events (delivery::TracingObserver) and client debug events
//!     → logging.rs (tracing subscriber: env filter + fmt layer)
//!     → stdout, or the configured log file via a non-blocking writer
//! ```
//!
//! # Design Decisions
//! - Subscriber is installed once by the binary, never by library code
//! - RUST_LOG overrides the configured log level

pub mod logging;

pub use logging::{init_logging, LogGuard, LoggingError};
