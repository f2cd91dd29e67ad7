//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, next to the executable or $HA_NOTIFY_CONFIG)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → DriverConfig (validated, immutable)
//!     → passed explicitly to the client, logging and delivery policy
//! ```
//!
//! # Design Decisions
//! - Config is read once per invocation; there is no reload
//! - Retry and logging fields have defaults; credentials do not
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::ApiConfig;
pub use schema::DriverConfig;
