//! HA notification API client subsystem.
//!
//! # Data Flow
//! ```text
//! ApiConfig (credentials, interface, region)
//!     → keystone.rs (password auth, token + service catalog)
//!     → ha.rs (POST {ha endpoint}/notifications with X-Auth-Token)
//!     → Result<NotificationResponse, ClientError>
//! ```
//!
//! # Design Decisions
//! - Classification happens here: HTTP 409 becomes `ClientError::Conflict`
//! - Authentication is lazy, so auth failures are retried like any other failure
//! - A 401 from the HA API drops the cached token

pub mod ha;
pub mod keystone;
pub mod types;

pub use ha::HaClient;
pub use types::{ClientError, ClientResult, NotificationClient, NotificationResponse};
