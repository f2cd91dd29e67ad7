//! Host-failure notification records.
//!
//! # Data Flow
//! ```text
//! failure hostname + clock reading
//!     → builder.rs (pure construction)
//!     → Notification (immutable, built once per run)
//!     → delivery coordinator (resubmits the same record on every attempt)
//! ```
//!
//! # Design Decisions
//! - The record is never re-timestamped on retry; the HA API deduplicates by content
//! - Payload enumerants are fixed for this driver but typed for other event kinds

pub mod builder;
pub mod types;

pub use builder::build;
pub use types::{ClusterStatus, Event, HostStatus, Notification, NotificationType, Payload};
