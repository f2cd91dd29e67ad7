//! Host-failure notification driver for the HA control plane.
//!
//! Builds a `COMPUTE_HOST` / `STOPPED` notification for one failed host and delivers it
//! to the HA notification API, retrying transient failures at a fixed interval and
//! treating a 409 conflict as already delivered.

pub mod cli;
pub mod client;
pub mod config;
pub mod delivery;
pub mod lifecycle;
pub mod notification;
pub mod observability;

pub use client::{HaClient, NotificationClient};
pub use config::DriverConfig;
pub use delivery::{DeliveryCoordinator, DeliveryOutcome, RetryPolicy};
pub use notification::Notification;
