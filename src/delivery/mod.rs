//! Delivery subsystem.
//!
//! # Data Flow
//! ```text
//! Notification (built once)
//!     → coordinator.rs (attempt, classify, pause, repeat)
//!     → NotificationClient (one call per attempt)
//!     → observer.rs (semantic events: sending, response, retrying, already sent, gave up)
//!     → DeliveryOutcome (Delivered | AlreadyDelivered | GaveUp)
//! ```
//!
//! # Design Decisions
//! - Fixed retry interval, tuned together with the retry count
//! - A 409 conflict is success: the HA API deduplicates by content
//! - Attempts are strictly sequential; the pause is the only suspension point

pub mod coordinator;
pub mod observer;
pub mod policy;

pub use coordinator::{AttemptOutcome, DeliveryAttempt, DeliveryCoordinator, DeliveryError, DeliveryOutcome};
pub use observer::{DeliveryObserver, TracingObserver};
pub use policy::RetryPolicy;
