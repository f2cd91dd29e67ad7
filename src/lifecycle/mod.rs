//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Shutdown::trigger
//!
//! Shutdown (shutdown.rs):
//!     trigger → broadcast → delivery coordinator abandons its retry pause
//! ```
//!
//! # Design Decisions
//! - A signal never interrupts an in-flight request, only the pause between attempts
//! - An interrupted run still ends as a normal outcome (exit 0)

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
pub use signals::spawn_signal_listener;
