//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Fetch config → Validate → Connect database → Build router → Bind listener
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop accepting → Drain in-flight requests (bounded) → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then database, then listener
//! - Fail fast: any startup error is fatal
//! - Shutdown has timeout: forced close after deadline, logged not escalated

pub mod shutdown;
pub mod signals;

pub use shutdown::{Shutdown, ShutdownOutcome};
