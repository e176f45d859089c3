//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! listener.rs (bind host:port from config)
//!     → tls.rs (optional rustls config from cert/key files)
//!     → Hand off to http::server
//! ```
//!
//! # Design Decisions
//! - The socket is bound before serving so startup fails early on a bad address
//! - TLS is optional; half-configured TLS is a fatal startup error

pub mod listener;
pub mod tls;
