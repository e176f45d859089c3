//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection
//!     → server.rs (Axum setup, graceful shutdown)
//!     → middleware/ (request id, logging, cors, timeouts, body limit)
//!     → handlers/ (parse path/body, call the user controller)
//!     → error.rs (map failures to status + JSON body)
//!     → Send to client
//! ```

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod server;

pub use error::ApiError;
pub use middleware::X_REQUEST_ID;
pub use server::{build_router, AppState, HttpServer, ServerError};
