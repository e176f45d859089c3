//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config server (GET {protocol}://{address}/{application}-{profile}.yml)
//!     → loader.rs (fetch & deserialize YAML)
//!     → validation.rs (semantic checks)
//!     → ServiceConfig (validated, immutable)
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is fetched once at startup; any failure aborts startup
//! - Config is immutable once loaded
//! - Derived values (database URL) are computed, never stored
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{ConfigClient, ConfigError, ConfigSource};
pub use schema::{DatabaseConfig, ServiceConfig, SslConfig};
