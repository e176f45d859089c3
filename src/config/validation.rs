//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (ports valid, required names present)
//! - Detect half-configured TLS
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;

use crate::config::schema::ServiceConfig;

/// A single semantic problem in the configuration document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending key.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check a decoded configuration for values the service cannot run with.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match config.service.port.parse::<u16>() {
        Ok(0) => errors.push(ValidationError::new("service.port", "must not be 0")),
        Ok(_) => {}
        Err(_) => errors.push(ValidationError::new(
            "service.port",
            format!("'{}' is not a valid port", config.service.port),
        )),
    }

    if config.service.bind_address.trim().is_empty() {
        errors.push(ValidationError::new("service.bindAddress", "must not be empty"));
    }

    let db = &config.database;
    if db.port == 0 {
        errors.push(ValidationError::new("database.port", "must not be 0"));
    }
    for (field, value) in [
        ("database.host", &db.host),
        ("database.name", &db.name),
        ("database.user", &db.user),
    ] {
        if value.trim().is_empty() {
            errors.push(ValidationError::new(field, "must not be empty"));
        }
    }

    let ssl = &config.ssl;
    if ssl.server_crt_file.is_empty() != ssl.server_key_file.is_empty() {
        errors.push(ValidationError::new(
            "ssl",
            "server-crt-file and server-key-file must be set together",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
