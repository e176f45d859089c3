//! Configuration schema definitions.
//!
//! This module defines the configuration document served by the remote
//! configuration server. All types derive Serde traits for deserialization
//! from YAML; key names follow the document (`bindAddress`, `server-crt-file`).
//!
//! `service` and `database` (and their connection keys) are required, so a
//! document meant for another application fails to decode instead of
//! silently picking up defaults.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Root configuration for the user service.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ServiceConfig {
    /// Identity and bind address of this service.
    pub service: ServiceSection,

    /// Service registry settings.
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Token lifetimes shared with the auth service.
    #[serde(default)]
    pub tokens: TokenConfig,

    /// TLS certificate and key locations.
    #[serde(default)]
    pub ssl: SslConfig,

    /// Database connection parameters.
    pub database: DatabaseConfig,
}

impl ServiceConfig {
    /// Address the HTTP listener binds to (`bindAddress:port`).
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.service.bind_address, self.service.port)
    }
}

/// Service identity section.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ServiceSection {
    #[serde(default = "default_service_name")]
    pub name: String,

    /// Public URL other services use to reach this one.
    #[serde(default)]
    pub url: String,

    #[serde(rename = "bindAddress", default = "default_bind_address")]
    pub bind_address: String,

    /// Listening port. The config server emits it either quoted or bare.
    #[serde(deserialize_with = "string_or_number")]
    pub port: String,
}

fn default_service_name() -> String {
    "user_service".to_string()
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

/// Service registry configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct RegistryConfig {
    pub address: String,
    pub tags: Vec<String>,
}

/// Token lifetime configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct TokenConfig {
    /// Refresh token lifetime, e.g. "168h".
    pub refresh_token_expires_duration: String,
    /// Access token lifetime, e.g. "15m".
    pub access_token_expires_duration: String,
    /// Refresh cookie max-age in seconds.
    pub refresh_token_max_age: i64,
    /// Access cookie max-age in seconds.
    pub access_token_max_age: i64,
}

/// TLS file locations.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct SslConfig {
    /// Path to certificate file (PEM).
    pub server_crt_file: String,
    /// Path to private key file (PEM).
    pub server_key_file: String,
}

/// Database connection parameters.
///
/// There is deliberately no connection string field: it is derived from the
/// other fields on every call to [`DatabaseConfig::connection_string`].
#[derive(Clone, Deserialize, Serialize, PartialEq)]
pub struct DatabaseConfig {
    pub user: String,
    #[serde(default)]
    pub password: String,
    pub host: String,
    pub port: u16,
    pub name: String,
    /// Extra connection parameters, e.g. `sslmode=disable`.
    #[serde(default)]
    pub params: Vec<String>,
}

impl DatabaseConfig {
    /// Postgres URL built from the five connection fields and the parameter list.
    pub fn connection_string(&self) -> String {
        let mut url = format!(
            "postgres://{}:{}@{}:{}/{}",
            self.user, self.password, self.host, self.port, self.name
        );
        if !self.params.is_empty() {
            url.push('?');
            url.push_str(&self.params.join("&"));
        }
        url
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("name", &self.name)
            .field("params", &self.params)
            .finish()
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(u64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}
