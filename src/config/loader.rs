//! Configuration retrieval from the remote configuration server.

use std::time::Duration;

use thiserror::Error;

use crate::config::schema::ServiceConfig;
use crate::config::validation::{validate_config, ValidationError};

pub const DEFAULT_PROTOCOL: &str = "http";
pub const DEFAULT_ADDRESS: &str = "letslive_configserver:8181";
pub const DEFAULT_APPLICATION: &str = "user_service";
pub const DEFAULT_PROFILE: &str = "default";

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration server could not be reached or refused the request.
    #[error("configuration unavailable from {url}: {reason}")]
    Unavailable { url: String, reason: String },

    /// The response body is not a configuration document.
    #[error("configuration malformed: {0}")]
    Malformed(#[from] serde_yaml::Error),

    /// The document parsed but contains unusable values.
    #[error("configuration invalid: {}", join_errors(.0))]
    Invalid(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Location of a configuration document on the configuration server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSource {
    pub protocol: String,
    /// Host and port of the configuration server.
    pub address: String,
    pub application: String,
    pub profile: String,
}

impl ConfigSource {
    /// `{protocol}://{address}/{application}-{profile}.yml`
    pub fn url(&self) -> String {
        format!(
            "{}://{}/{}-{}.yml",
            self.protocol, self.address, self.application, self.profile
        )
    }
}

impl Default for ConfigSource {
    fn default() -> Self {
        Self {
            protocol: DEFAULT_PROTOCOL.to_string(),
            address: DEFAULT_ADDRESS.to_string(),
            application: DEFAULT_APPLICATION.to_string(),
            profile: DEFAULT_PROFILE.to_string(),
        }
    }
}

/// Fetches and decodes the service configuration.
pub struct ConfigClient {
    source: ConfigSource,
    http: reqwest::Client,
}

impl ConfigClient {
    pub fn new(source: ConfigSource) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| ConfigError::Unavailable {
                url: source.url(),
                reason: e.to_string(),
            })?;
        Ok(Self { source, http })
    }

    pub fn source(&self) -> &ConfigSource {
        &self.source
    }

    /// Issue a single GET for the document and decode it. No retries.
    pub async fn fetch(&self) -> Result<ServiceConfig, ConfigError> {
        let url = self.source.url();
        let unavailable = |reason: String| ConfigError::Unavailable {
            url: url.clone(),
            reason,
        };

        tracing::debug!(url = %url, "Fetching configuration");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(unavailable(format!("server responded with {}", status)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| unavailable(format!("reading body: {}", e)))?;

        parse_config(&body)
    }
}

/// Decode and validate a YAML configuration document.
pub fn parse_config(body: &str) -> Result<ServiceConfig, ConfigError> {
    let config: ServiceConfig = serde_yaml::from_str(body)?;
    validate_config(&config).map_err(ConfigError::Invalid)?;
    Ok(config)
}
