//! TLS setup from the `ssl` configuration section.

use std::path::{Path, PathBuf};

use axum_server::tls_rustls::RustlsConfig;
use thiserror::Error;

use crate::config::SslConfig;

#[derive(Debug, Error)]
pub enum TlsError {
    #[error("TLS requested but ssl.server-crt-file and ssl.server-key-file are not both set")]
    NotConfigured,

    #[error("{what} not found: {}", path.display())]
    MissingFile { what: &'static str, path: PathBuf },

    #[error("failed to load TLS material: {0}")]
    Load(#[from] std::io::Error),
}

fn existing(what: &'static str, path: &str) -> Result<PathBuf, TlsError> {
    let path = Path::new(path);
    if path.is_file() {
        Ok(path.to_path_buf())
    } else {
        Err(TlsError::MissingFile {
            what,
            path: path.to_path_buf(),
        })
    }
}

/// Build the rustls server config named by `ssl`.
///
/// Both paths must be set and point at files; PEM parsing is left to rustls.
pub async fn load_tls_config(ssl: &SslConfig) -> Result<RustlsConfig, TlsError> {
    if ssl.server_crt_file.is_empty() || ssl.server_key_file.is_empty() {
        return Err(TlsError::NotConfigured);
    }
    let cert = existing("certificate", &ssl.server_crt_file)?;
    let key = existing("private key", &ssl.server_key_file)?;

    let config = RustlsConfig::from_pem_file(&cert, &key).await?;
    tracing::info!(cert = %cert.display(), "TLS configuration loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ssl(cert: &Path, key: &Path) -> SslConfig {
        SslConfig {
            server_crt_file: cert.display().to_string(),
            server_key_file: key.display().to_string(),
        }
    }

    #[tokio::test]
    async fn unset_paths_are_not_configured() {
        let err = load_tls_config(&SslConfig::default()).await.unwrap_err();
        assert!(matches!(err, TlsError::NotConfigured));

        let half = SslConfig {
            server_crt_file: "/etc/ssl/server.crt".into(),
            server_key_file: String::new(),
        };
        assert!(matches!(
            load_tls_config(&half).await,
            Err(TlsError::NotConfigured)
        ));
    }

    #[tokio::test]
    async fn missing_certificate_is_reported() {
        let dir = std::env::temp_dir();
        let cert = dir.join("user-service-missing.crt");
        let key = dir.join("user-service-missing.key");

        match load_tls_config(&ssl(&cert, &key)).await {
            Err(TlsError::MissingFile { what, path }) => {
                assert_eq!(what, "certificate");
                assert_eq!(path, cert);
            }
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn missing_key_is_reported() {
        let cert = std::env::temp_dir().join("user-service-present.crt");
        std::fs::write(&cert, "not really a certificate").unwrap();
        let key = std::env::temp_dir().join("user-service-absent.key");

        match load_tls_config(&ssl(&cert, &key)).await {
            Err(TlsError::MissingFile { what, .. }) => assert_eq!(what, "private key"),
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn unparsable_pem_is_a_load_error() {
        let dir = std::env::temp_dir();
        let cert = dir.join("user-service-garbage.crt");
        let key = dir.join("user-service-garbage.key");
        std::fs::write(&cert, "garbage").unwrap();
        std::fs::write(&key, "garbage").unwrap();

        assert!(matches!(
            load_tls_config(&ssl(&cert, &key)).await,
            Err(TlsError::Load(_))
        ));
    }
}
