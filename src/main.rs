//! User service.
//!
//! # Architecture Overview
//!
//! ```text
//!   config server ──▶ config::loader ──▶ ServiceConfig
//!                                             │
//!                        ┌────────────────────┼──────────────────┐
//!                        ▼                    ▼                  ▼
//!                 db (pool + migrations)  net (listener, tls)  observability
//!                        │                    │
//!                        ▼                    ▼
//!                 repository ◀── controllers ◀── http (middleware → handlers)
//!                                                     │
//!                                   lifecycle (signals → bounded shutdown)
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use user_service::config::loader::{
    DEFAULT_ADDRESS, DEFAULT_APPLICATION, DEFAULT_PROFILE, DEFAULT_PROTOCOL,
};
use user_service::config::{ConfigClient, ConfigSource};
use user_service::lifecycle::{signals, Shutdown, ShutdownOutcome};
use user_service::net::{listener, tls};
use user_service::observability::{logging, metrics};
use user_service::repository::{InMemoryUserRepository, PostgresUserRepository, UserRepository};
use user_service::{db, HttpServer};

#[derive(Parser, Debug)]
#[command(name = "user-service", version, about = "User accounts HTTP service")]
struct Cli {
    /// Scheme used to reach the configuration server.
    #[arg(long, env = "CONFIG_SERVER_PROTOCOL", default_value = DEFAULT_PROTOCOL)]
    config_protocol: String,

    /// Host and port of the configuration server.
    #[arg(long, env = "CONFIG_SERVER_ADDRESS", default_value = DEFAULT_ADDRESS)]
    config_address: String,

    #[arg(long, env = "CONFIG_APPLICATION", default_value = DEFAULT_APPLICATION)]
    config_application: String,

    #[arg(long, env = "CONFIG_PROFILE", default_value = DEFAULT_PROFILE)]
    config_profile: String,

    /// Serve HTTPS using the certificate and key named in the `ssl` section.
    #[arg(long, env = "USER_SERVICE_TLS")]
    tls: bool,

    /// Keep users in process memory instead of Postgres.
    #[arg(long, env = "USER_SERVICE_IN_MEMORY")]
    in_memory: bool,

    /// Emit logs as JSON lines.
    #[arg(long, env = "USER_SERVICE_LOG_JSON")]
    log_json: bool,

    /// Expose Prometheus metrics on this address.
    #[arg(long, env = "USER_SERVICE_METRICS_ADDRESS")]
    metrics_address: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_json);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "user-service starting");

    if let Some(addr) = cli.metrics_address {
        metrics::init_metrics(addr).context("failed to start metrics exporter")?;
    }

    let source = ConfigSource {
        protocol: cli.config_protocol,
        address: cli.config_address,
        application: cli.config_application,
        profile: cli.config_profile,
    };
    let client = ConfigClient::new(source)?;
    let config = match client.fetch().await {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, url = %client.source().url(), "Failed to load configuration");
            return Err(e.into());
        }
    };

    tracing::info!(
        service = %config.service.name,
        listen_address = %config.listen_address(),
        "Configuration loaded"
    );

    let repo: Arc<dyn UserRepository> = if cli.in_memory {
        tracing::warn!("Using in-memory user store; data is lost on exit");
        Arc::new(InMemoryUserRepository::new())
    } else {
        let pool = db::connect_and_migrate(&config.database)
            .await
            .context("failed to initialise database")?;
        Arc::new(PostgresUserRepository::new(pool))
    };

    let tls_config = if cli.tls {
        Some(
            tls::load_tls_config(&config.ssl)
                .await
                .context("failed to load TLS certificate")?,
        )
    } else {
        None
    };

    let (tcp, _) = listener::bind(&config.listen_address())?;

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(&shutdown);

    let server = HttpServer::new(config, repo);
    match server.run(tcp, tls_config, shutdown.notified()).await? {
        ShutdownOutcome::Graceful => tracing::info!("Shutdown complete"),
        ShutdownOutcome::TimedOut => {
            tracing::warn!("Shutdown complete; some requests were cut off")
        }
    }

    Ok(())
}
