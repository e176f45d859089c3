//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request id, logging, cors, timeouts, limits)
//! - Serve on a pre-bound listener, plain or TLS
//! - Bounded graceful shutdown

use std::future::Future;
use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use axum_server::{tls_rustls::RustlsConfig, Handle};
use thiserror::Error;

use crate::config::ServiceConfig;
use crate::controllers::UserController;
use crate::http::handlers::{self, docs, health, user};
use crate::http::middleware::{self, CorsPolicy};
use crate::lifecycle::ShutdownOutcome;
use crate::repository::UserRepository;

/// Time in-flight requests get to finish once shutdown starts.
pub const DEFAULT_SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("server task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServiceConfig>,
    pub users: UserController,
}

/// Route table plus the full middleware chain.
pub fn build_router(state: AppState) -> Router {
    let routes = Router::new()
        .route(
            "/v1/user/{id}",
            get(user::get_user_by_id).post(user::update_user),
        )
        .route("/v1/users/streaming", get(user::list_streaming_users))
        .route("/v1/health", get(health::get_healthy_state))
        .route("/v1/swagger", get(docs::get_api_description))
        .fallback(handlers::route_not_found)
        .with_state(state);

    middleware::apply(routes, CorsPolicy::default())
}

/// HTTP server for the user service.
pub struct HttpServer {
    router: Router,
    grace: Duration,
}

impl HttpServer {
    pub fn new(config: ServiceConfig, repo: Arc<dyn UserRepository>) -> Self {
        let state = AppState {
            config: Arc::new(config),
            users: UserController::new(repo),
        };
        Self::from_router(build_router(state))
    }

    /// Serve an arbitrary router with the same lifecycle.
    pub fn from_router(router: Router) -> Self {
        Self {
            router,
            grace: DEFAULT_SHUTDOWN_GRACE,
        }
    }

    pub fn with_shutdown_grace(mut self, grace: Duration) -> Self {
        self.grace = grace;
        self
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve until `shutdown` resolves, then drain for at most the grace period.
    pub async fn run<F>(
        self,
        listener: TcpListener,
        tls: Option<RustlsConfig>,
        shutdown: F,
    ) -> Result<ShutdownOutcome, ServerError>
    where
        F: Future<Output = ()>,
    {
        listener.set_nonblocking(true)?;
        let addr = listener.local_addr()?;
        let handle = Handle::new();
        let app = self.router.into_make_service();

        let mut server = match tls {
            Some(tls) => {
                tracing::info!(address = %addr, "HTTPS server starting");
                tokio::spawn(
                    axum_server::tls_rustls::from_tcp_rustls(listener, tls)
                        .handle(handle.clone())
                        .serve(app),
                )
            }
            None => {
                tracing::info!(address = %addr, "HTTP server starting");
                tokio::spawn(
                    axum_server::from_tcp(listener)
                        .handle(handle.clone())
                        .serve(app),
                )
            }
        };

        tokio::select! {
            result = &mut server => {
                result??;
                tracing::warn!("HTTP server stopped before shutdown was requested");
                return Ok(ShutdownOutcome::Graceful);
            }
            _ = shutdown => {}
        }

        tracing::info!(grace_ms = self.grace.as_millis() as u64, "Shutting down server");
        handle.graceful_shutdown(None);

        match tokio::time::timeout(self.grace, &mut server).await {
            Ok(result) => {
                result??;
                tracing::info!("Server exited gracefully");
                Ok(ShutdownOutcome::Graceful)
            }
            Err(_) => {
                tracing::warn!(
                    open_connections = handle.connection_count(),
                    "Server forced to shutdown"
                );
                handle.shutdown();
                server.abort();
                Ok(ShutdownOutcome::TimedOut)
            }
        }
    }
}
