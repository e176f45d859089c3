//! Middleware chain wrapped around the route table.
//!
//! # Order (outer → inner)
//! ```text
//! request id  (set x-request-id if absent, copy it onto the response)
//!     → logging      (before/after log lines, request metrics)
//!     → catch panic  (a panicking handler becomes a 500)
//!     → cors         (response headers, preflight short-circuit)
//!     → body timeout (10s to read the request body)
//!     → body limit   (1 MiB)
//!     → timeout      (10s to produce the response, 408 after that)
//!     → routes
//! ```
//!
//! `ServiceBuilder` applies layers top to bottom as outer to inner, so the
//! order above is exactly the registration order in [`apply_with_limits`].
//! The response timeout sits innermost: it builds its 408 with an empty
//! default body, which the body-limit response type does not provide.

pub mod cors;
pub mod logging;

use std::sync::Arc;
use std::time::Duration;

use axum::{http::HeaderName, middleware, Router};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::{RequestBodyTimeoutLayer, TimeoutLayer},
};

pub use cors::{cors_middleware, CorsPolicy};
pub use logging::logging_middleware;

pub const X_REQUEST_ID: &str = "x-request-id";

pub const READ_TIMEOUT: Duration = Duration::from_secs(10);
pub const WRITE_TIMEOUT: Duration = Duration::from_secs(10);
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Per-request time and size bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Time allowed for the request body to arrive.
    pub read_timeout: Duration,
    /// Time allowed for the handler to produce a response.
    pub write_timeout: Duration,
    pub max_body_bytes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            read_timeout: READ_TIMEOUT,
            write_timeout: WRITE_TIMEOUT,
            max_body_bytes: MAX_BODY_BYTES,
        }
    }
}

/// Wrap `routes` with the full middleware chain and the default limits.
pub fn apply(routes: Router, cors: CorsPolicy) -> Router {
    apply_with_limits(routes, cors, Limits::default())
}

#[allow(deprecated)]
pub fn apply_with_limits(routes: Router, cors: CorsPolicy, limits: Limits) -> Router {
    let request_id = HeaderName::from_static(X_REQUEST_ID);

    let chain = ServiceBuilder::new()
        .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
        .layer(PropagateRequestIdLayer::new(request_id))
        .layer(middleware::from_fn(logging_middleware))
        .layer(CatchPanicLayer::new())
        .layer(middleware::from_fn_with_state(Arc::new(cors), cors_middleware))
        .layer(RequestBodyTimeoutLayer::new(limits.read_timeout))
        .layer(RequestBodyLimitLayer::new(limits.max_body_bytes))
        .layer(TimeoutLayer::new(limits.write_timeout));

    routes.layer(chain)
}
