//! Request logging middleware.
//!
//! Emits `request started` before the inner handler runs and
//! `request completed` after it returns, whatever the status.

use std::time::Instant;

use axum::{
    body::Body,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::http::middleware::X_REQUEST_ID;
use crate::observability::metrics;

pub async fn logging_middleware(req: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let request_id = req
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_owned();

    tracing::info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        "request started"
    );

    let response = next.run(req).await;

    let status = response.status();
    let elapsed = start.elapsed();
    tracing::info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        status = status.as_u16(),
        latency_ms = elapsed.as_millis() as u64,
        "request completed"
    );
    metrics::record_request(method.as_str(), status.as_u16(), elapsed);

    response
}
