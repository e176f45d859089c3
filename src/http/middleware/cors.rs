//! CORS middleware.
//!
//! Adds the configured `Access-Control-*` headers to every response and
//! answers preflight requests itself, without calling the inner handler.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, HeaderValue, Method, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Headers the CORS middleware writes.
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    pub allow_origin: HeaderValue,
    pub allow_methods: HeaderValue,
    pub allow_headers: HeaderValue,
    pub max_age: Duration,
}

impl Default for CorsPolicy {
    fn default() -> Self {
        Self {
            allow_origin: HeaderValue::from_static("*"),
            allow_methods: HeaderValue::from_static("GET, POST, PUT, PATCH, DELETE, OPTIONS"),
            allow_headers: HeaderValue::from_static(
                "Accept, Authorization, Content-Type, X-Request-Id",
            ),
            max_age: Duration::from_secs(600),
        }
    }
}

impl CorsPolicy {
    fn apply(&self, headers: &mut HeaderMap) {
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, self.allow_origin.clone());
        headers.insert(header::ACCESS_CONTROL_ALLOW_METHODS, self.allow_methods.clone());
        headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, self.allow_headers.clone());
        headers.insert(
            header::ACCESS_CONTROL_MAX_AGE,
            HeaderValue::from(self.max_age.as_secs()),
        );
    }
}

fn is_preflight(req: &Request<Body>) -> bool {
    req.method() == Method::OPTIONS
        && req
            .headers()
            .contains_key(header::ACCESS_CONTROL_REQUEST_METHOD)
}

pub async fn cors_middleware(
    State(policy): State<Arc<CorsPolicy>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if is_preflight(&req) {
        tracing::debug!(path = %req.uri().path(), "Answering CORS preflight");
        let mut response = StatusCode::NO_CONTENT.into_response();
        policy.apply(response.headers_mut());
        return response;
    }

    let mut response = next.run(req).await;
    policy.apply(response.headers_mut());
    response
}
