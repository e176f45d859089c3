//! Request handlers.
//!
//! Handlers only translate between HTTP and controller calls; status code
//! mapping lives in `http::error`.

pub mod docs;
pub mod health;
pub mod user;

use axum::http::Uri;

use crate::http::error::ApiError;

/// Catch-all for unmatched routes.
pub async fn route_not_found(uri: Uri) -> ApiError {
    tracing::debug!(path = %uri.path(), "No route matched");
    ApiError::NotFound(format!("route {} not found", uri.path()))
}
