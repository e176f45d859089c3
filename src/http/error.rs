//! Mapping of service errors onto HTTP responses.
//!
//! Every error body has the `{ "code": u16, "message": string }` shape
//! published as `api.HTTPErrorResponse` in the API description.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::controllers::ControllerError;
use crate::repository::RepositoryError;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: u16,
    pub message: String,
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::BadRequest(m) | ApiError::NotFound(m) | ApiError::Conflict(m) => m,
            ApiError::Internal => "internal server error".to_string(),
        };
        let body = ErrorBody {
            code: status.as_u16(),
            message,
        };
        (status, Json(body)).into_response()
    }
}

impl From<ControllerError> for ApiError {
    fn from(err: ControllerError) -> Self {
        match err {
            ControllerError::Validation(msg) => ApiError::BadRequest(msg),
            ControllerError::Repository(err) => err.into(),
        }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ApiError::NotFound("user not found".into()),
            RepositoryError::Conflict(detail) => {
                tracing::debug!(constraint = %detail, "Uniqueness conflict");
                ApiError::Conflict("username or email already in use".into())
            }
            RepositoryError::Store { operation, source } => {
                tracing::error!(operation, error = %source, "Store error");
                ApiError::Internal
            }
            RepositoryError::LockPoisoned => {
                tracing::error!("User store lock poisoned");
                ApiError::Internal
            }
        }
    }
}
