use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use uuid::Uuid;

use crate::domain::{UpdateUser, User};
use crate::http::error::ApiError;
use crate::http::server::AppState;

/// The identifier is validated before any repository call is made.
fn parse_user_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw)
        .map_err(|_| ApiError::BadRequest(format!("'{}' is not a valid user id", raw)))
}

pub async fn get_user_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>, ApiError> {
    let id = parse_user_id(&id)?;
    let user = state.users.get_user(id).await?;
    Ok(Json(user))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateUser>, JsonRejection>,
) -> Result<Json<User>, ApiError> {
    let id = parse_user_id(&id)?;
    let Json(update) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let user = state.users.update_user(id, update).await?;
    Ok(Json(user))
}

pub async fn list_streaming_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(state.users.streaming_users().await?))
}
