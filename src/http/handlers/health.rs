use axum::{extract::State, Json};
use serde::Serialize;

use crate::http::server::AppState;

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub service: String,
    pub version: &'static str,
}

/// Process liveness. Does not touch the database.
pub async fn get_healthy_state(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        service: state.config.service.name.clone(),
        version: env!("CARGO_PKG_VERSION"),
    })
}
