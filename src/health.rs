use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use tracing::{error, info};
use utoipa::ToSchema;

use crate::app_state::AppState;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    status: String,
    backend: String,
}

#[utoipa::path(
    get,
    path = "/healthz",
    tag = "health",
    responses(
        (status = 200, description = "Health check successful", body = HealthResponse),
        (status = 503, description = "Content backend unreachable")
    )
)]
pub async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, StatusCode> {
    match state.source.ping().await {
        Ok(_) => {
            info!("Health check passed");
            Ok(Json(HealthResponse {
                status: "OK".to_string(),
                backend: "healthy".to_string(),
            }))
        }
        Err(err) => {
            error!(error = %err, "Backend health check failed");
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}
