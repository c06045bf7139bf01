use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::backend::FetchError;
use crate::content::ContentError;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Failures a page request can end in.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("post '{0}' not found")]
    NotFound(String),

    #[error("backend request failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("content processing failed: {0}")]
    Content(#[from] ContentError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(slug) => {
                warn!(slug = %slug, "Post not found");
                (StatusCode::NOT_FOUND, "Post not found")
            }
            AppError::Fetch(err) => {
                error!(error = %err, retriable = err.should_retry(), "Backend fetch failed");
                (StatusCode::BAD_GATEWAY, "Content backend unavailable")
            }
            AppError::Content(err) => {
                error!(error = %err, "Content processing failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to process content")
            }
        };

        (
            status,
            Json(ErrorResponse {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}
