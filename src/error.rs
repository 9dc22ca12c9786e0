//! Request-path errors and their HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Everything that can fail while serving a prediction.
///
/// Input problems map to 422 so the caller can fix the request; model
/// failures map to 500 and are logged server-side.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("invalid timestamp {0:?}: not a recognizable date-time")]
    InvalidTimestamp(String),

    #[error("invalid no2_mv {0}: ln(1 + no2_mv) requires no2_mv > -1")]
    No2MvOutOfRange(f64),

    #[error("inference failed: {0}")]
    Inference(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidTimestamp(_) | ApiError::No2MvOutOfRange(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::Inference(err) => {
                tracing::error!("inference error: {err:#}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        }));
        (status, body).into_response()
    }
}
