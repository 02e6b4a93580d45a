use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("No message provided")]
    EmptyMessage,
    #[error("Upstream error: {0} - {1}")]
    Upstream(StatusCode, String),
    #[error("Internal error: {0}")]
    Internal(String),
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("JSON serialization/deserialization failed: {0}")]
    SerdeJson(#[from] serde_json::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::EmptyMessage => (
                StatusCode::BAD_REQUEST,
                "No message provided".to_string(),
            ),
            AppError::Upstream(status, body) => {
                error!("Upstream error {status}: {body}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Completion API returned {status}"),
                )
            }
            AppError::Reqwest(err) => {
                error!("Request error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Request failed: {err}"),
                )
            }
            AppError::SerdeJson(err) => {
                error!("Serde error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("JSON serialization/deserialization failed: {err}"),
                )
            }
            AppError::Internal(message) => {
                error!("Internal error: {message}");
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        let body = Json(json!({ "error": message }));

        (status, body).into_response()
    }
}
