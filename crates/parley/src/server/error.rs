//! HTTP error responses
//!
//! Client mistakes map to 400 with a short fixed message. Internal failures
//! map to 500 with a generic message; the detail only reaches the log.
//! Restart is the exception and echoes the failure detail, since it is an
//! operator endpoint.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Missing required fields")]
    MissingFields,

    #[error("Missing users")]
    MissingUsers,

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Failed to send message: {0}")]
    SendFailed(String),

    #[error("Failed to fetch conversation: {0}")]
    FetchFailed(String),

    #[error("Restart failed: {0}")]
    RestartFailed(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingFields | ApiError::MissingUsers | ApiError::InvalidBody(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::SendFailed(_) | ApiError::FetchFailed(_) | ApiError::RestartFailed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn body(&self) -> serde_json::Value {
        match self {
            ApiError::MissingFields => serde_json::json!({"error": "Missing required fields"}),
            ApiError::MissingUsers => serde_json::json!({"error": "Missing users"}),
            ApiError::InvalidBody(_) => serde_json::json!({"error": "Invalid request body"}),
            ApiError::SendFailed(_) => serde_json::json!({"error": "Failed to send message"}),
            ApiError::FetchFailed(_) => {
                serde_json::json!({"error": "Failed to fetch conversation"})
            }
            ApiError::RestartFailed(details) => serde_json::json!({
                "error": "Restart failed",
                "details": details,
            }),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status().is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, "Rejected request");
        }

        (self.status(), Json(self.body())).into_response()
    }
}
