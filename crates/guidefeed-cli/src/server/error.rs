//! API error types and handling.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use guidefeed::FeedbackError;
use serde::Serialize;

/// API error type.
#[derive(Debug)]
pub enum ApiError {
    /// Internal server error.
    Internal(String),
    /// The sheet source could not deliver anything yet.
    Unavailable(String),
    /// Error from the guidefeed library.
    Feedback(FeedbackError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
            ApiError::Unavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "unavailable"),
            ApiError::Feedback(e) => match e {
                FeedbackError::InvalidDate(_) => (StatusCode::BAD_REQUEST, "invalid_date"),
                FeedbackError::MissingColumn { .. } => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "missing_column")
                }
                FeedbackError::Fetch { .. }
                | FeedbackError::Http(_)
                | FeedbackError::Io { .. }
                | FeedbackError::Csv(_)
                | FeedbackError::EmptyData(_) => (StatusCode::SERVICE_UNAVAILABLE, "source_unavailable"),
                FeedbackError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = self.parts();
        let message = match self {
            ApiError::Internal(msg) | ApiError::Unavailable(msg) => msg,
            ApiError::Feedback(e) => e.to_string(),
        };

        if status.is_server_error() {
            tracing::error!(%status, error, %message, "request failed");
        }

        (
            status,
            Json(ErrorResponse {
                error: error.to_string(),
                message,
            }),
        )
            .into_response()
    }
}

impl From<FeedbackError> for ApiError {
    fn from(err: FeedbackError) -> Self {
        ApiError::Feedback(err)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
            ApiError::Unavailable(msg) => write!(f, "Unavailable: {}", msg),
            ApiError::Feedback(e) => write!(f, "Feedback error: {}", e),
        }
    }
}

impl std::error::Error for ApiError {}
