//! Error types for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use bellq_hal::HalError;

/// API error type that converts to HTTP responses.
///
/// The display text is sent to the client unchanged as the `error` field.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request body or one of its fields was unusable.
    #[error("{0}")]
    BadRequest(String),

    /// The body was refused before it could be read as JSON.
    #[error("{1}")]
    Rejected(StatusCode, String),

    /// Running the circuit failed.
    #[error("{0}")]
    Execution(String),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Rejected(status, _) => *status,
            ApiError::Execution(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::BadRequest(message) | ApiError::Rejected(_, message) => {
                tracing::debug!(%message, "Rejected request");
            }
            ApiError::Execution(message) => tracing::warn!(%message, "Circuit execution failed"),
        }

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}

impl From<HalError> for ApiError {
    fn from(e: HalError) -> Self {
        ApiError::Execution(e.to_string())
    }
}
