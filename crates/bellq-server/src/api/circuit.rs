//! Circuit execution endpoint.

use std::error::Error as _;
use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde_json::Value;
use tracing::info;

use crate::dto::{RunCircuitResponse, ShotCount};
use crate::error::ApiError;
use crate::runner;
use crate::state::AppState;

/// POST /run-circuit - Run the Bell-state circuit and return its counts.
pub async fn run_circuit(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<RunCircuitResponse>, ApiError> {
    let Json(body) = body.map_err(rejection_to_error)?;
    let Value::Object(fields) = body else {
        return Err(ApiError::BadRequest(
            "Request body must be a JSON object".to_string(),
        ));
    };

    let shots = ShotCount::from_field(fields.get("shots"), state.config.default_shots)?;
    info!(shots = shots.0, "Running quantum circuit");

    let counts = runner::run_bell_state(state.backend.as_ref(), shots).await?;
    Ok(Json(RunCircuitResponse::new(counts)))
}

fn rejection_to_error(rejection: JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::BadRequest("Request must be JSON".to_string())
        }
        JsonRejection::JsonSyntaxError(e) => {
            let detail = e.source().map_or_else(|| e.body_text(), ToString::to_string);
            ApiError::BadRequest(format!("Invalid JSON body: {detail}"))
        }
        JsonRejection::JsonDataError(e) => {
            ApiError::BadRequest(format!("Invalid JSON body: {}", e.body_text()))
        }
        other => ApiError::Rejected(other.status(), other.body_text()),
    }
}
