//! Axum server setup and routing.

use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::post,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::api;
use crate::config::ServerConfig;
use crate::state::AppState;

/// Create the Axum router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = build_cors_layer(&state.config);

    Router::new()
        .route("/run-circuit", post(api::circuit::run_circuit))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Any origin for `*`, otherwise the configured list.
///
/// An origin setting that fails validation denies every cross-origin request.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    match config.cors_origin_list() {
        Ok(None) => layer.allow_origin(Any),
        Ok(Some(allowed)) => layer.allow_origin(allowed),
        Err(e) => {
            warn!("{e}; cross-origin requests are disabled");
            layer.allow_origin(Vec::<HeaderValue>::new())
        }
    }
}
