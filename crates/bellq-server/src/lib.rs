//! bellq server: runs a Bell-state circuit over HTTP.
//!
//! A single endpoint, `POST /run-circuit`, accepts an optional shot count,
//! runs the two-qubit Bell circuit on the configured backend and returns the
//! measured counts:
//!
//! ```text
//! POST /run-circuit  {"shots": 100}
//! 200 {"message": "Quantum circuit executed successfully.",
//!      "results": {"00": 52, "11": 48}}
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use bellq_server::{AppState, ServerConfig, create_router};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig::default();
//!     let state = Arc::new(AppState::with_simulator(config.clone()));
//!
//!     let app = create_router(state);
//!     let listener = tokio::net::TcpListener::bind(config.bind_address).await.unwrap();
//!     axum::serve(listener, app).await.unwrap();
//! }
//! ```

pub mod api;
pub mod config;
pub mod dto;
pub mod error;
pub mod runner;
pub mod server;
pub mod state;
pub mod tracing_config;

pub use config::{ConfigError, LoggingConfig, ServerConfig};
pub use dto::{RunCircuitResponse, ShotCount};
pub use error::ApiError;
pub use server::create_router;
pub use state::AppState;
pub use tracing_config::{LogFormat, init_tracing};
