//! Application state shared by request handlers.

use std::sync::Arc;

use bellq_adapter_sim::SimulatorBackend;
use bellq_hal::Backend;

use crate::config::ServerConfig;

/// Shared application state.
///
/// Built once at startup and never mutated afterwards.
pub struct AppState {
    /// Backend every circuit runs on.
    pub backend: Arc<dyn Backend>,
    /// Server configuration.
    pub config: ServerConfig,
}

impl AppState {
    /// Create state around an explicit backend.
    pub fn new(backend: Arc<dyn Backend>, config: ServerConfig) -> Self {
        Self { backend, config }
    }

    /// Create state with a simulator sized from the configuration.
    pub fn with_simulator(config: ServerConfig) -> Self {
        let backend = Arc::new(SimulatorBackend::with_limits(
            config.max_qubits,
            config.max_shots,
        ));
        Self::new(backend, config)
    }
}
