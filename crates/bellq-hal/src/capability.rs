//! Backend capability descriptions.

use serde::{Deserialize, Serialize};

/// Static limits and features a backend reports about itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    /// Backend name.
    pub name: String,
    /// Maximum number of qubits per circuit.
    pub num_qubits: u32,
    /// Maximum number of shots per run.
    pub max_shots: u32,
    /// Whether this backend is a simulator.
    pub is_simulator: bool,
    /// Names of the gates the backend executes natively.
    pub gate_set: Vec<String>,
}

impl Capabilities {
    /// Capabilities of a local simulator.
    pub fn simulator(num_qubits: u32, max_shots: u32) -> Self {
        Self {
            name: "simulator".into(),
            num_qubits,
            max_shots,
            is_simulator: true,
            gate_set: vec![],
        }
    }

    /// Set the supported gate names.
    pub fn with_gate_set<I, S>(mut self, gates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.gate_set = gates.into_iter().map(Into::into).collect();
        self
    }

    /// Check whether a gate name is supported.
    pub fn supports_gate(&self, name: &str) -> bool {
        self.gate_set.iter().any(|g| g == name)
    }
}
