//! Backend trait.
//!
//! The [`Backend`] trait is the whole contract between the service and an
//! executor:
//!
//! ```text
//!   capabilities() ──→ validate() ──→ run()
//!    (sync, &ref)       (async)       (async)
//! ```
//!
//! - **Async-native**: execution is async so a backend may offload work.
//! - **Thread-safe**: `Send + Sync` bound enables sharing one backend across
//!   request handlers.
//! - **Single call**: `run()` executes and returns counts. There is no job
//!   handle to poll; each call is independent and keeps no state.

use async_trait::async_trait;

use bellq_ir::Circuit;

use crate::capability::Capabilities;
use crate::error::HalResult;
use crate::result::ExecutionResult;

/// Trait for quantum backends.
///
/// # Contract
///
/// - `capabilities()` MUST be synchronous and infallible. Capabilities
///   MUST be cached at construction time.
/// - `validate()` MUST check the circuit against backend constraints
///   without executing it.
/// - `run()` MUST reject a shot count of zero or above
///   `capabilities().max_shots` with `HalError::InvalidShots`.
/// - `run()` MUST return counts whose total equals the executed shots.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Get the name of this backend.
    fn name(&self) -> &str;

    /// Get the capabilities of this backend.
    fn capabilities(&self) -> &Capabilities;

    /// Validate a circuit against backend constraints.
    async fn validate(&self, circuit: &Circuit) -> HalResult<ValidationResult>;

    /// Execute a circuit for `shots` repetitions and return the counts.
    async fn run(&self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult>;
}

/// Result of circuit validation against backend constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// Circuit is valid and can be run directly.
    Valid,
    /// Circuit is invalid for this backend.
    Invalid {
        /// Reasons the circuit is invalid.
        reasons: Vec<String>,
    },
}

impl ValidationResult {
    /// Check if the circuit is valid.
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    /// Build a result from a list of problems; empty means valid.
    pub fn from_reasons(reasons: Vec<String>) -> Self {
        if reasons.is_empty() {
            ValidationResult::Valid
        } else {
            ValidationResult::Invalid { reasons }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HalError;
    use crate::result::Counts;

    /// Backend that reports every outcome as all-zeros.
    struct ZeroBackend {
        caps: Capabilities,
    }

    #[async_trait]
    impl Backend for ZeroBackend {
        fn name(&self) -> &str {
            "zero"
        }

        fn capabilities(&self) -> &Capabilities {
            &self.caps
        }

        async fn validate(&self, _circuit: &Circuit) -> HalResult<ValidationResult> {
            Ok(ValidationResult::Valid)
        }

        async fn run(&self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult> {
            if shots == 0 {
                return Err(HalError::InvalidShots("zero".into()));
            }
            let mut counts = Counts::new();
            counts.insert("0".repeat(circuit.num_clbits()), u64::from(shots));
            Ok(ExecutionResult::new(counts, shots))
        }
    }

    #[test]
    fn test_validation_result_is_valid() {
        assert!(ValidationResult::Valid.is_valid());
        assert!(!ValidationResult::Invalid { reasons: vec![] }.is_valid());
        assert_eq!(ValidationResult::from_reasons(vec![]), ValidationResult::Valid);
        assert!(!ValidationResult::from_reasons(vec!["too wide".into()]).is_valid());
    }

    #[tokio::test]
    async fn test_backend_is_object_safe() {
        let backend: Box<dyn Backend> = Box::new(ZeroBackend {
            caps: Capabilities::simulator(2, 10),
        });
        let circuit = Circuit::bell().unwrap();

        let result = backend.run(&circuit, 5).await.unwrap();
        assert_eq!(result.counts.get("00"), 5);
        assert!(backend.run(&circuit, 0).await.is_err());
        assert_eq!(backend.capabilities().max_shots, 10);
    }
}
