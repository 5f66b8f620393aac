//! Builds the Bell-state circuit and executes it on a backend.

use bellq_hal::{Backend, Counts, HalError, HalResult};
use bellq_ir::Circuit;

use crate::dto::ShotCount;

/// Run the Bell-state circuit for `shots` repetitions.
///
/// The circuit is rebuilt on every call and backend errors are returned
/// unchanged. A shot count outside the backend's `u32` range is reported as
/// [`HalError::InvalidShots`].
pub async fn run_bell_state(backend: &dyn Backend, shots: ShotCount) -> HalResult<Counts> {
    let shots = u32::try_from(shots.0).map_err(|_| {
        HalError::InvalidShots(format!(
            "{} is not a valid shot count; expected an integer between 1 and {}",
            shots.0,
            backend.capabilities().max_shots
        ))
    })?;

    let circuit = Circuit::bell()?;
    let result = backend.run(&circuit, shots).await?;
    Ok(result.counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bellq_adapter_sim::SimulatorBackend;

    #[tokio::test]
    async fn test_bell_counts_sum_to_shots() {
        let backend = SimulatorBackend::new();
        let counts = run_bell_state(&backend, ShotCount(100)).await.unwrap();

        assert_eq!(counts.total(), 100);
        for (bits, _) in counts.iter() {
            assert!(bits == "00" || bits == "11", "unexpected outcome {bits}");
        }
    }

    #[tokio::test]
    async fn test_negative_shots_are_invalid() {
        let backend = SimulatorBackend::new();
        let err = run_bell_state(&backend, ShotCount(-5)).await.unwrap_err();

        assert!(matches!(err, HalError::InvalidShots(_)));
        assert!(err.to_string().contains("-5"));
    }

    #[tokio::test]
    async fn test_zero_shots_rejected_by_backend() {
        let backend = SimulatorBackend::new();
        let err = run_bell_state(&backend, ShotCount(0)).await.unwrap_err();
        assert!(matches!(err, HalError::InvalidShots(_)));
    }

    #[tokio::test]
    async fn test_over_limit_shots_rejected_by_backend() {
        let backend = SimulatorBackend::with_limits(20, 1000);
        let err = run_bell_state(&backend, ShotCount(1001)).await.unwrap_err();
        assert!(err.to_string().contains("at most 1000"));
    }
}
