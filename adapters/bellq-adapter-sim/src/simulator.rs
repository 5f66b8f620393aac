//! Simulator backend implementation.

use async_trait::async_trait;
use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};
use std::time::Instant;
use tracing::{debug, instrument};

use bellq_hal::{
    Backend, Capabilities, Counts, ExecutionResult, HalError, HalResult, ValidationResult,
};
use bellq_ir::{Circuit, Instruction, InstructionKind, StandardGate};

use crate::statevector::Statevector;

/// Default qubit limit.
pub const DEFAULT_MAX_QUBITS: u32 = 20;

/// Default per-run shot limit.
pub const DEFAULT_MAX_SHOTS: u32 = 1_000_000;

const SUPPORTED_GATES: [StandardGate; 15] = [
    StandardGate::I,
    StandardGate::X,
    StandardGate::Y,
    StandardGate::Z,
    StandardGate::H,
    StandardGate::S,
    StandardGate::Sdg,
    StandardGate::T,
    StandardGate::Tdg,
    StandardGate::SX,
    StandardGate::CX,
    StandardGate::CY,
    StandardGate::CZ,
    StandardGate::Swap,
    StandardGate::CCX,
];

/// Local simulator backend.
///
/// Simulates circuits with a full statevector. Every call to
/// [`Backend::run`] starts from |0...0⟩ and draws fresh randomness, so runs
/// are independent and not reproducible.
pub struct SimulatorBackend {
    capabilities: Capabilities,
}

impl SimulatorBackend {
    /// Create a new simulator backend with default limits.
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_MAX_QUBITS, DEFAULT_MAX_SHOTS)
    }

    /// Create a simulator with custom qubit and shot limits.
    pub fn with_limits(max_qubits: u32, max_shots: u32) -> Self {
        Self {
            capabilities: Capabilities::simulator(max_qubits, max_shots)
                .with_gate_set(SUPPORTED_GATES.iter().map(StandardGate::name)),
        }
    }

    fn check_shots(&self, shots: u32) -> HalResult<()> {
        if shots == 0 {
            return Err(HalError::InvalidShots(
                "shots must be at least 1, got 0".to_string(),
            ));
        }
        if shots > self.capabilities.max_shots {
            return Err(HalError::InvalidShots(format!(
                "{shots} shots requested but simulator allows at most {}",
                self.capabilities.max_shots
            )));
        }
        Ok(())
    }

    fn check_size(&self, circuit: &Circuit) -> HalResult<()> {
        if circuit.num_qubits() > self.capabilities.num_qubits as usize {
            return Err(HalError::CircuitTooLarge(format!(
                "Circuit has {} qubits but simulator only supports {}",
                circuit.num_qubits(),
                self.capabilities.num_qubits
            )));
        }
        Ok(())
    }
}

impl Default for SimulatorBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for SimulatorBackend {
    fn name(&self) -> &str {
        &self.capabilities.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    async fn validate(&self, circuit: &Circuit) -> HalResult<ValidationResult> {
        let mut reasons = vec![];
        if let Err(e) = self.check_size(circuit) {
            reasons.push(e.to_string());
        }
        for gate in circuit.instructions().iter().filter_map(Instruction::as_gate) {
            if !self.capabilities.supports_gate(gate.name()) {
                reasons.push(format!("Unsupported gate: {}", gate.name()));
            }
        }
        Ok(ValidationResult::from_reasons(reasons))
    }

    #[instrument(skip(self, circuit), fields(circuit = circuit.name()))]
    async fn run(&self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult> {
        self.check_shots(shots)?;
        self.check_size(circuit)?;

        // Sampling is CPU-bound; keep it off the async workers.
        let circuit = circuit.clone();
        tokio::task::spawn_blocking(move || run_simulation(&circuit, shots))
            .await
            .map_err(|e| HalError::JobFailed(format!("simulation task failed: {e}")))?
    }
}

/// Run a circuit to completion on the current thread.
fn run_simulation(circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult> {
    let start = Instant::now();
    debug!(
        "Starting simulation: {} qubits, {} shots",
        circuit.num_qubits(),
        shots
    );

    let counts = if samples_from_final_state(circuit) {
        sample_final_state(circuit, shots)?
    } else {
        simulate_each_shot(circuit, shots)
    };

    let elapsed = start.elapsed();
    debug!("Simulation completed in {:?}", elapsed);

    Ok(ExecutionResult::new(counts, shots).with_execution_time(elapsed.as_millis() as u64))
}

/// Whether one evolution of the state describes every shot.
///
/// Needs all measurements at the end of their wires and no resets, since both
/// collapse the state differently from shot to shot.
fn samples_from_final_state(circuit: &Circuit) -> bool {
    circuit.has_terminal_measurements()
        && !circuit
            .instructions()
            .iter()
            .any(|inst| matches!(inst.kind, InstructionKind::Reset))
}

/// Evolve the state once and draw every shot from the final distribution.
fn sample_final_state(circuit: &Circuit, shots: u32) -> HalResult<Counts> {
    let mut sv = Statevector::new(circuit.num_qubits());
    let mut measurements = vec![];

    for inst in circuit.instructions() {
        match inst.kind {
            InstructionKind::Gate(gate) => sv.apply_gate(gate, &qubit_indices(inst)),
            InstructionKind::Measure => {
                measurements.extend(
                    inst.qubits
                        .iter()
                        .zip(&inst.clbits)
                        .map(|(q, c)| (q.index(), c.index())),
                );
            }
            // Excluded by samples_from_final_state.
            InstructionKind::Reset | InstructionKind::Barrier => {}
        }
    }

    let dist = WeightedIndex::new(sv.probabilities())
        .map_err(|e| HalError::Backend(format!("invalid final state: {e}")))?;

    let mut rng = rand::thread_rng();
    let mut outcome_counts = vec![0u64; 1 << circuit.num_qubits()];
    for _ in 0..shots {
        outcome_counts[dist.sample(&mut rng)] += 1;
    }

    let mut counts = Counts::new();
    for (outcome, &n) in outcome_counts.iter().enumerate() {
        if n == 0 {
            continue;
        }
        let mut clbits = vec![false; circuit.num_clbits()];
        for &(qubit, clbit) in &measurements {
            clbits[clbit] = outcome & (1 << qubit) != 0;
        }
        counts.insert(bitstring(&clbits), n);
    }

    Ok(counts)
}

/// Simulate every shot from scratch, collapsing on each measurement.
fn simulate_each_shot(circuit: &Circuit, shots: u32) -> Counts {
    let mut rng = rand::thread_rng();
    let mut counts = Counts::new();

    for shot in 0..shots {
        let clbits = simulate_shot(circuit, &mut rng);
        counts.insert(bitstring(&clbits), 1);

        if shot > 0 && shot % 1000 == 0 {
            debug!("Completed {} shots", shot);
        }
    }

    counts
}

fn simulate_shot<R: Rng>(circuit: &Circuit, rng: &mut R) -> Vec<bool> {
    let mut sv = Statevector::new(circuit.num_qubits());
    let mut clbits = vec![false; circuit.num_clbits()];

    for inst in circuit.instructions() {
        match inst.kind {
            InstructionKind::Gate(gate) => sv.apply_gate(gate, &qubit_indices(inst)),
            InstructionKind::Measure => {
                for (q, c) in inst.qubits.iter().zip(&inst.clbits) {
                    clbits[c.index()] = sv.measure(q.index(), rng);
                }
            }
            InstructionKind::Reset => {
                for q in &inst.qubits {
                    sv.reset(q.index(), rng);
                }
            }
            InstructionKind::Barrier => {}
        }
    }

    clbits
}

fn qubit_indices(inst: &Instruction) -> Vec<usize> {
    inst.qubits.iter().map(|q| q.index()).collect()
}

/// Render classical bits with bit 0 as the rightmost character.
fn bitstring(clbits: &[bool]) -> String {
    clbits
        .iter()
        .rev()
        .map(|&b| if b { '1' } else { '0' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bellq_ir::{ClbitId, QubitId};

    #[tokio::test]
    async fn test_simulator_capabilities() {
        let backend = SimulatorBackend::new();
        let caps = backend.capabilities();

        assert!(caps.is_simulator);
        assert_eq!(caps.num_qubits, DEFAULT_MAX_QUBITS);
        assert_eq!(caps.max_shots, DEFAULT_MAX_SHOTS);
        assert!(caps.supports_gate("h"));
        assert!(caps.supports_gate("cx"));
        assert_eq!(backend.name(), "simulator");
    }

    #[tokio::test]
    async fn test_simulator_bell_state() {
        let backend = SimulatorBackend::new();

        let circuit = Circuit::bell().unwrap();
        let result = backend.run(&circuit, 1000).await.unwrap();
        assert_eq!(result.shots, 1000);

        // Bell state should produce only 00 and 11
        let counts = &result.counts;
        assert_eq!(counts.get("00") + counts.get("11"), 1000);
        assert_eq!(counts.get("01") + counts.get("10"), 0);
        assert!(counts.get("00") > 0 && counts.get("11") > 0);
    }

    #[tokio::test]
    async fn test_simulator_ghz_state() {
        let backend = SimulatorBackend::new();

        let circuit = Circuit::ghz(3).unwrap();
        let result = backend.run(&circuit, 1000).await.unwrap();

        // GHZ state should produce only 000 and 111
        let counts = &result.counts;
        assert_eq!(counts.get("000") + counts.get("111"), 1000);
    }

    #[tokio::test]
    async fn test_clbit_zero_is_rightmost() {
        let backend = SimulatorBackend::new();

        let mut circuit = Circuit::with_size("x_on_q0", 2, 2);
        circuit
            .x(QubitId(0))
            .unwrap()
            .measure(QubitId(0), ClbitId(0))
            .unwrap()
            .measure(QubitId(1), ClbitId(1))
            .unwrap();

        let result = backend.run(&circuit, 20).await.unwrap();
        assert_eq!(result.counts.get("01"), 20);
    }

    #[tokio::test]
    async fn test_measurement_follows_clbit_mapping() {
        let backend = SimulatorBackend::new();

        // q0 is |1⟩ but lands in c1.
        let mut circuit = Circuit::with_size("crossed", 2, 2);
        circuit
            .x(QubitId(0))
            .unwrap()
            .measure(QubitId(0), ClbitId(1))
            .unwrap()
            .measure(QubitId(1), ClbitId(0))
            .unwrap();

        let result = backend.run(&circuit, 10).await.unwrap();
        assert_eq!(result.counts.get("10"), 10);
    }

    #[tokio::test]
    async fn test_mid_circuit_measurement() {
        let backend = SimulatorBackend::new();

        // Measure a superposition, then flip: c0 and c1 always disagree.
        let mut circuit = Circuit::with_size("mid", 1, 2);
        circuit
            .h(QubitId(0))
            .unwrap()
            .measure(QubitId(0), ClbitId(0))
            .unwrap()
            .x(QubitId(0))
            .unwrap()
            .measure(QubitId(0), ClbitId(1))
            .unwrap();
        assert!(!circuit.has_terminal_measurements());

        let result = backend.run(&circuit, 200).await.unwrap();
        assert_eq!(result.counts.get("01") + result.counts.get("10"), 200);
    }

    #[tokio::test]
    async fn test_unmeasured_circuit_reports_empty_bitstring() {
        let backend = SimulatorBackend::new();
        let mut circuit = Circuit::with_size("no_measure", 1, 0);
        circuit.h(QubitId(0)).unwrap();

        let result = backend.run(&circuit, 8).await.unwrap();
        assert_eq!(result.counts.get(""), 8);
    }

    #[tokio::test]
    async fn test_zero_shots_rejected() {
        let backend = SimulatorBackend::new();
        let circuit = Circuit::bell().unwrap();

        let err = backend.run(&circuit, 0).await.unwrap_err();
        assert!(matches!(err, HalError::InvalidShots(_)));
        assert_eq!(err.to_string(), "Invalid shots: shots must be at least 1, got 0");
    }

    #[tokio::test]
    async fn test_too_many_shots_rejected() {
        let backend = SimulatorBackend::with_limits(20, 100);
        let circuit = Circuit::bell().unwrap();

        assert!(backend.run(&circuit, 100).await.is_ok());
        let err = backend.run(&circuit, 101).await.unwrap_err();
        assert!(matches!(err, HalError::InvalidShots(_)));
    }

    #[tokio::test]
    async fn test_simulator_too_many_qubits() {
        let backend = SimulatorBackend::with_limits(5, 100);

        let circuit = Circuit::with_size("test", 10, 0);
        let result = backend.run(&circuit, 100).await;
        assert!(matches!(result, Err(HalError::CircuitTooLarge(_))));

        let validation = backend.validate(&circuit).await.unwrap();
        assert!(!validation.is_valid());
    }

    #[tokio::test]
    async fn test_validate_bell() {
        let backend = SimulatorBackend::new();
        let validation = backend.validate(&Circuit::bell().unwrap()).await.unwrap();
        assert!(validation.is_valid());
    }

    #[tokio::test]
    async fn test_reset_uses_per_shot_path() {
        let backend = SimulatorBackend::new();

        let mut circuit = Circuit::with_size("reset", 2, 2);
        circuit
            .h(QubitId(0))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap()
            .reset(QubitId(0))
            .unwrap()
            .measure(QubitId(0), ClbitId(0))
            .unwrap()
            .measure(QubitId(1), ClbitId(1))
            .unwrap();
        assert!(!samples_from_final_state(&circuit));

        // q0 always reads 0, q1 keeps its random half of the pair.
        let result = backend.run(&circuit, 400).await.unwrap();
        assert_eq!(result.counts.get("00") + result.counts.get("10"), 400);
        assert!(result.counts.get("00") > 0 && result.counts.get("10") > 0);
    }

    #[test]
    fn test_bitstring_order() {
        assert_eq!(bitstring(&[true, false, false]), "001");
        assert_eq!(bitstring(&[]), "");
    }
}
