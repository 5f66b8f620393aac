//! bellq Local Statevector Simulator
//!
//! This crate provides the local simulator the bellq service executes its
//! circuits on. It keeps the full statevector, so it is limited to small
//! circuits (the default limit is 20 qubits).
//!
//! # Features
//!
//! - **Exact State Evolution**: Full statevector representation
//! - **Measurement Sampling**: Born-rule sampling with collapse, one outcome
//!   per shot, no fixed seed
//! - **Fast Path**: Circuits whose measurements are all terminal are evolved
//!   once and the final distribution is sampled `shots` times
//!
//! # Performance
//!
//! | Qubits | Memory | Simulation Speed |
//! |--------|--------|------------------|
//! | 10 | ~16 KB | Instant |
//! | 15 | ~512 KB | Fast |
//! | 20 | ~16 MB | Moderate |
//!
//! # Example
//!
//! ```ignore
//! use bellq_adapter_sim::SimulatorBackend;
//! use bellq_hal::Backend;
//! use bellq_ir::Circuit;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = SimulatorBackend::new();
//!
//!     let circuit = Circuit::bell()?;
//!     let result = backend.run(&circuit, 1000).await?;
//!
//!     // Expect ~50% |00⟩ and ~50% |11⟩
//!     println!("Results: {:?}", result.counts);
//!     Ok(())
//! }
//! ```

mod simulator;
mod statevector;

pub use simulator::{DEFAULT_MAX_QUBITS, DEFAULT_MAX_SHOTS, SimulatorBackend};
