//! bellq Backend Abstraction Layer
//!
//! This crate defines the seam between the bellq service and whatever
//! executes its circuits:
//! - A common [`Backend`] trait for running a circuit for a number of shots
//! - [`Capabilities`] to describe backend limits
//! - Result handling via [`ExecutionResult`] and [`Counts`]
//! - A single error type, [`HalError`], whose text is what callers see
//!
//! # Example: Running a Circuit
//!
//! ```ignore
//! use bellq_hal::Backend;
//! use bellq_adapter_sim::SimulatorBackend;
//! use bellq_ir::Circuit;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let circuit = Circuit::bell()?;
//!     let backend = SimulatorBackend::new();
//!
//!     let result = backend.run(&circuit, 1000).await?;
//!     println!("Results: {:?}", result.counts);
//!
//!     if let Some((bitstring, count)) = result.counts.most_frequent() {
//!         println!("Most frequent: {} ({} times)", bitstring, count);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod capability;
pub mod error;
pub mod result;

pub use backend::{Backend, ValidationResult};
pub use capability::Capabilities;
pub use error::{HalError, HalResult};
pub use result::{Counts, ExecutionResult};
