//! Simulation sessions and composite algorithms for qvec
//!
//! A [`Simulator`] wraps a [`QuantumState`](qvec_state::QuantumState) with a
//! seeded random number generator, a [`SimulatorConfig`] and
//! [`ExecutionStatistics`]. The [`algorithms`] module provides the quantum
//! Fourier transform and modular exponentiation on top of the state engine.
//!
//! # Example
//!
//! ```
//! use qvec_gates::QuantumGate;
//! use qvec_sim::{Simulator, SimulatorConfig};
//!
//! let config = SimulatorConfig::new().with_seed(7).with_norm_check(true);
//! let mut sim = Simulator::new(3, config).unwrap();
//!
//! sim.run(&[QuantumGate::x(0)]).unwrap();
//! sim.qft(&[0, 1, 2], false).unwrap();
//! sim.qft(&[0, 1, 2], true).unwrap();
//!
//! assert_eq!(sim.measure_all().unwrap(), 1);
//! ```

pub mod algorithms;
pub mod config;
pub mod error;
pub mod simulator;
pub mod statistics;

pub use config::SimulatorConfig;
pub use error::{Result, SimulatorError};
pub use simulator::Simulator;
pub use statistics::ExecutionStatistics;
