//! qvec: a dense state-vector quantum circuit simulator
//!
//! This crate re-exports the workspace crates:
//!
//! - [`gates`]: gate descriptors and constant matrices
//! - [`state`]: the amplitude vector, gate kernels, measurement, observables
//! - [`sim`]: seeded simulation sessions, QFT and modular exponentiation
//!
//! # Example
//!
//! ```
//! use qvec::{QuantumGate, Simulator, SimulatorConfig};
//!
//! let mut sim = Simulator::new(2, SimulatorConfig::debug()).unwrap();
//! sim.run(&[QuantumGate::h(0), QuantumGate::cnot(0, 1)]).unwrap();
//!
//! let outcome = sim.measure_all().unwrap();
//! assert!(outcome == 0 || outcome == 3);
//! ```

pub use qvec_gates as gates;
pub use qvec_sim as sim;
pub use qvec_state as state;

pub use qvec_gates::{GateKind, QuantumGate};
pub use qvec_sim::{ExecutionStatistics, Simulator, SimulatorConfig, SimulatorError};
pub use qvec_state::{
    KernelConfig, Pauli, PauliObservable, PauliString, QuantumError, QuantumState, SamplingResult,
    MAX_QUBITS,
};

/// Library version, e.g. `"qvec v0.1.0"`
pub fn version() -> String {
    format!("qvec v{}", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_string() {
        let version = version();
        assert!(version.starts_with("qvec v"));
        assert!(version.ends_with(env!("CARGO_PKG_VERSION")));
    }
}
