//! Composite primitives built from the state engine's gates
//!
//! Both algorithms validate every qubit argument before the first gate is
//! applied, so an error leaves the state untouched.

pub mod mod_exp;
pub mod qft;

pub use mod_exp::mod_exp;
pub use qft::qft;

use qvec_state::{QuantumError, QuantumState, Result};

/// Range-check every qubit, then reject repeats
fn check_register(state: &QuantumState, name: &str, qubits: &[usize]) -> Result<()> {
    for &qubit in qubits {
        if qubit >= state.num_qubits() {
            return Err(QuantumError::InvalidQubitIndex {
                index: qubit,
                num_qubits: state.num_qubits(),
            });
        }
    }
    for (i, qubit) in qubits.iter().enumerate() {
        if qubits[i + 1..].contains(qubit) {
            return Err(QuantumError::InvalidGate {
                reason: format!("{name}: qubit {qubit} appears more than once"),
            });
        }
    }
    Ok(())
}
