//! Error types for state vector operations

use thiserror::Error;

/// Errors that can occur during state vector operations
///
/// Every operation validates its arguments before touching the amplitude
/// buffer, so an `Err` always leaves the state exactly as it was.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuantumError {
    /// Qubit count outside `1..=max`
    #[error("Invalid qubit count {requested}, must be between 1 and {max}")]
    InvalidQubitCount { requested: usize, max: usize },

    /// Amplitude buffer could not be allocated
    #[error("Failed to allocate {bytes} bytes for state vector")]
    OutOfMemory { bytes: usize },

    /// Qubit index outside `[0, num_qubits)`
    #[error("Invalid qubit index {index} for {num_qubits}-qubit state")]
    InvalidQubitIndex { index: usize, num_qubits: usize },

    /// Basis index outside `[0, dimension)`
    #[error("Invalid basis index {index} for state of dimension {dimension}")]
    InvalidIndex { index: usize, dimension: usize },

    /// Semantically inconsistent gate arguments
    #[error("Invalid gate: {reason}")]
    InvalidGate { reason: String },

    /// Input length does not match what the state requires
    #[error("Length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Unexpected character in a bitstring or Pauli string
    #[error("Invalid character {character:?} at position {position}")]
    InvalidCharacter { character: char, position: usize },

    /// Normalizing or measuring a (numerically) null vector
    #[error("Cannot normalize zero state, norm = {norm}")]
    ZeroState { norm: f64 },
}

impl QuantumError {
    pub(crate) fn invalid_gate(reason: impl Into<String>) -> Self {
        QuantumError::InvalidGate {
            reason: reason.into(),
        }
    }
}

/// Result type for state vector operations
pub type Result<T> = std::result::Result<T, QuantumError>;
