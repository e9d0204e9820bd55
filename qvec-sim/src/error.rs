//! Error types for the simulator

use qvec_state::QuantumError;
use thiserror::Error;

/// Result type for simulator operations
pub type Result<T> = std::result::Result<T, SimulatorError>;

/// Errors that can occur during simulation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulatorError {
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Gate `index` of a sequence failed; earlier gates were applied
    #[error("Gate {index} application failed: {source}")]
    GateFailed {
        index: usize,
        #[source]
        source: QuantumError,
    },

    /// State error from state operations
    #[error(transparent)]
    State(#[from] QuantumError),
}
