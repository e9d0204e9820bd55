//! Dense quantum state vector engine
//!
//! A [`QuantumState`] owns the full `2^n` complex amplitude vector of an
//! n-qubit register and mutates it in place. Basis index `i` stores qubit `q`
//! in bit `q` (qubit 0 is the least significant bit); basis strings such as
//! `"110"` list qubit 0 first.
//!
//! - **Gates**: Pauli, Hadamard, phase and rotation gates, an arbitrary 2×2
//!   matrix path, CNOT/CY/CZ/controlled phase, SWAP, Toffoli, Fredkin and
//!   basis permutations, either as direct methods or through
//!   [`QuantumGate`](qvec_gates::QuantumGate) descriptors.
//! - **Measurement**: single-qubit and whole-register collapse driven by a
//!   caller-supplied `rand::Rng`, plus non-destructive sampling.
//! - **Observables**: expectation values of Pauli strings.
//!
//! Kernels switch to the rayon pool for large states, see [`KernelConfig`].
//!
//! # Example
//!
//! ```
//! use qvec_state::QuantumState;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut state = QuantumState::new(2).unwrap();
//! state.h(0).unwrap();
//! state.cnot(0, 1).unwrap();
//!
//! let mut rng = StdRng::seed_from_u64(1);
//! let first = state.measure(0, &mut rng).unwrap();
//! let second = state.measure(1, &mut rng).unwrap();
//! assert_eq!(first, second);
//! ```

pub mod config;
pub mod dispatch;
pub mod error;
pub mod gates;
pub mod kernels;
pub mod measurement;
pub mod observable;
pub mod state_vector;

pub use config::{KernelConfig, DEFAULT_PARALLEL_THRESHOLD};
pub use error::{QuantumError, Result};
pub use measurement::{bitstring, SamplingResult};
pub use observable::{Pauli, PauliObservable, PauliString};
pub use state_vector::{QuantumState, MAX_QUBITS, NORM_EPSILON};
