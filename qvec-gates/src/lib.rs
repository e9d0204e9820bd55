//! Gate descriptors and constant gate matrices for qvec
//!
//! This crate holds the data side of the gate set: the [`GateKind`] tag, the
//! [`QuantumGate`] descriptor that drivers build circuits from, and the
//! reference 2×2 matrices of every single-qubit gate.
//!
//! # Example
//!
//! ```
//! use qvec_gates::{matrices, GateKind, QuantumGate};
//!
//! let gate = QuantumGate::rx(0, std::f64::consts::PI / 2.0);
//! assert_eq!(gate.kind, GateKind::Rx);
//!
//! let m = matrices::single_qubit_matrix(&gate).unwrap();
//! assert!(matrices::is_unitary(&m, 1e-12));
//! ```

pub mod descriptor;
pub mod matrices;

pub use descriptor::{GateKind, QuantumGate};
pub use matrices::Matrix2;
