//! Amplitude-buffer kernels
//!
//! Kernels operate on raw `&mut [Complex64]` slices and assume their qubit
//! arguments were validated by the caller. The `parallel` flag selects the
//! rayon path; both paths produce identical amplitudes.

pub mod controlled;
pub mod permutation;
pub mod single_qubit;
