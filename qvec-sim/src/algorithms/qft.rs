//! Quantum Fourier transform on an arbitrary list of qubits
//!
//! `qubits[0]` is the least significant bit of the register value `x`, so
//! the forward transform maps
//!
//! ```text
//! |x⟩  ->  1/√N · Σ_y e^(2πi·x·y/N) |y⟩,   N = 2^m
//! ```
//!
//! Circuit: for j = m-1 down to 0, H on `qubits[j]` followed by controlled
//! phases π/2^(j-k) from every lower qubit k; then the bit order is reversed
//! with swaps. The inverse runs the adjoint gates in reverse order.

use super::check_register;
use qvec_state::{QuantumState, Result};
use std::f64::consts::PI;

/// Apply the QFT (or its inverse) to `qubits`; an empty list is a no-op
///
/// # Errors
/// `InvalidQubitIndex` for out-of-range qubits, `InvalidGate` for repeats.
pub fn qft(state: &mut QuantumState, qubits: &[usize], inverse: bool) -> Result<()> {
    check_register(state, "QFT", qubits)?;
    if inverse {
        inverse_qft(state, qubits)
    } else {
        forward_qft(state, qubits)
    }
}

fn forward_qft(state: &mut QuantumState, qubits: &[usize]) -> Result<()> {
    let m = qubits.len();
    for j in (0..m).rev() {
        state.h(qubits[j])?;
        for k in (0..j).rev() {
            let angle = PI / (1u64 << (j - k)) as f64;
            state.controlled_phase(qubits[k], qubits[j], angle)?;
        }
    }
    reverse_order(state, qubits)
}

fn inverse_qft(state: &mut QuantumState, qubits: &[usize]) -> Result<()> {
    reverse_order(state, qubits)?;
    for j in 0..qubits.len() {
        for k in 0..j {
            let angle = PI / (1u64 << (j - k)) as f64;
            state.controlled_phase(qubits[k], qubits[j], -angle)?;
        }
        state.h(qubits[j])?;
    }
    Ok(())
}

fn reverse_order(state: &mut QuantumState, qubits: &[usize]) -> Result<()> {
    let m = qubits.len();
    for i in 0..m / 2 {
        state.swap(qubits[i], qubits[m - 1 - i])?;
    }
    Ok(())
}
