//! Single-qubit gate kernels
//!
//! For a gate on qubit `q` the amplitudes split into pairs `(idx0, idx1)` that
//! differ only in bit `q`, with bit `q` clear in `idx0`. With
//! `block_size = 2^q` the buffer is a sequence of blocks of `2·block_size`
//! amplitudes; inside the block starting at `base` the pairs are
//! `(base + i, base + i + block_size)` for `i` in `[0, block_size)`.
//!
//! Blocks never overlap, so they are processed independently on the rayon pool
//! when `parallel` is set.

use num_complex::Complex64;
use rayon::prelude::*;

/// Below this many pairs per block the inner loop stays sequential
const INNER_PARALLEL_MIN: usize = 1 << 12;

/// Visit every block of `target` as `(base, lower, upper)`
///
/// `lower[i]` holds the amplitude at `base + i` (target bit 0) and `upper[i]`
/// its partner at `base + i + block_size` (target bit 1).
pub fn for_each_block<F>(state: &mut [Complex64], target: usize, parallel: bool, f: F)
where
    F: Fn(usize, &mut [Complex64], &mut [Complex64]) + Sync + Send,
{
    let block_size = 1usize << target;
    let block_span = block_size << 1;

    if parallel {
        state
            .par_chunks_mut(block_span)
            .enumerate()
            .for_each(|(block, chunk)| {
                let (lower, upper) = chunk.split_at_mut(block_size);
                f(block * block_span, lower, upper);
            });
    } else {
        for (block, chunk) in state.chunks_mut(block_span).enumerate() {
            let (lower, upper) = chunk.split_at_mut(block_size);
            f(block * block_span, lower, upper);
        }
    }
}

/// Replace every pair `(a0, a1)` of `target` with `op(a0, a1)`
#[inline]
pub fn apply_pair_op<F>(state: &mut [Complex64], target: usize, parallel: bool, op: F)
where
    F: Fn(Complex64, Complex64) -> (Complex64, Complex64) + Sync + Send,
{
    for_each_block(state, target, parallel, |_, lower, upper| {
        if parallel && lower.len() >= INNER_PARALLEL_MIN {
            lower
                .par_iter_mut()
                .zip(upper.par_iter_mut())
                .for_each(|(a0, a1)| (*a0, *a1) = op(*a0, *a1));
        } else {
            for (a0, a1) in lower.iter_mut().zip(upper.iter_mut()) {
                (*a0, *a1) = op(*a0, *a1);
            }
        }
    });
}

/// Apply an arbitrary row-major 2×2 matrix to `target`
pub fn apply_matrix(
    state: &mut [Complex64],
    matrix: &[[Complex64; 2]; 2],
    target: usize,
    parallel: bool,
) {
    let [[m00, m01], [m10, m11]] = *matrix;
    apply_pair_op(state, target, parallel, move |a0, a1| {
        (m00 * a0 + m01 * a1, m10 * a0 + m11 * a1)
    });
}

/// Multiply the |0⟩ half of every pair by `d0` and the |1⟩ half by `d1`
pub fn apply_diagonal(
    state: &mut [Complex64],
    target: usize,
    d0: Complex64,
    d1: Complex64,
    parallel: bool,
) {
    for_each_block(state, target, parallel, |_, lower, upper| {
        lower.iter_mut().for_each(|a| *a *= d0);
        upper.iter_mut().for_each(|a| *a *= d1);
    });
}

/// Multiply only the |1⟩ half of every pair by `factor`
///
/// Covers Z, S, T, S†, T† and the phase gate; the |0⟩ amplitudes are not
/// touched.
pub fn apply_upper_phase(state: &mut [Complex64], target: usize, factor: Complex64, parallel: bool) {
    for_each_block(state, target, parallel, |_, _, upper| {
        upper.iter_mut().for_each(|a| *a *= factor);
    });
}

/// Exchange the halves of every pair (Pauli-X)
pub fn swap_halves(state: &mut [Complex64], target: usize, parallel: bool) {
    for_each_block(state, target, parallel, |_, lower, upper| {
        lower.swap_with_slice(upper);
    });
}
