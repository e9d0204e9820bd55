//! Controlled, swap and multi-controlled gate kernels
//!
//! These gates walk every basis index once, test a control condition with bit
//! masks, and exchange the amplitude at `i` with the one at
//! `pair = i ^ flip_mask`. Both ends of a pair satisfy the condition, so the
//! exchange is guarded by `i < pair`; without the guard every pair would be
//! swapped twice and end up unchanged.

use num_complex::Complex64;
use rayon::prelude::*;

/// Length of the smallest aligned chunk that contains both ends of every
/// pair flipped by `mask`: `2^(highest set bit + 1)`
#[inline]
fn pair_span(mask: usize) -> usize {
    let highest = usize::BITS - 1 - mask.leading_zeros();
    1usize << (highest + 1)
}

/// Swap `i` with `i ^ flip_mask` for every `i < i ^ flip_mask` where
/// `condition(i)` holds
///
/// `condition` must give the same answer for both ends of a pair.
pub fn swap_pairs_where<C>(state: &mut [Complex64], flip_mask: usize, condition: C, parallel: bool)
where
    C: Fn(usize) -> bool + Sync + Send,
{
    debug_assert_ne!(flip_mask, 0);

    if parallel {
        // Chunks are aligned to the span, so `i ^ flip_mask` stays inside the
        // chunk and its local offset is `local ^ flip_mask`.
        let span = pair_span(flip_mask).min(state.len());
        state
            .par_chunks_mut(span)
            .enumerate()
            .for_each(|(chunk_idx, chunk)| {
                let base = chunk_idx * span;
                for local in 0..chunk.len() {
                    let pair = local ^ flip_mask;
                    if local < pair && condition(base + local) {
                        chunk.swap(local, pair);
                    }
                }
            });
    } else {
        for i in 0..state.len() {
            if condition(i) {
                let pair = i ^ flip_mask;
                if i < pair {
                    state.swap(i, pair);
                }
            }
        }
    }
}

/// Multiply every amplitude whose index satisfies `condition` by `factor`
pub fn scale_where<C>(state: &mut [Complex64], condition: C, factor: Complex64, parallel: bool)
where
    C: Fn(usize) -> bool + Sync + Send,
{
    if parallel {
        state
            .par_iter_mut()
            .enumerate()
            .filter(|(i, _)| condition(*i))
            .for_each(|(_, amp)| *amp *= factor);
    } else {
        for (i, amp) in state.iter_mut().enumerate() {
            if condition(i) {
                *amp *= factor;
            }
        }
    }
}

/// CNOT: flip `target` wherever `control` is set
pub fn cnot(state: &mut [Complex64], control: usize, target: usize, parallel: bool) {
    let mask_control = 1usize << control;
    swap_pairs_where(state, 1 << target, |i| i & mask_control != 0, parallel);
}

/// CZ: negate amplitudes with both bits set
pub fn cz(state: &mut [Complex64], control: usize, target: usize, parallel: bool) {
    controlled_phase(state, control, target, Complex64::new(-1.0, 0.0), parallel);
}

/// Multiply amplitudes with both `control` and `target` set by `factor`
pub fn controlled_phase(
    state: &mut [Complex64],
    control: usize,
    target: usize,
    factor: Complex64,
    parallel: bool,
) {
    let mask_both = (1usize << control) | (1usize << target);
    scale_where(state, |i| i & mask_both == mask_both, factor, parallel);
}

/// SWAP: exchange amplitudes whose `qubit1` and `qubit2` bits differ
pub fn swap(state: &mut [Complex64], qubit1: usize, qubit2: usize, parallel: bool) {
    let mask1 = 1usize << qubit1;
    let mask2 = 1usize << qubit2;
    swap_pairs_where(
        state,
        mask1 | mask2,
        |i| (i & mask1 != 0) != (i & mask2 != 0),
        parallel,
    );
}

/// Toffoli: flip `target` wherever both controls are set
pub fn toffoli(
    state: &mut [Complex64],
    control1: usize,
    control2: usize,
    target: usize,
    parallel: bool,
) {
    let mask_controls = (1usize << control1) | (1usize << control2);
    swap_pairs_where(
        state,
        1 << target,
        |i| i & mask_controls == mask_controls,
        parallel,
    );
}

/// Fredkin: swap `swap1` and `swap2` wherever `control` is set
pub fn fredkin(
    state: &mut [Complex64],
    control: usize,
    swap1: usize,
    swap2: usize,
    parallel: bool,
) {
    let mask_control = 1usize << control;
    let mask1 = 1usize << swap1;
    let mask2 = 1usize << swap2;
    swap_pairs_where(
        state,
        mask1 | mask2,
        |i| i & mask_control != 0 && (i & mask1 != 0) != (i & mask2 != 0),
        parallel,
    );
}

/// Apply `op` to the `target` pair wherever `control` is set
pub fn controlled_pair_op<F>(
    state: &mut [Complex64],
    control: usize,
    target: usize,
    parallel: bool,
    op: F,
) where
    F: Fn(Complex64, Complex64) -> (Complex64, Complex64) + Sync + Send,
{
    let mask_control = 1usize << control;
    super::single_qubit::for_each_block(state, target, parallel, |base, lower, upper| {
        for (k, (a0, a1)) in lower.iter_mut().zip(upper.iter_mut()).enumerate() {
            if (base + k) & mask_control != 0 {
                (*a0, *a1) = op(*a0, *a1);
            }
        }
    });
}
