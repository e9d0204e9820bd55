//! Basis permutation kernel

use num_complex::Complex64;

/// Write `src[i]` to `dst[mapping(i)]` for every index
///
/// Returns `false` without completing if `mapping` leaves the range or maps
/// two indices to the same target. `dst` is scratch until `true` is returned.
pub fn permute_into<F>(src: &[Complex64], dst: &mut [Complex64], mapping: F) -> bool
where
    F: Fn(usize) -> usize,
{
    debug_assert_eq!(src.len(), dst.len());

    let mut seen = vec![false; src.len()];
    for (i, amp) in src.iter().enumerate() {
        let j = mapping(i);
        match seen.get_mut(j) {
            Some(slot) if !*slot => {
                *slot = true;
                dst[j] = *amp;
            }
            _ => return false,
        }
    }
    true
}
