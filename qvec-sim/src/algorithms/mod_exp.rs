//! Modular exponentiation |x⟩|y⟩ -> |x⟩|y·a^x mod N⟩
//!
//! `x` is read from `controls` and `y` from `targets`, both least significant
//! bit first. Writing `x = Σ x_k·2^k` gives `a^x = Π (a^(2^k))^(x_k)`, so the
//! map is one controlled modular multiplication per control qubit, each a
//! permutation of the basis states. Target values `y >= N` are left unchanged
//! so every step stays a bijection.

use super::check_register;
use qvec_state::{QuantumError, QuantumState, Result};

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

#[inline]
fn mul_mod(a: u64, b: u64, modulus: u64) -> u64 {
    ((a as u128 * b as u128) % modulus as u128) as u64
}

/// Value of the register spread over `qubits` in basis state `index`
#[inline]
fn read_register(index: usize, qubits: &[usize]) -> u64 {
    qubits
        .iter()
        .enumerate()
        .fold(0, |value, (bit, &q)| value | (((index >> q) & 1) as u64) << bit)
}

/// `index` with the register over `qubits` replaced by `value`
#[inline]
fn write_register(index: usize, qubits: &[usize], value: u64) -> usize {
    qubits.iter().enumerate().fold(index, |acc, (bit, &q)| {
        let cleared = acc & !(1usize << q);
        cleared | ((((value >> bit) & 1) as usize) << q)
    })
}

fn validate(
    state: &QuantumState,
    base: u64,
    modulus: u64,
    controls: &[usize],
    targets: &[usize],
) -> Result<()> {
    let invalid = |reason: String| Err(QuantumError::InvalidGate { reason });

    if targets.is_empty() {
        return invalid("MOD_EXP: no target qubits".to_string());
    }
    if modulus < 2 {
        return invalid(format!("MOD_EXP: modulus must be at least 2, got {modulus}"));
    }
    if gcd(base % modulus, modulus) != 1 {
        return invalid(format!(
            "MOD_EXP: base {base} is not coprime with modulus {modulus}"
        ));
    }

    let register: Vec<usize> = controls.iter().chain(targets).copied().collect();
    check_register(state, "MOD_EXP", &register)?;

    // targets.len() <= MAX_QUBITS here, so the shift cannot overflow
    if modulus > 1u64 << targets.len() {
        return invalid(format!(
            "MOD_EXP: modulus {modulus} does not fit in {} target qubits",
            targets.len()
        ));
    }
    Ok(())
}

/// Apply |x⟩|y⟩ -> |x⟩|y·base^x mod modulus⟩
///
/// # Errors
/// `InvalidQubitIndex` for out-of-range qubits; `InvalidGate` if there are
/// no targets, `modulus < 2`, `gcd(base, modulus) != 1`,
/// `modulus > 2^targets.len()`, or a qubit appears twice.
///
/// # Example
/// ```
/// use qvec_sim::algorithms::mod_exp;
/// use qvec_state::QuantumState;
///
/// // x = 2 on qubits 0-1, y = 1 on qubits 2-5 (qubit 0 first)
/// let mut state = QuantumState::from_basis("011000").unwrap();
/// mod_exp(&mut state, 7, 15, &[0, 1], &[2, 3, 4, 5]).unwrap();
/// // 7^2 mod 15 = 4 -> y bits 0010 on qubits 2-5
/// let index = 0b10 | (4 << 2);
/// assert_eq!(state.basis_probability(index).unwrap(), 1.0);
/// ```
pub fn mod_exp(
    state: &mut QuantumState,
    base: u64,
    modulus: u64,
    controls: &[usize],
    targets: &[usize],
) -> Result<()> {
    validate(state, base, modulus, controls, targets)?;

    let mut multiplier = base % modulus;
    for &control in controls {
        if multiplier != 1 {
            let factor = multiplier;
            state.apply_permutation(|index| {
                if (index >> control) & 1 == 0 {
                    return index;
                }
                let y = read_register(index, targets);
                if y >= modulus {
                    return index;
                }
                write_register(index, targets, mul_mod(y, factor, modulus))
            })?;
        }
        multiplier = mul_mod(multiplier, multiplier, modulus);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use num_complex::Complex64;

    #[test]
    fn test_gcd() {
        assert_eq!(gcd(7, 15), 1);
        assert_eq!(gcd(6, 15), 3);
        assert_eq!(gcd(0, 15), 15);
    }

    #[test]
    fn test_register_round_trip() {
        let qubits = [4, 1, 3];
        let index = write_register(0b100001, &qubits, 0b101);
        // bit 0 -> qubit 4, bit 2 -> qubit 3, existing bits kept
        assert_eq!(index, 0b111001);
        assert_eq!(read_register(index, &qubits), 0b101);
    }

    #[test]
    fn test_table_for_base_seven_mod_fifteen() {
        let controls = [0, 1, 2];
        let targets = [3, 4, 5, 6];
        for x in 0..8usize {
            let mut state = QuantumState::new(7).unwrap();
            state.set_amplitude(0, Complex64::new(0.0, 0.0)).unwrap();
            state
                .set_amplitude(write_register(x, &targets, 1), Complex64::new(1.0, 0.0))
                .unwrap();

            mod_exp(&mut state, 7, 15, &controls, &targets).unwrap();

            let expected = (0..x).fold(1u64, |acc, _| acc * 7 % 15);
            let index = write_register(x, &targets, expected);
            assert_relative_eq!(state.basis_probability(index).unwrap(), 1.0);
        }
    }

    #[test]
    fn test_values_at_or_above_modulus_are_fixed() {
        // y = 13 with N = 5 on 4 target qubits, x = 1
        let controls = [0];
        let targets = [1, 2, 3, 4];
        let start = write_register(1, &targets, 13);
        let mut state = QuantumState::new(5).unwrap();
        state.set_amplitude(0, Complex64::new(0.0, 0.0)).unwrap();
        state.set_amplitude(start, Complex64::new(1.0, 0.0)).unwrap();

        mod_exp(&mut state, 2, 5, &controls, &targets).unwrap();
        assert_relative_eq!(state.basis_probability(start).unwrap(), 1.0);
    }

    #[test]
    fn test_superposition_of_exponents() {
        // Uniform x over 2 control qubits, y = 1: four equally weighted terms
        let controls = [0, 1];
        let targets = [2, 3, 4, 5];
        let mut state = QuantumState::new(6).unwrap();
        state.h(0).unwrap();
        state.h(1).unwrap();
        state.x(2).unwrap();

        mod_exp(&mut state, 2, 15, &controls, &targets).unwrap();
        for x in 0..4usize {
            let y = (0..x).fold(1u64, |acc, _| acc * 2 % 15);
            let index = write_register(x, &targets, y);
            assert_relative_eq!(state.basis_probability(index).unwrap(), 0.25, epsilon = 1e-12);
        }
        assert_relative_eq!(state.norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_arguments() {
        let mut state = QuantumState::new(6).unwrap();
        let before = state.clone();
        let cases = [
            mod_exp(&mut state, 7, 15, &[0], &[]),
            mod_exp(&mut state, 7, 1, &[0], &[1, 2]),
            mod_exp(&mut state, 6, 15, &[0], &[1, 2, 3, 4]),
            mod_exp(&mut state, 7, 15, &[0], &[1, 2, 3]),
            mod_exp(&mut state, 7, 15, &[1], &[1, 2, 3, 4]),
        ];
        for result in cases {
            assert!(matches!(result, Err(QuantumError::InvalidGate { .. })));
        }
        assert!(matches!(
            mod_exp(&mut state, 7, 15, &[0], &[1, 2, 3, 9]),
            Err(QuantumError::InvalidQubitIndex { index: 9, .. })
        ));
        assert_eq!(state, before);
    }
}
