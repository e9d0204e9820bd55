//! Pauli observables and expectation values ⟨ψ|P|ψ⟩
//!
//! A Pauli string such as `"XIZ"` is read like a basis string: character `k`
//! acts on qubit `k`. Qubits beyond the end of the string get the identity.
//!
//! For a string P with X/Y positions in `x_mask`, every basis state maps to a
//! single basis state, `P|i⟩ = phase(i)·|i ^ x_mask⟩`, with
//! `phase(i) = i^(#Y) · (-1)^popcount(i & (y_mask | z_mask))`. The expectation
//! value is then one pass over the amplitudes without building P|ψ⟩.

use crate::error::{QuantumError, Result};
use crate::state_vector::QuantumState;
use num_complex::Complex64;
use rayon::prelude::*;
use std::fmt;
use std::str::FromStr;

/// Single-qubit Pauli operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pauli {
    /// Identity operator
    I,
    /// Pauli X (bit flip)
    X,
    /// Pauli Y (bit and phase flip)
    Y,
    /// Pauli Z (phase flip)
    Z,
}

impl Pauli {
    /// Parse a Pauli operator from a character, case-insensitively
    ///
    /// `position` is only used for the error.
    pub fn from_char(character: char, position: usize) -> Result<Self> {
        match character.to_ascii_uppercase() {
            'I' => Ok(Pauli::I),
            'X' => Ok(Pauli::X),
            'Y' => Ok(Pauli::Y),
            'Z' => Ok(Pauli::Z),
            _ => Err(QuantumError::InvalidCharacter {
                character,
                position,
            }),
        }
    }

    /// Convert to character representation
    pub fn to_char(self) -> char {
        match self {
            Pauli::I => 'I',
            Pauli::X => 'X',
            Pauli::Y => 'Y',
            Pauli::Z => 'Z',
        }
    }

    /// Check if this Pauli is diagonal (I or Z)
    pub fn is_diagonal(self) -> bool {
        matches!(self, Pauli::I | Pauli::Z)
    }
}

impl fmt::Display for Pauli {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Tensor product of Pauli operators with a real coefficient
#[derive(Debug, Clone, PartialEq)]
pub struct PauliString {
    /// Operator on qubit k at index k
    paulis: Vec<Pauli>,

    /// Overall coefficient
    coeff: f64,
}

impl PauliString {
    /// Create a Pauli string from a vector of Paulis
    pub fn from_paulis(paulis: Vec<Pauli>) -> Self {
        Self { paulis, coeff: 1.0 }
    }

    /// Z on each of `num_qubits` qubits
    pub fn all_z(num_qubits: usize) -> Self {
        Self::from_paulis(vec![Pauli::Z; num_qubits])
    }

    /// Scale the string by `coeff`
    pub fn with_coeff(mut self, coeff: f64) -> Self {
        self.coeff = coeff;
        self
    }

    /// Number of qubits the string spans
    pub fn num_qubits(&self) -> usize {
        self.paulis.len()
    }

    /// Operator on `qubit`, `None` past the end of the string
    pub fn get(&self, qubit: usize) -> Option<Pauli> {
        self.paulis.get(qubit).copied()
    }

    pub fn coeff(&self) -> f64 {
        self.coeff
    }

    /// Whether every operator is I or Z
    pub fn is_diagonal(&self) -> bool {
        self.paulis.iter().all(|p| p.is_diagonal())
    }

    /// (x_mask, sign_mask, number of Y)
    fn masks(&self) -> (usize, usize, u32) {
        let mut x_mask = 0usize;
        let mut sign_mask = 0usize;
        let mut num_y = 0u32;
        for (qubit, pauli) in self.paulis.iter().enumerate() {
            let bit = 1usize << qubit;
            match pauli {
                Pauli::I => {}
                Pauli::X => x_mask |= bit,
                Pauli::Y => {
                    x_mask |= bit;
                    sign_mask |= bit;
                    num_y += 1;
                }
                Pauli::Z => sign_mask |= bit,
            }
        }
        (x_mask, sign_mask, num_y)
    }

    /// Expectation value coeff·Re⟨ψ|P|ψ⟩
    ///
    /// # Errors
    /// `InvalidQubitIndex` if the string is longer than the register.
    pub fn expectation_value(&self, state: &QuantumState) -> Result<f64> {
        if self.num_qubits() > state.num_qubits() {
            return Err(QuantumError::InvalidQubitIndex {
                index: self.num_qubits() - 1,
                num_qubits: state.num_qubits(),
            });
        }

        let (x_mask, sign_mask, num_y) = self.masks();
        let global = match num_y % 4 {
            0 => Complex64::new(1.0, 0.0),
            1 => Complex64::new(0.0, 1.0),
            2 => Complex64::new(-1.0, 0.0),
            _ => Complex64::new(0.0, -1.0),
        };

        let amplitudes = state.amplitudes();
        let term = |(i, amp): (usize, &Complex64)| {
            let sign = if (i & sign_mask).count_ones() % 2 == 0 {
                1.0
            } else {
                -1.0
            };
            amplitudes[i ^ x_mask].conj() * amp * sign
        };
        let sum: Complex64 = if state.parallel() {
            amplitudes.par_iter().enumerate().map(term).sum()
        } else {
            amplitudes.iter().enumerate().map(term).sum()
        };

        Ok(self.coeff * (global * sum).re)
    }
}

impl FromStr for PauliString {
    type Err = QuantumError;

    /// Parse e.g. `"XXYZ"`; character k acts on qubit k
    ///
    /// # Example
    /// ```
    /// use qvec_state::PauliString;
    ///
    /// let pauli: PauliString = "XXYZ".parse().unwrap();
    /// assert_eq!(pauli.num_qubits(), 4);
    /// ```
    fn from_str(s: &str) -> Result<Self> {
        let paulis = s
            .chars()
            .enumerate()
            .map(|(position, c)| Pauli::from_char(c, position))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_paulis(paulis))
    }
}

impl fmt::Display for PauliString {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.coeff != 1.0 {
            write!(f, "{}*", self.coeff)?;
        }
        for pauli in &self.paulis {
            write!(f, "{}", pauli)?;
        }
        Ok(())
    }
}

/// A weighted sum of Pauli strings, e.g. 0.5·XX + 0.3·ZZ
#[derive(Debug, Clone, Default)]
pub struct PauliObservable {
    terms: Vec<PauliString>,
}

impl PauliObservable {
    /// Create an empty observable
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `coeff · pauli`
    pub fn add_term(&mut self, pauli: PauliString, coeff: f64) {
        let coeff = pauli.coeff * coeff;
        self.terms.push(pauli.with_coeff(coeff));
    }

    /// Builder form of [`add_term`](Self::add_term)
    pub fn with_term(mut self, pauli: PauliString, coeff: f64) -> Self {
        self.add_term(pauli, coeff);
        self
    }

    pub fn num_terms(&self) -> usize {
        self.terms.len()
    }

    /// Σ coeffₖ·⟨ψ|Pₖ|ψ⟩
    pub fn expectation_value(&self, state: &QuantumState) -> Result<f64> {
        self.terms
            .iter()
            .map(|term| term.expectation_value(state))
            .sum()
    }
}

impl QuantumState {
    /// Expectation value of a Pauli string in this state
    pub fn expectation(&self, pauli: &PauliString) -> Result<f64> {
        pauli.expectation_value(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn expect(state: &QuantumState, s: &str) -> f64 {
        state.expectation(&s.parse().unwrap()).unwrap()
    }

    #[test]
    fn test_pauli_from_char() {
        assert_eq!(Pauli::from_char('I', 0).unwrap(), Pauli::I);
        assert_eq!(Pauli::from_char('x', 0).unwrap(), Pauli::X); // Case insensitive
        assert_eq!(
            Pauli::from_char('Q', 3).unwrap_err(),
            QuantumError::InvalidCharacter {
                character: 'Q',
                position: 3
            }
        );
    }

    #[test]
    fn test_pauli_string_from_str() {
        let pauli: PauliString = "IXYZ".parse().unwrap();
        assert_eq!(pauli.num_qubits(), 4);
        assert_eq!(pauli.get(0), Some(Pauli::I));
        assert_eq!(pauli.get(2), Some(Pauli::Y));
        assert_eq!(pauli.get(4), None);
        assert!(!pauli.is_diagonal());
        assert!("IZZ".parse::<PauliString>().unwrap().is_diagonal());
        assert!("XA".parse::<PauliString>().is_err());
    }

    #[test]
    fn test_z_and_x_on_basis_state() {
        let state = QuantumState::new(1).unwrap();
        assert_relative_eq!(expect(&state, "Z"), 1.0, epsilon = 1e-10);
        assert_relative_eq!(expect(&state, "X"), 0.0, epsilon = 1e-10);

        let one = QuantumState::from_basis("1").unwrap();
        assert_relative_eq!(expect(&one, "Z"), -1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_x_and_y_eigenstates() {
        let mut plus = QuantumState::new(1).unwrap();
        plus.h(0).unwrap();
        assert_relative_eq!(expect(&plus, "X"), 1.0, epsilon = 1e-10);
        assert_relative_eq!(expect(&plus, "Y"), 0.0, epsilon = 1e-10);

        // S|+⟩ = |+i⟩
        plus.s(0).unwrap();
        assert_relative_eq!(expect(&plus, "Y"), 1.0, epsilon = 1e-10);
        assert_relative_eq!(expect(&plus, "X"), 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_bell_state_correlations() {
        let mut bell = QuantumState::new(2).unwrap();
        bell.h(0).unwrap();
        bell.cnot(0, 1).unwrap();

        assert_relative_eq!(expect(&bell, "ZZ"), 1.0, epsilon = 1e-10);
        assert_relative_eq!(expect(&bell, "XX"), 1.0, epsilon = 1e-10);
        assert_relative_eq!(expect(&bell, "YY"), -1.0, epsilon = 1e-10);
        assert_relative_eq!(expect(&bell, "ZI"), 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_string_acts_on_leading_qubits() {
        // |q0=0, q1=1⟩
        let state = QuantumState::from_basis("01").unwrap();
        assert_relative_eq!(expect(&state, "Z"), 1.0, epsilon = 1e-10);
        assert_relative_eq!(expect(&state, "IZ"), -1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_string_longer_than_register() {
        let state = QuantumState::new(2).unwrap();
        let pauli: PauliString = "ZZZ".parse().unwrap();
        assert_eq!(
            state.expectation(&pauli).unwrap_err(),
            QuantumError::InvalidQubitIndex {
                index: 2,
                num_qubits: 2
            }
        );
    }

    #[test]
    fn test_observable_sum() {
        let mut bell = QuantumState::new(2).unwrap();
        bell.h(0).unwrap();
        bell.cnot(0, 1).unwrap();

        let observable = PauliObservable::new()
            .with_term("ZZ".parse().unwrap(), 0.5)
            .with_term("XX".parse().unwrap(), 0.25)
            .with_term(PauliString::all_z(1).with_coeff(2.0), 1.0);
        assert_eq!(observable.num_terms(), 3);
        assert_relative_eq!(
            observable.expectation_value(&bell).unwrap(),
            0.75,
            epsilon = 1e-10
        );
    }
}
