//! Gate entry points on [`QuantumState`]
//!
//! Every method validates all of its qubit arguments before the first
//! amplitude is written, so an `Err` leaves the state untouched.

use crate::error::{QuantumError, Result};
use crate::kernels::{controlled, permutation, single_qubit};
use crate::state_vector::{alloc_zeroed, QuantumState};
use num_complex::Complex64;
use qvec_gates::matrices::{self, Matrix2, INV_SQRT2};

/// (a0, a1) -> (-i·a1, i·a0)
#[inline]
fn pauli_y_pair(a0: Complex64, a1: Complex64) -> (Complex64, Complex64) {
    (Complex64::new(a1.im, -a1.re), Complex64::new(-a0.im, a0.re))
}

impl QuantumState {
    /// `InvalidQubitIndex` unless `qubit < num_qubits`
    pub(crate) fn check_qubit(&self, qubit: usize) -> Result<()> {
        if qubit >= self.num_qubits() {
            return Err(QuantumError::InvalidQubitIndex {
                index: qubit,
                num_qubits: self.num_qubits(),
            });
        }
        Ok(())
    }

    /// Range-check every qubit, then reject any qubit used twice
    pub(crate) fn check_distinct(&self, gate: &str, qubits: &[usize]) -> Result<()> {
        for &q in qubits {
            self.check_qubit(q)?;
        }
        for (i, a) in qubits.iter().enumerate() {
            if qubits[i + 1..].contains(a) {
                return Err(QuantumError::invalid_gate(format!(
                    "{gate}: qubit {a} used in more than one role"
                )));
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Single-qubit gates
    // ------------------------------------------------------------------

    /// Identity; only validates `target`
    pub fn identity(&mut self, target: usize) -> Result<()> {
        self.check_qubit(target)
    }

    /// Pauli-X (NOT)
    ///
    /// # Example
    /// ```
    /// use qvec_state::QuantumState;
    ///
    /// let mut state = QuantumState::new(1).unwrap();
    /// state.x(0).unwrap();
    /// assert_eq!(state.basis_probability(1).unwrap(), 1.0);
    /// ```
    pub fn x(&mut self, target: usize) -> Result<()> {
        self.check_qubit(target)?;
        let parallel = self.parallel();
        single_qubit::swap_halves(self.amplitudes_mut(), target, parallel);
        Ok(())
    }

    /// Pauli-Y
    pub fn y(&mut self, target: usize) -> Result<()> {
        self.check_qubit(target)?;
        let parallel = self.parallel();
        single_qubit::apply_pair_op(self.amplitudes_mut(), target, parallel, pauli_y_pair);
        Ok(())
    }

    /// Pauli-Z
    pub fn z(&mut self, target: usize) -> Result<()> {
        self.apply_upper_phase(target, Complex64::new(-1.0, 0.0))
    }

    /// Hadamard
    pub fn h(&mut self, target: usize) -> Result<()> {
        self.check_qubit(target)?;
        let parallel = self.parallel();
        single_qubit::apply_pair_op(self.amplitudes_mut(), target, parallel, |a0, a1| {
            ((a0 + a1) * INV_SQRT2, (a0 - a1) * INV_SQRT2)
        });
        Ok(())
    }

    /// S = diag(1, i)
    pub fn s(&mut self, target: usize) -> Result<()> {
        self.apply_upper_phase(target, Complex64::new(0.0, 1.0))
    }

    /// T = diag(1, e^(iπ/4))
    pub fn t(&mut self, target: usize) -> Result<()> {
        self.apply_upper_phase(target, Complex64::new(INV_SQRT2, INV_SQRT2))
    }

    /// S† = diag(1, -i)
    pub fn sdg(&mut self, target: usize) -> Result<()> {
        self.apply_upper_phase(target, Complex64::new(0.0, -1.0))
    }

    /// T† = diag(1, e^(-iπ/4))
    pub fn tdg(&mut self, target: usize) -> Result<()> {
        self.apply_upper_phase(target, Complex64::new(INV_SQRT2, -INV_SQRT2))
    }

    /// Rotation about X by `theta` radians
    pub fn rx(&mut self, target: usize, theta: f64) -> Result<()> {
        self.apply_matrix(&matrices::rx(theta), target)
    }

    /// Rotation about Y by `theta` radians
    pub fn ry(&mut self, target: usize, theta: f64) -> Result<()> {
        self.apply_matrix(&matrices::ry(theta), target)
    }

    /// Rotation about Z by `theta` radians: diag(e^(-iθ/2), e^(iθ/2))
    pub fn rz(&mut self, target: usize, theta: f64) -> Result<()> {
        self.check_qubit(target)?;
        let parallel = self.parallel();
        single_qubit::apply_diagonal(
            self.amplitudes_mut(),
            target,
            Complex64::from_polar(1.0, -theta / 2.0),
            Complex64::from_polar(1.0, theta / 2.0),
            parallel,
        );
        Ok(())
    }

    /// Phase gate diag(1, e^(iφ))
    pub fn phase(&mut self, target: usize, phi: f64) -> Result<()> {
        self.apply_upper_phase(target, Complex64::from_polar(1.0, phi))
    }

    /// Apply an arbitrary row-major 2×2 matrix to `target`
    ///
    /// The matrix is not checked for unitarity.
    pub fn apply_matrix(&mut self, matrix: &Matrix2, target: usize) -> Result<()> {
        self.check_qubit(target)?;
        let parallel = self.parallel();
        single_qubit::apply_matrix(self.amplitudes_mut(), matrix, target, parallel);
        Ok(())
    }

    fn apply_upper_phase(&mut self, target: usize, factor: Complex64) -> Result<()> {
        self.check_qubit(target)?;
        let parallel = self.parallel();
        single_qubit::apply_upper_phase(self.amplitudes_mut(), target, factor, parallel);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Two- and three-qubit gates
    // ------------------------------------------------------------------

    /// Controlled-NOT
    ///
    /// # Errors
    /// `InvalidQubitIndex` for out-of-range qubits, `InvalidGate` if
    /// `control == target`.
    pub fn cnot(&mut self, control: usize, target: usize) -> Result<()> {
        self.check_distinct("CNOT", &[control, target])?;
        let parallel = self.parallel();
        controlled::cnot(self.amplitudes_mut(), control, target, parallel);
        Ok(())
    }

    /// Controlled-Y
    pub fn cy(&mut self, control: usize, target: usize) -> Result<()> {
        self.check_distinct("CY", &[control, target])?;
        let parallel = self.parallel();
        controlled::controlled_pair_op(
            self.amplitudes_mut(),
            control,
            target,
            parallel,
            pauli_y_pair,
        );
        Ok(())
    }

    /// Controlled-Z
    pub fn cz(&mut self, control: usize, target: usize) -> Result<()> {
        self.check_distinct("CZ", &[control, target])?;
        let parallel = self.parallel();
        controlled::cz(self.amplitudes_mut(), control, target, parallel);
        Ok(())
    }

    /// Multiply amplitudes with both `control` and `target` set by e^(iφ)
    pub fn controlled_phase(&mut self, control: usize, target: usize, phi: f64) -> Result<()> {
        self.check_distinct("CPHASE", &[control, target])?;
        let parallel = self.parallel();
        controlled::controlled_phase(
            self.amplitudes_mut(),
            control,
            target,
            Complex64::from_polar(1.0, phi),
            parallel,
        );
        Ok(())
    }

    /// SWAP; a no-op when `qubit1 == qubit2`
    pub fn swap(&mut self, qubit1: usize, qubit2: usize) -> Result<()> {
        self.check_qubit(qubit1)?;
        self.check_qubit(qubit2)?;
        if qubit1 == qubit2 {
            return Ok(());
        }
        let parallel = self.parallel();
        controlled::swap(self.amplitudes_mut(), qubit1, qubit2, parallel);
        Ok(())
    }

    /// Toffoli (CCNOT)
    ///
    /// # Example
    /// ```
    /// use qvec_state::QuantumState;
    ///
    /// let mut state = QuantumState::from_basis("110").unwrap();
    /// state.toffoli(0, 1, 2).unwrap();
    /// assert_eq!(state.basis_probability(7).unwrap(), 1.0);
    /// ```
    pub fn toffoli(&mut self, control1: usize, control2: usize, target: usize) -> Result<()> {
        self.check_distinct("TOFFOLI", &[control1, control2, target])?;
        let parallel = self.parallel();
        controlled::toffoli(self.amplitudes_mut(), control1, control2, target, parallel);
        Ok(())
    }

    /// Fredkin (controlled SWAP)
    pub fn fredkin(&mut self, control: usize, swap1: usize, swap2: usize) -> Result<()> {
        self.check_distinct("FREDKIN", &[control, swap1, swap2])?;
        let parallel = self.parallel();
        controlled::fredkin(self.amplitudes_mut(), control, swap1, swap2, parallel);
        Ok(())
    }

    /// Move the amplitude of every basis state `i` to `mapping(i)`
    ///
    /// `mapping` must be a bijection on `[0, dimension)`; it is checked in a
    /// scratch buffer before the state is overwritten.
    ///
    /// # Errors
    /// `InvalidGate` if `mapping` is not a permutation, `OutOfMemory` if the
    /// scratch buffer cannot be allocated.
    pub fn apply_permutation<F>(&mut self, mapping: F) -> Result<()>
    where
        F: Fn(usize) -> usize,
    {
        let mut scratch = alloc_zeroed(self.dimension())?;
        if !permutation::permute_into(self.amplitudes(), &mut scratch, mapping) {
            return Err(QuantumError::invalid_gate(
                "mapping is not a permutation of the basis states",
            ));
        }
        self.amplitudes_mut().copy_from_slice(&scratch);
        Ok(())
    }
}
