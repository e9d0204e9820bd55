//! Apply [`QuantumGate`] descriptors to a state

use crate::error::{QuantumError, Result};
use crate::state_vector::QuantumState;
use qvec_gates::{GateKind, QuantumGate};
use tracing::trace;

fn require(role: Option<usize>, gate: &QuantumGate, name: &str) -> Result<usize> {
    role.ok_or_else(|| QuantumError::invalid_gate(format!("{} requires a {name}", gate.kind)))
}

impl QuantumState {
    /// Apply a gate descriptor
    ///
    /// Roles are read as documented on [`QuantumGate`]: `control` for the
    /// controlled gates, `control`/`control2` for Toffoli, `control2` as the
    /// second swapped qubit for SWAP and Fredkin.
    ///
    /// # Errors
    /// `InvalidGate` if a role the kind needs is missing, otherwise whatever
    /// the direct gate method returns.
    ///
    /// # Example
    /// ```
    /// use qvec_gates::QuantumGate;
    /// use qvec_state::QuantumState;
    ///
    /// let mut state = QuantumState::new(2).unwrap();
    /// for gate in [QuantumGate::h(0), QuantumGate::cnot(0, 1)] {
    ///     state.apply_gate(&gate).unwrap();
    /// }
    /// assert!((state.basis_probability(3).unwrap() - 0.5).abs() < 1e-12);
    /// ```
    pub fn apply_gate(&mut self, gate: &QuantumGate) -> Result<()> {
        trace!(%gate, "applying gate");

        let target = gate.target;
        match gate.kind {
            GateKind::I => self.identity(target),
            GateKind::X => self.x(target),
            GateKind::Y => self.y(target),
            GateKind::Z => self.z(target),
            GateKind::H => self.h(target),
            GateKind::S => self.s(target),
            GateKind::T => self.t(target),
            GateKind::Sdg => self.sdg(target),
            GateKind::Tdg => self.tdg(target),
            GateKind::Rx => self.rx(target, gate.angle),
            GateKind::Ry => self.ry(target, gate.angle),
            GateKind::Rz => self.rz(target, gate.angle),
            GateKind::Phase => self.phase(target, gate.phase),
            GateKind::Cx => self.cnot(require(gate.control, gate, "control")?, target),
            GateKind::Cy => self.cy(require(gate.control, gate, "control")?, target),
            GateKind::Cz => self.cz(require(gate.control, gate, "control")?, target),
            GateKind::CPhase => self.controlled_phase(
                require(gate.control, gate, "control")?,
                target,
                gate.phase,
            ),
            GateKind::Swap => self.swap(target, require(gate.control2, gate, "second qubit")?),
            GateKind::Ccx => self.toffoli(
                require(gate.control, gate, "control")?,
                require(gate.control2, gate, "second control")?,
                target,
            ),
            GateKind::Cswap => self.fredkin(
                require(gate.control, gate, "control")?,
                target,
                require(gate.control2, gate, "second qubit")?,
            ),
        }
    }

    /// Apply gates in order, stopping at the first error
    pub fn apply_gates<'a, I>(&mut self, gates: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a QuantumGate>,
    {
        gates.into_iter().try_for_each(|gate| self.apply_gate(gate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use num_complex::Complex64;
    use qvec_gates::matrices::single_qubit_matrix;

    #[test]
    fn test_dispatch_matches_direct_calls() {
        let gates = [
            QuantumGate::h(0),
            QuantumGate::h(1),
            QuantumGate::rx(2, 0.3),
            QuantumGate::ry(1, -0.8),
            QuantumGate::rz(0, 1.1),
            QuantumGate::phase_gate(2, 0.4),
            QuantumGate::s(1),
            QuantumGate::tdg(0),
            QuantumGate::cnot(0, 2),
            QuantumGate::cy(2, 1),
            QuantumGate::cz(1, 0),
            QuantumGate::cphase(0, 1, 0.9),
            QuantumGate::swap(0, 2),
            QuantumGate::toffoli(2, 1, 0),
            QuantumGate::fredkin(1, 0, 2),
        ];
        let mut dispatched = QuantumState::new(3).unwrap();
        dispatched.apply_gates(&gates).unwrap();

        let mut direct = QuantumState::new(3).unwrap();
        direct.h(0).unwrap();
        direct.h(1).unwrap();
        direct.rx(2, 0.3).unwrap();
        direct.ry(1, -0.8).unwrap();
        direct.rz(0, 1.1).unwrap();
        direct.phase(2, 0.4).unwrap();
        direct.s(1).unwrap();
        direct.tdg(0).unwrap();
        direct.cnot(0, 2).unwrap();
        direct.cy(2, 1).unwrap();
        direct.cz(1, 0).unwrap();
        direct.controlled_phase(0, 1, 0.9).unwrap();
        direct.swap(0, 2).unwrap();
        direct.toffoli(2, 1, 0).unwrap();
        direct.fredkin(1, 0, 2).unwrap();

        for (a, b) in dispatched.amplitudes().iter().zip(direct.amplitudes()) {
            assert_relative_eq!(a.re, b.re, epsilon = 1e-12);
            assert_relative_eq!(a.im, b.im, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_single_qubit_kernels_match_reference_matrices() {
        let mut prepared = QuantumState::new(3).unwrap();
        prepared.ry(0, 0.4).unwrap();
        prepared.h(1).unwrap();
        prepared.cnot(1, 2).unwrap();
        prepared.rx(2, 1.1).unwrap();

        let single_qubit = GateKind::ALL.iter().filter(|kind| kind.num_qubits() == 1);
        for &kind in single_qubit {
            for target in 0..3 {
                let gate = QuantumGate::new(kind, target)
                    .with_angle(0.77)
                    .with_phase(-1.3);
                let matrix = single_qubit_matrix(&gate).unwrap();

                let mut by_kernel = prepared.clone();
                by_kernel.apply_gate(&gate).unwrap();
                let mut by_matrix = prepared.clone();
                by_matrix.apply_matrix(&matrix, target).unwrap();

                for (a, b) in by_kernel.amplitudes().iter().zip(by_matrix.amplitudes()) {
                    assert_relative_eq!(a.re, b.re, epsilon = 1e-12);
                    assert_relative_eq!(a.im, b.im, epsilon = 1e-12);
                }
            }
        }
    }

    #[test]
    fn test_missing_roles_are_invalid() {
        let mut state = QuantumState::new(3).unwrap();
        for gate in [
            QuantumGate::new(GateKind::Cx, 1),
            QuantumGate::new(GateKind::CPhase, 1),
            QuantumGate::new(GateKind::Swap, 0),
            QuantumGate::new(GateKind::Ccx, 2).with_control(0),
            QuantumGate::new(GateKind::Cswap, 1).with_control2(2),
        ] {
            assert!(matches!(
                state.apply_gate(&gate),
                Err(QuantumError::InvalidGate { .. })
            ));
        }
        assert_eq!(state.amplitude(0).unwrap(), Complex64::new(1.0, 0.0));
    }

    #[test]
    fn test_gate_followed_by_inverse_is_identity() {
        let mut state = QuantumState::new(2).unwrap();
        state.h(0).unwrap();
        state.ry(1, 0.7).unwrap();
        let before = state.clone();

        for gate in [
            QuantumGate::t(0),
            QuantumGate::rx(1, 0.4),
            QuantumGate::cphase(1, 0, 1.3),
            QuantumGate::cy(0, 1),
        ] {
            state.apply_gate(&gate).unwrap();
            state.apply_gate(&gate.inverse()).unwrap();
        }
        assert_relative_eq!(state.fidelity(&before).unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_apply_gates_stops_at_first_error() {
        let mut state = QuantumState::new(2).unwrap();
        let gates = [QuantumGate::x(0), QuantumGate::x(7), QuantumGate::x(1)];
        assert!(state.apply_gates(&gates).is_err());
        assert_eq!(state.amplitude(1).unwrap(), Complex64::new(1.0, 0.0));
    }
}
