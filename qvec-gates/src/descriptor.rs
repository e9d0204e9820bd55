//! Gate descriptors
//!
//! A [`QuantumGate`] is plain data: which gate, on which qubits, with which
//! parameters. It carries no code; the state engine dispatches on
//! [`GateKind`] when a descriptor is applied.
//!
//! Qubit roles per kind:
//!
//! | Kind | `target` | `control` | `control2` |
//! |---|---|---|---|
//! | single-qubit | qubit | – | – |
//! | `CX`, `CY`, `CZ`, `CPhase` | target | control | – |
//! | `Swap` | first qubit | – | second qubit |
//! | `Ccx` (Toffoli) | target | first control | second control |
//! | `Cswap` (Fredkin) | first swapped qubit | control | second swapped qubit |

use serde::{Deserialize, Serialize};
use std::fmt;

/// Gate kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GateKind {
    /// Identity
    I,
    /// Pauli-X (NOT)
    X,
    /// Pauli-Y
    Y,
    /// Pauli-Z
    Z,
    /// Hadamard
    H,
    /// S (√Z)
    S,
    /// T (π/8)
    T,
    /// S†
    Sdg,
    /// T†
    Tdg,
    /// Rotation about X by `angle`
    Rx,
    /// Rotation about Y by `angle`
    Ry,
    /// Rotation about Z by `angle`
    Rz,
    /// Phase e^(i·`phase`) on |1⟩
    Phase,
    /// Controlled-NOT
    Cx,
    /// Controlled-Y
    Cy,
    /// Controlled-Z
    Cz,
    /// Controlled phase e^(i·`phase`) on |11⟩
    CPhase,
    /// SWAP
    Swap,
    /// Toffoli (CCNOT)
    Ccx,
    /// Fredkin (controlled SWAP)
    Cswap,
}

impl GateKind {
    /// All kinds, in declaration order
    pub const ALL: [GateKind; 20] = [
        GateKind::I,
        GateKind::X,
        GateKind::Y,
        GateKind::Z,
        GateKind::H,
        GateKind::S,
        GateKind::T,
        GateKind::Sdg,
        GateKind::Tdg,
        GateKind::Rx,
        GateKind::Ry,
        GateKind::Rz,
        GateKind::Phase,
        GateKind::Cx,
        GateKind::Cy,
        GateKind::Cz,
        GateKind::CPhase,
        GateKind::Swap,
        GateKind::Ccx,
        GateKind::Cswap,
    ];

    /// Number of qubits the gate acts on
    pub fn num_qubits(self) -> usize {
        match self {
            GateKind::Cx | GateKind::Cy | GateKind::Cz | GateKind::CPhase | GateKind::Swap => 2,
            GateKind::Ccx | GateKind::Cswap => 3,
            _ => 1,
        }
    }

    /// Whether the gate reads `angle` or `phase`
    pub fn is_parameterized(self) -> bool {
        matches!(
            self,
            GateKind::Rx | GateKind::Ry | GateKind::Rz | GateKind::Phase | GateKind::CPhase
        )
    }

    /// Whether the gate is its own inverse
    pub fn is_self_inverse(self) -> bool {
        matches!(
            self,
            GateKind::I
                | GateKind::X
                | GateKind::Y
                | GateKind::Z
                | GateKind::H
                | GateKind::Cx
                | GateKind::Cy
                | GateKind::Cz
                | GateKind::Swap
                | GateKind::Ccx
                | GateKind::Cswap
        )
    }

    /// Canonical mnemonic
    pub fn name(self) -> &'static str {
        match self {
            GateKind::I => "I",
            GateKind::X => "X",
            GateKind::Y => "Y",
            GateKind::Z => "Z",
            GateKind::H => "H",
            GateKind::S => "S",
            GateKind::T => "T",
            GateKind::Sdg => "SDG",
            GateKind::Tdg => "TDG",
            GateKind::Rx => "RX",
            GateKind::Ry => "RY",
            GateKind::Rz => "RZ",
            GateKind::Phase => "P",
            GateKind::Cx => "CX",
            GateKind::Cy => "CY",
            GateKind::Cz => "CZ",
            GateKind::CPhase => "CP",
            GateKind::Swap => "SWAP",
            GateKind::Ccx => "CCX",
            GateKind::Cswap => "CSWAP",
        }
    }

    /// Look up a kind by mnemonic, case-insensitively
    ///
    /// Accepts the canonical names plus common aliases (`CNOT`, `TOFFOLI`,
    /// `FREDKIN`, `S_DAG`, `CPHASE`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        let kind = match name.trim().to_ascii_uppercase().as_str() {
            "I" | "ID" => GateKind::I,
            "X" | "NOT" => GateKind::X,
            "Y" => GateKind::Y,
            "Z" => GateKind::Z,
            "H" => GateKind::H,
            "S" => GateKind::S,
            "T" => GateKind::T,
            "SDG" | "S_DAG" | "SDAG" => GateKind::Sdg,
            "TDG" | "T_DAG" | "TDAG" => GateKind::Tdg,
            "RX" => GateKind::Rx,
            "RY" => GateKind::Ry,
            "RZ" => GateKind::Rz,
            "P" | "PHASE" => GateKind::Phase,
            "CX" | "CNOT" => GateKind::Cx,
            "CY" => GateKind::Cy,
            "CZ" => GateKind::Cz,
            "CP" | "CPHASE" => GateKind::CPhase,
            "SWAP" => GateKind::Swap,
            "CCX" | "CCNOT" | "TOFFOLI" => GateKind::Ccx,
            "CSWAP" | "FREDKIN" => GateKind::Cswap,
            _ => return None,
        };
        Some(kind)
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Gate descriptor
///
/// # Example
///
/// ```
/// use qvec_gates::{GateKind, QuantumGate};
///
/// let gate = QuantumGate::toffoli(0, 1, 2);
/// assert_eq!(gate.kind, GateKind::Ccx);
/// assert_eq!(gate.qubits(), vec![0, 1, 2]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuantumGate {
    /// Which gate
    pub kind: GateKind,
    /// Target qubit (first swapped qubit for SWAP/Fredkin)
    pub target: usize,
    /// Control qubit, `None` for uncontrolled gates
    pub control: Option<usize>,
    /// Second control (Toffoli) or second swapped qubit (SWAP/Fredkin)
    pub control2: Option<usize>,
    /// Rotation angle in radians (Rx/Ry/Rz)
    pub angle: f64,
    /// Phase in radians (Phase/CPhase)
    pub phase: f64,
}

impl QuantumGate {
    /// Uncontrolled, unparameterized descriptor of `kind` on `target`
    pub fn new(kind: GateKind, target: usize) -> Self {
        Self {
            kind,
            target,
            control: None,
            control2: None,
            angle: 0.0,
            phase: 0.0,
        }
    }

    /// Set the control qubit
    pub fn with_control(mut self, control: usize) -> Self {
        self.control = Some(control);
        self
    }

    /// Set the second control / second swapped qubit
    pub fn with_control2(mut self, control2: usize) -> Self {
        self.control2 = Some(control2);
        self
    }

    /// Set the rotation angle
    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    /// Set the phase parameter
    pub fn with_phase(mut self, phase: f64) -> Self {
        self.phase = phase;
        self
    }

    pub fn identity(target: usize) -> Self {
        Self::new(GateKind::I, target)
    }

    pub fn x(target: usize) -> Self {
        Self::new(GateKind::X, target)
    }

    pub fn y(target: usize) -> Self {
        Self::new(GateKind::Y, target)
    }

    pub fn z(target: usize) -> Self {
        Self::new(GateKind::Z, target)
    }

    pub fn h(target: usize) -> Self {
        Self::new(GateKind::H, target)
    }

    pub fn s(target: usize) -> Self {
        Self::new(GateKind::S, target)
    }

    pub fn t(target: usize) -> Self {
        Self::new(GateKind::T, target)
    }

    pub fn sdg(target: usize) -> Self {
        Self::new(GateKind::Sdg, target)
    }

    pub fn tdg(target: usize) -> Self {
        Self::new(GateKind::Tdg, target)
    }

    pub fn rx(target: usize, angle: f64) -> Self {
        Self::new(GateKind::Rx, target).with_angle(angle)
    }

    pub fn ry(target: usize, angle: f64) -> Self {
        Self::new(GateKind::Ry, target).with_angle(angle)
    }

    pub fn rz(target: usize, angle: f64) -> Self {
        Self::new(GateKind::Rz, target).with_angle(angle)
    }

    pub fn phase_gate(target: usize, phase: f64) -> Self {
        Self::new(GateKind::Phase, target).with_phase(phase)
    }

    pub fn cnot(control: usize, target: usize) -> Self {
        Self::new(GateKind::Cx, target).with_control(control)
    }

    pub fn cy(control: usize, target: usize) -> Self {
        Self::new(GateKind::Cy, target).with_control(control)
    }

    pub fn cz(control: usize, target: usize) -> Self {
        Self::new(GateKind::Cz, target).with_control(control)
    }

    pub fn cphase(control: usize, target: usize, phase: f64) -> Self {
        Self::new(GateKind::CPhase, target)
            .with_control(control)
            .with_phase(phase)
    }

    pub fn swap(qubit1: usize, qubit2: usize) -> Self {
        Self::new(GateKind::Swap, qubit1).with_control2(qubit2)
    }

    pub fn toffoli(control1: usize, control2: usize, target: usize) -> Self {
        Self::new(GateKind::Ccx, target)
            .with_control(control1)
            .with_control2(control2)
    }

    pub fn fredkin(control: usize, swap1: usize, swap2: usize) -> Self {
        Self::new(GateKind::Cswap, swap1)
            .with_control(control)
            .with_control2(swap2)
    }

    /// Every qubit the descriptor references, controls first
    pub fn qubits(&self) -> Vec<usize> {
        match self.kind {
            GateKind::Swap => std::iter::once(self.target).chain(self.control2).collect(),
            GateKind::Cswap => self
                .control
                .into_iter()
                .chain(std::iter::once(self.target))
                .chain(self.control2)
                .collect(),
            _ => self
                .control
                .into_iter()
                .chain(self.control2)
                .chain(std::iter::once(self.target))
                .collect(),
        }
    }

    /// Descriptor of the adjoint gate
    pub fn inverse(&self) -> Self {
        let mut inv = *self;
        match self.kind {
            GateKind::S => inv.kind = GateKind::Sdg,
            GateKind::Sdg => inv.kind = GateKind::S,
            GateKind::T => inv.kind = GateKind::Tdg,
            GateKind::Tdg => inv.kind = GateKind::T,
            GateKind::Rx | GateKind::Ry | GateKind::Rz => inv.angle = -self.angle,
            GateKind::Phase | GateKind::CPhase => inv.phase = -self.phase,
            _ => {}
        }
        inv
    }
}

impl fmt::Display for QuantumGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        match self.kind {
            GateKind::Rx | GateKind::Ry | GateKind::Rz => write!(f, "({})", self.angle)?,
            GateKind::Phase | GateKind::CPhase => write!(f, "({})", self.phase)?,
            _ => {}
        }
        let qubits = self
            .qubits()
            .iter()
            .map(|q| q.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, " {}", qubits)
    }
}
