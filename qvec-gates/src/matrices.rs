//! Constant single-qubit gate matrices
//!
//! Matrices are row-major `[[m00, m01], [m10, m11]]` and act on the pair
//! `(a0, a1)` of amplitudes whose indices differ only in the target bit:
//! `a0' = m00·a0 + m01·a1`, `a1' = m10·a0 + m11·a1`.
//!
//! The state kernels apply closed-form transforms; these matrices are the
//! reference they are checked against and the input of the generic 2×2 path.

use crate::descriptor::{GateKind, QuantumGate};
use num_complex::Complex64;

/// Row-major 2×2 complex matrix
pub type Matrix2 = [[Complex64; 2]; 2];

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);
const NEG_I: Complex64 = Complex64::new(0.0, -1.0);
const NEG_ONE: Complex64 = Complex64::new(-1.0, 0.0);

/// 1/√2
pub const INV_SQRT2: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// Identity
/// I = [[1, 0],
///      [0, 1]]
pub const IDENTITY: Matrix2 = [[ONE, ZERO], [ZERO, ONE]];

/// Pauli-X (NOT)
/// X = [[0, 1],
///      [1, 0]]
pub const PAULI_X: Matrix2 = [[ZERO, ONE], [ONE, ZERO]];

/// Pauli-Y
/// Y = [[0, -i],
///      [i,  0]]
pub const PAULI_Y: Matrix2 = [[ZERO, NEG_I], [I, ZERO]];

/// Pauli-Z
/// Z = [[1,  0],
///      [0, -1]]
pub const PAULI_Z: Matrix2 = [[ONE, ZERO], [ZERO, NEG_ONE]];

/// Hadamard
/// H = 1/√2 * [[1,  1],
///             [1, -1]]
pub const HADAMARD: Matrix2 = [
    [Complex64::new(INV_SQRT2, 0.0), Complex64::new(INV_SQRT2, 0.0)],
    [Complex64::new(INV_SQRT2, 0.0), Complex64::new(-INV_SQRT2, 0.0)],
];

/// S (√Z)
/// S = [[1, 0],
///      [0, i]]
pub const S_GATE: Matrix2 = [[ONE, ZERO], [ZERO, I]];

/// S†
/// S† = [[1,  0],
///       [0, -i]]
pub const S_GATE_DAGGER: Matrix2 = [[ONE, ZERO], [ZERO, NEG_I]];

/// T (π/8)
/// T = [[1, 0],
///      [0, e^(iπ/4)]]
pub const T_GATE: Matrix2 = [
    [ONE, ZERO],
    [ZERO, Complex64::new(INV_SQRT2, INV_SQRT2)], // e^(iπ/4) = (1+i)/√2
];

/// T†
/// T† = [[1, 0],
///       [0, e^(-iπ/4)]]
pub const T_GATE_DAGGER: Matrix2 = [
    [ONE, ZERO],
    [ZERO, Complex64::new(INV_SQRT2, -INV_SQRT2)], // e^(-iπ/4) = (1-i)/√2
];

/// Rotation about X
/// Rx(θ) = [[cos(θ/2),    -i·sin(θ/2)],
///          [-i·sin(θ/2),  cos(θ/2)]]
pub fn rx(theta: f64) -> Matrix2 {
    let (sin, cos) = (theta / 2.0).sin_cos();
    [
        [Complex64::new(cos, 0.0), Complex64::new(0.0, -sin)],
        [Complex64::new(0.0, -sin), Complex64::new(cos, 0.0)],
    ]
}

/// Rotation about Y
/// Ry(θ) = [[cos(θ/2), -sin(θ/2)],
///          [sin(θ/2),  cos(θ/2)]]
pub fn ry(theta: f64) -> Matrix2 {
    let (sin, cos) = (theta / 2.0).sin_cos();
    [
        [Complex64::new(cos, 0.0), Complex64::new(-sin, 0.0)],
        [Complex64::new(sin, 0.0), Complex64::new(cos, 0.0)],
    ]
}

/// Rotation about Z
/// Rz(θ) = [[e^(-iθ/2), 0],
///          [0,         e^(iθ/2)]]
pub fn rz(theta: f64) -> Matrix2 {
    [
        [Complex64::from_polar(1.0, -theta / 2.0), ZERO],
        [ZERO, Complex64::from_polar(1.0, theta / 2.0)],
    ]
}

/// Phase gate
/// P(φ) = [[1, 0],
///         [0, e^(iφ)]]
pub fn phase(phi: f64) -> Matrix2 {
    [[ONE, ZERO], [ZERO, Complex64::from_polar(1.0, phi)]]
}

/// Matrix of a single-qubit descriptor, `None` for multi-qubit kinds
pub fn single_qubit_matrix(gate: &QuantumGate) -> Option<Matrix2> {
    let matrix = match gate.kind {
        GateKind::I => IDENTITY,
        GateKind::X => PAULI_X,
        GateKind::Y => PAULI_Y,
        GateKind::Z => PAULI_Z,
        GateKind::H => HADAMARD,
        GateKind::S => S_GATE,
        GateKind::T => T_GATE,
        GateKind::Sdg => S_GATE_DAGGER,
        GateKind::Tdg => T_GATE_DAGGER,
        GateKind::Rx => rx(gate.angle),
        GateKind::Ry => ry(gate.angle),
        GateKind::Rz => rz(gate.angle),
        GateKind::Phase => phase(gate.phase),
        _ => return None,
    };
    Some(matrix)
}

/// Conjugate transpose
pub fn dagger(m: &Matrix2) -> Matrix2 {
    [
        [m[0][0].conj(), m[1][0].conj()],
        [m[0][1].conj(), m[1][1].conj()],
    ]
}

/// Matrix product `a · b`
pub fn multiply(a: &Matrix2, b: &Matrix2) -> Matrix2 {
    let mut result = [[ZERO; 2]; 2];
    for (i, row) in result.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = a[i][0] * b[0][j] + a[i][1] * b[1][j];
        }
    }
    result
}

/// Check `U†U ≈ I` within `epsilon`
pub fn is_unitary(m: &Matrix2, epsilon: f64) -> bool {
    let product = multiply(&dagger(m), m);
    product
        .iter()
        .flatten()
        .zip(IDENTITY.iter().flatten())
        .all(|(a, b)| (a - b).norm() < epsilon)
}
