//! Quantum state vector: lifecycle and introspection
//!
//! Gate, measurement and observable methods live in their own modules as
//! further `impl QuantumState` blocks.

use crate::config::KernelConfig;
use crate::error::{QuantumError, Result};
use crate::measurement::bitstring;
use num_complex::Complex64;
use std::fmt;
use tracing::debug;

/// Largest supported register (2^30 amplitudes, 16 GiB)
pub const MAX_QUBITS: usize = 30;

/// Norms below this are treated as the null vector
pub const NORM_EPSILON: f64 = 1e-10;

/// Amplitudes shown by the `Display` dump
const DISPLAY_AMPLITUDES: usize = 10;

/// Full amplitude vector of an n-qubit register
///
/// Basis index `i` holds qubit `q` in bit `q` of `i`, so qubit 0 is the least
/// significant bit. The amplitude buffer has exactly `2^num_qubits` entries
/// for the lifetime of the state.
///
/// # Example
///
/// ```
/// use qvec_state::QuantumState;
///
/// // Create a 2-qubit state (4 amplitudes)
/// let state = QuantumState::new(2).unwrap();
/// assert_eq!(state.num_qubits(), 2);
/// assert_eq!(state.dimension(), 4);
/// ```
#[derive(Clone, PartialEq)]
pub struct QuantumState {
    /// Number of qubits
    num_qubits: usize,

    /// Amplitudes, `2^num_qubits` of them
    amplitudes: Vec<Complex64>,

    /// Kernel iteration settings
    config: KernelConfig,
}

/// Allocate `dimension` zeroed amplitudes without aborting on failure
pub(crate) fn alloc_zeroed(dimension: usize) -> Result<Vec<Complex64>> {
    let bytes = dimension.saturating_mul(std::mem::size_of::<Complex64>());
    let mut amplitudes = Vec::new();
    amplitudes
        .try_reserve_exact(dimension)
        .map_err(|_| QuantumError::OutOfMemory { bytes })?;
    amplitudes.resize(dimension, Complex64::new(0.0, 0.0));
    Ok(amplitudes)
}

fn check_qubit_count(num_qubits: usize) -> Result<()> {
    if num_qubits == 0 || num_qubits > MAX_QUBITS {
        return Err(QuantumError::InvalidQubitCount {
            requested: num_qubits,
            max: MAX_QUBITS,
        });
    }
    Ok(())
}

impl QuantumState {
    /// Create a state initialized to |0...0⟩
    ///
    /// # Errors
    /// `InvalidQubitCount` unless `1 <= num_qubits <= MAX_QUBITS`,
    /// `OutOfMemory` if the buffer cannot be allocated.
    ///
    /// # Example
    /// ```
    /// use qvec_state::QuantumState;
    ///
    /// let state = QuantumState::new(3).unwrap();
    /// assert_eq!(state.amplitude(0).unwrap().re, 1.0);
    /// ```
    pub fn new(num_qubits: usize) -> Result<Self> {
        check_qubit_count(num_qubits)?;

        let dimension = 1usize << num_qubits;
        let mut amplitudes = alloc_zeroed(dimension)?;
        amplitudes[0] = Complex64::new(1.0, 0.0);

        debug!(num_qubits, dimension, "created quantum state");

        Ok(Self {
            num_qubits,
            amplitudes,
            config: KernelConfig::default(),
        })
    }

    /// Create a state from raw amplitudes
    ///
    /// The amplitudes are taken as given; call [`normalize`](Self::normalize)
    /// if they are not unit-norm.
    ///
    /// # Errors
    /// `InvalidQubitCount` for an unsupported register size, `LengthMismatch`
    /// if `amplitudes.len() != 2^num_qubits`.
    pub fn from_amplitudes(num_qubits: usize, amplitudes: &[Complex64]) -> Result<Self> {
        check_qubit_count(num_qubits)?;

        let dimension = 1usize << num_qubits;
        if amplitudes.len() != dimension {
            return Err(QuantumError::LengthMismatch {
                expected: dimension,
                actual: amplitudes.len(),
            });
        }

        let mut state = Self::new(num_qubits)?;
        state.amplitudes.copy_from_slice(amplitudes);
        Ok(state)
    }

    /// Create a state in the basis state named by `bits` (leftmost = qubit 0)
    ///
    /// # Example
    /// ```
    /// use qvec_state::QuantumState;
    ///
    /// // qubit 0 = 1, qubit 1 = 0, qubit 2 = 0 -> index 1
    /// let state = QuantumState::from_basis("100").unwrap();
    /// assert_eq!(state.basis_probability(1).unwrap(), 1.0);
    /// ```
    pub fn from_basis(bits: &str) -> Result<Self> {
        let mut state = Self::new(bits.chars().count())?;
        state.init_basis(bits)?;
        Ok(state)
    }

    /// Replace the kernel configuration, builder style
    pub fn with_config(mut self, config: KernelConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the kernel configuration
    pub fn set_config(&mut self, config: KernelConfig) {
        self.config = config;
    }

    /// Current kernel configuration
    #[inline]
    pub fn config(&self) -> KernelConfig {
        self.config
    }

    /// Get the number of qubits
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Get the state dimension (2^num_qubits)
    #[inline]
    pub fn dimension(&self) -> usize {
        self.amplitudes.len()
    }

    /// Get a reference to the state amplitudes
    #[inline]
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    #[inline]
    pub(crate) fn amplitudes_mut(&mut self) -> &mut [Complex64] {
        &mut self.amplitudes
    }

    /// Whether kernels on this state should use the rayon pool
    #[inline]
    pub(crate) fn parallel(&self) -> bool {
        self.config.use_parallel(self.dimension())
    }

    /// Amplitude of basis state `index`
    pub fn amplitude(&self, index: usize) -> Result<Complex64> {
        self.amplitudes
            .get(index)
            .copied()
            .ok_or(QuantumError::InvalidIndex {
                index,
                dimension: self.dimension(),
            })
    }

    /// Overwrite the amplitude of basis state `index`
    ///
    /// No renormalization happens; this is the fixture path for preparing
    /// arbitrary (possibly unnormalized) states.
    pub fn set_amplitude(&mut self, index: usize, value: Complex64) -> Result<()> {
        let dimension = self.dimension();
        let slot = self
            .amplitudes
            .get_mut(index)
            .ok_or(QuantumError::InvalidIndex { index, dimension })?;
        *slot = value;
        Ok(())
    }

    /// Deep copy that reports allocation failure instead of aborting
    pub fn try_clone(&self) -> Result<Self> {
        let mut amplitudes = alloc_zeroed(self.dimension())?;
        amplitudes.copy_from_slice(&self.amplitudes);
        Ok(Self {
            num_qubits: self.num_qubits,
            amplitudes,
            config: self.config,
        })
    }

    /// Reinitialize to the basis state named by `bits` (leftmost = qubit 0)
    ///
    /// # Errors
    /// `LengthMismatch` if `bits` does not have one character per qubit,
    /// `InvalidCharacter` for anything but `'0'`/`'1'`. The state is untouched
    /// on error.
    pub fn init_basis(&mut self, bits: &str) -> Result<()> {
        let length = bits.chars().count();
        if length != self.num_qubits {
            return Err(QuantumError::LengthMismatch {
                expected: self.num_qubits,
                actual: length,
            });
        }

        let mut index = 0usize;
        for (position, character) in bits.chars().enumerate() {
            match character {
                '0' => {}
                '1' => index |= 1 << position,
                _ => {
                    return Err(QuantumError::InvalidCharacter {
                        character,
                        position,
                    })
                }
            }
        }

        self.amplitudes.fill(Complex64::new(0.0, 0.0));
        self.amplitudes[index] = Complex64::new(1.0, 0.0);
        Ok(())
    }

    /// Reset the state to |0...0⟩
    pub fn reset(&mut self) {
        self.amplitudes.fill(Complex64::new(0.0, 0.0));
        self.amplitudes[0] = Complex64::new(1.0, 0.0);
    }

    /// Compute the norm of the state vector
    ///
    /// # Returns
    /// The L2 norm √(Σ|aᵢ|²)
    pub fn norm(&self) -> f64 {
        self.amplitudes
            .iter()
            .map(|a| a.norm_sqr())
            .sum::<f64>()
            .sqrt()
    }

    /// Scale all amplitudes so that the norm equals 1
    ///
    /// # Errors
    /// `ZeroState` if the norm is below [`NORM_EPSILON`].
    pub fn normalize(&mut self) -> Result<()> {
        let norm = self.norm();
        if norm < NORM_EPSILON {
            return Err(QuantumError::ZeroState { norm });
        }

        let inv_norm = 1.0 / norm;
        for amplitude in &mut self.amplitudes {
            *amplitude *= inv_norm;
        }

        debug!(norm, "normalized quantum state");
        Ok(())
    }

    /// Check if the state is normalized (|norm - 1| < epsilon)
    pub fn is_normalized(&self, epsilon: f64) -> bool {
        (self.norm() - 1.0).abs() < epsilon
    }

    /// Inner product ⟨self|other⟩
    ///
    /// # Errors
    /// `LengthMismatch` if the states have different dimensions.
    pub fn inner_product(&self, other: &QuantumState) -> Result<Complex64> {
        if self.dimension() != other.dimension() {
            return Err(QuantumError::LengthMismatch {
                expected: self.dimension(),
                actual: other.dimension(),
            });
        }

        Ok(self
            .amplitudes
            .iter()
            .zip(other.amplitudes.iter())
            .map(|(a, b)| a.conj() * b)
            .sum())
    }

    /// Fidelity |⟨self|other⟩|²
    pub fn fidelity(&self, other: &QuantumState) -> Result<f64> {
        Ok(self.inner_product(other)?.norm_sqr())
    }

    /// Bytes held by the amplitude buffer
    pub fn memory_bytes(&self) -> usize {
        self.dimension() * std::mem::size_of::<Complex64>()
    }
}

impl fmt::Debug for QuantumState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuantumState")
            .field("num_qubits", &self.num_qubits)
            .field("dimension", &self.dimension())
            .field("norm", &self.norm())
            .field("config", &self.config)
            .finish()
    }
}

/// Human-readable dump: sizes, norm, memory and the first non-zero amplitudes
impl fmt::Display for QuantumState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const RULE: &str = "======================================";

        writeln!(f, "{RULE}")?;
        writeln!(f, "Quantum State Information")?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "Number of qubits: {}", self.num_qubits)?;
        writeln!(
            f,
            "Vector size: {} (2^{})",
            self.dimension(),
            self.num_qubits
        )?;
        writeln!(f, "Norm: {:.6}", self.norm())?;
        writeln!(f, "Memory: {:.2} KB", self.memory_bytes() as f64 / 1024.0)?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "Non-zero amplitudes (up to {DISPLAY_AMPLITUDES}):")?;

        let nonzero = self
            .amplitudes
            .iter()
            .enumerate()
            .filter(|(_, amp)| amp.norm() > NORM_EPSILON)
            .take(DISPLAY_AMPLITUDES);
        for (index, amp) in nonzero {
            writeln!(
                f,
                "  |{}⟩: {:.6}{:+.6}i (prob: {:.4}%)",
                bitstring(index, self.num_qubits),
                amp.re,
                amp.im,
                amp.norm_sqr() * 100.0
            )?;
        }
        write!(f, "{RULE}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_state_vector() {
        let state = QuantumState::new(2).unwrap();
        assert_eq!(state.num_qubits(), 2);
        assert_eq!(state.dimension(), 4);
        assert_eq!(state.memory_bytes(), 64);
    }

    #[test]
    fn test_initial_state() {
        let state = QuantumState::new(3).unwrap();
        let amplitudes = state.amplitudes();

        // Should be |000⟩
        assert_eq!(amplitudes[0], Complex64::new(1.0, 0.0));
        for amp in &amplitudes[1..] {
            assert_eq!(*amp, Complex64::new(0.0, 0.0));
        }
    }

    #[test]
    fn test_qubit_count_bounds() {
        assert!(matches!(
            QuantumState::new(0),
            Err(QuantumError::InvalidQubitCount { requested: 0, .. })
        ));
        assert!(matches!(
            QuantumState::new(MAX_QUBITS + 1),
            Err(QuantumError::InvalidQubitCount { .. })
        ));
        assert!(QuantumState::new(1).is_ok());
    }

    #[test]
    fn test_from_amplitudes() {
        let amplitudes = vec![Complex64::new(0.5, 0.0); 4];
        let state = QuantumState::from_amplitudes(2, &amplitudes).unwrap();
        assert_eq!(state.amplitudes(), amplitudes.as_slice());
    }

    #[test]
    fn test_dimension_mismatch() {
        let amplitudes = vec![Complex64::new(1.0, 0.0)];
        let result = QuantumState::from_amplitudes(2, &amplitudes);
        assert_eq!(
            result.unwrap_err(),
            QuantumError::LengthMismatch {
                expected: 4,
                actual: 1
            }
        );
    }

    #[test]
    fn test_init_basis_is_little_endian() {
        let mut state = QuantumState::new(3).unwrap();
        state.init_basis("110").unwrap();
        // qubit 0 = 1, qubit 1 = 1 -> index 3
        assert_eq!(state.amplitude(3).unwrap(), Complex64::new(1.0, 0.0));
        assert_relative_eq!(state.norm(), 1.0);
    }

    #[test]
    fn test_init_basis_validates_before_mutating() {
        let mut state = QuantumState::new(2).unwrap();
        state.h(0).unwrap();
        let before = state.clone();

        assert_eq!(
            state.init_basis("1").unwrap_err(),
            QuantumError::LengthMismatch {
                expected: 2,
                actual: 1
            }
        );
        assert_eq!(
            state.init_basis("1x").unwrap_err(),
            QuantumError::InvalidCharacter {
                character: 'x',
                position: 1
            }
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_norm() {
        let state = QuantumState::new(2).unwrap();
        assert_relative_eq!(state.norm(), 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_normalize() {
        let amplitudes = vec![Complex64::new(2.0, 0.0), Complex64::new(2.0, 0.0)];
        let mut state = QuantumState::from_amplitudes(1, &amplitudes).unwrap();
        assert_relative_eq!(state.norm(), 8f64.sqrt(), epsilon = 1e-12);

        state.normalize().unwrap();
        assert_relative_eq!(state.norm(), 1.0, epsilon = 1e-10);
        assert_relative_eq!(state.amplitudes()[0].re, 0.5f64.sqrt(), epsilon = 1e-10);
    }

    #[test]
    fn test_normalize_zero_state() {
        let mut state = QuantumState::new(2).unwrap();
        state.set_amplitude(0, Complex64::new(0.0, 0.0)).unwrap();
        assert!(matches!(
            state.normalize(),
            Err(QuantumError::ZeroState { .. })
        ));
    }

    #[test]
    fn test_reset() {
        let amplitudes = vec![Complex64::new(0.5, 0.0); 4];
        let mut state = QuantumState::from_amplitudes(2, &amplitudes).unwrap();
        state.reset();

        assert_eq!(state.amplitudes()[0], Complex64::new(1.0, 0.0));
        for i in 1..state.dimension() {
            assert_eq!(state.amplitudes()[i], Complex64::new(0.0, 0.0));
        }
    }

    #[test]
    fn test_amplitude_accessors() {
        let mut state = QuantumState::new(1).unwrap();
        state.set_amplitude(1, Complex64::new(0.0, 1.0)).unwrap();
        assert_eq!(state.amplitude(1).unwrap(), Complex64::new(0.0, 1.0));
        assert_eq!(
            state.amplitude(2).unwrap_err(),
            QuantumError::InvalidIndex {
                index: 2,
                dimension: 2
            }
        );
        assert!(state.set_amplitude(5, Complex64::new(1.0, 0.0)).is_err());
    }

    #[test]
    fn test_clone_is_independent() {
        let mut original = QuantumState::new(2).unwrap();
        let copy = original.try_clone().unwrap();
        original.x(0).unwrap();
        assert_eq!(copy.amplitude(0).unwrap(), Complex64::new(1.0, 0.0));
        assert_eq!(original.amplitude(1).unwrap(), Complex64::new(1.0, 0.0));
    }

    #[test]
    fn test_inner_product_and_fidelity() {
        let zero = QuantumState::new(1).unwrap();
        let mut plus = QuantumState::new(1).unwrap();
        plus.h(0).unwrap();

        assert_relative_eq!(zero.fidelity(&zero).unwrap(), 1.0);
        assert_relative_eq!(zero.fidelity(&plus).unwrap(), 0.5, epsilon = 1e-12);

        let two = QuantumState::new(2).unwrap();
        assert!(zero.inner_product(&two).is_err());
    }

    #[test]
    fn test_display_lists_nonzero_amplitudes() {
        let mut state = QuantumState::new(2).unwrap();
        state.x(0).unwrap();
        let dump = state.to_string();
        assert!(dump.contains("Number of qubits: 2"));
        assert!(dump.contains("Vector size: 4 (2^2)"));
        assert!(dump.contains("Norm: 1.000000"));
        assert!(dump.contains("|10⟩: 1.000000+0.000000i (prob: 100.0000%)"));
        assert!(!dump.contains("|00⟩"));
    }
}
