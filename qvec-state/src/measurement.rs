//! Measurement, collapse and sampling
//!
//! Randomness is always supplied by the caller, either as a `rand::Rng` or as
//! the uniform draw itself (`*_with` variants), so measurement is reproducible
//! under a seeded generator and testable without one.

use crate::error::{QuantumError, Result};
use crate::state_vector::{QuantumState, NORM_EPSILON};
use num_complex::Complex64;
use rand::Rng;
use rayon::prelude::*;
use std::collections::HashMap;
use tracing::debug;

/// Label of basis state `index` with qubit 0 first, e.g. index 1 of a 3-qubit
/// register is `"100"`
pub fn bitstring(index: usize, num_qubits: usize) -> String {
    (0..num_qubits)
        .map(|q| if (index >> q) & 1 == 1 { '1' } else { '0' })
        .collect()
}

/// Shot counts from repeated sampling
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingResult {
    /// Map from basis state index to count
    pub counts: HashMap<usize, usize>,

    /// Total number of shots
    pub shots: usize,
}

impl SamplingResult {
    /// Create an empty result for `shots` shots
    pub fn new(shots: usize) -> Self {
        Self {
            counts: HashMap::new(),
            shots,
        }
    }

    /// Record one outcome
    pub fn add_outcome(&mut self, outcome: usize) {
        *self.counts.entry(outcome).or_insert(0) += 1;
    }

    /// Count for `outcome`
    pub fn get_count(&self, outcome: usize) -> usize {
        self.counts.get(&outcome).copied().unwrap_or(0)
    }

    /// Relative frequency of `outcome`
    pub fn get_frequency(&self, outcome: usize) -> f64 {
        if self.shots == 0 {
            return 0.0;
        }
        self.get_count(outcome) as f64 / self.shots as f64
    }

    /// Outcomes with their counts, most frequent first (ties by index)
    pub fn sorted_outcomes(&self) -> Vec<(usize, usize)> {
        let mut outcomes: Vec<_> = self.counts.iter().map(|(&k, &v)| (k, v)).collect();
        outcomes.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        outcomes
    }

    /// Counts keyed by [`bitstring`] labels
    pub fn to_bitstring_counts(&self, num_qubits: usize) -> HashMap<String, usize> {
        self.counts
            .iter()
            .map(|(&outcome, &count)| (bitstring(outcome, num_qubits), count))
            .collect()
    }
}

impl QuantumState {
    /// Probability that `qubit` reads 1; the state is not modified
    pub fn probability(&self, qubit: usize) -> Result<f64> {
        self.check_qubit(qubit)?;
        Ok(self.qubit_probabilities(qubit).1)
    }

    /// |amplitude(index)|²
    pub fn basis_probability(&self, index: usize) -> Result<f64> {
        Ok(self.amplitude(index)?.norm_sqr())
    }

    /// |aᵢ|² for every basis state
    pub fn probabilities(&self) -> Vec<f64> {
        if self.parallel() {
            self.amplitudes().par_iter().map(|a| a.norm_sqr()).collect()
        } else {
            self.amplitudes().iter().map(|a| a.norm_sqr()).collect()
        }
    }

    /// (p0, p1) for `qubit`, unnormalized
    fn qubit_probabilities(&self, qubit: usize) -> (f64, f64) {
        let mask = 1usize << qubit;
        let split = |(i, a): (usize, &Complex64)| {
            if i & mask == 0 {
                (a.norm_sqr(), 0.0)
            } else {
                (0.0, a.norm_sqr())
            }
        };
        if self.parallel() {
            self.amplitudes()
                .par_iter()
                .enumerate()
                .map(split)
                .reduce(|| (0.0, 0.0), |a, b| (a.0 + b.0, a.1 + b.1))
        } else {
            self.amplitudes()
                .iter()
                .enumerate()
                .map(split)
                .fold((0.0, 0.0), |a, b| (a.0 + b.0, a.1 + b.1))
        }
    }

    /// Measure `qubit` with one uniform draw from `rng` and collapse the state
    ///
    /// # Returns
    /// The outcome, 0 or 1
    ///
    /// # Errors
    /// `InvalidQubitIndex` for an out-of-range qubit, `ZeroState` if the
    /// state has no weight. The state is untouched on error.
    pub fn measure<R: Rng + ?Sized>(&mut self, qubit: usize, rng: &mut R) -> Result<u8> {
        self.check_qubit(qubit)?;
        let u: f64 = rng.gen();
        self.measure_with(qubit, u)
    }

    /// Measure `qubit` using `random_value` in [0, 1) as the uniform draw
    ///
    /// Outcome 0 is chosen iff `random_value < p0 / (p0 + p1)`. Amplitudes
    /// inconsistent with the outcome are zeroed, the rest divided by
    /// √p(outcome).
    ///
    /// # Example
    /// ```
    /// use qvec_state::QuantumState;
    ///
    /// let mut state = QuantumState::new(1).unwrap();
    /// state.h(0).unwrap();
    /// assert_eq!(state.measure_with(0, 0.75).unwrap(), 1);
    /// assert_eq!(state.basis_probability(1).unwrap(), 1.0);
    /// ```
    pub fn measure_with(&mut self, qubit: usize, random_value: f64) -> Result<u8> {
        self.check_qubit(qubit)?;

        let (p0, p1) = self.qubit_probabilities(qubit);
        let total = p0 + p1;
        if total < NORM_EPSILON {
            return Err(QuantumError::ZeroState { norm: total.sqrt() });
        }

        // Never collapse onto a branch with no weight, whatever the draw.
        let outcome: u8 = if p1 <= 0.0 || (p0 > 0.0 && random_value < p0 / total) {
            0
        } else {
            1
        };
        let probability = if outcome == 0 { p0 } else { p1 };
        let inv_norm = 1.0 / probability.sqrt();
        let keep = usize::from(outcome);

        let collapse = |(idx, amp): (usize, &mut Complex64)| {
            if (idx >> qubit) & 1 == keep {
                *amp *= inv_norm;
            } else {
                *amp = Complex64::new(0.0, 0.0);
            }
        };
        if self.parallel() {
            self.amplitudes_mut()
                .par_iter_mut()
                .enumerate()
                .for_each(collapse);
        } else {
            self.amplitudes_mut().iter_mut().enumerate().for_each(collapse);
        }

        debug!(qubit, outcome, probability, "measured qubit");
        Ok(outcome)
    }

    /// Measure every qubit with one draw from `rng`
    ///
    /// # Returns
    /// Index of the basis state the register collapsed to
    pub fn measure_all<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<usize> {
        let u: f64 = rng.gen();
        self.measure_all_with(u)
    }

    /// Measure every qubit using `random_value` in [0, 1)
    ///
    /// The outcome is the first basis state whose cumulative probability
    /// exceeds `random_value · Σ|aᵢ|²`.
    pub fn measure_all_with(&mut self, random_value: f64) -> Result<usize> {
        let probabilities = self.probabilities();
        let outcome = select_outcome(&probabilities, random_value)?;

        let amplitudes = self.amplitudes_mut();
        amplitudes.fill(Complex64::new(0.0, 0.0));
        amplitudes[outcome] = Complex64::new(1.0, 0.0);

        debug!(outcome, "measured all qubits");
        Ok(outcome)
    }

    /// Draw `shots` whole-register samples without collapsing the state
    ///
    /// # Example
    /// ```
    /// use qvec_state::QuantumState;
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let state = QuantumState::from_basis("01").unwrap();
    /// let mut rng = StdRng::seed_from_u64(7);
    /// let result = state.sample(100, &mut rng).unwrap();
    /// assert_eq!(result.get_count(2), 100);
    /// ```
    pub fn sample<R: Rng + ?Sized>(&self, shots: usize, rng: &mut R) -> Result<SamplingResult> {
        let mut cumulative = self.probabilities();
        let mut running = 0.0;
        for p in cumulative.iter_mut() {
            running += *p;
            *p = running;
        }
        if running < NORM_EPSILON * NORM_EPSILON {
            return Err(QuantumError::ZeroState {
                norm: running.sqrt(),
            });
        }

        let last = cumulative.len() - 1;
        let mut result = SamplingResult::new(shots);
        for _ in 0..shots {
            let target = rng.gen::<f64>() * running;
            let outcome = cumulative.partition_point(|&c| c <= target).min(last);
            result.add_outcome(outcome);
        }
        Ok(result)
    }
}

/// Index chosen by cumulative selection over unnormalized `probabilities`
fn select_outcome(probabilities: &[f64], random_value: f64) -> Result<usize> {
    let total: f64 = probabilities.iter().sum();
    if total < NORM_EPSILON * NORM_EPSILON {
        return Err(QuantumError::ZeroState { norm: total.sqrt() });
    }

    let target = random_value * total;
    let mut cumulative = 0.0;
    let mut last_nonzero = 0;
    for (idx, &p) in probabilities.iter().enumerate() {
        if p > 0.0 {
            cumulative += p;
            last_nonzero = idx;
            if target < cumulative {
                return Ok(idx);
            }
        }
    }
    // Rounding left target at or above the final sum
    Ok(last_nonzero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_bitstring_is_qubit_zero_first() {
        assert_eq!(bitstring(1, 3), "100");
        assert_eq!(bitstring(6, 3), "011");
        assert_eq!(bitstring(0, 2), "00");
    }

    #[test]
    fn test_probability_is_non_destructive() {
        let mut state = QuantumState::new(2).unwrap();
        state.h(1).unwrap();
        let before = state.clone();
        assert_relative_eq!(state.probability(1).unwrap(), 0.5, epsilon = 1e-12);
        assert_relative_eq!(state.probability(0).unwrap(), 0.0, epsilon = 1e-12);
        assert_eq!(state, before);
    }

    #[test]
    fn test_basis_probability_bounds() {
        let state = QuantumState::new(2).unwrap();
        assert_eq!(state.basis_probability(0).unwrap(), 1.0);
        assert_eq!(
            state.basis_probability(4).unwrap_err(),
            QuantumError::InvalidIndex {
                index: 4,
                dimension: 4
            }
        );
    }

    #[test]
    fn test_measure_with_threshold() {
        let mut zero = QuantumState::new(1).unwrap();
        zero.h(0).unwrap();
        let mut one = zero.clone();

        assert_eq!(zero.measure_with(0, 0.49).unwrap(), 0);
        assert_relative_eq!(zero.amplitudes()[0].re, 1.0, epsilon = 1e-12);

        assert_eq!(one.measure_with(0, 0.51).unwrap(), 1);
        assert_relative_eq!(one.amplitudes()[1].re, 1.0, epsilon = 1e-12);
        assert_eq!(one.amplitudes()[0], Complex64::new(0.0, 0.0));
    }

    #[test]
    fn test_measure_collapses_entangled_partner() {
        let mut state = QuantumState::new(2).unwrap();
        state.h(0).unwrap();
        state.cnot(0, 1).unwrap();

        let outcome = state.measure_with(0, 0.9).unwrap();
        assert_eq!(outcome, 1);
        assert_relative_eq!(state.probability(1).unwrap(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(state.norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_measure_never_picks_empty_branch() {
        let mut state = QuantumState::new(1).unwrap();
        assert_eq!(state.measure_with(0, 0.999_999).unwrap(), 0);
        state.x(0).unwrap();
        assert_eq!(state.measure_with(0, 0.0).unwrap(), 1);
    }

    #[test]
    fn test_measure_zero_state_fails_before_mutating() {
        let mut state = QuantumState::new(1).unwrap();
        state.set_amplitude(0, Complex64::new(0.0, 0.0)).unwrap();
        assert!(matches!(
            state.measure_with(0, 0.5),
            Err(QuantumError::ZeroState { .. })
        ));
        assert!(state.measure_with(3, 0.5).is_err());
    }

    #[test]
    fn test_measure_statistics() {
        let mut plus = QuantumState::new(1).unwrap();
        plus.h(0).unwrap();

        let mut rng = StdRng::seed_from_u64(2024);
        let zeros = (0..1000)
            .filter(|_| {
                let mut trial = plus.clone();
                trial.measure(0, &mut rng).unwrap() == 0
            })
            .count();
        let frequency = zeros as f64 / 1000.0;
        assert!((0.4..=0.6).contains(&frequency), "frequency {frequency}");
    }

    #[test]
    fn test_measure_all_with() {
        let mut state = QuantumState::new(2).unwrap();
        state.h(0).unwrap();
        state.h(1).unwrap();
        // cumulative 0.25, 0.5, 0.75, 1.0
        assert_eq!(state.try_clone().unwrap().measure_all_with(0.1).unwrap(), 0);
        assert_eq!(state.try_clone().unwrap().measure_all_with(0.6).unwrap(), 2);
        assert_eq!(state.measure_all_with(0.99).unwrap(), 3);
        assert_eq!(state.amplitude(3).unwrap(), Complex64::new(1.0, 0.0));
    }

    #[test]
    fn test_select_outcome_rounding_falls_back_to_last_nonzero() {
        assert_eq!(select_outcome(&[0.5, 0.5, 0.0], 1.0).unwrap(), 1);
        assert!(select_outcome(&[0.0, 0.0], 0.3).is_err());
    }

    #[test]
    fn test_sample_bell_state() {
        let mut state = QuantumState::new(2).unwrap();
        state.h(0).unwrap();
        state.cnot(0, 1).unwrap();

        let mut rng = StdRng::seed_from_u64(11);
        let result = state.sample(2000, &mut rng).unwrap();
        assert_eq!(result.shots, 2000);
        assert_eq!(result.get_count(1) + result.get_count(2), 0);
        assert_eq!(result.get_count(0) + result.get_count(3), 2000);
        assert!((result.get_frequency(0) - 0.5).abs() < 0.1);

        let labelled = result.to_bitstring_counts(2);
        assert!(labelled.keys().all(|k| k == "00" || k == "11"));
        assert_relative_eq!(state.norm(), 1.0, epsilon = 1e-12);
    }
}
