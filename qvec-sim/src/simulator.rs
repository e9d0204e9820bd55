//! Simulation session

use qvec_gates::QuantumGate;
use qvec_state::{PauliString, QuantumState, SamplingResult};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;
use tracing::{debug, warn};

use crate::{
    algorithms,
    config::SimulatorConfig,
    error::{Result, SimulatorError},
    statistics::ExecutionStatistics,
};

/// Quantum state plus everything needed to drive it
///
/// The session owns the state, the measurement RNG (seeded from the
/// configuration, or from OS entropy), and the execution statistics. Gates
/// can be applied one at a time or as a sequence.
///
/// # Example
///
/// ```
/// use qvec_gates::QuantumGate;
/// use qvec_sim::{Simulator, SimulatorConfig};
///
/// let mut sim = Simulator::new(2, SimulatorConfig::debug()).unwrap();
/// sim.run(&[QuantumGate::h(0), QuantumGate::cnot(0, 1)]).unwrap();
///
/// let a = sim.measure(0).unwrap();
/// let b = sim.measure(1).unwrap();
/// assert_eq!(a, b);
/// ```
pub struct Simulator {
    config: SimulatorConfig,
    state: QuantumState,
    rng: StdRng,
    stats: ExecutionStatistics,
}

impl Simulator {
    /// Start a session on |0...0⟩ with `num_qubits` qubits
    ///
    /// # Errors
    /// `InvalidConfig` if the configuration does not validate, or the state
    /// error if the register cannot be created.
    pub fn new(num_qubits: usize, config: SimulatorConfig) -> Result<Self> {
        config.validate()?;
        let state = QuantumState::new(num_qubits)?;
        Self::from_state(state, config)
    }

    /// Start a session on an existing state
    pub fn from_state(mut state: QuantumState, config: SimulatorConfig) -> Result<Self> {
        config.validate()?;
        state.set_config(config.kernel_config());

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        debug!(
            num_qubits = state.num_qubits(),
            seed = ?config.seed,
            "created simulator"
        );

        Ok(Self {
            config,
            state,
            rng,
            stats: ExecutionStatistics::new(),
        })
    }

    /// Get the simulator configuration
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Current state
    pub fn state(&self) -> &QuantumState {
        &self.state
    }

    /// Mutable access for direct gate calls
    pub fn state_mut(&mut self) -> &mut QuantumState {
        &mut self.state
    }

    /// End the session and keep the state
    pub fn into_state(self) -> QuantumState {
        self.state
    }

    pub fn statistics(&self) -> &ExecutionStatistics {
        &self.stats
    }

    pub fn num_qubits(&self) -> usize {
        self.state.num_qubits()
    }

    /// Return to |0...0⟩; statistics and RNG stream are kept
    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Apply one gate descriptor
    pub fn apply(&mut self, gate: &QuantumGate) -> Result<()> {
        let start = Instant::now();
        let result = self.state.apply_gate(gate);
        self.stats.gate_application_time += start.elapsed();
        result?;
        self.stats.gates_applied += 1;
        Ok(())
    }

    /// Apply gates in order
    ///
    /// Stops at the first failing gate; the gates before it stay applied.
    /// With `check_norm` set, the norm is verified after every gate.
    ///
    /// # Errors
    /// `GateFailed` with the index of the failing gate.
    pub fn run(&mut self, gates: &[QuantumGate]) -> Result<()> {
        for (index, gate) in gates.iter().enumerate() {
            let start = Instant::now();
            let result = self.state.apply_gate(gate);
            self.stats.gate_application_time += start.elapsed();
            result.map_err(|source| SimulatorError::GateFailed { index, source })?;
            self.stats.gates_applied += 1;

            if self.config.check_norm {
                self.check_norm(index);
            }
        }
        Ok(())
    }

    fn check_norm(&mut self, index: usize) {
        let norm = self.state.norm();
        if (norm - 1.0).abs() > self.config.norm_tolerance {
            self.stats.norm_warnings += 1;
            warn!(
                gate = index,
                norm,
                tolerance = self.config.norm_tolerance,
                "state norm drifted"
            );
        }
    }

    /// Quantum Fourier transform (or its inverse) on `qubits`
    pub fn qft(&mut self, qubits: &[usize], inverse: bool) -> Result<()> {
        let start = Instant::now();
        let result = algorithms::qft(&mut self.state, qubits, inverse);
        self.stats.gate_application_time += start.elapsed();
        result?;
        self.stats.algorithms_applied += 1;
        Ok(())
    }

    /// |x⟩|y⟩ -> |x⟩|y·base^x mod modulus⟩ over `controls` / `targets`
    pub fn mod_exp(
        &mut self,
        base: u64,
        modulus: u64,
        controls: &[usize],
        targets: &[usize],
    ) -> Result<()> {
        let start = Instant::now();
        let result = algorithms::mod_exp(&mut self.state, base, modulus, controls, targets);
        self.stats.gate_application_time += start.elapsed();
        result?;
        self.stats.algorithms_applied += 1;
        Ok(())
    }

    /// Measure one qubit with the session RNG
    pub fn measure(&mut self, qubit: usize) -> Result<u8> {
        let start = Instant::now();
        let result = self.state.measure(qubit, &mut self.rng);
        self.stats.measurement_time += start.elapsed();
        let outcome = result?;
        self.stats.measurements += 1;
        Ok(outcome)
    }

    /// Measure the whole register with the session RNG
    pub fn measure_all(&mut self) -> Result<usize> {
        let start = Instant::now();
        let result = self.state.measure_all(&mut self.rng);
        self.stats.measurement_time += start.elapsed();
        let outcome = result?;
        self.stats.measurements += 1;
        Ok(outcome)
    }

    /// Draw `shots` samples without collapsing the state
    pub fn sample(&mut self, shots: usize) -> Result<SamplingResult> {
        let start = Instant::now();
        let result = self.state.sample(shots, &mut self.rng);
        self.stats.measurement_time += start.elapsed();
        let samples = result?;
        self.stats.shots += shots;
        Ok(samples)
    }

    /// Probability that `qubit` reads 1
    pub fn probability(&self, qubit: usize) -> Result<f64> {
        Ok(self.state.probability(qubit)?)
    }

    /// Expectation value of a Pauli string
    pub fn expectation(&self, pauli: &PauliString) -> Result<f64> {
        Ok(self.state.expectation(pauli)?)
    }
}
