//! Simulator configuration

use crate::error::{Result, SimulatorError};
use qvec_state::{KernelConfig, DEFAULT_PARALLEL_THRESHOLD};

/// Configuration for a simulation session
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatorConfig {
    /// Random number generator seed for reproducibility
    ///
    /// If None, the generator is seeded from OS entropy. Set to Some(seed)
    /// for deterministic measurement outcomes.
    ///
    /// Default: None (random)
    pub seed: Option<u64>,

    /// Minimum state dimension (amplitude count) for parallel kernels
    ///
    /// Smaller states run single-threaded to avoid synchronization
    /// overhead.
    ///
    /// Default: 16384 (14 qubits)
    pub parallel_threshold: usize,

    /// Verify the norm after every gate of [`Simulator::run`](crate::Simulator::run)
    ///
    /// A drift beyond `norm_tolerance` is logged as a warning and counted in
    /// the statistics.
    ///
    /// Default: false
    pub check_norm: bool,

    /// Allowed |norm - 1| when `check_norm` is set
    ///
    /// Default: 1e-9
    pub norm_tolerance: f64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            seed: None,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            check_norm: false,
            norm_tolerance: 1e-9,
        }
    }
}

impl SimulatorConfig {
    /// Create a new configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration optimized for speed
    ///
    /// - Lower parallel threshold
    /// - No norm checking
    pub fn fast() -> Self {
        Self {
            parallel_threshold: 1 << 10,
            check_norm: false,
            ..Default::default()
        }
    }

    /// Create a configuration for debugging
    ///
    /// - Deterministic seed
    /// - Norm checked after every gate
    pub fn debug() -> Self {
        Self {
            seed: Some(42),
            check_norm: true,
            ..Default::default()
        }
    }

    /// Set the random seed for deterministic execution
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the parallel threshold
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Enable or disable norm checking
    pub fn with_norm_check(mut self, enabled: bool) -> Self {
        self.check_norm = enabled;
        self
    }

    /// Set the norm tolerance
    pub fn with_norm_tolerance(mut self, tolerance: f64) -> Self {
        self.norm_tolerance = tolerance;
        self
    }

    /// Kernel settings handed to the state
    pub fn kernel_config(&self) -> KernelConfig {
        KernelConfig::new().with_parallel_threshold(self.parallel_threshold)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.norm_tolerance.is_finite() || self.norm_tolerance <= 0.0 {
            return Err(SimulatorError::InvalidConfig(format!(
                "norm_tolerance must be positive and finite, got {}",
                self.norm_tolerance
            )));
        }

        if self.parallel_threshold == 0 {
            return Err(SimulatorError::InvalidConfig(
                "parallel_threshold must be > 0".to_string(),
            ));
        }

        Ok(())
    }
}
