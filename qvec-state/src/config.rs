//! Kernel configuration

/// Default amplitude count from which kernels run on the rayon pool
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1 << 14;

/// Controls how gate kernels iterate the amplitude buffer
///
/// The configuration never changes results: every pair or block a kernel
/// touches is disjoint from every other, so sequential and parallel runs
/// produce identical amplitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KernelConfig {
    /// Minimum state dimension for data-parallel execution
    ///
    /// Default: 16384 amplitudes (14 qubits)
    pub parallel_threshold: usize,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl KernelConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Never use the thread pool
    pub fn sequential() -> Self {
        Self {
            parallel_threshold: usize::MAX,
        }
    }

    /// Set the parallel threshold
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Whether a state of `dimension` amplitudes should be processed in parallel
    #[inline]
    pub fn use_parallel(&self, dimension: usize) -> bool {
        dimension >= self.parallel_threshold
    }
}
