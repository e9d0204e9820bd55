//! Execution statistics tracking

use std::time::Duration;

/// Counters and timings accumulated by a [`Simulator`](crate::Simulator)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecutionStatistics {
    /// Time spent applying gates (including composite algorithms)
    pub gate_application_time: Duration,

    /// Time spent on measurements and sampling
    pub measurement_time: Duration,

    /// Number of gate descriptors applied
    pub gates_applied: usize,

    /// Number of composite algorithm invocations (QFT, modular exponentiation)
    pub algorithms_applied: usize,

    /// Number of single-qubit and whole-register measurements
    pub measurements: usize,

    /// Number of sampling shots drawn
    pub shots: usize,

    /// Norm checks that drifted beyond tolerance
    pub norm_warnings: usize,
}

impl ExecutionStatistics {
    /// Create a new statistics object
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the gate execution rate (gates per second)
    pub fn gates_per_second(&self) -> f64 {
        let secs = self.gate_application_time.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            self.gates_applied as f64 / secs
        }
    }

    /// Total time spent inside the state engine
    pub fn total_time(&self) -> Duration {
        self.gate_application_time + self.measurement_time
    }
}

impl std::fmt::Display for ExecutionStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Execution Statistics:")?;
        writeln!(f, "  Total time: {:?}", self.total_time())?;
        writeln!(f, "    Gate application: {:?}", self.gate_application_time)?;
        writeln!(f, "    Measurement: {:?}", self.measurement_time)?;

        writeln!(f, "\n  Gates:")?;
        writeln!(f, "    Applied: {}", self.gates_applied)?;
        writeln!(f, "    Algorithms: {}", self.algorithms_applied)?;
        writeln!(f, "    Execution rate: {:.0} gates/sec", self.gates_per_second())?;

        writeln!(f, "\n  Measurement:")?;
        writeln!(f, "    Measurements: {}", self.measurements)?;
        writeln!(f, "    Shots: {}", self.shots)?;
        write!(f, "    Norm warnings: {}", self.norm_warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gates_per_second() {
        let stats = ExecutionStatistics {
            gates_applied: 1000,
            gate_application_time: Duration::from_millis(100),
            ..Default::default()
        };

        assert!((stats.gates_per_second() - 10000.0).abs() < 1.0);
    }

    #[test]
    fn test_gates_per_second_without_time() {
        assert_eq!(ExecutionStatistics::new().gates_per_second(), 0.0);
    }

    #[test]
    fn test_total_time() {
        let stats = ExecutionStatistics {
            gate_application_time: Duration::from_millis(30),
            measurement_time: Duration::from_millis(20),
            ..Default::default()
        };

        assert_eq!(stats.total_time(), Duration::from_millis(50));
    }

    #[test]
    fn test_display() {
        let stats = ExecutionStatistics {
            gates_applied: 12,
            norm_warnings: 1,
            ..Default::default()
        };
        let text = stats.to_string();
        assert!(text.contains("Applied: 12"));
        assert!(text.contains("Norm warnings: 1"));
    }
}
