//! Benchmark parameter types.

use std::fmt;

/// Parameters for a cohort benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct CohortBenchParams {
    /// Number of synthetic records.
    pub record_count: usize,
    /// Distinct grade steps between `0.0` and `4.0`.
    pub grade_steps: u32,
}

impl fmt::Display for CohortBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},steps={}", self.record_count, self.grade_steps)
    }
}
