//! Benchmark setup error type.
//!
//! Aggregates the errors that may arise while preparing benchmark data so
//! that setup functions can propagate failures with `?`.

use gradeband_core::BandingError;

use crate::source::SyntheticError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic cohort generation failed.
    #[error("synthetic cohort generation failed: {0}")]
    Synthetic(#[from] SyntheticError),
    /// The band configuration was rejected.
    #[error("banding configuration failed: {0}")]
    Banding(#[from] BandingError),
}
