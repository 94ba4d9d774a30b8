//! Benchmark support crate for gradeband.
//!
//! Provides seeded synthetic cohorts and parameter types used by the
//! Criterion benchmarks for banding, graph construction, and analytics.

pub mod error;
pub mod params;
pub mod source;
