//! Support library for the gradeband CLI binary.
//!
//! Re-exports the CLI and logging modules so doctests and integration tests
//! can exercise the commands without forking a subprocess.

pub mod cli;
pub mod logging;
