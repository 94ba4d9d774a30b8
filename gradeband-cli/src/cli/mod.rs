//! Command-line interface orchestration for gradeband.
//!
//! The `bands` command loads a CSV cohort and prints its band report as JSON.
//! The `analyze` command builds the grade graph and runs every algorithm of
//! the analytics suite over it.

mod commands;
mod render;

pub use commands::{
    AnalyzeCommand, BandingArgs, BandsCommand, Cli, CliError, Command, ExecutionSummary,
    InputArgs, Outcome, run_cli,
};
pub use render::{render_analysis, render_summary, report_json};
