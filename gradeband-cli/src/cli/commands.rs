//! Command implementations and argument parsing for the gradeband CLI.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use gradeband_core::{
    AnalysisSummary, AnalyticsConfig, AnalyticsError, BandReport, BandedRecords, Banding,
    BandingBuilder, BandingError, DEFAULT_ALL_PAIRS_VERTEX_LIMIT, DEFAULT_BAND_WIDTH, Grade,
    RecordSource, analyze,
};
use gradeband_providers_csv::{CsvProviderError, CsvRecordProvider};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

use super::render::report_json;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "gradeband",
    about = "Group student grades into bands and analyse the grade graph."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Print the band report as a JSON object keyed by representative.
    Bands(BandsCommand),
    /// Run the graph analytics suite from a start grade.
    Analyze(AnalyzeCommand),
}

/// Where to read student records from.
#[derive(Debug, Args, Clone)]
pub struct InputArgs {
    /// CSV file with `Student ID`, `Year of Study`, and `GPA` columns.
    pub path: PathBuf,

    /// Read at most this many data rows.
    #[arg(long = "max-rows")]
    pub max_rows: Option<usize>,

    /// Override name for the data source (defaults to the file name).
    #[arg(long)]
    pub name: Option<String>,
}

/// Band configuration shared by every command.
#[derive(Debug, Args, Clone)]
pub struct BandingArgs {
    /// Nominal band boundary; repeat the flag to replace the defaults.
    #[arg(long = "boundary", allow_negative_numbers = true)]
    pub boundaries: Vec<f64>,

    /// Width of each band's range above its representative.
    #[arg(long = "band-width", default_value_t = DEFAULT_BAND_WIDTH)]
    pub band_width: f64,
}

/// Options accepted by the `bands` command.
#[derive(Debug, Args, Clone)]
pub struct BandsCommand {
    /// Record input.
    #[command(flatten)]
    pub input: InputArgs,

    /// Band configuration.
    #[command(flatten)]
    pub banding: BandingArgs,

    /// Write the JSON report to this file instead of stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

/// Options accepted by the `analyze` command.
#[derive(Debug, Args, Clone)]
pub struct AnalyzeCommand {
    /// Record input.
    #[command(flatten)]
    pub input: InputArgs,

    /// Band configuration.
    #[command(flatten)]
    pub banding: BandingArgs,

    /// Link each band representative to the next band's primary grade.
    #[arg(long = "cross-band-edges")]
    pub cross_band_edges: bool,

    /// Grade to start traversals and Dijkstra from (defaults to the lowest
    /// band representative).
    #[arg(long, allow_negative_numbers = true)]
    pub start: Option<f64>,

    /// Skip Floyd-Warshall on graphs with more vertices than this.
    #[arg(long = "all-pairs-limit", default_value_t = DEFAULT_ALL_PAIRS_VERTEX_LIMIT)]
    pub all_pairs_limit: usize,

    /// Run Floyd-Warshall regardless of graph size.
    #[arg(long = "no-all-pairs-limit", conflicts_with = "all_pairs_limit")]
    pub no_all_pairs_limit: bool,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The input file could not be opened.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The report could not be written.
    #[error("failed to write `{path}`: {source}")]
    Output {
        /// Destination path.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// CSV ingestion failed.
    #[error(transparent)]
    Csv(#[from] CsvProviderError),
    /// The band configuration was rejected.
    #[error(transparent)]
    Banding(#[from] BandingError),
    /// Graph analytics failed.
    #[error(transparent)]
    Analytics(#[from] AnalyticsError),
}

impl CliError {
    /// Returns the stable code of the underlying core error, if there is one.
    #[must_use]
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Self::Banding(err) => Some(err.code().as_str()),
            Self::Analytics(err) => Some(err.code().as_str()),
            Self::Csv(CsvProviderError::Record { source, .. }) => Some(source.code().as_str()),
            _ => None,
        }
    }
}

/// Result of a command, ready for rendering.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// Band report, optionally already written to a file.
    Bands {
        /// The report.
        report: BandReport,
        /// File the report was written to, if `--output` was given.
        written_to: Option<PathBuf>,
    },
    /// Results of every graph algorithm.
    Analysis(AnalysisSummary),
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Name reported by the data source implementation.
    pub data_source: String,
    /// What the command produced.
    pub outcome: Outcome,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading, banding, or analysis fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use gradeband_cli::cli::{BandingArgs, BandsCommand, Cli, Command, InputArgs, Outcome, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "Student ID,Year of Study,GPA\nS1,1,2.0\nS2,1,2.5\n")?;
/// let cli = Cli {
///     command: Command::Bands(BandsCommand {
///         input: InputArgs { path: file.path().to_path_buf(), max_rows: None, name: None },
///         banding: BandingArgs { boundaries: Vec::new(), band_width: 0.99 },
///         output: None,
///     }),
/// };
/// let summary = run_cli(cli)?;
/// let Outcome::Bands { report, .. } = summary.outcome else { panic!("bands outcome") };
/// assert_eq!(report.entries().len(), 2);
/// # Ok(())
/// # }
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    let span = Span::current();
    match cli.command {
        Command::Bands(command) => {
            span.record("command", field::display("bands"));
            run_bands(command)
        }
        Command::Analyze(command) => {
            span.record("command", field::display("analyze"));
            run_analyze(command)
        }
    }
}

#[instrument(
    name = "cli.bands",
    err,
    skip(command),
    fields(bands = field::Empty, output = field::Empty),
)]
pub(super) fn run_bands(command: BandsCommand) -> Result<ExecutionSummary, CliError> {
    let BandsCommand {
        input,
        banding: banding_args,
        output,
    } = command;
    let banding = configure(&banding_args, false)?;
    let provider = load_records(&input)?;
    let report = BandReport::from_bands(&banding.run(&provider));

    let span = Span::current();
    span.record("bands", report.entries().len());
    if let Some(path) = &output {
        span.record("output", field::display(path.display()));
        write_report(&report, path)?;
    }
    info!(
        data_source = provider.name(),
        bands = report.entries().len(),
        "bands command completed"
    );
    Ok(ExecutionSummary {
        data_source: provider.name().to_owned(),
        outcome: Outcome::Bands {
            report,
            written_to: output,
        },
    })
}

#[instrument(
    name = "cli.analyze",
    err,
    skip(command),
    fields(start = field::Empty, all_pairs_limit = field::Empty),
)]
pub(super) fn run_analyze(command: AnalyzeCommand) -> Result<ExecutionSummary, CliError> {
    let AnalyzeCommand {
        input,
        banding: banding_args,
        cross_band_edges,
        start: requested_start,
        all_pairs_limit,
        no_all_pairs_limit,
    } = command;
    let banding = configure(&banding_args, cross_band_edges)?;
    let provider = load_records(&input)?;
    let banded = banding.run(&provider);
    let graph = banding.build_graph(&banded);

    let start = requested_start.map_or_else(|| default_start(&banded), Grade::new);
    let limit = (!no_all_pairs_limit).then_some(all_pairs_limit);
    let span = Span::current();
    span.record("start", field::display(start));
    span.record("all_pairs_limit", field::debug(limit));

    let config = AnalyticsConfig::new().with_all_pairs_vertex_limit(limit);
    let summary = analyze(&graph, start, &config)?;
    info!(
        data_source = provider.name(),
        vertices = graph.vertex_count(),
        "analyze command completed"
    );
    Ok(ExecutionSummary {
        data_source: provider.name().to_owned(),
        outcome: Outcome::Analysis(summary),
    })
}

pub(super) fn configure(args: &BandingArgs, cross_band_edges: bool) -> Result<Banding, CliError> {
    let mut builder = BandingBuilder::new()
        .with_band_width(args.band_width)
        .with_cross_band_edges(cross_band_edges);
    if !args.boundaries.is_empty() {
        builder = builder.with_boundaries(args.boundaries.iter().copied());
    }
    Ok(builder.build()?)
}

/// The lowest representative, which always exists because the topmost
/// boundary survives resolution.
pub(super) fn default_start(banded: &BandedRecords) -> Grade {
    banded
        .representatives()
        .next()
        .unwrap_or_else(|| banded.topmost_boundary())
}

#[instrument(
    name = "cli.load_records",
    err,
    skip(input),
    fields(path = field::Empty, max_rows = ?input.max_rows),
)]
pub(super) fn load_records(input: &InputArgs) -> Result<CsvRecordProvider, CliError> {
    Span::current().record("path", field::display(input.path.display()));
    let name = derive_data_source_name(&input.path, input.name.as_deref());
    let reader = open_reader(&input.path)?;
    Ok(CsvRecordProvider::try_from_reader(
        name,
        reader,
        input.max_rows,
    )?)
}

pub(super) fn open_reader(path: &Path) -> Result<BufReader<File>, CliError> {
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

pub(super) fn derive_data_source_name(path: &Path, override_name: Option<&str>) -> String {
    if let Some(name) = override_name {
        return name.to_owned();
    }

    path.file_stem()
        .and_then(|value| value.to_str())
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| "students".to_owned())
}

fn write_report(report: &BandReport, path: &Path) -> Result<(), CliError> {
    let output_error = |source: io::Error| CliError::Output {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(output_error)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &report_json(report))
        .map_err(|err| output_error(err.into()))?;
    writeln!(writer).map_err(output_error)?;
    writer.flush().map_err(output_error)
}
