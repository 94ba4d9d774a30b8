//! End-to-end tests for the `bands` and `analyze` commands.
#![expect(clippy::indexing_slicing, reason = "tests address output lines by position")]

use std::fs;
use std::path::{Path, PathBuf};

use gradeband_cli::cli::{
    AnalyzeCommand, BandingArgs, BandsCommand, Cli, CliError, Command, ExecutionSummary,
    InputArgs, Outcome, render_summary, run_cli,
};
use gradeband_core::AnalyticsError;
use gradeband_providers_csv::CsvProviderError;
use gradeband_test_support::fixtures::{COHORT_ROWS, csv_document};
use gradeband_test_support::tracing::CaptureLayer;
use rstest::{fixture, rstest};
use serde_json::Value;
use tempfile::TempDir;
use tracing_subscriber::layer::SubscriberExt;

struct Workspace {
    dir: TempDir,
    cohort: PathBuf,
}

#[fixture]
fn workspace() -> Workspace {
    let dir = TempDir::new().expect("temp dir");
    let cohort = dir.path().join("cohort.csv");
    fs::write(&cohort, csv_document(&COHORT_ROWS)).expect("write cohort");
    Workspace { dir, cohort }
}

fn input(path: &Path) -> InputArgs {
    InputArgs {
        path: path.to_path_buf(),
        max_rows: None,
        name: None,
    }
}

fn default_banding() -> BandingArgs {
    BandingArgs {
        boundaries: Vec::new(),
        band_width: 0.99,
    }
}

fn analyze_command(path: &Path, start: Option<f64>) -> Cli {
    Cli {
        command: Command::Analyze(AnalyzeCommand {
            input: input(path),
            banding: default_banding(),
            cross_band_edges: false,
            start,
            all_pairs_limit: 2048,
            no_all_pairs_limit: false,
        }),
    }
}

fn rendered(summary: &ExecutionSummary) -> String {
    let mut buffer = Vec::new();
    render_summary(summary, &mut buffer).expect("render succeeds");
    String::from_utf8(buffer).expect("output is UTF-8")
}

#[rstest]
fn bands_prints_one_line_per_representative(workspace: Workspace) {
    let cli = Cli {
        command: Command::Bands(BandsCommand {
            input: input(&workspace.cohort),
            banding: default_banding(),
            output: None,
        }),
    };
    let summary = run_cli(cli).expect("bands succeeds");
    assert_eq!(summary.data_source, "cohort");

    let json: Value = serde_json::from_str(&rendered(&summary)).expect("valid JSON");
    let object = json.as_object().expect("report is an object");
    let keys: Vec<&str> = object.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["0.8", "1.0", "2.0", "3.0", "4.0"]);
    assert_eq!(
        object["2.0"],
        Value::from("(2.0, A07, 4) -> (2.1, A02, 2)|0.1 -> (3.0, A04, 3)|1.0")
    );
    assert_eq!(object["4.0"], Value::from("(4.0, noval_HEAD, noval_HEAD)"));
}

#[rstest]
fn bands_writes_the_report_file(workspace: Workspace) {
    let output = workspace.dir.path().join("report.json");
    let cli = Cli {
        command: Command::Bands(BandsCommand {
            input: InputArgs {
                name: Some("spring".to_owned()),
                ..input(&workspace.cohort)
            },
            banding: default_banding(),
            output: Some(output.clone()),
        }),
    };
    let summary = run_cli(cli).expect("bands succeeds");
    assert!(matches!(
        &summary.outcome,
        Outcome::Bands { written_to: Some(path), .. } if path == &output
    ));
    assert!(rendered(&summary).starts_with("wrote 5 bands from spring to "));

    let written: Value =
        serde_json::from_str(&fs::read_to_string(&output).expect("report exists")).expect("JSON");
    assert_eq!(written.as_object().map(serde_json::Map::len), Some(5));
}

#[rstest]
fn bands_honours_max_rows_and_boundaries(workspace: Workspace) {
    let cli = Cli {
        command: Command::Bands(BandsCommand {
            input: InputArgs {
                max_rows: Some(2),
                ..input(&workspace.cohort)
            },
            banding: BandingArgs {
                boundaries: vec![3.0, 4.0],
                band_width: 0.99,
            },
            output: None,
        }),
    };
    let summary = run_cli(cli).expect("bands succeeds");
    let Outcome::Bands { report, .. } = &summary.outcome else {
        panic!("expected a band report");
    };
    let lines = report.lines();
    assert_eq!(lines[0].1, "(3.4, A01, 1) -> (4.0, noval_nHEAD, noval_nHEAD)|nowei_nHead");
    assert_eq!(lines.len(), 2);
}

#[rstest]
fn analyze_prints_every_algorithm(workspace: Workspace) {
    let summary = run_cli(analyze_command(&workspace.cohort, None)).expect("analyze succeeds");
    let text = rendered(&summary);
    let lines: Vec<&str> = text.lines().collect();

    let labels: Vec<&str> = lines
        .iter()
        .filter_map(|line| line.split_once(':').map(|(label, _)| label))
        .collect();
    assert_eq!(
        labels,
        vec![
            "data source",
            "start",
            "BFS",
            "DFS",
            "Prim",
            "Kruskal",
            "Dijkstra",
            "Floyd",
            "Topo"
        ]
    );
    assert_eq!(lines[1], "start: 0.8");
    assert_eq!(lines[2], "BFS: 0.8 1.0 1.6");
    assert_eq!(lines[3], "DFS: 0.8 1.0 1.6");
    assert!(lines[4].ends_with("total=0.8 components=1"));
    assert!(lines[5].ends_with("components=4"));
    assert_eq!(
        lines[6],
        "Dijkstra: 0.8=0.0 1.0=0.2 1.6=0.8 2.0=inf 2.1=inf 3.0=inf 3.4=inf 3.9=inf 4.0=inf"
    );
    assert!(lines[7].starts_with("Floyd: 0.8[0.8=0.0 1.0=0.2"));
    assert!(!lines[8].contains("cycle"));
}

#[rstest]
fn analyze_reports_skipped_all_pairs(workspace: Workspace) {
    let Cli { command } = analyze_command(&workspace.cohort, Some(3.0));
    let Command::Analyze(command) = command else {
        panic!("analyze_command builds an analyze command");
    };
    let cli = Cli {
        command: Command::Analyze(AnalyzeCommand {
            all_pairs_limit: 4,
            ..command
        }),
    };
    let summary = run_cli(cli).expect("analyze succeeds");
    let text = rendered(&summary);
    assert!(text.contains("BFS: 3.0 3.9\n"));
    assert!(text.contains("Floyd: skipped, graph exceeds the vertex limit\n"));
}

#[rstest]
fn analyze_rejects_unknown_start(workspace: Workspace) {
    let err = run_cli(analyze_command(&workspace.cohort, Some(0.0))).expect_err("0.0 is absent");
    assert!(matches!(
        err,
        CliError::Analytics(AnalyticsError::UnknownStartVertex { .. })
    ));
    assert_eq!(err.code(), Some("ANALYTICS_UNKNOWN_START_VERTEX"));
}

#[rstest]
fn invalid_rows_surface_the_record_code(workspace: Workspace) {
    let path = workspace.dir.path().join("broken.csv");
    fs::write(&path, "Student ID,Year of Study,GPA\nS1,1,3.0\n ,2,2.0\n").expect("write csv");
    let err = run_cli(analyze_command(&path, None)).expect_err("blank id is rejected");
    assert!(matches!(
        err,
        CliError::Csv(CsvProviderError::Record { line: 3, .. })
    ));
    assert_eq!(err.code(), Some("RECORD_EMPTY_ID"));
}

#[rstest]
fn missing_input_is_an_io_error(workspace: Workspace) {
    let path = workspace.dir.path().join("absent.csv");
    let err = run_cli(analyze_command(&path, None)).expect_err("file is missing");
    assert!(matches!(err, CliError::Io { .. }));
    assert!(err.to_string().contains("absent.csv"));
}

#[rstest]
fn commands_record_their_spans(workspace: Workspace) {
    let layer = CaptureLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    tracing::subscriber::with_default(subscriber, || {
        run_cli(analyze_command(&workspace.cohort, None)).expect("analyze succeeds");
    });

    let run = layer.span("cli.run").expect("cli.run span recorded");
    assert_eq!(run.field("command"), Some("analyze"));
    let analyze = layer.span("cli.analyze").expect("cli.analyze span recorded");
    assert_eq!(analyze.field("start"), Some("0.8"));
    assert_eq!(analyze.field("all_pairs_limit"), Some("Some(2048)"));
    let load = layer
        .span("cli.load_records")
        .expect("cli.load_records span recorded");
    assert!(load.field("path").is_some_and(|path| path.ends_with("cohort.csv")));
    assert!(layer.span("core.analyze").is_some());
}
