//! Text and JSON rendering of command outcomes.

use std::io::{self, Write};

use gradeband_core::{AnalysisSummary, BandReport, Distance, Grade, SpanningForest};
use serde_json::{Map, Value};

use super::commands::{ExecutionSummary, Outcome};

/// Builds the JSON object written by the `bands` command: one string per
/// band, keyed by the representative, in ascending order.
#[must_use]
pub fn report_json(report: &BandReport) -> Value {
    let lines: Map<String, Value> = report
        .lines()
        .into_iter()
        .map(|(key, line)| (key, Value::String(line)))
        .collect();
    Value::Object(lines)
}

/// Renders `summary` to `writer`.
///
/// Band reports are written as pretty-printed JSON unless they already went
/// to a file. Analyses are written as one labelled line per algorithm.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    match &summary.outcome {
        Outcome::Bands {
            report,
            written_to: None,
        } => {
            serde_json::to_writer_pretty(&mut writer, &report_json(report))?;
            writeln!(writer)
        }
        Outcome::Bands {
            report,
            written_to: Some(path),
        } => writeln!(
            writer,
            "wrote {} bands from {} to {}",
            report.entries().len(),
            summary.data_source,
            path.display()
        ),
        Outcome::Analysis(analysis) => {
            writeln!(writer, "data source: {}", summary.data_source)?;
            render_analysis(analysis, writer)
        }
    }
}

/// Writes one labelled line per algorithm of `summary`.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use gradeband_cli::cli::render_analysis;
/// # use gradeband_core::{AnalyticsConfig, Grade, GradeGraph, analyze};
/// let mut graph = GradeGraph::new();
/// graph.add_edge(Grade::new(1.0), Grade::new(1.5), 0.5)?;
/// let summary = analyze(&graph, Grade::new(1.0), &AnalyticsConfig::new())?;
/// let mut buffer = Vec::new();
/// render_analysis(&summary, &mut buffer)?;
/// let text = String::from_utf8(buffer)?;
/// assert!(text.contains("BFS: 1.0 1.5\n"));
/// assert!(text.contains("Dijkstra: 1.0=0.0 1.5=0.5\n"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn render_analysis(summary: &AnalysisSummary, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "start: {}", summary.start())?;
    writeln!(writer, "BFS: {}", grades(summary.breadth_first()))?;
    writeln!(writer, "DFS: {}", grades(summary.depth_first()))?;
    writeln!(writer, "Prim: {}", forest(summary.prim()))?;
    writeln!(writer, "Kruskal: {}", forest(summary.kruskal()))?;
    writeln!(
        writer,
        "Dijkstra: {}",
        distances(summary.dijkstra().iter())
    )?;
    match summary.all_pairs() {
        Some(table) => {
            let rows: Vec<String> = table
                .vertices()
                .iter()
                .map(|&from| format!("{from}[{}]", distances(table.row(from))))
                .collect();
            writeln!(writer, "Floyd: {}", rows.join(" "))?;
        }
        None => writeln!(writer, "Floyd: skipped, graph exceeds the vertex limit")?,
    }
    let topological = summary.topological();
    if topological.has_cycle() {
        writeln!(
            writer,
            "Topo: {} (cycle detected after {} of {} vertices)",
            grades(topological.order()),
            topological.order().len(),
            topological.vertex_count()
        )
    } else {
        writeln!(writer, "Topo: {}", grades(topological.order()))
    }
}

fn grades(order: &[Grade]) -> String {
    order
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn distances(entries: impl Iterator<Item = (Grade, Distance)>) -> String {
    entries
        .map(|(grade, distance)| format!("{grade}={distance}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn forest(forest: &SpanningForest) -> String {
    let edges: Vec<String> = forest
        .edges()
        .iter()
        .map(|edge| {
            format!(
                "{}-{}({})",
                edge.from(),
                edge.to(),
                Distance::Finite(edge.weight())
            )
        })
        .collect();
    let listed = if edges.is_empty() {
        "(no edges)".to_owned()
    } else {
        edges.join(" ")
    };
    format!(
        "{listed} total={} components={}",
        Distance::Finite(forest.total_weight()),
        forest.component_count()
    )
}
