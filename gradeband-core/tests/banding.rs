//! Tests for band resolution, record assignment, and graph construction.
#![expect(clippy::indexing_slicing, reason = "tests address bands and report lines by position")]

mod common;

use common::{g, ids, records, source};
use gradeband_core::{BandReport, BandingBuilder, Distance, Grade, dijkstra};
use gradeband_test_support::{
    fixtures::{COHORT_ROWS, TWO_BAND_ROWS},
    tracing::CaptureLayer,
};
use rstest::rstest;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;

#[rstest]
fn two_band_scenario() {
    let banding = BandingBuilder::new()
        .with_boundaries([0.0, 1.0])
        .build()
        .expect("boundaries are valid");
    let banded = banding.run(&source("two-band", &TWO_BAND_ROWS));

    let representatives: Vec<Grade> = banded.representatives().collect();
    assert_eq!(representatives, vec![g(0.0), g(1.0)]);

    let low = banded.band(g(0.0)).expect("band 0.0 exists");
    assert_eq!(ids(low.members()), vec!["S1", "S2"]);
    assert_eq!(low.primary().map(|r| r.id()), Some("S1"));
    let high = banded.band(g(1.0)).expect("band 1.0 exists");
    assert_eq!(ids(high.members()), vec!["S3", "S4"]);
    assert_eq!(high.primary().map(|r| r.id()), Some("S3"));

    let graph = banding.build_graph(&banded);
    let edges: Vec<(Grade, Grade, f64)> = graph
        .edges()
        .map(|edge| (edge.from(), edge.to(), edge.weight()))
        .collect();
    assert_eq!(edges, vec![(g(0.0), g(0.5), 0.5), (g(1.0), g(1.5), 0.5)]);

    let paths = dijkstra(&graph, g(0.0));
    assert_eq!(paths.distance(g(0.5)), Some(Distance::Finite(0.5)));
    assert_eq!(paths.distance(g(1.0)), Some(Distance::Unreachable));
    assert_eq!(paths.distance(g(1.5)), Some(Distance::Unreachable));
}

#[rstest]
fn empty_input_keeps_only_the_topmost_band() {
    let banding = BandingBuilder::new().build().expect("defaults are valid");
    let banded = banding.run(&source("empty", &[]));

    assert_eq!(banded.bands().len(), 1);
    let top = &banded.bands()[0];
    assert_eq!(top.representative(), g(4.0));
    assert!(top.is_empty());
    assert!(top.primary().is_none());

    let lines = BandReport::from_bands(&banded).lines();
    assert_eq!(lines, vec![("4.0".to_owned(), "(4.0, noval_HEAD, noval_HEAD)".to_owned())]);

    let graph = banding.build_graph(&banded);
    assert_eq!(graph.vertices(), &[g(4.0)]);
    assert_eq!(graph.edge_count(), 0);
}

#[rstest]
fn overlapping_ranges_assign_to_the_lowest_band() {
    let banding = BandingBuilder::new().build().expect("defaults are valid");
    let banded = banding.partition(&records(&COHORT_ROWS));

    let representatives: Vec<f64> = banded.representatives().map(Grade::get).collect();
    assert_eq!(representatives, vec![0.8, 1.0, 2.0, 3.0, 4.0]);

    // 0.8 resolves the 0.0 boundary and its range reaches 1.79, so the
    // 1.0 and 1.6 records land there and band 1.0 stays empty.
    let lowest = banded.band(g(0.8)).expect("band 0.8 exists");
    assert_eq!(ids(lowest.members()), vec!["A03", "A05", "A08"]);
    let second = banded.band(g(1.0)).expect("band 1.0 exists");
    assert!(second.is_empty());

    let third = banded.band(g(2.0)).expect("band 2.0 exists");
    assert_eq!(ids(third.members()), vec!["A02", "A07"]);
    assert_eq!(third.primary().map(|r| r.id()), Some("A07"));
    assert_eq!(banded.record_count(), COHORT_ROWS.len());
    assert_eq!(banded.unassigned(), 0);
}

#[rstest]
fn cohort_report_lines() {
    let banding = BandingBuilder::new().build().expect("defaults are valid");
    let report = BandReport::from_bands(&banding.partition(&records(&COHORT_ROWS)));
    let lines = report.lines();

    assert_eq!(
        lines[0].1,
        "(0.8, A03, 4) -> (1.0, A05, 2)|0.2 -> (1.6, A08, 3)|0.8 -> (1.0, noval_nHEAD, noval_nHEAD)|nowei_nHead"
    );
    assert_eq!(lines[1].1, "(1.0, noval_HEAD, noval_HEAD) -> (2.0, A07, 4)|1.0");
    assert_eq!(lines[2].1, "(2.0, A07, 4) -> (2.1, A02, 2)|0.1 -> (3.0, A04, 3)|1.0");
    assert_eq!(
        lines[3].1,
        "(3.0, A04, 3) -> (3.4, A01, 1)|0.4 -> (3.9, A06, 1)|0.9 -> (4.0, noval_nHEAD, noval_nHEAD)|nowei_nHead"
    );
    assert_eq!(lines[4], ("4.0".to_owned(), "(4.0, noval_HEAD, noval_HEAD)".to_owned()));
    assert!(report.placeholder().is_none());
}

#[rstest]
fn cross_band_edges_are_opt_in() {
    let rows = [("a", 1, 2.0), ("b", 1, 2.4), ("c", 2, 3.0)];
    let plain = BandingBuilder::new().build().expect("defaults are valid");
    let linked = BandingBuilder::new()
        .with_cross_band_edges(true)
        .build()
        .expect("defaults are valid");

    let banded = plain.partition(&records(&rows));
    assert_eq!(plain.build_graph(&banded).edge_count(), 1);

    let graph = linked.build_graph(&banded);
    // 2.0 -> 2.4 inside the band, then 2.0 -> 3.0 across; 3.0 has no
    // primary above it.
    let edges: Vec<(Grade, Grade)> = graph.edges().map(|e| (e.from(), e.to())).collect();
    assert_eq!(edges, vec![(g(2.0), g(2.4)), (g(2.0), g(3.0))]);
}

#[rstest]
#[case::below_every_band(&[("low", 1, 0.2), ("mid", 1, 2.5)], 1)]
#[case::all_assigned(&[("mid", 1, 2.5)], 0)]
fn counts_unassigned_records(#[case] rows: &[(&str, u32, f64)], #[case] expected: usize) {
    let banding = BandingBuilder::new()
        .with_boundaries([2.0, 3.0])
        .build()
        .expect("boundaries are valid");
    let banded = banding.partition(&records(rows));
    assert_eq!(banded.unassigned(), expected);
    assert_eq!(banded.record_count() + banded.unassigned(), rows.len());
}

#[rstest]
fn run_records_spans_and_completion_event() {
    let banding = BandingBuilder::new().build().expect("defaults are valid");
    let cohort = source("cohort", &COHORT_ROWS);
    let layer = CaptureLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    let banded = tracing::subscriber::with_default(subscriber, || {
        let banded = banding.run(&cohort);
        let _graph = banding.build_graph(&banded);
        banded
    });
    assert_eq!(banded.bands().len(), 5);

    let run = layer.span("core.run").expect("core.run span recorded");
    assert_eq!(run.field("data_source"), Some("cohort"));
    assert_eq!(run.field("records"), Some("8"));

    let partition = layer.span("core.partition").expect("core.partition span recorded");
    assert_eq!(partition.field("bands"), Some("5"));
    assert_eq!(partition.field("unassigned"), Some("0"));

    let graph = layer.span("core.build_graph").expect("core.build_graph span recorded");
    assert_eq!(graph.field("vertices"), Some("9"));
    assert_eq!(graph.field("edges"), Some("5"));

    assert!(
        layer
            .events_at(Level::INFO)
            .iter()
            .any(|event| event.message() == Some("banding completed"))
    );
}

#[rstest]
fn empty_source_and_dropped_records_warn() {
    let banding = BandingBuilder::new()
        .with_boundaries([2.0])
        .build()
        .expect("boundaries are valid");
    let layer = CaptureLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    tracing::subscriber::with_default(subscriber, || {
        let _empty = banding.run(&source("empty", &[]));
        let _dropped = banding.run(&source("low", &[("x", 1, 0.5), ("y", 1, 2.5)]));
    });

    let warnings = layer.events_at(Level::WARN);
    assert!(
        warnings
            .iter()
            .any(|event| event.field("data_source") == Some("empty"))
    );
    assert!(warnings.iter().any(|event| event.field("id") == Some("x")));
}
