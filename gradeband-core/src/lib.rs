//! Gradeband core library.
//!
//! Partitions student records into grade bands, derives a weighted grade
//! graph from the band memberships, and runs graph analytics over it.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod analytics;
mod band;
mod banding;
mod builder;
mod error;
mod grade;
mod graph;
mod record;
mod report;

pub use crate::{
    analytics::{
        AllPairsDistances, AnalysisSummary, AnalyticsConfig, DEFAULT_ALL_PAIRS_VERTEX_LIMIT,
        Distance, ShortestPaths, SpanningEdge, SpanningForest, TopologicalOrder,
        all_pairs_within_limit, analyze, breadth_first, depth_first, dijkstra, floyd_warshall,
        kruskal, prim, topological_order,
    },
    band::{Band, BandedRecords},
    banding::Banding,
    builder::BandingBuilder,
    error::{
        AnalyticsError, AnalyticsErrorCode, BandingError, BandingErrorCode, GraphError,
        GraphErrorCode, RecordError, RecordErrorCode, Result,
    },
    grade::{DEFAULT_BAND_WIDTH, DEFAULT_BOUNDARIES, GPA_TOLERANCE, Grade, round_hundredths},
    graph::{GradeGraph, GraphEdge},
    record::{RecordSource, StudentRecord, VecSource},
    report::{BandEntry, BandReport, HeadEntry, MemberEntry, NextEntry, StudentTuple},
};
