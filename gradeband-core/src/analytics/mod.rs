//! Graph analytics over a built [`GradeGraph`].
//!
//! Every algorithm is a pure function of the graph. Traversals, shortest
//! paths, and topological ordering follow edge direction; the spanning tree
//! algorithms read edges as undirected. [`analyze`] runs the full suite from
//! one start vertex and bundles the results.

mod mst;
mod shortest_path;
mod topo;
mod traversal;

use tracing::{Span, field, info, instrument, warn};

use crate::{error::AnalyticsError, grade::Grade, graph::GradeGraph};

pub use self::{
    mst::{SpanningEdge, SpanningForest, kruskal, prim},
    shortest_path::{AllPairsDistances, Distance, ShortestPaths, dijkstra, floyd_warshall},
    topo::{TopologicalOrder, topological_order},
    traversal::{breadth_first, depth_first},
};

/// Vertex count above which all-pairs analysis is refused by default.
pub const DEFAULT_ALL_PAIRS_VERTEX_LIMIT: usize = 2048;

/// Tunables for the analytics suite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnalyticsConfig {
    all_pairs_vertex_limit: Option<usize>,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            all_pairs_vertex_limit: Some(DEFAULT_ALL_PAIRS_VERTEX_LIMIT),
        }
    }
}

impl AnalyticsConfig {
    /// Creates a configuration with the default all-pairs vertex limit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the largest graph, in vertices, that all-pairs analysis accepts.
    /// `None` removes the limit.
    #[must_use]
    pub const fn with_all_pairs_vertex_limit(mut self, limit: Option<usize>) -> Self {
        self.all_pairs_vertex_limit = limit;
        self
    }

    /// Returns the all-pairs vertex limit.
    #[must_use]
    #[rustfmt::skip]
    pub const fn all_pairs_vertex_limit(&self) -> Option<usize> { self.all_pairs_vertex_limit }
}

/// Runs Floyd-Warshall when the graph is within the configured vertex limit.
///
/// # Errors
/// Returns [`AnalyticsError::VertexLimitExceeded`] when the graph has more
/// vertices than the limit allows.
///
/// # Examples
/// ```
/// use gradeband_core::{AnalyticsConfig, AnalyticsError, Grade, GradeGraph, all_pairs_within_limit};
///
/// let mut graph = GradeGraph::new();
/// graph.add_edge(Grade::new(1.0), Grade::new(1.5), 0.5)?;
///
/// let tight = AnalyticsConfig::new().with_all_pairs_vertex_limit(Some(1));
/// let err = all_pairs_within_limit(&graph, &tight).unwrap_err();
/// assert!(matches!(err, AnalyticsError::VertexLimitExceeded { vertices: 2, limit: 1 }));
/// assert!(all_pairs_within_limit(&graph, &AnalyticsConfig::new()).is_ok());
/// # Ok::<(), gradeband_core::GraphError>(())
/// ```
pub fn all_pairs_within_limit(
    graph: &GradeGraph,
    config: &AnalyticsConfig,
) -> Result<AllPairsDistances, AnalyticsError> {
    if let Some(limit) = config.all_pairs_vertex_limit
        && graph.vertex_count() > limit
    {
        return Err(AnalyticsError::VertexLimitExceeded {
            vertices: graph.vertex_count(),
            limit,
        });
    }
    Ok(floyd_warshall(graph))
}

/// Results of every analytics algorithm run from one start vertex.
#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisSummary {
    start: Grade,
    breadth_first: Vec<Grade>,
    depth_first: Vec<Grade>,
    prim: SpanningForest,
    kruskal: SpanningForest,
    dijkstra: ShortestPaths,
    all_pairs: Option<AllPairsDistances>,
    topological: TopologicalOrder,
}

impl AnalysisSummary {
    /// Returns the start vertex.
    #[must_use]
    #[rustfmt::skip]
    pub const fn start(&self) -> Grade { self.start }

    /// Returns the breadth-first visitation order.
    #[must_use]
    #[rustfmt::skip]
    pub fn breadth_first(&self) -> &[Grade] { &self.breadth_first }

    /// Returns the depth-first visitation order.
    #[must_use]
    #[rustfmt::skip]
    pub fn depth_first(&self) -> &[Grade] { &self.depth_first }

    /// Returns Prim's tree over the start component.
    #[must_use]
    #[rustfmt::skip]
    pub const fn prim(&self) -> &SpanningForest { &self.prim }

    /// Returns Kruskal's spanning forest.
    #[must_use]
    #[rustfmt::skip]
    pub const fn kruskal(&self) -> &SpanningForest { &self.kruskal }

    /// Returns single-source distances from the start vertex.
    #[must_use]
    #[rustfmt::skip]
    pub const fn dijkstra(&self) -> &ShortestPaths { &self.dijkstra }

    /// Returns the all-pairs table, or `None` when the graph exceeded the
    /// configured vertex limit.
    #[must_use]
    #[rustfmt::skip]
    pub const fn all_pairs(&self) -> Option<&AllPairsDistances> { self.all_pairs.as_ref() }

    /// Returns the topological order.
    #[must_use]
    #[rustfmt::skip]
    pub const fn topological(&self) -> &TopologicalOrder { &self.topological }
}

/// Runs the whole analytics suite from `start`.
///
/// Floyd-Warshall is skipped, with a warning, when the graph exceeds the
/// configured vertex limit; every other algorithm always runs.
///
/// # Errors
/// Returns [`AnalyticsError::UnknownStartVertex`] when `start` is not a
/// vertex of `graph`.
///
/// # Examples
/// ```
/// use gradeband_core::{AnalyticsConfig, Grade, GradeGraph, analyze};
///
/// let mut graph = GradeGraph::new();
/// graph.add_edge(Grade::new(1.0), Grade::new(1.5), 0.5)?;
///
/// let summary = analyze(&graph, Grade::new(1.0), &AnalyticsConfig::new())?;
/// assert_eq!(summary.breadth_first(), &[Grade::new(1.0), Grade::new(1.5)]);
/// assert!(summary.kruskal().is_tree());
/// assert!(summary.all_pairs().is_some());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[instrument(
    name = "core.analyze",
    skip_all,
    fields(
        start = %start,
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        all_pairs = field::Empty,
    ),
)]
pub fn analyze(
    graph: &GradeGraph,
    start: Grade,
    config: &AnalyticsConfig,
) -> Result<AnalysisSummary, AnalyticsError> {
    if !graph.contains(start) {
        return Err(AnalyticsError::UnknownStartVertex { start });
    }

    let all_pairs = all_pairs_within_limit(graph, config)
        .inspect_err(|err| {
            warn!(code = %err.code(), error = %err, "skipping all-pairs shortest paths");
        })
        .ok();
    Span::current().record("all_pairs", all_pairs.is_some());

    let summary = AnalysisSummary {
        start,
        breadth_first: breadth_first(graph, start),
        depth_first: depth_first(graph, start),
        prim: prim(graph, start),
        kruskal: kruskal(graph),
        dijkstra: dijkstra(graph, start),
        all_pairs,
        topological: topological_order(graph),
    };
    info!(
        reachable = summary.breadth_first.len(),
        components = summary.kruskal.component_count(),
        acyclic = !summary.topological.has_cycle(),
        "analysis completed"
    );
    Ok(summary)
}
