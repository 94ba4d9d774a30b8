//! Single-source and all-pairs shortest paths following edge direction.

use std::{
    cmp::{Ordering, Reverse},
    collections::{BinaryHeap, HashMap},
    fmt,
};

use crate::{
    grade::{Decimal, Grade, round_hundredths},
    graph::GradeGraph,
};

/// Path length between two vertices.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Distance {
    /// Length of the shortest path, unrounded.
    Finite(f64),
    /// No directed path exists.
    Unreachable,
}

impl Distance {
    const fn from_raw(value: f64) -> Self {
        if value.is_finite() {
            Self::Finite(value)
        } else {
            Self::Unreachable
        }
    }

    /// Returns the length when a path exists.
    #[must_use]
    pub const fn finite(self) -> Option<f64> {
        match self {
            Self::Finite(value) => Some(value),
            Self::Unreachable => None,
        }
    }

    /// Returns `true` when a path exists.
    #[must_use]
    pub const fn is_reachable(self) -> bool {
        matches!(self, Self::Finite(_))
    }
}

/// Renders the length rounded to two decimals, or `inf`.
impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finite(value) => write!(f, "{}", Decimal(round_hundredths(*value))),
            Self::Unreachable => f.write_str("inf"),
        }
    }
}

/// Distances from one source to every vertex, in vertex order.
#[derive(Clone, Debug, PartialEq)]
pub struct ShortestPaths {
    source: Grade,
    entries: Vec<(Grade, Distance)>,
}

impl ShortestPaths {
    /// Returns the source vertex.
    #[must_use]
    #[rustfmt::skip]
    pub const fn source(&self) -> Grade { self.source }

    /// Returns the distance to `target`, or `None` when it is not a vertex.
    #[must_use]
    pub fn distance(&self, target: Grade) -> Option<Distance> {
        self.entries
            .iter()
            .find(|(vertex, _)| *vertex == target)
            .map(|&(_, distance)| distance)
    }

    /// Iterates over `(vertex, distance)` pairs in vertex order.
    pub fn iter(&self) -> impl Iterator<Item = (Grade, Distance)> + '_ {
        self.entries.iter().copied()
    }
}

#[derive(Clone, Copy, Debug)]
struct Pending {
    distance: f64,
    vertex: usize,
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Pending {}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then_with(|| self.vertex.cmp(&other.vertex))
    }
}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Computes shortest path lengths from `source` with Dijkstra's algorithm.
///
/// Every vertex appears in the result; those without a directed path from
/// `source` are [`Distance::Unreachable`]. When `source` is not a vertex,
/// every vertex is unreachable.
///
/// # Examples
/// ```
/// use gradeband_core::{Distance, Grade, GradeGraph, dijkstra};
///
/// let mut graph = GradeGraph::new();
/// graph.add_edge(Grade::new(0.0), Grade::new(0.5), 0.5)?;
/// graph.add_edge(Grade::new(1.0), Grade::new(1.5), 0.5)?;
///
/// let paths = dijkstra(&graph, Grade::new(0.0));
/// assert_eq!(paths.distance(Grade::new(0.5)), Some(Distance::Finite(0.5)));
/// assert_eq!(paths.distance(Grade::new(1.5)), Some(Distance::Unreachable));
/// # Ok::<(), gradeband_core::GraphError>(())
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::indexing_slicing,
    reason = "path lengths are sums over a vector sized to the vertex count"
)]
pub fn dijkstra(graph: &GradeGraph, source: Grade) -> ShortestPaths {
    let mut best = vec![f64::INFINITY; graph.vertex_count()];
    let mut heap = BinaryHeap::new();
    if let Some(root) = graph.position(source) {
        best[root] = 0.0;
        heap.push(Reverse(Pending {
            distance: 0.0,
            vertex: root,
        }));
    }

    while let Some(Reverse(Pending { distance, vertex })) = heap.pop() {
        if distance > best[vertex] {
            continue;
        }
        for arc in graph.arcs(vertex) {
            let candidate = distance + arc.weight;
            if candidate < best[arc.target] {
                best[arc.target] = candidate;
                heap.push(Reverse(Pending {
                    distance: candidate,
                    vertex: arc.target,
                }));
            }
        }
    }

    let entries = graph
        .vertices()
        .iter()
        .zip(best)
        .map(|(&vertex, raw)| (vertex, Distance::from_raw(raw)))
        .collect();
    ShortestPaths { source, entries }
}

/// Distance table between every ordered pair of vertices.
#[derive(Clone, Debug, PartialEq)]
pub struct AllPairsDistances {
    vertices: Vec<Grade>,
    index: HashMap<Grade, usize>,
    matrix: Vec<f64>,
}

impl AllPairsDistances {
    /// Returns the vertices in graph order; rows and columns follow it.
    #[must_use]
    #[rustfmt::skip]
    pub fn vertices(&self) -> &[Grade] { &self.vertices }

    /// Returns the distance from `from` to `to`, or `None` when either is
    /// not a vertex.
    #[must_use]
    pub fn distance(&self, from: Grade, to: Grade) -> Option<Distance> {
        let row = *self.index.get(&from)?;
        let column = *self.index.get(&to)?;
        self.matrix
            .get(row * self.vertices.len() + column)
            .copied()
            .map(Distance::from_raw)
    }

    /// Iterates over the distances from `from` in vertex order.
    pub fn row(&self, from: Grade) -> impl Iterator<Item = (Grade, Distance)> + '_ {
        let width = self.vertices.len();
        let cells = self
            .index
            .get(&from)
            .and_then(|&row| self.matrix.get(row * width..(row + 1) * width))
            .unwrap_or_default();
        self.vertices
            .iter()
            .copied()
            .zip(cells.iter().copied().map(Distance::from_raw))
    }
}

/// Computes all-pairs shortest path lengths with Floyd-Warshall.
///
/// Self-distances are zero and parallel edges contribute their lightest
/// weight. Runs in cubic time; see
/// [`all_pairs_within_limit`](crate::all_pairs_within_limit) for a gated
/// entry point.
///
/// # Examples
/// ```
/// use gradeband_core::{Distance, Grade, GradeGraph, floyd_warshall};
///
/// let mut graph = GradeGraph::new();
/// graph.add_edge(Grade::new(1.0), Grade::new(1.5), 0.5)?;
/// graph.add_edge(Grade::new(1.5), Grade::new(2.0), 0.5)?;
///
/// let table = floyd_warshall(&graph);
/// assert_eq!(table.distance(Grade::new(1.0), Grade::new(2.0)), Some(Distance::Finite(1.0)));
/// assert_eq!(table.distance(Grade::new(2.0), Grade::new(1.0)), Some(Distance::Unreachable));
/// assert_eq!(table.distance(Grade::new(2.0), Grade::new(2.0)), Some(Distance::Finite(0.0)));
/// # Ok::<(), gradeband_core::GraphError>(())
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::indexing_slicing,
    reason = "path lengths are sums over an n by n matrix indexed by vertex position"
)]
pub fn floyd_warshall(graph: &GradeGraph) -> AllPairsDistances {
    let n = graph.vertex_count();
    let mut matrix = vec![f64::INFINITY; n * n];
    for vertex in 0..n {
        matrix[vertex * n + vertex] = 0.0;
        for arc in graph.arcs(vertex) {
            let cell = &mut matrix[vertex * n + arc.target];
            *cell = cell.min(arc.weight);
        }
    }

    for via in 0..n {
        for from in 0..n {
            let head = matrix[from * n + via];
            if !head.is_finite() {
                continue;
            }
            for to in 0..n {
                let candidate = head + matrix[via * n + to];
                if candidate < matrix[from * n + to] {
                    matrix[from * n + to] = candidate;
                }
            }
        }
    }

    let vertices = graph.vertices().to_vec();
    let index = vertices
        .iter()
        .enumerate()
        .map(|(position, &vertex)| (vertex, position))
        .collect();
    AllPairsDistances {
        vertices,
        index,
        matrix,
    }
}

#[cfg(test)]
#[expect(clippy::float_arithmetic, reason = "distances are compared within a tolerance")]
mod tests {
    use rstest::rstest;

    use super::*;

    fn g(value: f64) -> Grade {
        Grade::new(value)
    }

    fn diamond() -> GradeGraph {
        let mut graph = GradeGraph::new();
        graph.add_edge(g(1.0), g(1.4), 0.4).expect("valid edge");
        graph.add_edge(g(1.0), g(1.1), 0.1).expect("valid edge");
        graph.add_edge(g(1.1), g(1.4), 0.1).expect("valid edge");
        graph.add_edge(g(1.4), g(1.9), 0.5).expect("valid edge");
        graph
    }

    #[test]
    fn dijkstra_prefers_the_cheaper_detour() {
        let paths = dijkstra(&diamond(), g(1.0));
        let reached = paths
            .distance(g(1.9))
            .and_then(Distance::finite)
            .expect("1.9 is reachable");
        assert!((reached - 0.7).abs() < 1e-9);
        assert_eq!(paths.distance(g(7.0)), None);
    }

    #[test]
    fn unknown_source_reaches_nothing() {
        let paths = dijkstra(&diamond(), g(0.0));
        assert!(paths.iter().all(|(_, distance)| !distance.is_reachable()));
    }

    #[test]
    fn floyd_matches_dijkstra_on_every_source() {
        let graph = diamond();
        let table = floyd_warshall(&graph);
        for &source in graph.vertices() {
            for (target, distance) in dijkstra(&graph, source).iter() {
                let expected = table.distance(source, target).expect("vertex present");
                match (distance, expected) {
                    (Distance::Finite(a), Distance::Finite(b)) => assert!((a - b).abs() < 1e-9),
                    (a, b) => assert_eq!(a, b),
                }
            }
        }
    }

    #[test]
    fn row_lists_distances_in_vertex_order() {
        let table = floyd_warshall(&diamond());
        let row: Vec<String> = table.row(g(1.4)).map(|(_, d)| d.to_string()).collect();
        assert_eq!(row, vec!["inf", "0.0", "inf", "0.5"]);
        assert_eq!(table.row(g(8.0)).count(), 0);
    }

    #[rstest]
    #[case(Distance::Finite(0.30000000000000004), "0.3")]
    #[case(Distance::Finite(2.0), "2.0")]
    #[case(Distance::Unreachable, "inf")]
    fn distance_display(#[case] distance: Distance, #[case] expected: &str) {
        assert_eq!(distance.to_string(), expected);
    }
}
