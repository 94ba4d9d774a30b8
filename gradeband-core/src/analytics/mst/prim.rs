//! Prim's algorithm grown from a start vertex.

use std::{
    cmp::{Ordering, Reverse},
    collections::BinaryHeap,
};

use crate::{grade::Grade, graph::GradeGraph};

use super::{SpanningEdge, SpanningForest};

#[derive(Clone, Copy, Debug)]
struct Frontier {
    weight: f64,
    sequence: u64,
    from: usize,
    to: usize,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .total_cmp(&other.weight)
            .then_with(|| self.sequence.cmp(&other.sequence))
            .then_with(|| self.to.cmp(&other.to))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// `(neighbour, weight, sequence)` lists with every non-loop edge recorded
/// at both endpoints.
#[expect(
    clippy::indexing_slicing,
    reason = "positions come from the graph and index vectors sized to its vertex count"
)]
fn undirected_adjacency(graph: &GradeGraph) -> Vec<Vec<(usize, f64, u64)>> {
    let mut adjacency = vec![Vec::new(); graph.vertex_count()];
    for source in 0..graph.vertex_count() {
        for arc in graph.arcs(source) {
            if arc.target == source {
                continue;
            }
            adjacency[source].push((arc.target, arc.weight, arc.sequence));
            adjacency[arc.target].push((source, arc.weight, arc.sequence));
        }
    }
    adjacency
}

#[expect(
    clippy::indexing_slicing,
    reason = "positions come from the graph and index vectors sized to its vertex count"
)]
fn grow(
    vertex: usize,
    adjacency: &[Vec<(usize, f64, u64)>],
    in_tree: &mut [bool],
    heap: &mut BinaryHeap<Reverse<Frontier>>,
) {
    in_tree[vertex] = true;
    for &(to, weight, sequence) in &adjacency[vertex] {
        if !in_tree[to] {
            heap.push(Reverse(Frontier {
                weight,
                sequence,
                from: vertex,
                to,
            }));
        }
    }
}

/// Computes a minimum spanning tree of the component containing `start`.
///
/// The cheapest edge leaving the tree is taken at each step; ties go to the
/// edge inserted first. Vertices unreachable from `start`, even through
/// reversed edges, are not covered. An unknown `start` yields an empty
/// forest.
///
/// # Examples
/// ```
/// use gradeband_core::{Grade, GradeGraph, prim};
///
/// let mut graph = GradeGraph::new();
/// graph.add_edge(Grade::new(1.0), Grade::new(1.5), 0.5)?;
/// graph.add_edge(Grade::new(1.5), Grade::new(1.7), 0.2)?;
/// graph.add_edge(Grade::new(1.0), Grade::new(1.7), 0.7)?;
///
/// let tree = prim(&graph, Grade::new(1.7));
/// assert!(tree.is_tree());
/// assert_eq!(tree.edges().len(), 2);
/// assert!((tree.total_weight() - 0.7).abs() < 1e-9);
/// # Ok::<(), gradeband_core::GraphError>(())
/// ```
#[must_use]
#[expect(
    clippy::indexing_slicing,
    reason = "positions come from the graph and index vectors sized to its vertex count"
)]
pub fn prim(graph: &GradeGraph, start: Grade) -> SpanningForest {
    let Some(root) = graph.position(start) else {
        return SpanningForest::default();
    };
    let adjacency = undirected_adjacency(graph);
    let mut in_tree = vec![false; graph.vertex_count()];
    let mut heap = BinaryHeap::new();
    let mut edges = Vec::new();

    grow(root, &adjacency, &mut in_tree, &mut heap);
    while let Some(Reverse(candidate)) = heap.pop() {
        if in_tree[candidate.to] {
            continue;
        }
        let endpoints = (graph.grade_at(candidate.from), graph.grade_at(candidate.to));
        if let (Some(from), Some(to)) = endpoints {
            edges.push(SpanningEdge::new(from, to, candidate.weight, candidate.sequence));
        }
        grow(candidate.to, &adjacency, &mut in_tree, &mut heap);
    }

    let vertex_count = edges.len() + 1;
    SpanningForest::new(edges, vertex_count, 1)
}

#[cfg(test)]
#[expect(clippy::indexing_slicing, reason = "tests address tree edges by position")]
mod tests {
    use super::*;

    fn g(value: f64) -> Grade {
        Grade::new(value)
    }

    #[test]
    fn ties_go_to_the_earlier_edge() {
        let mut graph = GradeGraph::new();
        graph.add_edge(g(1.0), g(1.2), 0.2).expect("valid edge");
        graph.add_edge(g(1.0), g(0.8), 0.2).expect("valid edge");

        let tree = prim(&graph, g(1.0));
        let order: Vec<_> = tree.edges().iter().map(SpanningEdge::to).collect();
        assert_eq!(order, vec![g(1.2), g(0.8)]);
    }

    #[test]
    fn covers_only_the_start_component() {
        let mut graph = GradeGraph::new();
        graph.add_edge(g(0.0), g(0.5), 0.5).expect("valid edge");
        graph.add_edge(g(1.0), g(1.5), 0.5).expect("valid edge");

        let tree = prim(&graph, g(0.5));
        assert_eq!(tree.vertex_count(), 2);
        assert_eq!(tree.edges().len(), 1);
        assert_eq!(tree.edges()[0].from(), g(0.5));
        assert_eq!(tree.edges()[0].to(), g(0.0));
    }

    #[test]
    fn ignores_self_loops() {
        let mut graph = GradeGraph::new();
        graph.add_edge(g(2.0), g(2.0), 0.0).expect("valid edge");
        let tree = prim(&graph, g(2.0));
        assert!(tree.edges().is_empty());
        assert_eq!(tree.vertex_count(), 1);
    }

    #[test]
    fn unknown_start_yields_empty_forest() {
        let graph = GradeGraph::new();
        let tree = prim(&graph, g(3.0));
        assert_eq!(tree, SpanningForest::default());
        assert!(!tree.is_tree());
    }
}
