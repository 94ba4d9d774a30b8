//! Kruskal's algorithm over the undirected view of the grade graph.

use std::collections::{HashMap, hash_map::Entry};

use crate::graph::GradeGraph;

use super::{SpanningEdge, SpanningForest, union_find::DisjointSet};

/// Collapses parallel and opposite edges onto one canonical pair, keeping
/// the lightest (earliest on ties). Self-loops are dropped.
fn canonical_edges(graph: &GradeGraph) -> Vec<(usize, usize, f64, u64)> {
    let mut best: HashMap<(usize, usize), (f64, u64)> = HashMap::new();
    for source in 0..graph.vertex_count() {
        for arc in graph.arcs(source) {
            if arc.target == source {
                continue;
            }
            let (Some(a), Some(b)) = (graph.grade_at(source), graph.grade_at(arc.target)) else {
                continue;
            };
            let pair = if a < b {
                (source, arc.target)
            } else {
                (arc.target, source)
            };
            match best.entry(pair) {
                Entry::Vacant(slot) => {
                    slot.insert((arc.weight, arc.sequence));
                }
                Entry::Occupied(mut slot) => {
                    let (weight, sequence) = *slot.get();
                    let lighter = arc.weight.total_cmp(&weight).then(arc.sequence.cmp(&sequence));
                    if lighter.is_lt() {
                        slot.insert((arc.weight, arc.sequence));
                    }
                }
            }
        }
    }
    best.into_iter()
        .map(|((low, high), (weight, sequence))| (low, high, weight, sequence))
        .collect()
}

/// Computes a minimum spanning forest over every vertex.
///
/// Edges are read as undirected pairs ordered by grade, sorted by weight,
/// and accepted when they join two components. Ties go to the edge inserted
/// first. Disconnected graphs produce one tree per component.
///
/// # Examples
/// ```
/// use gradeband_core::{Grade, GradeGraph, kruskal};
///
/// let mut graph = GradeGraph::new();
/// graph.add_edge(Grade::new(0.0), Grade::new(0.5), 0.5)?;
/// graph.add_edge(Grade::new(1.0), Grade::new(1.5), 0.5)?;
///
/// let forest = kruskal(&graph);
/// assert_eq!(forest.edges().len(), 2);
/// assert_eq!(forest.component_count(), 2);
/// assert!(!forest.is_tree());
/// # Ok::<(), gradeband_core::GraphError>(())
/// ```
#[must_use]
pub fn kruskal(graph: &GradeGraph) -> SpanningForest {
    let mut candidates: Vec<SpanningEdge> = canonical_edges(graph)
        .into_iter()
        .filter_map(|(low, high, weight, sequence)| {
            Some(SpanningEdge::new(
                graph.grade_at(low)?,
                graph.grade_at(high)?,
                weight,
                sequence,
            ))
        })
        .collect();
    candidates.sort_unstable();

    let mut components = DisjointSet::new(graph.vertex_count());
    let mut edges = Vec::new();
    for edge in candidates {
        let (Some(low), Some(high)) = (graph.position(edge.from()), graph.position(edge.to()))
        else {
            continue;
        };
        if components.union(low, high) {
            edges.push(edge);
        }
    }

    SpanningForest::new(edges, graph.vertex_count(), components.components())
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    clippy::indexing_slicing,
    reason = "tests compare weights within a tolerance and address edges by position"
)]
mod tests {
    use super::*;
    use crate::grade::Grade;

    fn g(value: f64) -> Grade {
        Grade::new(value)
    }

    #[test]
    fn opposite_edges_collapse_to_the_lighter_one() {
        let mut graph = GradeGraph::new();
        graph.add_edge(g(2.5), g(2.0), 0.9).expect("valid edge");
        graph.add_edge(g(2.0), g(2.5), 0.5).expect("valid edge");

        let forest = kruskal(&graph);
        assert_eq!(forest.edges().len(), 1);
        let edge = forest.edges()[0];
        assert_eq!((edge.from(), edge.to()), (g(2.0), g(2.5)));
        assert!((edge.weight() - 0.5).abs() < 1e-12);
        assert!(forest.is_tree());
    }

    #[test]
    fn skips_edges_closing_a_cycle() {
        let mut graph = GradeGraph::new();
        graph.add_edge(g(1.0), g(1.2), 0.2).expect("valid edge");
        graph.add_edge(g(1.2), g(1.5), 0.3).expect("valid edge");
        graph.add_edge(g(1.0), g(1.5), 0.5).expect("valid edge");

        let forest = kruskal(&graph);
        let weights: Vec<f64> = forest.edges().iter().map(SpanningEdge::weight).collect();
        assert_eq!(weights, vec![0.2, 0.3]);
        assert_eq!(forest.vertex_count(), 3);
    }

    #[test]
    fn isolated_vertices_count_as_components() {
        let mut graph = GradeGraph::new();
        graph.add_vertex(g(4.0));
        graph.add_edge(g(3.0), g(3.0), 0.0).expect("valid edge");

        let forest = kruskal(&graph);
        assert!(forest.edges().is_empty());
        assert_eq!(forest.component_count(), 2);
    }
}
