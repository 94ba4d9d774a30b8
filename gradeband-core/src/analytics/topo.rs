//! Topological ordering with Kahn's algorithm.

use std::collections::VecDeque;

use tracing::warn;

use crate::{grade::Grade, graph::GradeGraph};

/// A topological order, possibly partial.
///
/// When the graph has a cycle, vertices on or behind it never reach
/// in-degree zero and are left out, so the order is shorter than the vertex
/// count.
#[derive(Clone, Debug, PartialEq)]
pub struct TopologicalOrder {
    order: Vec<Grade>,
    vertex_count: usize,
}

impl TopologicalOrder {
    /// Returns the ordered vertices.
    #[must_use]
    #[rustfmt::skip]
    pub fn order(&self) -> &[Grade] { &self.order }

    /// Returns the vertex count of the analysed graph.
    #[must_use]
    #[rustfmt::skip]
    pub const fn vertex_count(&self) -> usize { self.vertex_count }

    /// Returns `true` when a cycle prevented a complete order.
    #[must_use]
    pub const fn has_cycle(&self) -> bool {
        self.order.len() < self.vertex_count
    }
}

/// Orders the vertices so every edge points forward.
///
/// Sources are seeded in vertex insertion order and released vertices are
/// queued in edge order. Self-loops and parallel edges count towards
/// in-degree, so a self-loop marks its vertex as cyclic.
///
/// # Examples
/// ```
/// use gradeband_core::{Grade, GradeGraph, topological_order};
///
/// let mut graph = GradeGraph::new();
/// graph.add_edge(Grade::new(2.0), Grade::new(2.5), 0.5)?;
/// graph.add_edge(Grade::new(2.5), Grade::new(2.0), 0.5)?;
/// graph.add_vertex(Grade::new(4.0));
///
/// let topo = topological_order(&graph);
/// assert!(topo.has_cycle());
/// assert_eq!(topo.order(), &[Grade::new(4.0)]);
/// # Ok::<(), gradeband_core::GraphError>(())
/// ```
#[must_use]
#[expect(
    clippy::indexing_slicing,
    reason = "positions come from the graph and index vectors sized to its vertex count"
)]
pub fn topological_order(graph: &GradeGraph) -> TopologicalOrder {
    let vertex_count = graph.vertex_count();
    let mut in_degree = vec![0_usize; vertex_count];
    for vertex in 0..vertex_count {
        for arc in graph.arcs(vertex) {
            in_degree[arc.target] += 1;
        }
    }

    let mut queue: VecDeque<usize> = (0..vertex_count)
        .filter(|&vertex| in_degree[vertex] == 0)
        .collect();
    let mut order = Vec::with_capacity(vertex_count);
    while let Some(vertex) = queue.pop_front() {
        order.extend(graph.grade_at(vertex));
        for arc in graph.arcs(vertex) {
            in_degree[arc.target] -= 1;
            if in_degree[arc.target] == 0 {
                queue.push_back(arc.target);
            }
        }
    }

    let topo = TopologicalOrder {
        order,
        vertex_count,
    };
    if topo.has_cycle() {
        warn!(
            ordered = topo.order.len(),
            vertices = vertex_count,
            "graph has a cycle, topological order is partial"
        );
    }
    topo
}
