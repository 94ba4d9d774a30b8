//! Reachability traversals following edge direction.

use std::collections::VecDeque;

use crate::{grade::Grade, graph::GradeGraph};

/// Returns the vertices reachable from `start` in breadth-first order.
///
/// Neighbours are visited in edge insertion order. An unknown `start`
/// yields an empty order.
///
/// # Examples
/// ```
/// use gradeband_core::{Grade, GradeGraph, breadth_first};
///
/// let mut graph = GradeGraph::new();
/// graph.add_edge(Grade::new(1.0), Grade::new(1.5), 0.5)?;
/// graph.add_edge(Grade::new(1.0), Grade::new(1.2), 0.2)?;
/// graph.add_edge(Grade::new(1.5), Grade::new(1.9), 0.4)?;
///
/// let order: Vec<f64> = breadth_first(&graph, Grade::new(1.0))
///     .into_iter()
///     .map(Grade::get)
///     .collect();
/// assert_eq!(order, vec![1.0, 1.5, 1.2, 1.9]);
/// # Ok::<(), gradeband_core::GraphError>(())
/// ```
#[must_use]
#[expect(
    clippy::indexing_slicing,
    reason = "positions come from the graph and index vectors sized to its vertex count"
)]
pub fn breadth_first(graph: &GradeGraph, start: Grade) -> Vec<Grade> {
    let Some(root) = graph.position(start) else {
        return Vec::new();
    };
    let mut visited = vec![false; graph.vertex_count()];
    let mut queue = VecDeque::from([root]);
    visited[root] = true;
    let mut order = Vec::new();

    while let Some(vertex) = queue.pop_front() {
        order.extend(graph.grade_at(vertex));
        for arc in graph.arcs(vertex) {
            if !visited[arc.target] {
                visited[arc.target] = true;
                queue.push_back(arc.target);
            }
        }
    }
    order
}

/// Returns the vertices reachable from `start` in depth-first preorder.
///
/// The walk always descends into the first unvisited neighbour in edge
/// insertion order before moving on, using an explicit stack so deep chains
/// cannot overflow the call stack. An unknown `start` yields an empty order.
///
/// # Examples
/// ```
/// use gradeband_core::{Grade, GradeGraph, depth_first};
///
/// let mut graph = GradeGraph::new();
/// graph.add_edge(Grade::new(1.0), Grade::new(1.5), 0.5)?;
/// graph.add_edge(Grade::new(1.0), Grade::new(1.2), 0.2)?;
/// graph.add_edge(Grade::new(1.5), Grade::new(1.9), 0.4)?;
///
/// let order: Vec<f64> = depth_first(&graph, Grade::new(1.0))
///     .into_iter()
///     .map(Grade::get)
///     .collect();
/// assert_eq!(order, vec![1.0, 1.5, 1.9, 1.2]);
/// # Ok::<(), gradeband_core::GraphError>(())
/// ```
#[must_use]
#[expect(
    clippy::indexing_slicing,
    reason = "positions come from the graph and index vectors sized to its vertex count"
)]
pub fn depth_first(graph: &GradeGraph, start: Grade) -> Vec<Grade> {
    let Some(root) = graph.position(start) else {
        return Vec::new();
    };
    let mut visited = vec![false; graph.vertex_count()];
    visited[root] = true;
    let mut order: Vec<Grade> = graph.grade_at(root).into_iter().collect();
    // Each frame holds a vertex and the index of its next edge to inspect.
    let mut stack = vec![(root, 0_usize)];

    while let Some(frame) = stack.last_mut() {
        let (vertex, next) = *frame;
        let arcs = graph.arcs(vertex);
        let Some(arc) = arcs.get(next) else {
            stack.pop();
            continue;
        };
        frame.1 = next + 1;
        if !visited[arc.target] {
            visited[arc.target] = true;
            order.extend(graph.grade_at(arc.target));
            stack.push((arc.target, 0));
        }
    }
    order
}
