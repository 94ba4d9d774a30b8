//! Weighted directed graph over distinct grade values.
//!
//! Vertices are grades, kept in first-insertion order. Each vertex owns an
//! ordered list of outgoing edges. Every edge carries a global insertion
//! sequence that the analytics suite uses to break weight ties
//! deterministically.

mod construct;

use std::collections::HashMap;

use crate::{error::GraphError, grade::Grade};

/// Outgoing edge stored in a vertex's adjacency list.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Arc {
    pub(crate) target: usize,
    pub(crate) weight: f64,
    pub(crate) sequence: u64,
}

/// A directed, weighted edge between two grades.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GraphEdge {
    from: Grade,
    to: Grade,
    weight: f64,
}

impl GraphEdge {
    /// Returns the source grade.
    #[must_use]
    #[rustfmt::skip]
    pub const fn from(&self) -> Grade { self.from }

    /// Returns the destination grade.
    #[must_use]
    #[rustfmt::skip]
    pub const fn to(&self) -> Grade { self.to }

    /// Returns the unrounded weight.
    #[must_use]
    #[rustfmt::skip]
    pub const fn weight(&self) -> f64 { self.weight }
}

/// Adjacency structure mapping each grade to its ordered outgoing edges.
///
/// # Examples
/// ```
/// use gradeband_core::{Grade, GradeGraph};
///
/// let mut graph = GradeGraph::new();
/// graph.add_edge(Grade::new(3.0), Grade::new(3.4), 0.4)?;
/// graph.add_vertex(Grade::new(4.0));
/// assert_eq!(graph.vertex_count(), 3);
/// assert_eq!(graph.edge_count(), 1);
/// assert_eq!(graph.out_degree(Grade::new(4.0)), Some(0));
/// # Ok::<(), gradeband_core::GraphError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct GradeGraph {
    vertices: Vec<Grade>,
    index: HashMap<Grade, usize>,
    adjacency: Vec<Vec<Arc>>,
    edge_count: usize,
}

impl GradeGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `grade` as a vertex if absent and returns its position.
    pub fn add_vertex(&mut self, grade: Grade) -> usize {
        if let Some(&position) = self.index.get(&grade) {
            return position;
        }
        let position = self.vertices.len();
        self.vertices.push(grade);
        self.adjacency.push(Vec::new());
        self.index.insert(grade, position);
        position
    }

    /// Appends the edge `from -> to`, inserting missing vertices.
    ///
    /// Parallel edges and self-loops are kept.
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidWeight`] when `weight` is negative or
    /// not finite.
    pub fn add_edge(&mut self, from: Grade, to: Grade, weight: f64) -> Result<(), GraphError> {
        if !(weight.is_finite() && weight >= 0.0) {
            return Err(GraphError::InvalidWeight { from, to, weight });
        }
        self.push_edge(from, to, weight);
        Ok(())
    }

    pub(crate) fn push_edge(&mut self, from: Grade, to: Grade, weight: f64) {
        let source = self.add_vertex(from);
        let target = self.add_vertex(to);
        let sequence = self.edge_count as u64;
        if let Some(arcs) = self.adjacency.get_mut(source) {
            arcs.push(Arc {
                target,
                weight,
                sequence,
            });
            self.edge_count += 1;
        }
    }

    /// Returns the number of vertices.
    #[must_use]
    #[rustfmt::skip]
    pub const fn vertex_count(&self) -> usize { self.vertices.len() }

    /// Returns the number of edges, counting parallel edges separately.
    #[must_use]
    #[rustfmt::skip]
    pub const fn edge_count(&self) -> usize { self.edge_count }

    /// Returns whether the graph has no vertices.
    #[must_use]
    #[rustfmt::skip]
    pub const fn is_empty(&self) -> bool { self.vertices.is_empty() }

    /// Returns the vertices in first-insertion order.
    #[must_use]
    #[rustfmt::skip]
    pub fn vertices(&self) -> &[Grade] { &self.vertices }

    /// Returns whether `grade` is a vertex.
    #[must_use]
    pub fn contains(&self, grade: Grade) -> bool {
        self.index.contains_key(&grade)
    }

    /// Returns the number of outgoing edges of `grade`, or `None` when it is
    /// not a vertex.
    #[must_use]
    pub fn out_degree(&self, grade: Grade) -> Option<usize> {
        self.position(grade)
            .and_then(|position| self.adjacency.get(position))
            .map(Vec::len)
    }

    /// Returns the outgoing neighbours of `grade` with edge weights, in
    /// insertion order. Unknown grades yield nothing.
    pub fn neighbors(&self, grade: Grade) -> impl Iterator<Item = (Grade, f64)> + '_ {
        self.position(grade)
            .map(|position| self.arcs(position))
            .unwrap_or_default()
            .iter()
            .filter_map(|arc| Some((self.grade_at(arc.target)?, arc.weight)))
    }

    /// Returns every edge, grouped by source vertex in vertex order.
    pub fn edges(&self) -> impl Iterator<Item = GraphEdge> + '_ {
        self.vertices
            .iter()
            .zip(&self.adjacency)
            .flat_map(move |(&from, arcs)| {
                arcs.iter().filter_map(move |arc| {
                    Some(GraphEdge {
                        from,
                        to: self.grade_at(arc.target)?,
                        weight: arc.weight,
                    })
                })
            })
    }

    pub(crate) fn position(&self, grade: Grade) -> Option<usize> {
        self.index.get(&grade).copied()
    }

    pub(crate) fn grade_at(&self, position: usize) -> Option<Grade> {
        self.vertices.get(position).copied()
    }

    pub(crate) fn arcs(&self, position: usize) -> &[Arc] {
        self.adjacency.get(position).map_or(&[], Vec::as_slice)
    }
}
