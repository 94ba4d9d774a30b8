//! Minimum spanning trees over the grade graph.
//!
//! Both algorithms read the graph as undirected: an edge `a -> b` may be
//! crossed in either direction. Self-loops never join two components and are
//! ignored. Weight ties are broken by edge insertion sequence, so results are
//! deterministic for a given graph.

mod kruskal;
mod prim;
mod union_find;

use std::cmp::Ordering;

use crate::grade::Grade;

pub use self::{kruskal::kruskal, prim::prim};

/// A tree edge, reported with its unrounded weight.
///
/// Edges order by weight, then insertion sequence, then endpoints. Equality
/// follows the same order, so weights compare with `f64::total_cmp`.
#[derive(Clone, Copy, Debug)]
pub struct SpanningEdge {
    from: Grade,
    to: Grade,
    weight: f64,
    sequence: u64,
}

impl SpanningEdge {
    pub(crate) const fn new(from: Grade, to: Grade, weight: f64, sequence: u64) -> Self {
        Self {
            from,
            to,
            weight,
            sequence,
        }
    }

    /// Returns the endpoint already in the tree (Prim) or the lower grade
    /// of the pair (Kruskal).
    #[must_use]
    #[rustfmt::skip]
    pub const fn from(&self) -> Grade { self.from }

    /// Returns the other endpoint.
    #[must_use]
    #[rustfmt::skip]
    pub const fn to(&self) -> Grade { self.to }

    /// Returns the edge weight.
    #[must_use]
    #[rustfmt::skip]
    pub const fn weight(&self) -> f64 { self.weight }

    /// Returns the insertion sequence of the underlying graph edge.
    #[must_use]
    #[rustfmt::skip]
    pub const fn sequence(&self) -> u64 { self.sequence }
}

impl PartialEq for SpanningEdge {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SpanningEdge {}

impl Ord for SpanningEdge {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .total_cmp(&other.weight)
            .then_with(|| self.sequence.cmp(&other.sequence))
            .then_with(|| self.from.cmp(&other.from))
            .then_with(|| self.to.cmp(&other.to))
    }
}

impl PartialOrd for SpanningEdge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The output of a spanning tree or forest computation.
///
/// Prim reports the tree of the start vertex's component, so its component
/// count is at most one. Kruskal spans every vertex and reports one tree per
/// connected component.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpanningForest {
    edges: Vec<SpanningEdge>,
    vertex_count: usize,
    component_count: usize,
}

impl SpanningForest {
    pub(crate) const fn new(
        edges: Vec<SpanningEdge>,
        vertex_count: usize,
        component_count: usize,
    ) -> Self {
        Self {
            edges,
            vertex_count,
            component_count,
        }
    }

    /// Returns the tree edges in the order they were accepted.
    #[must_use]
    #[rustfmt::skip]
    pub fn edges(&self) -> &[SpanningEdge] { &self.edges }

    /// Returns the number of vertices covered.
    #[must_use]
    #[rustfmt::skip]
    pub const fn vertex_count(&self) -> usize { self.vertex_count }

    /// Returns the number of trees in the forest.
    #[must_use]
    #[rustfmt::skip]
    pub const fn component_count(&self) -> usize { self.component_count }

    /// Returns `true` when the forest is a single tree.
    #[must_use]
    pub const fn is_tree(&self) -> bool {
        self.component_count == 1
    }

    /// Returns the sum of all edge weights.
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.edges.iter().map(SpanningEdge::weight).sum()
    }
}
