//! Union-find (disjoint set union) used by Kruskal's algorithm.
//!
//! Kruskal processes edges in non-decreasing weight order and only accepts an
//! edge when its endpoints lie in different components. This structure
//! tracks component membership and the number of remaining components.

#[derive(Clone, Debug)]
pub(super) struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
    components: usize,
}

#[expect(
    clippy::indexing_slicing,
    reason = "nodes are vertex positions below the set size"
)]
impl DisjointSet {
    pub(super) fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
            components: n,
        }
    }

    pub(super) const fn components(&self) -> usize {
        self.components
    }

    pub(super) fn find(&mut self, mut node: usize) -> usize {
        let mut root = node;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        while self.parent[node] != node {
            let parent = self.parent[node];
            self.parent[node] = root;
            node = parent;
        }

        root
    }

    /// Merges the components of `left` and `right`; returns `false` when they
    /// were already joined.
    pub(super) fn union(&mut self, left: usize, right: usize) -> bool {
        let mut root = self.find(left);
        let mut child = self.find(right);
        if root == child {
            return false;
        }
        let root_rank = self.rank[root];
        let child_rank = self.rank[child];
        if root_rank < child_rank {
            std::mem::swap(&mut root, &mut child);
        }
        self.parent[child] = root;
        if root_rank == child_rank {
            self.rank[root] = root_rank.saturating_add(1);
        }
        self.components -= 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_reduces_component_count_once() {
        let mut set = DisjointSet::new(4);
        assert!(set.union(0, 1));
        assert!(set.union(2, 3));
        assert!(!set.union(1, 0));
        assert_eq!(set.components(), 2);
        assert!(set.union(1, 3));
        assert_eq!(set.find(0), set.find(2));
        assert_eq!(set.components(), 1);
    }
}
