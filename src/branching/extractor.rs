//! Maximal chain extraction from an arborescence.
//!
//! The root and every branch point (a non-root vertex with two or more
//! children) act as anchors. Each child of an anchor that is not itself a
//! branch point opens a chain, which follows single children until it
//! reaches a leaf or a vertex whose only child is a branch point.
//!
//! # Complexity
//!
//! O(V): every vertex is visited once.

use log::debug;

use super::{Branch, Branching};
use crate::arborescence::Arborescence;
use crate::graph::VertexId;

/// Partitions the non-root vertices of `arborescence` into maximal chains
/// and branch points.
///
/// Anchors are visited depth-first with children in ascending id order, so
/// the output order is deterministic. Every non-root vertex ends up either in
/// exactly one branch or in the branch point list.
///
/// # Examples
///
/// ```
/// use u_compress::arborescence::minimum_spanning_arborescence;
/// use u_compress::branching::extract_branches;
/// use u_compress::graph::{VertexId, WeightedDigraph};
///
/// // 0 -> 1 -> 2 -> 3
/// let mut g = WeightedDigraph::new();
/// for i in 0..4 {
///     g.add_vertex(VertexId(i), ()).unwrap();
/// }
/// for i in 0..3 {
///     g.add_edge(VertexId(i), VertexId(i + 1), 1.0).unwrap();
/// }
/// let arb = minimum_spanning_arborescence(&g, VertexId(0)).unwrap();
///
/// let branching = extract_branches(&arb);
/// assert_eq!(branching.branches.len(), 1);
/// assert_eq!(
///     branching.branches[0].vertices(),
///     &[VertexId(1), VertexId(2), VertexId(3)]
/// );
/// assert!(branching.branch_points.is_empty());
/// ```
pub fn extract_branches(arborescence: &Arborescence) -> Branching {
    let root = arborescence.root();
    let is_branch_point = |v: VertexId| v != root && arborescence.children(v).len() >= 2;

    let mut branching = Branching::default();
    let mut anchors = vec![root];
    while let Some(anchor) = anchors.pop() {
        if anchor != root {
            branching.branch_points.push(anchor);
        }
        let mut discovered = Vec::new();
        for &child in arborescence.children(anchor) {
            if is_branch_point(child) {
                discovered.push(child);
                continue;
            }
            let mut chain = vec![child];
            let mut current = child;
            while let [next] = arborescence.children(current) {
                if is_branch_point(*next) {
                    discovered.push(*next);
                    break;
                }
                chain.push(*next);
                current = *next;
            }
            if let Some(branch) = Branch::new(chain) {
                branching.branches.push(branch);
            }
        }
        anchors.extend(discovered.into_iter().rev());
    }

    debug!(
        "extracted {} branches and {} branch points",
        branching.branches.len(),
        branching.branch_points.len()
    );
    branching
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arborescence::minimum_spanning_arborescence;
    use crate::graph::WeightedDigraph;

    /// Builds a graph whose only edges are the given tree edges.
    fn tree(n: usize, edges: &[(usize, usize)]) -> Arborescence {
        let mut g = WeightedDigraph::new();
        for i in 0..n {
            g.add_vertex(VertexId(i), ()).expect("vertex");
        }
        for &(s, t) in edges {
            g.add_edge(VertexId(s), VertexId(t), 1.0).expect("edge");
        }
        minimum_spanning_arborescence(&g, VertexId(0)).expect("tree")
    }

    fn ids(branch: &Branch) -> Vec<usize> {
        branch.vertices().iter().map(|v| v.0).collect()
    }

    #[test]
    fn test_single_chain() {
        let b = extract_branches(&tree(4, &[(0, 1), (1, 2), (2, 3)]));
        assert_eq!(b.branches.len(), 1);
        assert_eq!(ids(&b.branches[0]), vec![1, 2, 3]);
        assert_eq!(b.num_vertices(), 3);
    }

    #[test]
    fn test_star_gives_trivial_branches() {
        let b = extract_branches(&tree(4, &[(0, 1), (0, 2), (0, 3)]));
        let all: Vec<Vec<usize>> = b.branches.iter().map(ids).collect();
        assert_eq!(all, vec![vec![1], vec![2], vec![3]]);
        assert!(b.branch_points.is_empty());
    }

    #[test]
    fn test_branch_point_splits_chains() {
        //      0
        //      |
        //      1
        //      |
        //      2   (branch point)
        //     / \
        //    3   5
        //    |
        //    4
        let b = extract_branches(&tree(6, &[(0, 1), (1, 2), (2, 3), (3, 4), (2, 5)]));
        let all: Vec<Vec<usize>> = b.branches.iter().map(ids).collect();
        assert_eq!(all, vec![vec![1], vec![3, 4], vec![5]]);
        assert_eq!(b.branch_points, vec![VertexId(2)]);
        assert_eq!(b.num_vertices(), 5);
    }

    #[test]
    fn test_adjacent_branch_points() {
        // 0 -> 1, 1 -> {2, 3}, 2 -> {4, 5}
        let b = extract_branches(&tree(6, &[(0, 1), (1, 2), (1, 3), (2, 4), (2, 5)]));
        let all: Vec<Vec<usize>> = b.branches.iter().map(ids).collect();
        assert_eq!(b.branch_points, vec![VertexId(1), VertexId(2)]);
        assert_eq!(all, vec![vec![3], vec![4], vec![5]]);
    }

    #[test]
    fn test_root_only() {
        let b = extract_branches(&tree(1, &[]));
        assert!(b.branches.is_empty());
        assert!(b.branch_points.is_empty());
    }

    #[test]
    fn test_partition_covers_all_but_root() {
        let arb = tree(
            8,
            &[(0, 1), (0, 2), (1, 3), (1, 4), (4, 5), (5, 6), (2, 7)],
        );
        let b = extract_branches(&arb);
        let mut seen: Vec<VertexId> = b
            .branches
            .iter()
            .flat_map(|br| br.vertices().iter().copied())
            .chain(b.branch_points.iter().copied())
            .collect();
        seen.sort();
        let expected: Vec<VertexId> = (1..8).map(VertexId).collect();
        assert_eq!(seen, expected);
    }
}
