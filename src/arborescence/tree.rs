//! The arborescence produced by the solver.

use std::collections::{BTreeMap, BTreeSet};

use super::ArborescenceError;
use crate::graph::{Edge, EdgeId, VertexId, WeightedDigraph};

/// A spanning arborescence of some graph, rooted at `root`.
///
/// Edges are stored together with their ids in the graph they were chosen
/// from, ordered by id.
#[derive(Debug, Clone, PartialEq)]
pub struct Arborescence {
    root: VertexId,
    edges: Vec<(EdgeId, Edge)>,
    parents: BTreeMap<VertexId, usize>,
    children: BTreeMap<VertexId, Vec<VertexId>>,
}

impl Arborescence {
    pub(crate) fn from_edges<V>(
        graph: &WeightedDigraph<V>,
        root: VertexId,
        mut ids: Vec<EdgeId>,
    ) -> Result<Self, ArborescenceError> {
        ids.sort_unstable();
        ids.dedup();

        let mut edges = Vec::with_capacity(ids.len());
        let mut parents = BTreeMap::new();
        let mut children: BTreeMap<VertexId, Vec<VertexId>> = BTreeMap::new();
        for id in ids {
            let edge = *graph.edge(id).ok_or_else(|| {
                ArborescenceError::InvalidArborescence(format!(
                    "edge #{} is not part of the graph",
                    id.index()
                ))
            })?;
            if parents.insert(edge.target(), edges.len()).is_some() {
                return Err(ArborescenceError::InvalidArborescence(format!(
                    "vertex {} has more than one incoming edge",
                    edge.target()
                )));
            }
            children.entry(edge.source()).or_default().push(edge.target());
            edges.push((id, edge));
        }
        for list in children.values_mut() {
            list.sort_unstable();
        }

        Ok(Self {
            root,
            edges,
            parents,
            children,
        })
    }

    /// Root vertex.
    pub fn root(&self) -> VertexId {
        self.root
    }

    /// Chosen edges in id order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter().map(|(_, e)| e)
    }

    /// Ids of the chosen edges in the source graph, ascending.
    pub fn edge_ids(&self) -> Vec<EdgeId> {
        self.edges.iter().map(|(id, _)| *id).collect()
    }

    /// Number of edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` for the single-vertex arborescence.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Sum of edge weights.
    pub fn total_weight(&self) -> f64 {
        self.edges.iter().map(|(_, e)| e.weight()).sum()
    }

    /// The edge entering `v` (`None` for the root).
    pub fn incoming_edge(&self, v: VertexId) -> Option<&Edge> {
        self.parents
            .get(&v)
            .and_then(|&idx| self.edges.get(idx))
            .map(|(_, e)| e)
    }

    /// Parent of `v` (`None` for the root).
    pub fn parent(&self, v: VertexId) -> Option<VertexId> {
        self.incoming_edge(v).map(Edge::source)
    }

    /// Children of `v` in ascending id order.
    pub fn children(&self, v: VertexId) -> &[VertexId] {
        self.children.get(&v).map(Vec::as_slice).unwrap_or_default()
    }

    /// Returns `true` if the arborescence uses the edge `source -> target`.
    pub fn contains_edge(&self, source: VertexId, target: VertexId) -> bool {
        self.parent(target) == Some(source)
    }

    /// Vertices reachable from the root, in depth-first preorder.
    pub fn preorder(&self) -> Vec<VertexId> {
        let mut order = Vec::new();
        let mut stack = vec![self.root];
        let mut seen = BTreeSet::new();
        while let Some(v) = stack.pop() {
            if !seen.insert(v) {
                continue;
            }
            order.push(v);
            stack.extend(self.children(v).iter().rev().copied());
        }
        order
    }

    /// Checks that this is a spanning arborescence of `graph`.
    ///
    /// Every non-root vertex has exactly one incoming edge, the root has
    /// none, every edge belongs to `graph`, and every vertex is reachable
    /// from the root.
    pub fn verify_against<V>(&self, graph: &WeightedDigraph<V>) -> Result<(), ArborescenceError> {
        let fail = |msg: String| Err(ArborescenceError::InvalidArborescence(msg));

        if !graph.contains_vertex(self.root) {
            return fail(format!("root {} is not in the graph", self.root));
        }
        if self.parents.contains_key(&self.root) {
            return fail(format!("root {} has an incoming edge", self.root));
        }
        for (id, edge) in &self.edges {
            if graph.edge(*id) != Some(edge) {
                return fail(format!("edge #{} does not match the graph", id.index()));
            }
        }
        if let Some(v) = graph
            .vertex_ids()
            .find(|&v| v != self.root && !self.parents.contains_key(&v))
        {
            return fail(format!("vertex {v} has no incoming edge"));
        }
        if self.edges.len() + 1 != graph.num_vertices() {
            return fail(format!(
                "{} edges for {} vertices",
                self.edges.len(),
                graph.num_vertices()
            ));
        }
        let reached = self.preorder().len();
        if reached != graph.num_vertices() {
            return fail(format!(
                "only {reached} of {} vertices reachable from the root",
                graph.num_vertices()
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_graph() -> (WeightedDigraph<()>, Vec<EdgeId>) {
        let mut g = WeightedDigraph::new();
        for i in 0..4 {
            g.add_vertex(VertexId(i), ()).expect("vertex");
        }
        let ids = vec![
            g.add_edge(VertexId(0), VertexId(1), 1.0).expect("edge"),
            g.add_edge(VertexId(1), VertexId(2), 2.0).expect("edge"),
            g.add_edge(VertexId(1), VertexId(3), 3.0).expect("edge"),
        ];
        g.add_edge(VertexId(3), VertexId(2), 0.5).expect("edge");
        (g, ids)
    }

    #[test]
    fn test_tree_queries() {
        let (g, ids) = path_graph();
        let arb = Arborescence::from_edges(&g, VertexId(0), ids.clone()).expect("tree");
        assert_eq!(arb.len(), 3);
        assert_eq!(arb.edge_ids(), ids);
        assert!((arb.total_weight() - 6.0).abs() < 1e-10);
        assert_eq!(arb.parent(VertexId(3)), Some(VertexId(1)));
        assert_eq!(arb.parent(VertexId(0)), None);
        assert_eq!(arb.children(VertexId(1)), &[VertexId(2), VertexId(3)]);
        assert!(arb.children(VertexId(2)).is_empty());
        assert!(arb.contains_edge(VertexId(1), VertexId(2)));
        assert!(!arb.contains_edge(VertexId(3), VertexId(2)));
        assert_eq!(
            arb.preorder(),
            vec![VertexId(0), VertexId(1), VertexId(2), VertexId(3)]
        );
        assert!(arb.verify_against(&g).is_ok());
    }

    #[test]
    fn test_rejects_double_parent() {
        let (g, mut ids) = path_graph();
        ids.push(EdgeId(3));
        assert!(matches!(
            Arborescence::from_edges(&g, VertexId(0), ids),
            Err(ArborescenceError::InvalidArborescence(_))
        ));
    }

    #[test]
    fn test_verify_detects_missing_vertex() {
        let (g, ids) = path_graph();
        let arb = Arborescence::from_edges(&g, VertexId(0), ids[..2].to_vec()).expect("forest");
        assert!(matches!(
            arb.verify_against(&g),
            Err(ArborescenceError::InvalidArborescence(_))
        ));
    }

    #[test]
    fn test_verify_detects_cycle() {
        // 1 -> 2 -> 1 with 0 isolated: two edges, three vertices, root unreached
        let mut g = WeightedDigraph::new();
        for i in 0..3 {
            g.add_vertex(VertexId(i), ()).expect("vertex");
        }
        let a = g.add_edge(VertexId(1), VertexId(2), 1.0).expect("edge");
        let b = g.add_edge(VertexId(2), VertexId(1), 1.0).expect("edge");
        let arb = Arborescence::from_edges(&g, VertexId(0), vec![a, b]).expect("edges");
        assert!(arb.verify_against(&g).is_err());
    }
}
