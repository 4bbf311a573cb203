//! Simple directed weighted graph with per-endpoint edge indexes.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use super::GraphError;

/// Identity of a vertex.
///
/// For problem graphs this is the location index (customer id); composite
/// vertices created by contraction take fresh ids above every existing one.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct VertexId(pub usize);

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of an edge within one graph: its insertion position.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct EdgeId(pub(crate) usize);

impl EdgeId {
    /// Insertion position of the edge.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A directed edge with a non-negative weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    source: VertexId,
    target: VertexId,
    weight: f64,
}

impl Edge {
    /// Tail of the edge.
    pub fn source(&self) -> VertexId {
        self.source
    }

    /// Head of the edge.
    pub fn target(&self) -> VertexId {
        self.target
    }

    /// Edge weight.
    pub fn weight(&self) -> f64 {
        self.weight
    }
}

/// Maps every edge of a contracted graph to the parent-level edge it was
/// derived from.
#[derive(Debug, Clone, Default)]
pub struct Provenance {
    origins: Vec<EdgeId>,
}

impl Provenance {
    /// Parent edge behind `edge`, if `edge` belongs to the contracted graph.
    pub fn origin(&self, edge: EdgeId) -> Option<EdgeId> {
        self.origins.get(edge.0).copied()
    }

    /// Number of mapped edges.
    pub fn len(&self) -> usize {
        self.origins.len()
    }

    /// Returns `true` if no edge is mapped.
    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }
}

#[derive(Debug, Clone)]
struct VertexEntry<V> {
    payload: V,
    incoming: Vec<EdgeId>,
    outgoing: Vec<EdgeId>,
}

/// A simple directed graph: at most one edge per ordered pair, no self-loops.
///
/// Vertices iterate in ascending id order and each vertex lists its edges in
/// insertion order, so every algorithm built on top is deterministic.
/// The graph carries no acyclicity invariant.
///
/// # Examples
///
/// ```
/// use u_compress::graph::{VertexId, WeightedDigraph};
///
/// let mut g = WeightedDigraph::new();
/// g.add_vertex(VertexId(0), "depot").unwrap();
/// g.add_vertex(VertexId(1), "a").unwrap();
/// let e = g.add_edge(VertexId(0), VertexId(1), 2.5).unwrap();
///
/// assert_eq!(g.num_edges(), 1);
/// assert_eq!(g.incoming_edges(VertexId(1)).next().map(|(id, _)| id), Some(e));
/// assert!(g.add_edge(VertexId(0), VertexId(1), 1.0).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct WeightedDigraph<V> {
    vertices: BTreeMap<VertexId, VertexEntry<V>>,
    edges: Vec<Edge>,
    pairs: HashMap<(VertexId, VertexId), EdgeId>,
}

impl<V> Default for WeightedDigraph<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> WeightedDigraph<V> {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self {
            vertices: BTreeMap::new(),
            edges: Vec::new(),
            pairs: HashMap::new(),
        }
    }

    /// Adds a vertex with its payload.
    pub fn add_vertex(&mut self, id: VertexId, payload: V) -> Result<(), GraphError> {
        if self.vertices.contains_key(&id) {
            return Err(GraphError::DuplicateVertex(id));
        }
        self.vertices.insert(
            id,
            VertexEntry {
                payload,
                incoming: Vec::new(),
                outgoing: Vec::new(),
            },
        );
        Ok(())
    }

    /// Adds an edge and returns its id.
    pub fn add_edge(
        &mut self,
        source: VertexId,
        target: VertexId,
        weight: f64,
    ) -> Result<EdgeId, GraphError> {
        for endpoint in [source, target] {
            if !self.vertices.contains_key(&endpoint) {
                return Err(GraphError::UnknownVertex(endpoint));
            }
        }
        if source == target {
            return Err(GraphError::SelfLoop(source));
        }
        if !weight.is_finite() || weight < 0.0 {
            return Err(GraphError::InvalidWeight {
                from: source,
                to: target,
                weight,
            });
        }
        if self.pairs.contains_key(&(source, target)) {
            return Err(GraphError::DuplicateEdge {
                from: source,
                to: target,
            });
        }

        let id = EdgeId(self.edges.len());
        self.edges.push(Edge {
            source,
            target,
            weight,
        });
        self.pairs.insert((source, target), id);
        if let Some(entry) = self.vertices.get_mut(&source) {
            entry.outgoing.push(id);
        }
        if let Some(entry) = self.vertices.get_mut(&target) {
            entry.incoming.push(id);
        }
        Ok(id)
    }

    /// Returns `true` if the vertex exists.
    pub fn contains_vertex(&self, id: VertexId) -> bool {
        self.vertices.contains_key(&id)
    }

    /// Payload of a vertex.
    pub fn vertex(&self, id: VertexId) -> Option<&V> {
        self.vertices.get(&id).map(|entry| &entry.payload)
    }

    /// Vertex ids in ascending order.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices.keys().copied()
    }

    /// Vertices with payloads in ascending id order.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &V)> + '_ {
        self.vertices.iter().map(|(&id, entry)| (id, &entry.payload))
    }

    /// Largest vertex id, if any.
    pub fn max_vertex_id(&self) -> Option<VertexId> {
        self.vertices.keys().next_back().copied()
    }

    /// Edge by id.
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.0)
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> + '_ {
        self.edges.iter().enumerate().map(|(i, e)| (EdgeId(i), e))
    }

    /// Edge joining `source` to `target`, if present.
    pub fn find_edge(&self, source: VertexId, target: VertexId) -> Option<EdgeId> {
        self.pairs.get(&(source, target)).copied()
    }

    /// Edges whose target is `v`, in insertion order.
    ///
    /// Empty for unknown vertices.
    pub fn incoming_edges(&self, v: VertexId) -> impl Iterator<Item = (EdgeId, &Edge)> + '_ {
        self.indexed(v, |entry| &entry.incoming)
    }

    /// Edges whose source is `v`, in insertion order.
    ///
    /// Empty for unknown vertices.
    pub fn outgoing_edges(&self, v: VertexId) -> impl Iterator<Item = (EdgeId, &Edge)> + '_ {
        self.indexed(v, |entry| &entry.outgoing)
    }

    fn indexed<'a>(
        &'a self,
        v: VertexId,
        side: fn(&VertexEntry<V>) -> &Vec<EdgeId>,
    ) -> impl Iterator<Item = (EdgeId, &'a Edge)> + 'a {
        self.vertices
            .get(&v)
            .map(|entry| side(entry).as_slice())
            .unwrap_or_default()
            .iter()
            .filter_map(move |&id| self.edges.get(id.0).map(|e| (id, e)))
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of edges.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Replaces a vertex set with one composite vertex.
    ///
    /// `members` maps every vertex of the set to its incoming offset. An edge
    /// `u -> x` entering the set becomes `u -> composite` weighted
    /// `w(u -> x) - offset(x)`, keeping the cheapest one per source. Edges
    /// leaving the set keep their weight, cheapest per target. Ties keep the
    /// edge inserted first. Edges inside the set are dropped, edges outside it
    /// are copied as they are.
    ///
    /// Returns the new graph and, for each of its edges, the edge of `self`
    /// it stands for.
    pub fn contract_set(
        &self,
        members: &BTreeMap<VertexId, f64>,
        composite: VertexId,
        payload: V,
    ) -> Result<(Self, Provenance), GraphError>
    where
        V: Clone,
    {
        if members.is_empty() {
            return Err(GraphError::EmptyContraction);
        }
        if let Some(&missing) = members.keys().find(|m| !self.contains_vertex(**m)) {
            return Err(GraphError::UnknownVertex(missing));
        }
        if self.contains_vertex(composite) && !members.contains_key(&composite) {
            return Err(GraphError::DuplicateVertex(composite));
        }

        let mut contracted = Self::new();
        for (&id, entry) in &self.vertices {
            if !members.contains_key(&id) {
                contracted.add_vertex(id, entry.payload.clone())?;
            }
        }
        contracted.add_vertex(composite, payload)?;

        let mut origins = Vec::new();
        let mut entering: BTreeMap<VertexId, (f64, EdgeId)> = BTreeMap::new();
        let mut leaving: BTreeMap<VertexId, (f64, EdgeId)> = BTreeMap::new();
        for (id, edge) in self.edges() {
            match (members.get(&edge.source), members.get(&edge.target)) {
                (None, None) => {
                    contracted.add_edge(edge.source, edge.target, edge.weight)?;
                    origins.push(id);
                }
                (None, Some(&offset)) => {
                    keep_cheapest(&mut entering, edge.source, edge.weight - offset, id);
                }
                (Some(_), None) => {
                    keep_cheapest(&mut leaving, edge.target, edge.weight, id);
                }
                (Some(_), Some(_)) => {}
            }
        }
        for (source, (weight, origin)) in entering {
            contracted.add_edge(source, composite, weight)?;
            origins.push(origin);
        }
        for (target, (weight, origin)) in leaving {
            contracted.add_edge(composite, target, weight)?;
            origins.push(origin);
        }

        Ok((contracted, Provenance { origins }))
    }
}

fn keep_cheapest(
    best: &mut BTreeMap<VertexId, (f64, EdgeId)>,
    key: VertexId,
    weight: f64,
    edge: EdgeId,
) {
    match best.get(&key) {
        Some(&(current, _)) if current <= weight => {}
        _ => {
            best.insert(key, (weight, edge));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(id: usize) -> VertexId {
        VertexId(id)
    }

    fn triangle() -> WeightedDigraph<()> {
        let mut g = WeightedDigraph::new();
        for i in 0..3 {
            g.add_vertex(v(i), ()).expect("fresh vertex");
        }
        g.add_edge(v(0), v(1), 1.0).expect("edge");
        g.add_edge(v(1), v(2), 2.0).expect("edge");
        g.add_edge(v(2), v(0), 3.0).expect("edge");
        g
    }

    #[test]
    fn test_add_vertex_duplicate() {
        let mut g = triangle();
        assert_eq!(g.add_vertex(v(1), ()), Err(GraphError::DuplicateVertex(v(1))));
    }

    #[test]
    fn test_add_edge_errors() {
        let mut g = triangle();
        assert_eq!(
            g.add_edge(v(0), v(9), 1.0),
            Err(GraphError::UnknownVertex(v(9)))
        );
        assert_eq!(
            g.add_edge(v(0), v(1), 5.0),
            Err(GraphError::DuplicateEdge { from: v(0), to: v(1) })
        );
        assert_eq!(g.add_edge(v(2), v(2), 1.0), Err(GraphError::SelfLoop(v(2))));
        assert!(matches!(
            g.add_edge(v(1), v(0), -1.0),
            Err(GraphError::InvalidWeight { .. })
        ));
        assert!(matches!(
            g.add_edge(v(1), v(0), f64::NAN),
            Err(GraphError::InvalidWeight { .. })
        ));
        assert_eq!(g.num_edges(), 3);
    }

    #[test]
    fn test_incoming_outgoing() {
        let mut g = triangle();
        g.add_edge(v(0), v(2), 4.0).expect("edge");

        let out: Vec<VertexId> = g.outgoing_edges(v(0)).map(|(_, e)| e.target()).collect();
        assert_eq!(out, vec![v(1), v(2)]);

        let inc: Vec<VertexId> = g.incoming_edges(v(2)).map(|(_, e)| e.source()).collect();
        assert_eq!(inc, vec![v(1), v(0)]);

        assert_eq!(g.incoming_edges(v(42)).count(), 0);
    }

    #[test]
    fn test_find_edge_and_lookup() {
        let g = triangle();
        let id = g.find_edge(v(1), v(2)).expect("present");
        assert_eq!(id.index(), 1);
        let edge = g.edge(id).expect("valid id");
        assert_eq!(edge.source(), v(1));
        assert_eq!(edge.target(), v(2));
        assert_eq!(edge.weight(), 2.0);
        assert!(g.find_edge(v(2), v(1)).is_none());
        assert_eq!(g.max_vertex_id(), Some(v(2)));
    }

    #[test]
    fn test_contract_set_reweights_boundaries() {
        // 0 -> 1 (5), 0 -> 2 (3), 1 -> 2 (1), 2 -> 1 (2), 1 -> 3 (4), 2 -> 3 (6), 0 -> 3 (9)
        let mut g: WeightedDigraph<()> = WeightedDigraph::new();
        for i in 0..4 {
            g.add_vertex(v(i), ()).expect("vertex");
        }
        let e01 = g.add_edge(v(0), v(1), 5.0).expect("edge");
        g.add_edge(v(0), v(2), 3.0).expect("edge");
        g.add_edge(v(1), v(2), 1.0).expect("edge");
        g.add_edge(v(2), v(1), 2.0).expect("edge");
        let e13 = g.add_edge(v(1), v(3), 4.0).expect("edge");
        g.add_edge(v(2), v(3), 6.0).expect("edge");
        let e03 = g.add_edge(v(0), v(3), 9.0).expect("edge");

        let members = BTreeMap::from([(v(1), 2.0), (v(2), 1.0)]);
        let (c, provenance) = g.contract_set(&members, v(4), ()).expect("contract");

        assert_eq!(c.vertex_ids().collect::<Vec<_>>(), vec![v(0), v(3), v(4)]);
        assert_eq!(c.num_edges(), 3);
        assert_eq!(provenance.len(), 3);

        // 0 -> 1 reweights to 3, 0 -> 2 to 2: the latter wins
        let enter = c.find_edge(v(0), v(4)).expect("entering edge");
        assert_eq!(c.edge(enter).map(Edge::weight), Some(2.0));
        let origin = provenance.origin(enter).expect("mapped");
        assert_ne!(origin, e01);
        assert_eq!(g.edge(origin).map(Edge::target), Some(v(2)));

        let leave = c.find_edge(v(4), v(3)).expect("leaving edge");
        assert_eq!(c.edge(leave).map(Edge::weight), Some(4.0));
        assert_eq!(provenance.origin(leave), Some(e13));

        let outside = c.find_edge(v(0), v(3)).expect("untouched edge");
        assert_eq!(provenance.origin(outside), Some(e03));
    }

    #[test]
    fn test_contract_set_rejects_bad_input() {
        let g = triangle();
        assert_eq!(
            g.contract_set(&BTreeMap::new(), v(5), ()).map(|_| ()),
            Err(GraphError::EmptyContraction)
        );
        let unknown = BTreeMap::from([(v(7), 0.0)]);
        assert_eq!(
            g.contract_set(&unknown, v(5), ()).map(|_| ()),
            Err(GraphError::UnknownVertex(v(7)))
        );
        let members = BTreeMap::from([(v(1), 0.0)]);
        assert_eq!(
            g.contract_set(&members, v(2), ()).map(|_| ()),
            Err(GraphError::DuplicateVertex(v(2)))
        );
    }
}
