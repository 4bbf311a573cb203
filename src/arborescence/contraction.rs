//! Cycle contraction and expansion for one level of the Edmonds recursion.

use std::collections::{BTreeMap, BTreeSet};

use log::{debug, error};

use super::ArborescenceError;
use crate::graph::{Edge, EdgeId, Provenance, VertexId, WeightedDigraph};

/// Original vertices a level vertex stands for.
///
/// Members are sorted and disjoint across the vertices of a level; together
/// they cover the original vertex set exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Composite {
    members: Vec<VertexId>,
}

impl Composite {
    pub(crate) fn single(v: VertexId) -> Self {
        Self { members: vec![v] }
    }

    fn merged(members: BTreeSet<VertexId>) -> Self {
        Self {
            members: members.into_iter().collect(),
        }
    }

    pub(crate) fn members(&self) -> &[VertexId] {
        &self.members
    }

    /// Smallest original member.
    pub(crate) fn representative(&self) -> Option<VertexId> {
        self.members.first().copied()
    }
}

/// Cheapest incoming edge chosen for every non-root vertex (target -> edge).
pub(crate) type Selection = BTreeMap<VertexId, EdgeId>;

/// A cycle of the selection contracted into one composite vertex.
///
/// Owns the contracted graph and its provenance; both are dropped by
/// [`expand`](Self::expand).
#[derive(Debug)]
pub(crate) struct CycleContraction {
    graph: WeightedDigraph<Composite>,
    provenance: Provenance,
    composite: VertexId,
    cycle: Vec<VertexId>,
}

impl CycleContraction {
    /// Contracts `cycle` of `parent`.
    ///
    /// Edges entering the cycle at `x` are reduced by the weight of `x`'s
    /// selected edge, so that choosing one of them in the contracted graph
    /// prices exactly the swap of `x`'s cycle edge for it.
    pub(crate) fn contract(
        parent: &WeightedDigraph<Composite>,
        cycle: Vec<VertexId>,
        selection: &Selection,
    ) -> Result<Self, ArborescenceError> {
        let mut offsets = BTreeMap::new();
        let mut members = BTreeSet::new();
        for &x in &cycle {
            let weight = selection
                .get(&x)
                .and_then(|&id| parent.edge(id))
                .map(Edge::weight)
                .ok_or(ArborescenceError::MissingSelection(x))?;
            offsets.insert(x, weight);
            if let Some(composite) = parent.vertex(x) {
                members.extend(composite.members().iter().copied());
            }
        }

        let composite = parent
            .max_vertex_id()
            .map_or(VertexId(0), |VertexId(max)| VertexId(max + 1));
        let (graph, provenance) =
            parent.contract_set(&offsets, composite, Composite::merged(members))?;
        debug!(
            "contracted {}-cycle into vertex {composite}: {} -> {} vertices",
            cycle.len(),
            parent.num_vertices(),
            graph.num_vertices()
        );

        Ok(Self {
            graph,
            provenance,
            composite,
            cycle,
        })
    }

    /// The contracted graph.
    pub(crate) fn graph(&self) -> &WeightedDigraph<Composite> {
        &self.graph
    }

    /// Composite vertex standing for the cycle.
    pub(crate) fn composite(&self) -> VertexId {
        self.composite
    }

    /// Maps an arborescence of the contracted graph back to `parent`.
    ///
    /// Every contracted edge is replaced by its origin. The single edge
    /// entering the composite fixes the cycle's entry vertex; every selected
    /// cycle edge except the one into that vertex is added, reopening the
    /// cycle into a path.
    pub(crate) fn expand(
        self,
        parent: &WeightedDigraph<Composite>,
        selection: &Selection,
        contracted: &[EdgeId],
    ) -> Result<Vec<EdgeId>, ArborescenceError> {
        let mut edges = Vec::with_capacity(contracted.len() + self.cycle.len());
        let mut entry = None;
        for &id in contracted {
            let origin = self
                .provenance
                .origin(id)
                .ok_or(ArborescenceError::UnmappedEdge(id))?;
            let enters_cycle = self
                .graph
                .edge(id)
                .is_some_and(|e| e.target() == self.composite);
            if enters_cycle {
                if entry.is_some() {
                    error!(
                        "contraction invariant broken: several edges enter cycle vertex {}",
                        self.composite
                    );
                    return Err(ArborescenceError::CycleAmbiguity {
                        composite: self.composite,
                    });
                }
                entry = parent.edge(origin).map(Edge::target);
            }
            edges.push(origin);
        }

        let Some(entry) = entry else {
            error!(
                "contraction invariant broken: no edge enters cycle vertex {}",
                self.composite
            );
            return Err(ArborescenceError::MissingCycleEntry {
                composite: self.composite,
            });
        };
        for &x in self.cycle.iter().filter(|&&x| x != entry) {
            let id = selection
                .get(&x)
                .copied()
                .ok_or(ArborescenceError::MissingSelection(x))?;
            edges.push(id);
        }
        edges.sort_unstable();
        Ok(edges)
    }
}
