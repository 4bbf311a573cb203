//! Arborescence search errors.

use thiserror::Error;

use crate::graph::{EdgeId, GraphError, VertexId};

/// Errors of the minimum spanning arborescence search.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArborescenceError {
    /// The input graph is malformed or the root is absent.
    #[error(transparent)]
    Graph(#[from] GraphError),
    /// Some vertex cannot be reached from the root.
    #[error("vertex {0} is not reachable from the root")]
    Unreachable(VertexId),
    /// More than one edge of the contracted solution enters the cycle.
    #[error("more than one edge enters contracted cycle {composite}")]
    CycleAmbiguity {
        /// Composite vertex of the cycle.
        composite: VertexId,
    },
    /// No edge of the contracted solution enters the cycle.
    #[error("no edge enters contracted cycle {composite}")]
    MissingCycleEntry {
        /// Composite vertex of the cycle.
        composite: VertexId,
    },
    /// A cycle member has no selected incoming edge.
    #[error("cycle vertex {0} has no selected incoming edge")]
    MissingSelection(VertexId),
    /// A contracted-level edge has no recorded parent edge.
    #[error("contracted edge #{} has no provenance", .0.index())]
    UnmappedEdge(EdgeId),
    /// The final edge set fails the arborescence postcondition.
    #[error("invalid arborescence: {0}")]
    InvalidArborescence(String),
}

impl ArborescenceError {
    /// Returns `true` for failures that indicate a defect in the algorithm
    /// rather than in its input.
    pub fn is_invariant_violation(&self) -> bool {
        !matches!(self, Self::Graph(_) | Self::Unreachable(_))
    }
}
