//! Structural graph errors.

use thiserror::Error;

use super::VertexId;

/// Structural errors of [`crate::graph::WeightedDigraph`].
///
/// These signal a construction bug in the caller and are never retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    /// The vertex id is already present.
    #[error("vertex {0} already exists")]
    DuplicateVertex(VertexId),
    /// An endpoint or member vertex is absent.
    #[error("vertex {0} does not exist")]
    UnknownVertex(VertexId),
    /// An edge with the same ordered endpoints already exists.
    #[error("edge {from} -> {to} already exists")]
    DuplicateEdge {
        /// Source vertex.
        from: VertexId,
        /// Target vertex.
        to: VertexId,
    },
    /// Source and target coincide.
    #[error("self-loop on vertex {0} is not allowed")]
    SelfLoop(VertexId),
    /// The weight is negative, infinite or NaN.
    #[error("edge {from} -> {to} has invalid weight {weight}")]
    InvalidWeight {
        /// Source vertex.
        from: VertexId,
        /// Target vertex.
        to: VertexId,
        /// Rejected weight.
        weight: f64,
    },
    /// A contraction was requested for an empty vertex set.
    #[error("cannot contract an empty vertex set")]
    EmptyContraction,
}
