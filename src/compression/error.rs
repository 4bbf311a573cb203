//! Compression errors and their classification.

use thiserror::Error;

use crate::arborescence::ArborescenceError;
use crate::graph::GraphError;

/// Errors of [`ProblemCompressor::convert`](super::ProblemCompressor::convert).
///
/// Every error aborts the whole conversion; no partial result is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompressionError {
    /// Distances are not precomputed.
    ///
    /// Recoverable: materialize the matrix with
    /// [`VrpProblem::materialize_distances`](crate::models::VrpProblem::materialize_distances)
    /// and retry.
    #[error("compression requires an explicit distance matrix")]
    InvalidMetric,
    /// The problem graph could not be built.
    #[error(transparent)]
    Graph(#[from] GraphError),
    /// The arborescence search failed.
    #[error(transparent)]
    Arborescence(#[from] ArborescenceError),
    /// Branch extraction yielded a branch without vertices.
    #[error("service {service} would be built from an empty branch")]
    EmptyBranch {
        /// Id the service would have had.
        service: usize,
    },
}

/// Coarse classification of a [`CompressionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCategory {
    /// Duplicate or unknown vertices/edges, invalid weights.
    Structural,
    /// The depot cannot reach some customer.
    Reachability,
    /// An internal invariant of the algorithm was broken.
    InvariantViolation,
    /// The input violates a precondition that the caller can fix.
    Precondition,
}

impl CompressionError {
    /// Classifies this error.
    pub fn category(&self) -> FailureCategory {
        match self {
            Self::InvalidMetric => FailureCategory::Precondition,
            Self::Graph(_) | Self::Arborescence(ArborescenceError::Graph(_)) => {
                FailureCategory::Structural
            }
            Self::Arborescence(ArborescenceError::Unreachable(_)) => FailureCategory::Reachability,
            Self::Arborescence(_) | Self::EmptyBranch { .. } => {
                FailureCategory::InvariantViolation
            }
        }
    }
}
