//! Directed weighted graphs.
//!
//! [`WeightedDigraph`] is the substrate every stage of the compression runs
//! on: problem graphs, contraction levels and arborescence checks.

mod digraph;
mod error;

pub use digraph::{Edge, EdgeId, Provenance, VertexId, WeightedDigraph};
pub use error::GraphError;
