//! Minimum spanning arborescences.
//!
//! - [`minimum_spanning_arborescence`] — Edmonds / Chu-Liu with recursive
//!   cycle contraction
//! - [`Arborescence`] — the resulting rooted tree with parent/child lookups
//!   and a postcondition check

mod contraction;
mod error;
mod solver;
mod tree;

pub use error::ArborescenceError;
pub use solver::minimum_spanning_arborescence;
pub use tree::Arborescence;
