//! Branch extraction.
//!
//! Splits an arborescence into maximal chains of single-child vertices
//! ("branches"), the unit that compression aggregates into one stop.

mod branch;
mod extractor;

pub use branch::{Branch, Branching};
pub use extractor::extract_branches;
