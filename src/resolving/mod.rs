//! Mapping solver answers back to the original instance.
//!
//! A [`Solution`](crate::models::Solution) over a compressed problem visits
//! aggregated service ids. [`resolve_solution`] replaces every id with the
//! customers of its service, in input to output order.

mod resolver;

pub use resolver::{resolve_solution, ResolveError, ResolvedRoute, ResolvedSolution, RouteNode};
