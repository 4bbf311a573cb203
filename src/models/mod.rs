//! Domain model types for the compression pipeline.
//!
//! Provides customers with demands and coordinates, the vehicle fleet, the
//! validated single-depot problem instance, and the route/solution types an
//! external solver hands back.

mod customer;
mod problem;
mod route;
mod solution;
mod vehicle;

pub use customer::Customer;
pub use problem::{Metric, ProblemError, VrpProblem, VrpProblemBuilder};
pub use route::Route;
pub use solution::Solution;
pub use vehicle::Vehicle;
