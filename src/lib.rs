//! # u-compress
//!
//! VRP preprocessing by arborescence-based compression: chains of customers
//! that a good route would visit back to back anyway are collapsed into
//! single aggregated stops before an external routing solver runs.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Customer, Vehicle, VrpProblem, Route, Solution)
//! - [`distance`] — Dense distance matrix and Euclidean materialization
//! - [`graph`] — Weighted directed graph with set contraction
//! - [`arborescence`] — Edmonds / Chu-Liu minimum spanning arborescence
//! - [`branching`] — Maximal chain extraction from an arborescence
//! - [`compression`] — Aggregated services and the reduced distance matrix
//! - [`resolving`] — Expanding solver routes back to original customers
//!
//! ## Example
//!
//! ```
//! use u_compress::compression::compress;
//! use u_compress::models::{Customer, Route, Solution, Vehicle, VrpProblem};
//! use u_compress::resolving::resolve_solution;
//!
//! let problem = VrpProblem::builder("demo")
//!     .depot(Customer::depot(0.0, 0.0))
//!     .customer(Customer::new(1, 1.0, 0.0, 3))
//!     .customer(Customer::new(2, 2.0, 0.0, 4))
//!     .customer(Customer::new(3, 0.0, -5.0, 2))
//!     .vehicle(Vehicle::new(0, 20))
//!     .build()?
//!     .materialize_distances();
//!
//! let compressed = compress(&problem)?;
//! assert_eq!(compressed.num_services(), 2);
//!
//! // an external solver answers over service ids
//! let mut solution = Solution::new();
//! solution.add_route(Route::with_visits(0, vec![1, 2]));
//!
//! let resolved = resolve_solution(&compressed, &solution)?;
//! assert_eq!(resolved.routes()[0].customer_ids(), vec![1, 2, 3]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod arborescence;
pub mod branching;
pub mod compression;
pub mod distance;
pub mod graph;
pub mod models;
pub mod resolving;
