//! Solution resolution over aggregated services.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::compression::CompressedProblem;
use crate::models::{Customer, Solution};

/// Errors of [`resolve_solution`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The solution refers to an id the compressed problem does not have.
    #[error("unknown service id {0}")]
    UnknownService(usize),
    /// A service appears more than once in the solution.
    #[error("service {0} is visited more than once")]
    DuplicateService(usize),
}

/// One stop of a resolved route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteNode {
    /// Original customer id.
    pub customer_id: usize,
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl From<&Customer> for RouteNode {
    fn from(c: &Customer) -> Self {
        Self {
            customer_id: c.id(),
            x: c.x(),
            y: c.y(),
        }
    }
}

/// A route over original customers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedRoute {
    vehicle_id: usize,
    stops: Vec<RouteNode>,
}

impl ResolvedRoute {
    /// Vehicle serving this route.
    pub fn vehicle_id(&self) -> usize {
        self.vehicle_id
    }

    /// Stops in visiting order, depot excluded.
    pub fn stops(&self) -> &[RouteNode] {
        &self.stops
    }

    /// Customer ids in visiting order.
    pub fn customer_ids(&self) -> Vec<usize> {
        self.stops.iter().map(|n| n.customer_id).collect()
    }

    /// Number of stops.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Returns `true` if the route has no stops.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}

/// A solution expressed over the original instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedSolution {
    routes: Vec<ResolvedRoute>,
    unassigned: Vec<RouteNode>,
    total_cost: f64,
}

impl ResolvedSolution {
    /// Resolved routes, in the solver's order.
    pub fn routes(&self) -> &[ResolvedRoute] {
        &self.routes
    }

    /// Customers of services left unassigned by the solver.
    pub fn unassigned(&self) -> &[RouteNode] {
        &self.unassigned
    }

    /// Cost reported by the solver.
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// Number of customers on some route.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(ResolvedRoute::len).sum()
    }
}

/// Expands `solution`, given over the service ids of `compressed`, into
/// routes over original customers.
///
/// Depot ids (0) inside routes are skipped. Unassigned service ids expand
/// into their customers as well.
///
/// # Errors
///
/// [`ResolveError::UnknownService`] for an id that is neither the depot nor
/// a service, [`ResolveError::DuplicateService`] when a service is seen twice
/// across routes and the unassigned list.
///
/// # Examples
///
/// ```
/// use u_compress::compression::compress;
/// use u_compress::models::{Customer, Route, Solution, Vehicle, VrpProblem};
/// use u_compress::resolving::resolve_solution;
///
/// let problem = VrpProblem::builder("pair")
///     .depot(Customer::depot(0.0, 0.0))
///     .customer(Customer::new(1, 1.0, 0.0, 1))
///     .customer(Customer::new(2, 2.0, 0.0, 1))
///     .vehicle(Vehicle::new(0, 10))
///     .build()
///     .unwrap()
///     .materialize_distances();
/// let compressed = compress(&problem).unwrap();
///
/// let mut solution = Solution::new();
/// solution.add_route(Route::with_visits(0, vec![1]));
/// let resolved = resolve_solution(&compressed, &solution).unwrap();
/// assert_eq!(resolved.routes()[0].customer_ids(), vec![1, 2]);
/// ```
pub fn resolve_solution(
    compressed: &CompressedProblem,
    solution: &Solution,
) -> Result<ResolvedSolution, ResolveError> {
    let mut seen = HashSet::new();
    let mut expand = |id: usize, out: &mut Vec<RouteNode>| -> Result<(), ResolveError> {
        if id == 0 {
            return Ok(());
        }
        let service = compressed
            .service(id)
            .ok_or(ResolveError::UnknownService(id))?;
        if !seen.insert(id) {
            return Err(ResolveError::DuplicateService(id));
        }
        for &v in service.vertices() {
            let customer = compressed
                .original_customers()
                .get(v)
                .ok_or(ResolveError::UnknownService(id))?;
            out.push(RouteNode::from(customer));
        }
        Ok(())
    };

    let mut routes = Vec::with_capacity(solution.num_routes());
    for route in solution.routes() {
        let mut stops = Vec::new();
        for &id in route.visits() {
            expand(id, &mut stops)?;
        }
        routes.push(ResolvedRoute {
            vehicle_id: route.vehicle_id(),
            stops,
        });
    }
    let mut unassigned = Vec::new();
    for &id in solution.unassigned() {
        expand(id, &mut unassigned)?;
    }

    Ok(ResolvedSolution {
        routes,
        unassigned,
        total_cost: solution.total_cost(),
    })
}
