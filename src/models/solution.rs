//! Solution type returned by the external solver.

use serde::{Deserialize, Serialize};

use super::Route;

/// A complete answer of the external solver.
///
/// Contains a set of routes and optionally unassigned stops.
///
/// # Examples
///
/// ```
/// use u_compress::models::{Solution, Route};
///
/// let mut sol = Solution::new();
/// sol.add_route(Route::with_visits(0, vec![1, 2]));
/// assert_eq!(sol.num_routes(), 1);
/// assert_eq!(sol.num_served(), 2);
/// assert_eq!(sol.num_unassigned(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    routes: Vec<Route>,
    unassigned: Vec<usize>,
    total_cost: f64,
}

impl Solution {
    /// Creates an empty solution.
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            unassigned: Vec::new(),
            total_cost: 0.0,
        }
    }

    /// Adds a route to this solution.
    pub fn add_route(&mut self, route: Route) {
        self.routes.push(route);
    }

    /// Marks a stop as unassigned.
    pub fn add_unassigned(&mut self, stop_id: usize) {
        self.unassigned.push(stop_id);
    }

    /// Returns the routes in this solution.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Returns the number of routes (vehicles used).
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Returns the IDs of unassigned stops.
    pub fn unassigned(&self) -> &[usize] {
        &self.unassigned
    }

    /// Returns the number of unassigned stops.
    pub fn num_unassigned(&self) -> usize {
        self.unassigned.len()
    }

    /// Returns the total cost reported by the solver.
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// Sets the total cost.
    pub fn set_total_cost(&mut self, cost: f64) {
        self.total_cost = cost;
    }

    /// Total number of stops served (across all routes).
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(|r| r.len()).sum()
    }
}

impl Default for Solution {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solution_empty() {
        let sol = Solution::new();
        assert_eq!(sol.num_routes(), 0);
        assert_eq!(sol.num_unassigned(), 0);
        assert_eq!(sol.total_cost(), 0.0);
        assert_eq!(sol.num_served(), 0);
    }

    #[test]
    fn test_solution_with_routes() {
        let mut sol = Solution::new();
        sol.add_route(Route::with_visits(0, vec![1]));
        sol.add_route(Route::with_visits(1, vec![2, 3]));
        sol.add_unassigned(4);
        sol.set_total_cost(130.0);

        assert_eq!(sol.num_routes(), 2);
        assert_eq!(sol.num_served(), 3);
        assert_eq!(sol.unassigned(), &[4]);
        assert!((sol.total_cost() - 130.0).abs() < 1e-10);
    }

    #[test]
    fn test_solution_default() {
        let sol = Solution::default();
        assert_eq!(sol.num_routes(), 0);
    }
}
