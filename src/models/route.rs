//! Route type returned by the external solver.

use serde::{Deserialize, Serialize};

/// An ordered sequence of stops assigned to a single vehicle.
///
/// A route starts and ends at the depot, which is not stored in `visits`.
/// Over a compressed problem the stops are aggregated service ids; a leading
/// or trailing depot id (0) is tolerated and skipped on resolution.
///
/// # Examples
///
/// ```
/// use u_compress::models::Route;
///
/// let mut route = Route::new(0);
/// route.push_visit(2);
/// route.push_visit(1);
/// assert_eq!(route.len(), 2);
/// assert_eq!(route.visits(), &[2, 1]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    vehicle_id: usize,
    visits: Vec<usize>,
}

impl Route {
    /// Creates an empty route for the given vehicle.
    pub fn new(vehicle_id: usize) -> Self {
        Self {
            vehicle_id,
            visits: Vec::new(),
        }
    }

    /// Creates a route from an existing visit sequence.
    pub fn with_visits(vehicle_id: usize, visits: Vec<usize>) -> Self {
        Self { vehicle_id, visits }
    }

    /// Appends a stop to the end of this route.
    pub fn push_visit(&mut self, stop_id: usize) {
        self.visits.push(stop_id);
    }

    /// Returns the vehicle assigned to this route.
    pub fn vehicle_id(&self) -> usize {
        self.vehicle_id
    }

    /// Returns the ordered stop ids.
    pub fn visits(&self) -> &[usize] {
        &self.visits
    }

    /// Returns the number of stops (excluding depot).
    pub fn len(&self) -> usize {
        self.visits.len()
    }

    /// Returns `true` if this route has no stops.
    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_empty() {
        let r = Route::new(0);
        assert!(r.is_empty());
        assert_eq!(r.len(), 0);
        assert_eq!(r.vehicle_id(), 0);
    }

    #[test]
    fn test_route_with_visits() {
        let r = Route::with_visits(4, vec![3, 1, 2]);
        assert_eq!(r.vehicle_id(), 4);
        assert_eq!(r.visits(), &[3, 1, 2]);
        assert!(!r.is_empty());
    }
}
