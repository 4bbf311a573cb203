//! VRP problem instance and its validating builder.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Customer, Vehicle};
use crate::distance::DistanceMatrix;

/// How travel distances of a problem are defined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Metric {
    /// Precomputed distances, indexed by customer id.
    Explicit(DistanceMatrix),
    /// Euclidean distances over customer coordinates, not yet computed.
    Euclidean,
}

/// Errors raised while assembling a [`VrpProblem`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProblemError {
    /// Exactly one depot is supported.
    #[error("exactly one depot is supported, got {0}")]
    UnsupportedDepotCount(usize),
    /// The depot carries demand.
    #[error("depot cannot have demand (got {0})")]
    DepotDemand(i32),
    /// A customer id does not match its location index.
    #[error("customer at location {expected} has id {found}")]
    NonContiguousIds {
        /// Location index the customer occupies.
        expected: usize,
        /// Id the customer carries.
        found: usize,
    },
    /// The explicit distance matrix does not cover every location.
    #[error("distance matrix has size {found}, expected {expected}")]
    DimensionMismatch {
        /// Number of locations (depot included).
        expected: usize,
        /// Size of the supplied matrix.
        found: usize,
    },
    /// The explicit distance matrix does not hold `size * size` entries.
    #[error("distance matrix of size {size} holds {entries} entries")]
    MalformedMatrix {
        /// Declared matrix size.
        size: usize,
        /// Number of stored entries.
        entries: usize,
    },
    /// The fleet is empty.
    #[error("at least one vehicle is required")]
    NoVehicles,
}

/// A single-depot VRP instance.
///
/// Location 0 is the depot, locations `1..=n` are the customers, and every
/// customer's id equals its location index. Instances are only created
/// through [`VrpProblemBuilder`], which enforces these rules.
///
/// # Examples
///
/// ```
/// use u_compress::models::{Customer, Metric, Vehicle, VrpProblem};
///
/// let problem = VrpProblem::builder("line")
///     .depot(Customer::depot(0.0, 0.0))
///     .customer(Customer::new(1, 1.0, 0.0, 10))
///     .customer(Customer::new(2, 2.0, 0.0, 5))
///     .vehicle(Vehicle::new(0, 30))
///     .build()
///     .expect("valid problem");
/// assert_eq!(problem.num_customers(), 2);
/// assert_eq!(problem.metric(), &Metric::Euclidean);
///
/// let explicit = problem.materialize_distances();
/// assert!((explicit.distance(0, 2).expect("explicit") - 2.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VrpProblem {
    name: String,
    customers: Vec<Customer>,
    vehicles: Vec<Vehicle>,
    metric: Metric,
}

impl VrpProblem {
    /// Starts building a problem with the given name.
    pub fn builder(name: impl Into<String>) -> VrpProblemBuilder {
        VrpProblemBuilder::new(name)
    }

    /// Instance name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The depot (location 0).
    pub fn depot(&self) -> &Customer {
        // the builder guarantees a depot at index 0
        &self.customers[0]
    }

    /// All locations (index 0 = depot, 1..=N = customers).
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// Customers without the depot.
    pub fn clients(&self) -> &[Customer] {
        &self.customers[1..]
    }

    /// Number of customers (excluding depot).
    pub fn num_customers(&self) -> usize {
        self.customers.len() - 1
    }

    /// Number of locations (depot included).
    pub fn dimension(&self) -> usize {
        self.customers.len()
    }

    /// The fleet.
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// The distance definition.
    pub fn metric(&self) -> &Metric {
        &self.metric
    }

    /// The explicit distance matrix, if distances are precomputed.
    pub fn distances(&self) -> Option<&DistanceMatrix> {
        match &self.metric {
            Metric::Explicit(matrix) => Some(matrix),
            Metric::Euclidean => None,
        }
    }

    /// Explicit distance between two locations.
    ///
    /// Returns `None` for Euclidean problems or out-of-range ids.
    pub fn distance(&self, from: usize, to: usize) -> Option<f64> {
        self.distances().and_then(|m| m.try_get(from, to))
    }

    /// Sum of all customer demands.
    pub fn total_demand(&self) -> i32 {
        self.clients().iter().map(Customer::demand).sum()
    }

    /// Replaces a Euclidean metric with the full precomputed matrix.
    ///
    /// Explicit problems are returned unchanged.
    pub fn materialize_distances(mut self) -> Self {
        if self.metric == Metric::Euclidean {
            self.metric = Metric::Explicit(DistanceMatrix::from_customers(&self.customers));
        }
        self
    }
}

/// Step-by-step constructor for [`VrpProblem`].
///
/// Depots are collected rather than overwritten so that multi-depot input
/// is rejected explicitly by [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct VrpProblemBuilder {
    name: String,
    depots: Vec<Customer>,
    clients: Vec<Customer>,
    vehicles: Vec<Vehicle>,
    metric: Metric,
}

impl VrpProblemBuilder {
    /// Creates an empty builder (Euclidean metric by default).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            depots: Vec::new(),
            clients: Vec::new(),
            vehicles: Vec::new(),
            metric: Metric::Euclidean,
        }
    }

    /// Adds a depot.
    pub fn depot(mut self, depot: Customer) -> Self {
        self.depots.push(depot);
        self
    }

    /// Adds a customer.
    pub fn customer(mut self, customer: Customer) -> Self {
        self.clients.push(customer);
        self
    }

    /// Adds several customers in order.
    pub fn customers(mut self, customers: impl IntoIterator<Item = Customer>) -> Self {
        self.clients.extend(customers);
        self
    }

    /// Adds a vehicle.
    pub fn vehicle(mut self, vehicle: Vehicle) -> Self {
        self.vehicles.push(vehicle);
        self
    }

    /// Uses a precomputed distance matrix.
    pub fn explicit_distances(mut self, matrix: DistanceMatrix) -> Self {
        self.metric = Metric::Explicit(matrix);
        self
    }

    /// Uses Euclidean distances over coordinates.
    pub fn euclidean(mut self) -> Self {
        self.metric = Metric::Euclidean;
        self
    }

    /// Validates and assembles the problem.
    pub fn build(self) -> Result<VrpProblem, ProblemError> {
        if self.depots.len() != 1 {
            return Err(ProblemError::UnsupportedDepotCount(self.depots.len()));
        }
        let mut customers = self.depots;
        if customers[0].demand() != 0 {
            return Err(ProblemError::DepotDemand(customers[0].demand()));
        }
        customers.extend(self.clients);

        if let Some((expected, c)) = customers
            .iter()
            .enumerate()
            .find(|(idx, c)| c.id() != *idx)
        {
            return Err(ProblemError::NonContiguousIds {
                expected,
                found: c.id(),
            });
        }
        if self.vehicles.is_empty() {
            return Err(ProblemError::NoVehicles);
        }
        if let Metric::Explicit(matrix) = &self.metric {
            if !matrix.is_well_formed() {
                return Err(ProblemError::MalformedMatrix {
                    size: matrix.size(),
                    entries: matrix.num_entries(),
                });
            }
            if matrix.size() != customers.len() {
                return Err(ProblemError::DimensionMismatch {
                    expected: customers.len(),
                    found: matrix.size(),
                });
            }
        }

        Ok(VrpProblem {
            name: self.name,
            customers,
            vehicles: self.vehicles,
            metric: self.metric,
        })
    }
}
