//! Aggregated services.

use serde::{Deserialize, Serialize};

use super::ServiceCost;
use crate::branching::Branch;
use crate::distance::DistanceMatrix;
use crate::models::Customer;

/// A branch collapsed into one stop of the compressed problem.
///
/// Visiting the service means entering at [`input_vertex`](Self::input_vertex),
/// serving the whole chain in order, and leaving from
/// [`output_vertex`](Self::output_vertex). Services are immutable once built.
///
/// Deserialization rejects an empty vertex list and endpoints that are not
/// its first and last vertex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ServiceRepr")]
pub struct AggregatedService {
    id: usize,
    vertices: Vec<usize>,
    input_vertex: usize,
    output_vertex: usize,
    internal_demand: i32,
    internal_cost: f64,
    internal_distance: f64,
    internal_backward_distance: f64,
}

#[derive(Deserialize)]
struct ServiceRepr {
    id: usize,
    vertices: Vec<usize>,
    input_vertex: usize,
    output_vertex: usize,
    internal_demand: i32,
    internal_cost: f64,
    internal_distance: f64,
    internal_backward_distance: f64,
}

impl TryFrom<ServiceRepr> for AggregatedService {
    type Error = String;

    fn try_from(repr: ServiceRepr) -> Result<Self, Self::Error> {
        let (Some(&first), Some(&last)) = (repr.vertices.first(), repr.vertices.last()) else {
            return Err(format!("service {} has no vertices", repr.id));
        };
        if (first, last) != (repr.input_vertex, repr.output_vertex) {
            return Err(format!(
                "service {} must enter at {first} and leave at {last}",
                repr.id
            ));
        }
        Ok(Self {
            id: repr.id,
            vertices: repr.vertices,
            input_vertex: repr.input_vertex,
            output_vertex: repr.output_vertex,
            internal_demand: repr.internal_demand,
            internal_cost: repr.internal_cost,
            internal_distance: repr.internal_distance,
            internal_backward_distance: repr.internal_backward_distance,
        })
    }
}

impl AggregatedService {
    /// Aggregates `branch` into the service `id`; `None` for an empty branch.
    ///
    /// Branch vertices are customer ids of `customers` and indices of
    /// `distances`.
    pub(crate) fn from_branch(
        id: usize,
        branch: &Branch,
        customers: &[Customer],
        distances: &DistanceMatrix,
        cost: ServiceCost,
    ) -> Option<Self> {
        let input_vertex = branch.start()?.0;
        let output_vertex = branch.end()?.0;
        let vertices: Vec<usize> = branch.vertices().iter().map(|v| v.0).collect();
        let internal_demand = vertices
            .iter()
            .filter_map(|&v| customers.get(v))
            .map(Customer::demand)
            .sum();
        let internal_distance = vertices
            .windows(2)
            .map(|w| distances.get(w[0], w[1]))
            .sum();
        let internal_backward_distance = vertices
            .windows(2)
            .map(|w| distances.get(w[1], w[0]))
            .sum();
        let internal_cost = match cost {
            ServiceCost::Demand => f64::from(internal_demand),
            ServiceCost::Traversal => internal_distance,
        };

        Some(Self {
            id,
            vertices,
            input_vertex,
            output_vertex,
            internal_demand,
            internal_cost,
            internal_distance,
            internal_backward_distance,
        })
    }

    /// Service id in the compressed problem (depot = 0, services from 1).
    pub fn id(&self) -> usize {
        self.id
    }

    /// Original customer ids in visiting order.
    pub fn vertices(&self) -> &[usize] {
        &self.vertices
    }

    /// Customer where the service is entered.
    pub fn input_vertex(&self) -> usize {
        self.input_vertex
    }

    /// Customer where the service is left.
    pub fn output_vertex(&self) -> usize {
        self.output_vertex
    }

    /// Total demand of the chain.
    pub fn internal_demand(&self) -> i32 {
        self.internal_demand
    }

    /// Cost charged for absorbing the chain.
    pub fn internal_cost(&self) -> f64 {
        self.internal_cost
    }

    /// Distance along the chain, input to output.
    pub fn internal_distance(&self) -> f64 {
        self.internal_distance
    }

    /// Distance along the chain, output back to input.
    pub fn internal_backward_distance(&self) -> f64 {
        self.internal_backward_distance
    }

    /// Number of original customers in the service.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Always `false`: a service holds at least one customer.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns `true` if `customer_id` belongs to this service.
    pub fn contains(&self, customer_id: usize) -> bool {
        self.vertices.contains(&customer_id)
    }
}
