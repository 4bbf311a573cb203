//! VRP instance compression.
//!
//! The problem graph (one vertex per location, one edge per ordered pair)
//! is reduced to its minimum spanning arborescence rooted at the depot. Each
//! maximal chain of that tree becomes one aggregated service, and every
//! branch point becomes a service of its own. The reduced matrix charges
//! the service cost on arrival:
//!
//! ```text
//! d'(A, B)     = d(A.out, B.in) + B.cost
//! d'(depot, B) = d(depot, B.in) + B.cost
//! d'(A, depot) = d(A.out, depot)
//! ```

use log::{debug, error};
use serde::{Deserialize, Serialize};

use super::{AggregatedService, CompressionConfig, CompressionError};
use crate::arborescence::minimum_spanning_arborescence;
use crate::branching::{extract_branches, Branch};
use crate::distance::DistanceMatrix;
use crate::graph::{VertexId, WeightedDigraph};
use crate::models::{Customer, Vehicle, VrpProblem};

/// A reduced VRP instance plus what is needed to map its solutions back.
///
/// Index 0 of [`distances`](Self::distances) is the depot and index `i` is
/// the service with id `i`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompressedProblem {
    services: Vec<AggregatedService>,
    distances: DistanceMatrix,
    depot: Customer,
    vehicles: Vec<Vehicle>,
    original_customers: Vec<Customer>,
    arborescence_weight: f64,
}

impl CompressedProblem {
    /// Services in id order.
    pub fn services(&self) -> &[AggregatedService] {
        &self.services
    }

    /// The service with the given id, or `None` for the depot or an unknown id.
    pub fn service(&self, id: usize) -> Option<&AggregatedService> {
        id.checked_sub(1).and_then(|idx| self.services.get(idx))
    }

    /// Number of services.
    pub fn num_services(&self) -> usize {
        self.services.len()
    }

    /// The reduced distance matrix.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Reduced distance between two stops (0 = depot).
    pub fn distance(&self, from: usize, to: usize) -> Option<f64> {
        self.distances.try_get(from, to)
    }

    /// The depot of the original instance.
    pub fn depot(&self) -> &Customer {
        &self.depot
    }

    /// The fleet, unchanged.
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Locations of the original instance, indexed by customer id.
    pub fn original_customers(&self) -> &[Customer] {
        &self.original_customers
    }

    /// Total weight of the arborescence the services were cut from.
    pub fn arborescence_weight(&self) -> f64 {
        self.arborescence_weight
    }

    /// Sum of all service demands.
    pub fn total_demand(&self) -> i32 {
        self.services
            .iter()
            .map(AggregatedService::internal_demand)
            .sum()
    }
}

/// Turns VRP instances into [`CompressedProblem`]s.
///
/// # Examples
///
/// ```
/// use u_compress::compression::{CompressionConfig, ProblemCompressor};
/// use u_compress::models::{Customer, Vehicle, VrpProblem};
///
/// // depot, then three customers on a line
/// let problem = VrpProblem::builder("line")
///     .depot(Customer::depot(0.0, 0.0))
///     .customer(Customer::new(1, 1.0, 0.0, 2))
///     .customer(Customer::new(2, 2.0, 0.0, 3))
///     .customer(Customer::new(3, 3.0, 0.0, 4))
///     .vehicle(Vehicle::new(0, 20))
///     .build()
///     .expect("valid problem")
///     .materialize_distances();
///
/// let compressed = ProblemCompressor::new(CompressionConfig::default())
///     .convert(&problem)
///     .expect("compressible");
/// assert_eq!(compressed.num_services(), 1);
/// assert_eq!(compressed.services()[0].vertices(), &[1, 2, 3]);
/// assert!((compressed.distance(0, 1).unwrap() - 10.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ProblemCompressor {
    config: CompressionConfig,
}

impl ProblemCompressor {
    /// Creates a compressor with the given configuration.
    pub fn new(config: CompressionConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &CompressionConfig {
        &self.config
    }

    /// Compresses `problem`.
    ///
    /// # Errors
    ///
    /// - [`CompressionError::InvalidMetric`] unless distances are explicit.
    /// - [`CompressionError::Graph`] for distances the graph rejects
    ///   (negative or non-finite).
    /// - [`CompressionError::Arborescence`] if the tree cannot be built or
    ///   fails verification.
    /// - [`CompressionError::EmptyBranch`] if branch extraction breaks its
    ///   non-empty invariant.
    pub fn convert(&self, problem: &VrpProblem) -> Result<CompressedProblem, CompressionError> {
        let distances = problem.distances().ok_or(CompressionError::InvalidMetric)?;
        let customers = problem.customers();
        let depot = problem.depot();

        let graph = problem_graph(customers, distances)?;
        let arborescence = minimum_spanning_arborescence(&graph, VertexId(depot.id()))?;
        if self.config.verify {
            arborescence.verify_against(&graph)?;
        }

        let branching = extract_branches(&arborescence);
        let singles: Vec<Branch> = branching
            .branch_points
            .iter()
            .map(|&v| Branch::single(v))
            .collect();
        let services = branching
            .branches
            .iter()
            .chain(&singles)
            .enumerate()
            .map(|(idx, branch)| {
                AggregatedService::from_branch(
                    idx + 1,
                    branch,
                    customers,
                    distances,
                    self.config.service_cost,
                )
                .ok_or_else(|| {
                    error!("branch extraction produced an empty branch for service {}", idx + 1);
                    CompressionError::EmptyBranch { service: idx + 1 }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let reduced = compress_matrix(depot.id(), &services, distances);
        debug!(
            "compressed '{}': {} customers into {} services ({} branch points), tree weight {:.3}",
            problem.name(),
            problem.num_customers(),
            services.len(),
            singles.len(),
            arborescence.total_weight()
        );

        Ok(CompressedProblem {
            services,
            distances: reduced,
            depot: depot.clone(),
            vehicles: problem.vehicles().to_vec(),
            original_customers: customers.to_vec(),
            arborescence_weight: arborescence.total_weight(),
        })
    }
}

/// Compresses `problem` with the default configuration.
pub fn compress(problem: &VrpProblem) -> Result<CompressedProblem, CompressionError> {
    ProblemCompressor::default().convert(problem)
}

/// Complete digraph over all locations, weighted by `distances`.
fn problem_graph(
    customers: &[Customer],
    distances: &DistanceMatrix,
) -> Result<WeightedDigraph<Customer>, CompressionError> {
    let mut graph = WeightedDigraph::new();
    for c in customers {
        graph.add_vertex(VertexId(c.id()), c.clone())?;
    }
    for i in 0..customers.len() {
        for j in 0..customers.len() {
            if i != j {
                graph.add_edge(VertexId(i), VertexId(j), distances.get(i, j))?;
            }
        }
    }
    Ok(graph)
}

/// Reduced matrix over the depot (index 0) and `services` (index = id).
fn compress_matrix(
    depot: usize,
    services: &[AggregatedService],
    distances: &DistanceMatrix,
) -> DistanceMatrix {
    let size = services.len() + 1;
    let mut inputs = Vec::with_capacity(size);
    let mut outputs = Vec::with_capacity(size);
    let mut costs = Vec::with_capacity(size);
    inputs.push(depot);
    outputs.push(depot);
    costs.push(0.0);
    for s in services {
        inputs.push(s.input_vertex());
        outputs.push(s.output_vertex());
        costs.push(s.internal_cost());
    }

    let mut reduced = DistanceMatrix::new(size);
    for a in 0..size {
        for b in 0..size {
            if a != b {
                reduced.set(a, b, distances.get(outputs[a], inputs[b]) + costs[b]);
            }
        }
    }
    reduced
}
