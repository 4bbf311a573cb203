//! Proptest strategies and reference solutions for the property tests.
//!
//! Graphs always contain the path `0 -> 1 -> ... -> n-1`, so every vertex is
//! reachable from the root. The remaining ordered pairs get an edge or not
//! at random. Weights are small integers so sums compare exactly.

use proptest::prelude::*;
use u_compress::graph::{VertexId, WeightedDigraph};
use u_compress::models::{Customer, Vehicle, VrpProblem};

/// A vertex count and one optional weight per ordered pair, row-major.
#[derive(Debug, Clone)]
pub struct GraphSpec {
    pub vertices: usize,
    pub weights: Vec<Option<u8>>,
}

impl GraphSpec {
    /// Builds the graph. Path edges without a drawn weight cost 25.
    #[must_use]
    pub fn build(&self) -> WeightedDigraph<()> {
        let n = self.vertices;
        let mut g = WeightedDigraph::new();
        for v in 0..n {
            g.add_vertex(VertexId(v), ()).expect("fresh vertex");
        }
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let drawn = self.weights[i * n + j];
                let weight = match drawn {
                    Some(w) => Some(f64::from(w)),
                    None if j == i + 1 => Some(25.0),
                    None => None,
                };
                if let Some(w) = weight {
                    g.add_edge(VertexId(i), VertexId(j), w).expect("fresh edge");
                }
            }
        }
        g
    }
}

/// Root-reachable graphs with `2..=max_vertices` vertices.
pub fn graph_strategy(max_vertices: usize) -> impl Strategy<Value = GraphSpec> {
    (2..=max_vertices).prop_flat_map(|n| {
        proptest::collection::vec(proptest::option::of(0_u8..20), n * n)
            .prop_map(move |weights| GraphSpec {
                vertices: n,
                weights,
            })
    })
}

/// Minimum arborescence weight rooted at 0, by trying every choice of one
/// incoming edge per non-root vertex.
#[must_use]
pub fn brute_force_weight(graph: &WeightedDigraph<()>) -> Option<f64> {
    let n = graph.num_vertices();
    let options: Vec<Vec<(usize, f64)>> = (1..n)
        .map(|v| {
            graph
                .incoming_edges(VertexId(v))
                .map(|(_, e)| (e.source().0, e.weight()))
                .collect()
        })
        .collect();
    if options.iter().any(Vec::is_empty) {
        return None;
    }

    let mut best: Option<f64> = None;
    let mut choice = vec![0_usize; n - 1];
    loop {
        let parents: Vec<usize> = choice
            .iter()
            .zip(&options)
            .map(|(&c, opts)| opts[c].0)
            .collect();
        if reaches_root(&parents) {
            let weight: f64 = choice
                .iter()
                .zip(&options)
                .map(|(&c, opts)| opts[c].1)
                .sum();
            best = Some(best.map_or(weight, |b| b.min(weight)));
        }

        let mut k = 0;
        loop {
            if k == choice.len() {
                return best;
            }
            choice[k] += 1;
            if choice[k] < options[k].len() {
                break;
            }
            choice[k] = 0;
            k += 1;
        }
    }
}

/// `parents[v - 1]` is the parent of vertex `v`.
fn reaches_root(parents: &[usize]) -> bool {
    (1..=parents.len()).all(|start| {
        let mut v = start;
        for _ in 0..=parents.len() {
            if v == 0 {
                return true;
            }
            v = parents[v - 1];
        }
        false
    })
}

/// Euclidean problems with `1..=max_customers` customers.
pub fn problem_strategy(max_customers: usize) -> impl Strategy<Value = VrpProblem> {
    proptest::collection::vec((-50.0_f64..50.0, -50.0_f64..50.0, 0_i32..10), 1..=max_customers)
        .prop_map(|points| {
            let customers = points
                .into_iter()
                .enumerate()
                .map(|(idx, (x, y, demand))| Customer::new(idx + 1, x, y, demand));
            VrpProblem::builder("generated")
                .depot(Customer::depot(0.0, 0.0))
                .customers(customers)
                .vehicle(Vehicle::new(0, 100))
                .build()
                .expect("generated problems are valid")
                .materialize_distances()
        })
}
