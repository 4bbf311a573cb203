//! Edmonds / Chu-Liu minimum spanning arborescence.
//!
//! Each level selects the cheapest incoming edge of every non-root vertex.
//! A cycle-free selection is optimal; otherwise the first cycle found is
//! contracted, the contracted graph is solved recursively, and the result is
//! expanded back.
//!
//! # Complexity
//!
//! O(V + E) per level and at most V - 1 levels, so O(V·E) overall.
//!
//! # Reference
//!
//! Edmonds, J. (1967). "Optimum branchings", *Journal of Research of the
//! National Bureau of Standards* 71B, 233-240.

use std::collections::HashMap;

use log::{debug, trace};

use super::contraction::{Composite, CycleContraction, Selection};
use super::{Arborescence, ArborescenceError};
use crate::graph::{Edge, EdgeId, GraphError, VertexId, WeightedDigraph};

/// Computes a minimum spanning arborescence of `graph` rooted at `root`.
///
/// Ties between equally cheap incoming edges go to the edge inserted first,
/// and cycles are searched from vertices in ascending id order, so repeated
/// runs return the same edge set.
///
/// # Errors
///
/// - [`GraphError::UnknownVertex`] if `root` is not in the graph.
/// - [`ArborescenceError::Unreachable`] if some vertex cannot be reached
///   from `root`.
/// - Invariant violations ([`ArborescenceError::is_invariant_violation`])
///   if a contraction level cannot be expanded.
///
/// # Examples
///
/// ```
/// use u_compress::arborescence::minimum_spanning_arborescence;
/// use u_compress::graph::{VertexId, WeightedDigraph};
///
/// let mut g = WeightedDigraph::new();
/// for i in 0..4 {
///     g.add_vertex(VertexId(i), ()).unwrap();
/// }
/// g.add_edge(VertexId(0), VertexId(1), 10.0).unwrap();
/// g.add_edge(VertexId(0), VertexId(2), 10.0).unwrap();
/// g.add_edge(VertexId(1), VertexId(2), 1.0).unwrap();
/// g.add_edge(VertexId(2), VertexId(1), 1.0).unwrap();
/// g.add_edge(VertexId(2), VertexId(3), 4.0).unwrap();
/// g.add_edge(VertexId(1), VertexId(3), 4.0).unwrap();
///
/// let arb = minimum_spanning_arborescence(&g, VertexId(0)).unwrap();
/// assert_eq!(arb.len(), 3);
/// assert!((arb.total_weight() - 15.0).abs() < 1e-10);
/// ```
pub fn minimum_spanning_arborescence<V>(
    graph: &WeightedDigraph<V>,
    root: VertexId,
) -> Result<Arborescence, ArborescenceError> {
    if !graph.contains_vertex(root) {
        return Err(GraphError::UnknownVertex(root).into());
    }

    let level0 = skeleton(graph)?;
    let edges = solve_level(&level0, root, 0)?;
    let arborescence = Arborescence::from_edges(graph, root, edges)?;
    debug!(
        "arborescence rooted at {root}: {} edges, weight {}",
        arborescence.len(),
        arborescence.total_weight()
    );
    Ok(arborescence)
}

/// Copies `graph` with singleton composites as payload.
///
/// Edges are inserted in the same order, so edge ids coincide with the
/// input graph's.
fn skeleton<V>(graph: &WeightedDigraph<V>) -> Result<WeightedDigraph<Composite>, GraphError> {
    let mut level = WeightedDigraph::new();
    for v in graph.vertex_ids() {
        level.add_vertex(v, Composite::single(v))?;
    }
    for (_, edge) in graph.edges() {
        level.add_edge(edge.source(), edge.target(), edge.weight())?;
    }
    Ok(level)
}

fn solve_level(
    graph: &WeightedDigraph<Composite>,
    root: VertexId,
    depth: usize,
) -> Result<Vec<EdgeId>, ArborescenceError> {
    let selection = select_cheapest(graph, root)?;
    let Some(cycle) = find_cycle(graph, &selection) else {
        debug!("level {depth}: selection is acyclic over {} vertices", graph.num_vertices());
        return Ok(selection.into_values().collect());
    };

    debug!("level {depth}: found cycle {cycle:?}");
    let contraction = CycleContraction::contract(graph, cycle, &selection)?;
    trace!("level {depth}: recursing below composite {}", contraction.composite());
    let inner = solve_level(contraction.graph(), root, depth + 1)?;
    contraction.expand(graph, &selection, &inner)
}

/// Picks the cheapest incoming edge of every non-root vertex.
fn select_cheapest(
    graph: &WeightedDigraph<Composite>,
    root: VertexId,
) -> Result<Selection, ArborescenceError> {
    let mut selection = Selection::new();
    for (v, composite) in graph.vertices() {
        if v == root {
            continue;
        }
        let mut best: Option<(EdgeId, f64)> = None;
        for (id, edge) in graph.incoming_edges(v) {
            if best.map_or(true, |(_, w)| edge.weight() < w) {
                best = Some((id, edge.weight()));
            }
        }
        let Some((id, weight)) = best else {
            return Err(ArborescenceError::Unreachable(
                composite.representative().unwrap_or(v),
            ));
        };
        trace!("vertex {v}: cheapest incoming edge #{} ({weight})", id.index());
        selection.insert(v, id);
    }
    Ok(selection)
}

/// Finds the first cycle of the selection.
///
/// Walks selected predecessors from each vertex in ascending order, stamping
/// visited vertices with the walk that reached them; meeting a vertex of the
/// current walk closes a cycle. Returns the cycle in edge direction.
fn find_cycle(graph: &WeightedDigraph<Composite>, selection: &Selection) -> Option<Vec<VertexId>> {
    let predecessor = |v: VertexId| {
        selection
            .get(&v)
            .and_then(|&id| graph.edge(id))
            .map(Edge::source)
    };

    let mut stamp: HashMap<VertexId, usize> = HashMap::new();
    for (walk, &start) in selection.keys().enumerate() {
        let mut current = start;
        loop {
            match stamp.get(&current) {
                Some(&w) if w == walk => {
                    let mut cycle = vec![current];
                    let mut next = predecessor(current);
                    while let Some(p) = next.filter(|&p| p != current) {
                        cycle.push(p);
                        next = predecessor(p);
                    }
                    cycle.reverse();
                    return Some(cycle);
                }
                Some(_) => break,
                None => {}
            }
            stamp.insert(current, walk);
            match predecessor(current) {
                Some(p) => current = p,
                None => break,
            }
        }
    }
    None
}
