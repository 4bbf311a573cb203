//! Branch and branching types.

use serde::{Deserialize, Serialize};

use crate::graph::VertexId;

/// A directed chain of arborescence vertices, ordered from the root side.
///
/// Consecutive vertices are joined by an arborescence edge. A branch is
/// never empty; deserializing an empty vertex list fails.
///
/// # Examples
///
/// ```
/// use u_compress::branching::Branch;
/// use u_compress::graph::VertexId;
///
/// let b = Branch::new(vec![VertexId(3), VertexId(5)]).unwrap();
/// assert_eq!(b.start(), Some(VertexId(3)));
/// assert_eq!(b.end(), Some(VertexId(5)));
/// assert!(Branch::new(Vec::new()).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BranchRepr")]
pub struct Branch {
    vertices: Vec<VertexId>,
}

#[derive(Deserialize)]
struct BranchRepr {
    vertices: Vec<VertexId>,
}

impl TryFrom<BranchRepr> for Branch {
    type Error = &'static str;

    fn try_from(repr: BranchRepr) -> Result<Self, Self::Error> {
        Self::new(repr.vertices).ok_or("a branch needs at least one vertex")
    }
}

impl Branch {
    /// Creates a branch from its vertices; `None` if empty.
    pub fn new(vertices: Vec<VertexId>) -> Option<Self> {
        if vertices.is_empty() {
            None
        } else {
            Some(Self { vertices })
        }
    }

    /// A branch made of one vertex.
    pub fn single(v: VertexId) -> Self {
        Self { vertices: vec![v] }
    }

    /// Vertices in chain order.
    pub fn vertices(&self) -> &[VertexId] {
        &self.vertices
    }

    /// First vertex (closest to the root).
    pub fn start(&self) -> Option<VertexId> {
        self.vertices.first().copied()
    }

    /// Last vertex.
    pub fn end(&self) -> Option<VertexId> {
        self.vertices.last().copied()
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns `true` if `v` lies on this branch.
    pub fn contains(&self, v: VertexId) -> bool {
        self.vertices.contains(&v)
    }
}

/// Result of branch extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branching {
    /// Maximal chains, in discovery order.
    pub branches: Vec<Branch>,
    /// Non-root vertices with two or more children, in discovery order.
    pub branch_points: Vec<VertexId>,
}

impl Branching {
    /// Number of vertices covered by branches and branch points together.
    pub fn num_vertices(&self) -> usize {
        self.branches.iter().map(Branch::len).sum::<usize>() + self.branch_points.len()
    }
}
