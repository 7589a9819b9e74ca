//! Mesh edges: unordered vertex pairs owned by the mesh.
//!
//! An edge only refers back to its two vertices by handle; it owns nothing.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::topology::vertex::VertexId;

/// Index of an edge within its mesh.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(transparent)]
pub struct EdgeId(u32);

impl EdgeId {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        EdgeId(raw)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EdgeId").field(&self.0).finish()
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Direct connection between two vertices of the triangulation.
///
/// Equality ignores endpoint order.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct Edge {
    pub v1: VertexId,
    pub v2: VertexId,
}

impl Edge {
    #[inline]
    pub const fn new(v1: VertexId, v2: VertexId) -> Self {
        Edge { v1, v2 }
    }

    /// Endpoints ordered by id; the key used to deduplicate shared triangle sides.
    #[inline]
    pub fn key(self) -> (VertexId, VertexId) {
        if self.v1 <= self.v2 {
            (self.v1, self.v2)
        } else {
            (self.v2, self.v1)
        }
    }

    #[inline]
    pub fn touches(self, v: VertexId) -> bool {
        self.v1 == v || self.v2 == v
    }

    /// The endpoint that is not `v`, by handle. `None` if `v` is not an endpoint.
    pub fn opposite(self, v: VertexId) -> Option<VertexId> {
        if self.v1 == v {
            Some(self.v2)
        } else if self.v2 == v {
            Some(self.v1)
        } else {
            None
        }
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Edge {}
