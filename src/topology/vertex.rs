//! `VertexId`: a strong, zero-cost handle for surface vertices
//!
//! Vertices are identified by their index in the owning mesh. The handle is a
//! `repr(transparent)` wrapper around `u32` so that adjacency tables stay
//! compact; a mesh never holds more than `u32::MAX` vertices.

use std::fmt;

use static_assertions::assert_eq_size;

use crate::bowl_error::BowlError;

/// Index of a vertex within its mesh.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[repr(transparent)]
pub struct VertexId(u32);

assert_eq_size!(VertexId, u32);

impl VertexId {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        VertexId(raw)
    }

    /// Convert a `usize` index, failing if it does not fit the handle.
    pub fn from_index(index: usize) -> Result<Self, BowlError> {
        u32::try_from(index)
            .map(VertexId)
            .map_err(|_| BowlError::InvalidGeometry(format!("vertex index {index} exceeds u32")))
    }

    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("VertexId").field(&self.0).finish()
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
