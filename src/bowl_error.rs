//! BowlError: Unified error type for terrain-bowls public APIs
//!
//! Expected degenerate inputs (an unresolved surface, a zero-length edge, a
//! seed that yields fewer than two drainage paths) are never reported through
//! this type; they are neutralised where they occur. What remains here are
//! genuine failures: malformed meshes, bad parameters and host session errors.

use thiserror::Error;

use crate::topology::edge::EdgeId;
use crate::topology::vertex::VertexId;

/// Unified error type for terrain-bowls operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BowlError {
    /// Equality tolerance must be finite and non-negative.
    #[error("invalid tolerance {0}: must be finite and >= 0")]
    InvalidTolerance(f64),
    /// A vertex handle does not belong to the mesh.
    #[error("vertex {vertex} out of range (mesh has {len} vertices)")]
    VertexOutOfRange { vertex: VertexId, len: usize },
    /// An edge handle does not belong to the mesh.
    #[error("edge {edge} out of range (mesh has {len} edges)")]
    EdgeOutOfRange { edge: EdgeId, len: usize },
    /// An edge listed as incident to `vertex` does not touch it.
    #[error("inconsistent adjacency: edge {edge} is listed on vertex {vertex} but does not touch it")]
    InconsistentAdjacency { vertex: VertexId, edge: EdgeId },
    /// Mesh or curve input that cannot be interpreted geometrically.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
    /// A polyline needs at least one point.
    #[error("polyline has no points")]
    EmptyPolyline,
    /// Curve evaluated outside its parametric domain.
    #[error("parameter {param} outside curve domain [{start}, {end}]")]
    ParameterOutOfRange { param: f64, start: f64, end: f64 },
    /// Failure reported by a host edit session.
    #[error("edit session error: {0}")]
    Session(String),
}
