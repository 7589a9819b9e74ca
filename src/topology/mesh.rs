//! Read-only mesh capability consumed by the detectors.
//!
//! [`MeshModel`] is the boundary between the detection engine and whatever
//! geometry backend holds the triangulated surface. It exposes vertices with
//! immutable positions, edges as vertex pairs, and the per-vertex list of
//! incident edges. Nothing in the crate mutates a mesh through this trait.
//!
//! An absent surface (`Option::None`) is itself a mesh with zero vertices, so a
//! host handle that fails to resolve simply produces no results.

use crate::bowl_error::BowlError;
use crate::geometry::point::Point3;
use crate::topology::edge::{Edge, EdgeId};
use crate::topology::vertex::VertexId;

/// Triangulated surface as seen by the detectors.
pub trait MeshModel {
    type VertexIter<'a>: Iterator<Item = VertexId>
    where
        Self: 'a;
    type EdgeIter<'a>: Iterator<Item = EdgeId>
    where
        Self: 'a;

    /// Number of vertices.
    fn vertex_count(&self) -> usize;
    /// All vertices of the surface.
    fn vertices(&self) -> Self::VertexIter<'_>;
    /// Position of `v`.
    fn position(&self, v: VertexId) -> Result<Point3, BowlError>;
    /// Edges incident to `v`.
    fn incident_edges(&self, v: VertexId) -> Result<Self::EdgeIter<'_>, BowlError>;
    /// Endpoints of `e`.
    fn edge(&self, e: EdgeId) -> Result<Edge, BowlError>;

    /// Whether `v` lies on the outer boundary of the surface.
    ///
    /// Backends without boundary information report `false`.
    fn is_boundary(&self, _v: VertexId) -> bool {
        false
    }

    /// Incident edge `e` of `v`, checked to actually touch `v`.
    fn incident_edge(&self, v: VertexId, e: EdgeId) -> Result<Edge, BowlError> {
        let edge = self.edge(e)?;
        if !edge.touches(v) {
            return Err(BowlError::InconsistentAdjacency { vertex: v, edge: e });
        }
        Ok(edge)
    }

    /// Directly connected neighbors of `v`, by handle.
    fn neighbors(&self, v: VertexId) -> Result<Vec<VertexId>, BowlError> {
        let mut out = Vec::new();
        for e in self.incident_edges(v)? {
            let edge = self.incident_edge(v, e)?;
            if let Some(n) = edge.opposite(v) {
                out.push(n);
            }
        }
        Ok(out)
    }

    /// First vertex positioned exactly at `p`.
    ///
    /// Backends with a spatial index should override the linear scan.
    fn vertex_at(&self, p: Point3) -> Result<Option<VertexId>, BowlError> {
        for v in self.vertices() {
            if self.position(v)? == p {
                return Ok(Some(v));
            }
        }
        Ok(None)
    }

    /// Vertex closest to `p` in 3D; the first one wins ties. `None` for an empty mesh.
    fn nearest_vertex(&self, p: Point3) -> Result<Option<VertexId>, BowlError> {
        let mut best: Option<(VertexId, f64)> = None;
        for v in self.vertices() {
            let d = self.position(v)?.distance_to(p);
            if best.is_none_or(|(_, bd)| d < bd) {
                best = Some((v, d));
            }
        }
        Ok(best.map(|(v, _)| v))
    }
}

impl<M: MeshModel> MeshModel for Option<M> {
    type VertexIter<'a>
        = std::iter::Flatten<std::option::IntoIter<M::VertexIter<'a>>>
    where
        Self: 'a;
    type EdgeIter<'a>
        = M::EdgeIter<'a>
    where
        Self: 'a;

    fn vertex_count(&self) -> usize {
        self.as_ref().map_or(0, M::vertex_count)
    }

    fn vertices(&self) -> Self::VertexIter<'_> {
        self.as_ref().map(|m| m.vertices()).into_iter().flatten()
    }

    fn position(&self, v: VertexId) -> Result<Point3, BowlError> {
        match self {
            Some(m) => m.position(v),
            None => Err(BowlError::VertexOutOfRange { vertex: v, len: 0 }),
        }
    }

    fn incident_edges(&self, v: VertexId) -> Result<Self::EdgeIter<'_>, BowlError> {
        match self {
            Some(m) => m.incident_edges(v),
            None => Err(BowlError::VertexOutOfRange { vertex: v, len: 0 }),
        }
    }

    fn edge(&self, e: EdgeId) -> Result<Edge, BowlError> {
        match self {
            Some(m) => m.edge(e),
            None => Err(BowlError::EdgeOutOfRange { edge: e, len: 0 }),
        }
    }

    fn is_boundary(&self, v: VertexId) -> bool {
        self.as_ref().is_some_and(|m| m.is_boundary(v))
    }

    fn vertex_at(&self, p: Point3) -> Result<Option<VertexId>, BowlError> {
        match self {
            Some(m) => m.vertex_at(p),
            None => Ok(None),
        }
    }
}
