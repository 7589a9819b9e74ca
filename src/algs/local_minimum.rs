//! Topological local-minimum detection.
//!
//! A vertex is a local minimum when no directly connected neighbor is strictly
//! lower. Ties never disqualify: every vertex of a flat plateau whose rim is
//! not lower is reported. A vertex with no incident edges has nothing to
//! disprove it and is reported as well.
//!
//! The neighbor across an edge is chosen by position: if the edge's first
//! endpoint coincides (within tolerance) with the vertex, the neighbor is the
//! second endpoint, otherwise the first. A zero-length edge therefore compares
//! the vertex against a point at its own elevation, which never disqualifies.

use crate::bowl_error::BowlError;
use crate::geometry::point::Tolerance;
use crate::report::{BowlPoint, BowlReporter, DetectionMethod};
use crate::topology::mesh::MeshModel;
use crate::topology::vertex::VertexId;

/// Per-vertex elevation test against directly connected neighbors.
#[derive(Copy, Clone, Debug, Default)]
pub struct LocalMinimumDetector {
    tolerance: Tolerance,
}

impl LocalMinimumDetector {
    pub fn new(tolerance: Tolerance) -> Self {
        Self { tolerance }
    }

    #[inline]
    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    /// `true` if no neighbor of `vertex` is strictly lower.
    pub fn is_local_minimum<M>(&self, mesh: &M, vertex: VertexId) -> Result<bool, BowlError>
    where
        M: MeshModel + ?Sized,
    {
        let location = mesh.position(vertex)?;
        let mut is_lowest = true;
        for e in mesh.incident_edges(vertex)? {
            let edge = mesh.incident_edge(vertex, e)?;
            let other = if self
                .tolerance
                .is_equal_point(mesh.position(edge.v1)?, location)
            {
                edge.v2
            } else {
                edge.v1
            };
            if mesh.position(other)?.z < location.z {
                is_lowest = false;
            }
        }
        Ok(is_lowest)
    }

    /// Run the test over every vertex and report each minimum.
    pub fn detect<M>(&self, mesh: &M) -> Result<Vec<BowlPoint>, BowlError>
    where
        M: MeshModel + ?Sized,
    {
        let mut reporter = BowlReporter::new(self.tolerance);
        self.detect_into(mesh, &mut reporter)?;
        Ok(reporter.into_points())
    }

    /// Like [`detect`](Self::detect), appending to an existing reporter.
    pub fn detect_into<M>(&self, mesh: &M, reporter: &mut BowlReporter) -> Result<(), BowlError>
    where
        M: MeshModel + ?Sized,
    {
        let before = reporter.len();
        let mut visited = 0usize;
        for v in mesh.vertices() {
            visited += 1;
            if self.is_local_minimum(mesh, v)? {
                reporter.report(BowlPoint::new(
                    mesh.position(v)?,
                    DetectionMethod::Topological,
                ));
            }
        }
        log::debug!(
            "topological pass: {visited} vertices, {} bowls",
            reporter.len() - before
        );
        Ok(())
    }

    /// Parallel variant of [`detect`](Self::detect). Vertices are tested
    /// independently; results are reported in vertex order.
    #[cfg(feature = "rayon")]
    pub fn detect_par<M>(&self, mesh: &M) -> Result<Vec<BowlPoint>, BowlError>
    where
        M: MeshModel + Sync + ?Sized,
    {
        use rayon::prelude::*;

        let vertices: Vec<VertexId> = mesh.vertices().collect();
        let minima = vertices
            .par_iter()
            .map(|&v| -> Result<Option<BowlPoint>, BowlError> {
                if self.is_local_minimum(mesh, v)? {
                    Ok(Some(BowlPoint::new(
                        mesh.position(v)?,
                        DetectionMethod::Topological,
                    )))
                } else {
                    Ok(None)
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut reporter = BowlReporter::new(self.tolerance);
        reporter.extend(minima.into_iter().flatten());
        log::debug!(
            "topological pass (parallel): {} vertices, {} bowls",
            vertices.len(),
            reporter.len()
        );
        Ok(reporter.into_points())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::point::Point3;
    use crate::topology::tin::TinMesh;

    fn star(center_z: f64, neighbor_z: &[f64]) -> (TinMesh, VertexId) {
        let mut b = TinMesh::builder();
        let c = b.add_vertex(Point3::new(0.0, 0.0, center_z)).unwrap();
        for (i, z) in neighbor_z.iter().enumerate() {
            let n = b.add_vertex(Point3::new(1.0 + i as f64, 1.0, *z)).unwrap();
            b.add_edge(c, n).unwrap();
        }
        (b.build().unwrap(), c)
    }

    #[test]
    fn higher_neighbors_keep_minimum() {
        let (m, v) = star(5.0, &[6.0, 7.0]);
        assert!(LocalMinimumDetector::default().is_local_minimum(&m, v).unwrap());
    }

    #[test]
    fn lower_neighbor_disqualifies() {
        let (m, v) = star(5.0, &[4.0]);
        assert!(!LocalMinimumDetector::default().is_local_minimum(&m, v).unwrap());
    }

    #[test]
    fn isolated_vertex_is_minimum() {
        let (m, v) = star(5.0, &[]);
        assert!(LocalMinimumDetector::default().is_local_minimum(&m, v).unwrap());
    }

    #[test]
    fn equal_neighbor_does_not_disqualify() {
        let (m, v) = star(5.0, &[5.0, 9.0]);
        assert!(LocalMinimumDetector::default().is_local_minimum(&m, v).unwrap());
    }

    #[test]
    fn coincident_endpoint_compares_against_itself() {
        // Two distinct vertices at the same location, the second one lower.
        // The edge's first endpoint coincides with the vertex, so the other
        // endpoint is taken as the neighbor and disqualifies it.
        let mut b = TinMesh::builder();
        let a = b.add_vertex(Point3::new(0.0, 0.0, 1.0)).unwrap();
        let c = b.add_vertex(Point3::new(0.0, 0.0, 1.0 - 1e-12)).unwrap();
        b.add_edge(a, c).unwrap();
        let m = b.build().unwrap();
        let det = LocalMinimumDetector::new(Tolerance::new(1e-9).unwrap());
        // For `c`, v1 = a coincides with c, so the neighbor is v2 = c itself.
        assert!(det.is_local_minimum(&m, c).unwrap());
        // For `a`, v1 = a coincides with a, so the neighbor is c (lower).
        assert!(!det.is_local_minimum(&m, a).unwrap());
    }
}
