//! Adjacency consistency checks for [`MeshModel`] backends.
//!
//! A mesh whose incidence lists disagree with its edge table is malformed; the
//! detectors treat that as a hard failure rather than guessing a neighbor.

use hashbrown::HashMap;

use crate::bowl_error::BowlError;
use crate::topology::edge::EdgeId;
use crate::topology::mesh::MeshModel;

/// Check that every incident edge touches its vertex and that each edge is
/// listed on both of its endpoints.
pub fn validate_adjacency<M>(mesh: &M) -> Result<(), BowlError>
where
    M: MeshModel + ?Sized,
{
    let mut listed: HashMap<EdgeId, usize> = HashMap::new();
    let mut isolated = 0usize;
    for v in mesh.vertices() {
        let mut degree = 0usize;
        for e in mesh.incident_edges(v)? {
            mesh.incident_edge(v, e)?;
            *listed.entry(e).or_insert(0) += 1;
            degree += 1;
        }
        if degree == 0 {
            isolated += 1;
        }
    }

    for (e, count) in listed {
        if count != 2 {
            let edge = mesh.edge(e)?;
            let vertex = edge.v1;
            log::warn!("edge {e} is listed on {count} endpoint(s) instead of 2");
            return Err(BowlError::InconsistentAdjacency { vertex, edge: e });
        }
    }

    if isolated > 0 {
        log::debug!("mesh has {isolated} vertices without incident edges");
    }
    Ok(())
}
