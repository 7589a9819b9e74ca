//! Host-application contract and the two bowl-finding commands.
//!
//! A host supplies a [`SurfaceCatalog`] (named surfaces, each of which may fail
//! to resolve) and an [`EditSession`] into which bowl markers are inserted.
//! The commands run the detectors once per listed surface and commit the
//! session once at the end. If anything fails the session is dropped without
//! commit, which discards every marker of the run as a unit.
//!
//! [`MeshCatalog`] and [`MarkerLayer`] are in-memory implementations.

use std::fmt;

use crate::algs::drainage::{DrainagePathTracer, DrainageSimulator};
use crate::algs::local_minimum::LocalMinimumDetector;
use crate::bowl_error::BowlError;
use crate::config::DetectionConfig;
use crate::report::BowlPoint;
use crate::topology::mesh::MeshModel;
use crate::topology::tin::TinMesh;

/// Source of surfaces to scan.
pub trait SurfaceCatalog {
    type SurfaceId: Copy + fmt::Debug;
    type Mesh: MeshModel;

    /// Every surface the host knows about, in processing order.
    fn surface_ids(&self) -> Vec<Self::SurfaceId>;
    /// The mesh behind `id`, or `None` if it does not resolve to a surface.
    fn resolve(&self, id: Self::SurfaceId) -> Option<&Self::Mesh>;
}

/// Transactional sink for bowl markers.
///
/// Dropping a session without calling [`commit`](EditSession::commit) must
/// discard everything appended to it.
pub trait EditSession {
    fn append_marker(&mut self, bowl: &BowlPoint) -> Result<(), BowlError>;
    /// Make all appended markers permanent; returns how many were committed.
    fn commit(self) -> Result<usize, BowlError>
    where
        Self: Sized;
}

/// Outcome of one command run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub surfaces_visited: usize,
    pub surfaces_skipped: usize,
    pub bowls_reported: usize,
}

/// Mark every topological local minimum of every surface.
pub fn find_bowls_by_vertex<C, E>(
    catalog: &C,
    session: E,
    config: &DetectionConfig,
) -> Result<RunSummary, BowlError>
where
    C: SurfaceCatalog,
    E: EditSession,
{
    let detector = LocalMinimumDetector::new(config.tolerance);
    run_per_surface(catalog, session, |mesh| detector.detect(mesh))
}

/// Mark every drainage convergence point of every surface.
pub fn find_bowls_by_waterdrop<C, S, E>(
    catalog: &C,
    simulator: &S,
    session: E,
    config: &DetectionConfig,
) -> Result<RunSummary, BowlError>
where
    C: SurfaceCatalog,
    S: DrainageSimulator<C::Mesh> + ?Sized,
    E: EditSession,
{
    let tracer = DrainagePathTracer::new(config);
    run_per_surface(catalog, session, |mesh| tracer.detect(simulator, mesh))
}

fn run_per_surface<C, E, F>(
    catalog: &C,
    mut session: E,
    mut detect: F,
) -> Result<RunSummary, BowlError>
where
    C: SurfaceCatalog,
    E: EditSession,
    F: FnMut(&C::Mesh) -> Result<Vec<BowlPoint>, BowlError>,
{
    let mut summary = RunSummary::default();
    for id in catalog.surface_ids() {
        let Some(mesh) = catalog.resolve(id) else {
            log::warn!("surface {id:?} did not resolve to a mesh; skipped");
            summary.surfaces_skipped += 1;
            continue;
        };
        summary.surfaces_visited += 1;
        for bowl in detect(mesh)? {
            session.append_marker(&bowl)?;
            summary.bowls_reported += 1;
        }
    }
    let committed = session.commit()?;
    log::debug!(
        "committed {committed} markers from {} surface(s), {} skipped",
        summary.surfaces_visited,
        summary.surfaces_skipped
    );
    Ok(summary)
}

/// In-memory catalog of named surfaces.
#[derive(Clone, Debug, Default)]
pub struct MeshCatalog {
    surfaces: Vec<(String, Option<TinMesh>)>,
}

impl MeshCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a surface and return its id.
    pub fn add(&mut self, name: impl Into<String>, mesh: TinMesh) -> usize {
        self.surfaces.push((name.into(), Some(mesh)));
        self.surfaces.len() - 1
    }

    /// Register a name that does not resolve to any mesh.
    pub fn add_unresolved(&mut self, name: impl Into<String>) -> usize {
        self.surfaces.push((name.into(), None));
        self.surfaces.len() - 1
    }

    pub fn name(&self, id: usize) -> Option<&str> {
        self.surfaces.get(id).map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }
}

impl SurfaceCatalog for MeshCatalog {
    type SurfaceId = usize;
    type Mesh = TinMesh;

    fn surface_ids(&self) -> Vec<usize> {
        (0..self.surfaces.len()).collect()
    }

    fn resolve(&self, id: usize) -> Option<&TinMesh> {
        self.surfaces.get(id).and_then(|(_, m)| m.as_ref())
    }
}

/// Committed bowl markers.
#[derive(Clone, Debug, Default)]
pub struct MarkerLayer {
    markers: Vec<BowlPoint>,
}

impl MarkerLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an edit session against this layer.
    pub fn begin(&mut self) -> MarkerTransaction<'_> {
        MarkerTransaction {
            layer: self,
            pending: Vec::new(),
        }
    }

    pub fn markers(&self) -> &[BowlPoint] {
        &self.markers
    }
}

/// Buffered inserts into a [`MarkerLayer`], applied on commit.
#[derive(Debug)]
pub struct MarkerTransaction<'a> {
    layer: &'a mut MarkerLayer,
    pending: Vec<BowlPoint>,
}

impl MarkerTransaction<'_> {
    pub fn pending(&self) -> &[BowlPoint] {
        &self.pending
    }
}

impl EditSession for MarkerTransaction<'_> {
    fn append_marker(&mut self, bowl: &BowlPoint) -> Result<(), BowlError> {
        if !bowl.position.is_finite() {
            return Err(BowlError::Session(format!(
                "cannot place a marker at {}",
                bowl.position
            )));
        }
        self.pending.push(*bowl);
        Ok(())
    }

    fn commit(mut self) -> Result<usize, BowlError> {
        let pending = std::mem::take(&mut self.pending);
        let n = pending.len();
        self.layer.markers.extend(pending);
        Ok(n)
    }
}

impl Drop for MarkerTransaction<'_> {
    fn drop(&mut self) {
        if !self.pending.is_empty() {
            log::debug!("rolled back {} uncommitted marker(s)", self.pending.len());
        }
    }
}
