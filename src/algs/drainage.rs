//! Drainage-path tracing and convergence detection.
//!
//! The downhill walk itself belongs to the geometry backend and is consumed
//! through [`DrainageSimulator`]. Paths a simulator hands out are transient:
//! [`DrainageScope`] owns them for the duration of one seed and gives them
//! back through [`DrainageSimulator::release`] when dropped, on every exit path.
//!
//! For a seed that yields two or more paths, the first two are passed to the
//! proximity search; the resulting point is a bowl unless it coincides with
//! the start of the first path (paths that part ways at the seed never pool).

use std::ops::Deref;

use crate::algs::proximity::CurveProximityFinder;
use crate::bowl_error::BowlError;
use crate::config::DetectionConfig;
use crate::geometry::point::{Point3, Tolerance};
use crate::geometry::polyline::Curve;
use crate::report::{BowlPoint, BowlReporter, DetectionMethod};
use crate::topology::mesh::MeshModel;

/// Backend capability that simulates where a water drop flows.
pub trait DrainageSimulator<M: MeshModel + ?Sized> {
    /// Path object handed out by the simulator.
    type Path: Curve;

    /// Simulate drainage from `start`, returning zero or more downhill paths.
    fn simulate_drainage(&self, mesh: &M, start: Point3) -> Result<Vec<Self::Path>, BowlError>;

    /// Give back paths produced by [`simulate_drainage`](Self::simulate_drainage).
    /// Called exactly once per batch.
    fn release(&self, paths: Vec<Self::Path>) {
        drop(paths);
    }
}

/// Scoped ownership of one batch of drainage paths.
pub struct DrainageScope<'s, M, S>
where
    M: MeshModel + ?Sized,
    S: DrainageSimulator<M> + ?Sized,
{
    simulator: &'s S,
    paths: Vec<S::Path>,
    _mesh: std::marker::PhantomData<fn(&M)>,
}

impl<'s, M, S> DrainageScope<'s, M, S>
where
    M: MeshModel + ?Sized,
    S: DrainageSimulator<M> + ?Sized,
{
    /// Run the simulator and take ownership of its output.
    pub fn acquire(simulator: &'s S, mesh: &M, start: Point3) -> Result<Self, BowlError> {
        let paths = simulator.simulate_drainage(mesh, start)?;
        Ok(DrainageScope {
            simulator,
            paths,
            _mesh: std::marker::PhantomData,
        })
    }

    pub fn paths(&self) -> &[S::Path] {
        &self.paths
    }
}

impl<M, S> Deref for DrainageScope<'_, M, S>
where
    M: MeshModel + ?Sized,
    S: DrainageSimulator<M> + ?Sized,
{
    type Target = [S::Path];

    fn deref(&self) -> &Self::Target {
        &self.paths
    }
}

impl<M, S> Drop for DrainageScope<'_, M, S>
where
    M: MeshModel + ?Sized,
    S: DrainageSimulator<M> + ?Sized,
{
    fn drop(&mut self) {
        let paths = std::mem::take(&mut self.paths);
        self.simulator.release(paths);
    }
}

/// Drains every vertex of a mesh and reports where path pairs converge.
#[derive(Copy, Clone, Debug, Default)]
pub struct DrainagePathTracer {
    tolerance: Tolerance,
    finder: CurveProximityFinder,
}

impl DrainagePathTracer {
    pub fn new(config: &DetectionConfig) -> Self {
        Self {
            tolerance: config.tolerance,
            finder: CurveProximityFinder::with_steps(config.sample_steps),
        }
    }

    /// Simulate drainage from `seed`. The returned scope releases the paths
    /// when dropped.
    pub fn trace<'s, M, S>(
        &self,
        simulator: &'s S,
        mesh: &M,
        seed: Point3,
    ) -> Result<DrainageScope<'s, M, S>, BowlError>
    where
        M: MeshModel + ?Sized,
        S: DrainageSimulator<M> + ?Sized,
    {
        DrainageScope::acquire(simulator, mesh, seed)
    }

    /// Convergence bowl for a single seed, if any.
    pub fn convergence<M, S>(
        &self,
        simulator: &S,
        mesh: &M,
        seed: Point3,
    ) -> Result<Option<BowlPoint>, BowlError>
    where
        M: MeshModel + ?Sized,
        S: DrainageSimulator<M> + ?Sized,
    {
        let drops = self.trace(simulator, mesh, seed)?;
        let [curve_a, curve_b, ..] = drops.paths() else {
            log::trace!("seed {seed}: {} drainage path(s), skipped", drops.len());
            return Ok(None);
        };
        let Some(approach) = self.finder.closest_point(curve_a, curve_b)? else {
            log::trace!("seed {seed}: first path has an empty domain, skipped");
            return Ok(None);
        };
        if approach.point.distance_to(curve_a.start_point()?) > self.tolerance.equal_point() {
            Ok(Some(BowlPoint::new(
                approach.point,
                DetectionMethod::DrainageConvergence,
            )))
        } else {
            log::trace!("seed {seed}: paths diverge at the seed, skipped");
            Ok(None)
        }
    }

    /// Drain from every vertex position and report convergence bowls.
    pub fn detect<M, S>(&self, simulator: &S, mesh: &M) -> Result<Vec<BowlPoint>, BowlError>
    where
        M: MeshModel + ?Sized,
        S: DrainageSimulator<M> + ?Sized,
    {
        let mut reporter = BowlReporter::new(self.tolerance);
        self.detect_into(simulator, mesh, &mut reporter)?;
        Ok(reporter.into_points())
    }

    /// Like [`detect`](Self::detect), appending to an existing reporter.
    pub fn detect_into<M, S>(
        &self,
        simulator: &S,
        mesh: &M,
        reporter: &mut BowlReporter,
    ) -> Result<(), BowlError>
    where
        M: MeshModel + ?Sized,
        S: DrainageSimulator<M> + ?Sized,
    {
        let before = reporter.len();
        let mut seeds = 0usize;
        for v in mesh.vertices() {
            seeds += 1;
            if let Some(bowl) = self.convergence(simulator, mesh, mesh.position(v)?)? {
                reporter.report(bowl);
            }
        }
        log::debug!(
            "drainage pass: {seeds} seeds, {} bowls",
            reporter.len() - before
        );
        Ok(())
    }
}
