//! Vertex-walk drainage backend.
//!
//! A lightweight stand-in for a host's triangle-walking waterdrop analysis.
//! Water at a vertex flows along the edge to the neighbor with the steepest
//! downhill slope (elevation drop over plan distance). At the start vertex the
//! walk forks into one path per strictly lower neighbor, steepest first, up to
//! `max_branches`. A path ends at a sink (no strictly lower neighbor), at a
//! boundary vertex, or after `max_steps` vertices.
//!
//! A seed that is exactly a vertex position is resolved through
//! [`MeshModel::vertex_at`]; any other seed snaps to the nearest vertex.
//!
//! Every fork begins at the seed, so the first sample of the convergence search
//! is already at distance zero and sits on the seed. With this backend
//! [`DrainagePathTracer`](crate::algs::DrainagePathTracer) therefore never
//! reports a convergence bowl; use it to exercise the drainage plumbing, or
//! plug in a host simulator whose paths start apart.

use crate::algs::drainage::DrainageSimulator;
use crate::bowl_error::BowlError;
use crate::config::SteepestDescentConfig;
use crate::geometry::point::Point3;
use crate::geometry::polyline::{DrainagePath, Polyline3};
use crate::topology::mesh::MeshModel;
use crate::topology::vertex::VertexId;

/// Steepest-descent vertex walker.
///
/// Its forks all share the seed as their first point, so convergence detection
/// on top of it reports nothing (see the module docs).
#[derive(Clone, Debug, Default)]
pub struct SteepestDescentSimulator {
    config: SteepestDescentConfig,
}

impl SteepestDescentSimulator {
    pub fn new(config: SteepestDescentConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SteepestDescentConfig {
        &self.config
    }

    /// Strictly lower neighbors of `v`, steepest first.
    fn downhill<M>(&self, mesh: &M, v: VertexId) -> Result<Vec<(VertexId, Point3)>, BowlError>
    where
        M: MeshModel + ?Sized,
    {
        let here = mesh.position(v)?;
        let mut lower = Vec::new();
        for n in mesh.neighbors(v)? {
            let p = mesh.position(n)?;
            if p.z < here.z {
                lower.push((n, p, self.slope(here, p)));
            }
        }
        lower.sort_by(|a, b| b.2.total_cmp(&a.2).then_with(|| a.0.cmp(&b.0)));
        Ok(lower.into_iter().map(|(n, p, _)| (n, p)).collect())
    }

    fn slope(&self, from: Point3, to: Point3) -> f64 {
        let run = from.plan_distance_to(to);
        let drop = from.z - to.z;
        if run < self.config.tolerance.equal_point() {
            // Vertical edge: steeper than anything with a horizontal run.
            f64::INFINITY
        } else {
            drop / run
        }
    }

    /// Follow steepest descent from `v` until sink, boundary or step limit.
    fn walk<M>(
        &self,
        mesh: &M,
        mut v: VertexId,
        path: &mut Vec<Point3>,
        max_steps: usize,
    ) -> Result<(), BowlError>
    where
        M: MeshModel + ?Sized,
    {
        while path.len() < max_steps {
            if mesh.is_boundary(v) {
                break;
            }
            let Some(&(next, p)) = self.downhill(mesh, v)?.first() else {
                break;
            };
            path.push(p);
            v = next;
        }
        Ok(())
    }
}

impl<M: MeshModel + ?Sized> DrainageSimulator<M> for SteepestDescentSimulator {
    type Path = DrainagePath;

    fn simulate_drainage(&self, mesh: &M, start: Point3) -> Result<Vec<Self::Path>, BowlError> {
        let origin = match mesh.vertex_at(start)? {
            Some(v) => Some(v),
            None => mesh.nearest_vertex(start)?,
        };
        let Some(origin) = origin else {
            return Ok(Vec::new());
        };
        let origin_pos = mesh.position(origin)?;
        let mut head = vec![start];
        if !self.config.tolerance.is_equal_point(start, origin_pos) {
            head.push(origin_pos);
        }
        let max_steps = self
            .config
            .max_steps
            .unwrap_or_else(|| mesh.vertex_count())
            .max(head.len() + 1);

        let branches = self.downhill(mesh, origin)?;
        if branches.is_empty() {
            return Ok(vec![Polyline3::new(head)?]);
        }

        let mut paths = Vec::with_capacity(self.config.max_branches.min(branches.len()));
        for (first, p) in branches.into_iter().take(self.config.max_branches) {
            let mut points = head.clone();
            points.push(p);
            self.walk(mesh, first, &mut points, max_steps)?;
            paths.push(Polyline3::new(points)?);
        }
        log::trace!("drainage from {start}: {} path(s)", paths.len());
        Ok(paths)
    }
}
