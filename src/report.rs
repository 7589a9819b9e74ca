//! Bowl points and their per-run collection.
//!
//! Detectors push every candidate into a [`BowlReporter`]; the reporter keeps
//! insertion order and drops a candidate that lies within the equality
//! tolerance of a point already reported by the same method in this run.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::point::{Point3, Tolerance};

/// How a bowl was found.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DetectionMethod {
    /// Vertex with no strictly lower neighbor.
    Topological,
    /// Closest approach of two drainage paths from the same seed.
    DrainageConvergence,
}

impl fmt::Display for DetectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectionMethod::Topological => f.write_str("topological"),
            DetectionMethod::DrainageConvergence => f.write_str("drainage-convergence"),
        }
    }
}

/// A depression on the surface.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BowlPoint {
    pub position: Point3,
    pub method: DetectionMethod,
}

impl BowlPoint {
    pub fn new(position: Point3, method: DetectionMethod) -> Self {
        BowlPoint { position, method }
    }
}

/// Ordered, duplicate-free collection of bowls for one mesh.
#[derive(Clone, Debug)]
pub struct BowlReporter {
    tolerance: Tolerance,
    points: Vec<BowlPoint>,
}

impl BowlReporter {
    pub fn new(tolerance: Tolerance) -> Self {
        BowlReporter {
            tolerance,
            points: Vec::new(),
        }
    }

    /// Record `point`. Returns `false` if it duplicates an earlier point of
    /// the same method.
    pub fn report(&mut self, point: BowlPoint) -> bool {
        let duplicate = self.points.iter().any(|p| {
            p.method == point.method && self.tolerance.is_equal_point(p.position, point.position)
        });
        if duplicate {
            log::trace!("duplicate {} bowl at {} dropped", point.method, point.position);
            return false;
        }
        log::trace!("{} bowl at {}", point.method, point.position);
        self.points.push(point);
        true
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[BowlPoint] {
        &self.points
    }

    pub fn into_points(self) -> Vec<BowlPoint> {
        self.points
    }
}

impl Extend<BowlPoint> for BowlReporter {
    fn extend<I: IntoIterator<Item = BowlPoint>>(&mut self, iter: I) {
        for p in iter {
            self.report(p);
        }
    }
}
