//! Sampled closest-approach search between two curves.
//!
//! Curve A is stepped from its start parameter in increments of
//! `(end - start) / steps`, accumulating the parameter while it stays strictly
//! below the end parameter. With the default 100 steps that is up to 101
//! samples, but the end parameter itself is only evaluated if rounding of the
//! accumulated parameter happens to land exactly on it. Every sample is paired
//! with its nearest point on curve B; the first sample achieving the smallest
//! distance wins.
//!
//! Sampling stops early once adding the step no longer moves the parameter,
//! which happens when the domain sits far from zero relative to its width.
//!
//! The result approximates mutual closest approach to the sampling resolution.

use serde::{Deserialize, Serialize};

use crate::bowl_error::BowlError;
use crate::geometry::point::Point3;
use crate::geometry::polyline::Curve;

/// Best sampled pair found by [`CurveProximityFinder::closest_point`].
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClosestApproach {
    /// Sample on curve A.
    pub point: Point3,
    /// Nearest point on curve B to `point`.
    pub paired: Point3,
    pub distance: f64,
    /// Curve A parameter of `point`.
    pub param: f64,
}

#[derive(Copy, Clone, Debug)]
pub struct CurveProximityFinder {
    steps: u32,
}

impl Default for CurveProximityFinder {
    fn default() -> Self {
        Self {
            steps: Self::DEFAULT_STEPS,
        }
    }
}

impl CurveProximityFinder {
    pub const DEFAULT_STEPS: u32 = 100;

    /// Finder dividing the domain of curve A into `steps` increments (at least one).
    pub fn with_steps(steps: u32) -> Self {
        Self {
            steps: steps.max(1),
        }
    }

    #[inline]
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Closest sampled approach of `curve_a` to `curve_b`.
    ///
    /// `None` when curve A has an empty domain (`end <= start`) and no sample
    /// is taken.
    pub fn closest_point<A, B>(
        &self,
        curve_a: &A,
        curve_b: &B,
    ) -> Result<Option<ClosestApproach>, BowlError>
    where
        A: Curve + ?Sized,
        B: Curve + ?Sized,
    {
        let start = curve_a.start_param();
        let end = curve_a.end_param();
        let step = (end - start) / f64::from(self.steps);

        let mut best: Option<ClosestApproach> = None;
        let mut param = start;
        while param < end {
            let on_a = curve_a.point_at_param(param)?;
            let on_b = curve_b.closest_point_to(on_a);
            let distance = on_a.distance_to(on_b);
            if best.is_none_or(|b| distance < b.distance) {
                best = Some(ClosestApproach {
                    point: on_a,
                    paired: on_b,
                    distance,
                    param,
                });
            }
            match advance(param, step) {
                Some(next) => param = next,
                None => break,
            }
        }
        Ok(best)
    }

    /// Number of samples [`closest_point`](Self::closest_point) evaluates on
    /// a curve with the given domain.
    pub fn sample_count(&self, start: f64, end: f64) -> usize {
        let step = (end - start) / f64::from(self.steps);
        let mut n = 0;
        let mut param = start;
        while param < end {
            n += 1;
            match advance(param, step) {
                Some(next) => param = next,
                None => break,
            }
        }
        n
    }
}

/// `param + step`, or `None` if that does not move the parameter forward.
#[inline]
fn advance(param: f64, step: f64) -> Option<f64> {
    let next = param + step;
    (next > param).then_some(next)
}
