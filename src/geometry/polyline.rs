//! Parametric curves and 3D polylines.
//!
//! [`Curve`] is the geometric capability the proximity search consumes: evaluate
//! a point at a parameter and answer a closest-point query. [`Polyline3`] is the
//! in-crate implementation, parametrised like a host 3D polyline: parameter `k`
//! sits on the k-th vertex and varies linearly along each segment, so the domain
//! of an `n`-point polyline is `[0, n - 1]`.

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::bowl_error::BowlError;
use crate::debug_invariants::DebugInvariants;
use crate::geometry::point::{Point3, dot, sub};

const EPS: f64 = 1e-12;

/// A parametric curve with a closest-point query.
pub trait Curve {
    /// First parameter of the domain.
    fn start_param(&self) -> f64;
    /// Last parameter of the domain.
    fn end_param(&self) -> f64;
    /// Evaluate the curve at `param`.
    fn point_at_param(&self, param: f64) -> Result<Point3, BowlError>;
    /// The point on this curve nearest to `point`, without extending the curve.
    fn closest_point_to(&self, point: Point3) -> Point3;

    fn start_point(&self) -> Result<Point3, BowlError> {
        self.point_at_param(self.start_param())
    }

    fn end_point(&self) -> Result<Point3, BowlError> {
        self.point_at_param(self.end_param())
    }
}

/// Ordered sequence of 3D points joined by straight segments.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point3>", into = "Vec<Point3>")]
pub struct Polyline3 {
    points: Vec<Point3>,
}

/// A simulated downhill trajectory: first point is the seed, last the sink or
/// boundary exit.
pub type DrainagePath = Polyline3;

impl Polyline3 {
    pub fn new(points: Vec<Point3>) -> Result<Self, BowlError> {
        let line = Polyline3 { points };
        line.validate_invariants()?;
        Ok(line)
    }

    #[inline]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false` for a validated polyline.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First vertex.
    pub fn first(&self) -> Point3 {
        self.points[0]
    }

    /// Last vertex.
    pub fn last(&self) -> Point3 {
        self.points[self.points.len() - 1]
    }

    /// Sum of segment lengths.
    pub fn length(&self) -> f64 {
        self.points
            .iter()
            .tuple_windows()
            .map(|(a, b)| a.distance_to(*b))
            .sum()
    }

    pub fn into_points(self) -> Vec<Point3> {
        self.points
    }
}

impl TryFrom<Vec<Point3>> for Polyline3 {
    type Error = BowlError;

    fn try_from(points: Vec<Point3>) -> Result<Self, Self::Error> {
        Polyline3::new(points)
    }
}

impl From<Polyline3> for Vec<Point3> {
    fn from(line: Polyline3) -> Self {
        line.points
    }
}

impl Curve for Polyline3 {
    fn start_param(&self) -> f64 {
        0.0
    }

    fn end_param(&self) -> f64 {
        (self.points.len() - 1) as f64
    }

    fn point_at_param(&self, param: f64) -> Result<Point3, BowlError> {
        let end = self.end_param();
        if !(0.0..=end).contains(&param) {
            return Err(BowlError::ParameterOutOfRange {
                param,
                start: 0.0,
                end,
            });
        }
        let k = param.floor() as usize;
        if k + 1 >= self.points.len() {
            return Ok(self.last());
        }
        Ok(self.points[k].lerp(self.points[k + 1], param - k as f64))
    }

    fn closest_point_to(&self, point: Point3) -> Point3 {
        if self.points.len() == 1 {
            return self.points[0];
        }
        let mut best = self.points[0];
        let mut best_dist = f64::MAX;
        for (a, b) in self.points.iter().copied().tuple_windows() {
            let candidate = closest_on_segment(a, b, point);
            let d = candidate.distance_to(point);
            if d < best_dist {
                best_dist = d;
                best = candidate;
            }
        }
        best
    }
}

/// Project `p` onto segment `[a, b]`, clamped to the segment.
/// Zero-length segments collapse to `a`.
fn closest_on_segment(a: Point3, b: Point3, p: Point3) -> Point3 {
    let ab = sub(b.to_array(), a.to_array());
    let len2 = dot(ab, ab);
    if len2 < EPS {
        return a;
    }
    let t = dot(sub(p.to_array(), a.to_array()), ab) / len2;
    a.lerp(b, t.clamp(0.0, 1.0))
}

impl DebugInvariants for Polyline3 {
    fn validate_invariants(&self) -> Result<(), BowlError> {
        if self.points.is_empty() {
            return Err(BowlError::EmptyPolyline);
        }
        if let Some((i, p)) = self.points.iter().enumerate().find(|(_, p)| !p.is_finite()) {
            return Err(BowlError::InvalidGeometry(format!(
                "polyline vertex {i} is not finite: {p}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(points: &[[f64; 3]]) -> Polyline3 {
        Polyline3::new(points.iter().copied().map(Point3::from).collect()).unwrap()
    }

    #[test]
    fn empty_polyline_rejected() {
        assert_eq!(Polyline3::new(Vec::new()), Err(BowlError::EmptyPolyline));
    }

    #[test]
    fn parameter_follows_vertices() {
        let l = line(&[[0.0, 0.0, 0.0], [10.0, 0.0, 0.0], [10.0, 10.0, 0.0]]);
        assert_eq!(l.start_param(), 0.0);
        assert_eq!(l.end_param(), 2.0);
        assert_eq!(l.point_at_param(0.5).unwrap(), Point3::new(5.0, 0.0, 0.0));
        assert_eq!(l.point_at_param(1.0).unwrap(), Point3::new(10.0, 0.0, 0.0));
        assert_eq!(l.point_at_param(1.25).unwrap(), Point3::new(10.0, 2.5, 0.0));
        assert_eq!(l.end_point().unwrap(), Point3::new(10.0, 10.0, 0.0));
        assert!(matches!(
            l.point_at_param(2.5),
            Err(BowlError::ParameterOutOfRange { .. })
        ));
        assert_eq!(l.length(), 20.0);
    }

    #[test]
    fn closest_point_clamps_to_segment() {
        let l = line(&[[0.0, 0.0, 0.0], [10.0, 0.0, 0.0]]);
        assert_eq!(
            l.closest_point_to(Point3::new(4.0, 3.0, 0.0)),
            Point3::new(4.0, 0.0, 0.0)
        );
        assert_eq!(
            l.closest_point_to(Point3::new(-5.0, 1.0, 0.0)),
            Point3::new(0.0, 0.0, 0.0)
        );
        assert_eq!(
            l.closest_point_to(Point3::new(12.0, 0.0, 7.0)),
            Point3::new(10.0, 0.0, 0.0)
        );
    }

    #[test]
    fn deserialization_validates() {
        assert!(serde_json::from_str::<Polyline3>("[]").is_err());
        let l: Polyline3 = serde_json::from_str(r#"[{"x":0.0,"y":0.0,"z":1.0}]"#).unwrap();
        assert_eq!(l.first(), Point3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn single_point_polyline_is_its_own_closest_point() {
        let l = line(&[[1.0, 2.0, 3.0]]);
        assert_eq!(l.end_param(), 0.0);
        assert_eq!(l.closest_point_to(Point3::ORIGIN), Point3::new(1.0, 2.0, 3.0));
    }
}
