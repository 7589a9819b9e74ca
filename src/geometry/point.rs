//! 3D points and the equal-point tolerance.
//!
//! Elevation is the `z` coordinate throughout the crate. Plan-view helpers
//! (`plan_distance_to`) ignore it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::bowl_error::BowlError;

/// Double-precision position in 3D space.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const ORIGIN: Point3 = Point3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance_to(self, other: Point3) -> f64 {
        norm(sub(other.to_array(), self.to_array()))
    }

    /// Horizontal (x, y) distance to `other`.
    #[inline]
    pub fn plan_distance_to(self, other: Point3) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Linear interpolation: `t = 0` gives `self`, `t = 1` gives `other`.
    #[inline]
    pub fn lerp(self, other: Point3, t: f64) -> Point3 {
        Point3::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
            self.z + (other.z - self.z) * t,
        )
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Hashable key equal for exactly equal coordinates (`-0.0` and `0.0` agree).
    pub(crate) fn bits_key(self) -> [u64; 3] {
        [self.x, self.y, self.z].map(|c| (c + 0.0).to_bits())
    }
}

impl From<[f64; 3]> for Point3 {
    fn from(v: [f64; 3]) -> Self {
        Point3::new(v[0], v[1], v[2])
    }
}

impl From<Point3> for [f64; 3] {
    fn from(p: Point3) -> Self {
        p.to_array()
    }
}

impl fmt::Display for Point3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

#[inline]
pub(crate) fn sub(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

#[inline]
pub(crate) fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[inline]
pub(crate) fn norm(a: [f64; 3]) -> f64 {
    dot(a, a).sqrt()
}

/// Distance below which two points are the same physical point.
///
/// Passed explicitly to every detector; there is no process-wide tolerance.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Tolerance(f64);

impl Tolerance {
    /// Default equal-point distance of the host CAD environment.
    pub const DEFAULT_EQUAL_POINT: f64 = 1e-10;

    pub fn new(equal_point: f64) -> Result<Self, BowlError> {
        if !equal_point.is_finite() || equal_point < 0.0 {
            return Err(BowlError::InvalidTolerance(equal_point));
        }
        Ok(Tolerance(equal_point))
    }

    #[inline]
    pub fn equal_point(self) -> f64 {
        self.0
    }

    /// `true` if `a` and `b` are closer than the tolerance.
    #[inline]
    pub fn is_equal_point(self, a: Point3, b: Point3) -> bool {
        a.distance_to(b) < self.0
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Tolerance(Self::DEFAULT_EQUAL_POINT)
    }
}

impl TryFrom<f64> for Tolerance {
    type Error = BowlError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Tolerance::new(value)
    }
}

impl From<Tolerance> for f64 {
    fn from(t: Tolerance) -> Self {
        t.0
    }
}
