//! Geometry primitives for terrain-bowls.
//!
//! Points, the equal-point tolerance, and the parametric curves that drainage
//! paths are represented as.

pub mod point;
pub mod polyline;

pub use point::{Point3, Tolerance};
pub use polyline::{Curve, DrainagePath, Polyline3};
