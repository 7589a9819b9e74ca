//! Detection algorithms.

pub mod drainage;
pub mod local_minimum;
pub mod proximity;
pub mod steepest_descent;

pub use drainage::{DrainagePathTracer, DrainageScope, DrainageSimulator};
pub use local_minimum::LocalMinimumDetector;
pub use proximity::{ClosestApproach, CurveProximityFinder};
pub use steepest_descent::SteepestDescentSimulator;
