#![cfg_attr(docsrs, feature(doc_cfg))]
//! # terrain-bowls
//!
//! terrain-bowls locates depressions ("bowls") on triangulated terrain surfaces:
//! points where surface water would pool. Two independent strategies are
//! provided:
//!
//! - **Topological**: every mesh vertex with no directly connected neighbor at a
//!   strictly lower elevation ([`LocalMinimumDetector`](algs::LocalMinimumDetector)).
//! - **Drainage convergence**: drainage is simulated from every vertex; when the
//!   drop splits into two or more downhill paths, the sampled closest approach of
//!   the first two is a bowl unless it sits at the seed itself
//!   ([`DrainagePathTracer`](algs::DrainagePathTracer)).
//!
//! ## Backends
//!
//! The engine only reads surfaces through the [`MeshModel`](topology::MeshModel)
//! trait and drains them through [`DrainageSimulator`](algs::DrainageSimulator),
//! so any geometry backend can plug in. [`TinMesh`](topology::TinMesh) and
//! [`SteepestDescentSimulator`](algs::SteepestDescentSimulator) are the in-crate
//! implementations.
//!
//! ## Tolerance
//!
//! A single equal-point [`Tolerance`](geometry::Tolerance) is passed explicitly
//! to every operation. There is no global tolerance.
//!
//! ## Features
//! - `rayon`: parallel topological pass (`LocalMinimumDetector::detect_par`).
//! - `strict-invariants` / `check-invariants`: keep invariant assertions in
//!   release builds.
//!
//! ```rust
//! use terrain_bowls::prelude::*;
//!
//! let rim = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];
//! let mut positions: Vec<Point3> = rim.iter().map(|&(x, y)| Point3::new(x, y, 10.0)).collect();
//! positions.push(Point3::new(0.0, 0.0, 0.0));
//! let mesh = TinMesh::from_triangles(positions, &[[0, 1, 4], [1, 2, 4], [2, 3, 4], [3, 0, 4]])?;
//!
//! let bowls = LocalMinimumDetector::new(Tolerance::default()).detect(&mesh)?;
//! assert_eq!(bowls.len(), 1);
//! assert_eq!(bowls[0].position, Point3::new(0.0, 0.0, 0.0));
//! # Ok::<(), terrain_bowls::bowl_error::BowlError>(())
//! ```

pub mod algs;
pub mod bowl_error;
pub mod config;
pub mod debug_invariants;
pub mod geometry;
pub mod host;
pub mod report;
pub mod topology;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::drainage::{DrainagePathTracer, DrainageScope, DrainageSimulator};
    pub use crate::algs::local_minimum::LocalMinimumDetector;
    pub use crate::algs::proximity::{ClosestApproach, CurveProximityFinder};
    pub use crate::algs::steepest_descent::SteepestDescentSimulator;
    pub use crate::bowl_error::BowlError;
    pub use crate::config::{DetectionConfig, SteepestDescentConfig};
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::geometry::point::{Point3, Tolerance};
    pub use crate::geometry::polyline::{Curve, DrainagePath, Polyline3};
    pub use crate::host::{
        EditSession, MarkerLayer, MeshCatalog, RunSummary, SurfaceCatalog, find_bowls_by_vertex,
        find_bowls_by_waterdrop,
    };
    pub use crate::report::{BowlPoint, BowlReporter, DetectionMethod};
    pub use crate::topology::edge::{Edge, EdgeId};
    pub use crate::topology::mesh::MeshModel;
    pub use crate::topology::tin::{TinMesh, TinMeshBuilder};
    pub use crate::topology::vertex::VertexId;
}
