#![allow(dead_code)]
use std::cell::Cell;

use terrain_bowls::prelude::*;

pub fn pt(x: f64, y: f64, z: f64) -> Point3 {
    Point3::new(x, y, z)
}

pub fn line(points: &[[f64; 3]]) -> Polyline3 {
    Polyline3::new(points.iter().copied().map(Point3::from).collect()).unwrap()
}

/// Four rim vertices at z = 10 around a center vertex at z = 0; each rim
/// vertex is edged to the center and to its two rim neighbors.
pub fn bowl_mesh() -> TinMesh {
    let positions = [
        pt(-1.0, -1.0, 10.0),
        pt(1.0, -1.0, 10.0),
        pt(1.0, 1.0, 10.0),
        pt(-1.0, 1.0, 10.0),
        pt(0.0, 0.0, 0.0),
    ];
    TinMesh::from_triangles(positions, &[[0, 1, 4], [1, 2, 4], [2, 3, 4], [3, 0, 4]]).unwrap()
}

/// Structured grid of `nx * ny` vertices, two triangles per cell, elevation
/// from `z(i, j)`.
pub fn grid_mesh(nx: usize, ny: usize, z: impl Fn(usize, usize) -> f64) -> TinMesh {
    let mut positions = Vec::with_capacity(nx * ny);
    for j in 0..ny {
        for i in 0..nx {
            positions.push(pt(i as f64, j as f64, z(i, j)));
        }
    }
    let mut triangles = Vec::new();
    for j in 0..ny - 1 {
        for i in 0..nx - 1 {
            let a = j * nx + i;
            let b = a + 1;
            let c = a + nx + 1;
            let d = a + nx;
            triangles.push([a, b, c]);
            triangles.push([a, c, d]);
        }
    }
    TinMesh::from_triangles(positions, &triangles).unwrap()
}

/// Order-agnostic comparison of bowl positions within `tol`.
pub fn assert_same_positions(got: &[BowlPoint], want: &[Point3], tol: f64) {
    assert_eq!(
        got.len(),
        want.len(),
        "count mismatch\n got={:?}\nwant={:?}",
        got,
        want
    );
    for w in want {
        assert!(
            got.iter().any(|g| g.position.distance_to(*w) <= tol),
            "missing {w}\n got={got:?}"
        );
    }
}

/// Simulator that hands out the same paths for every start and counts
/// acquisitions and releases.
pub struct ScriptedSimulator<P> {
    pub paths: Vec<P>,
    pub created: Cell<usize>,
    pub released: Cell<usize>,
}

impl<P> ScriptedSimulator<P> {
    pub fn new(paths: Vec<P>) -> Self {
        Self {
            paths,
            created: Cell::new(0),
            released: Cell::new(0),
        }
    }
}

impl<M: MeshModel + ?Sized, P: Curve + Clone> DrainageSimulator<M> for ScriptedSimulator<P> {
    type Path = P;

    fn simulate_drainage(&self, _mesh: &M, _start: Point3) -> Result<Vec<P>, BowlError> {
        self.created.set(self.created.get() + self.paths.len());
        Ok(self.paths.clone())
    }

    fn release(&self, paths: Vec<P>) {
        self.released.set(self.released.get() + paths.len());
    }
}
