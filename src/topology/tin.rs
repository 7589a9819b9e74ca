//! `TinMesh`: in-memory triangulated irregular network.
//!
//! The mesh is assembled once through [`TinMeshBuilder`] and is read-only
//! afterwards. Triangle sides shared by two triangles become a single edge.
//! Vertex-to-edge adjacency is a derived CSR index (`offsets`/`incident`), not
//! an ownership structure.

use hashbrown::HashMap;

use crate::bowl_error::BowlError;
use crate::debug_invariants::DebugInvariants;
use crate::geometry::point::Point3;
use crate::topology::edge::{Edge, EdgeId};
use crate::topology::mesh::MeshModel;
use crate::topology::validation::validate_adjacency;
use crate::topology::vertex::VertexId;

/// Immutable triangulated surface.
#[derive(Clone, Debug)]
pub struct TinMesh {
    positions: Vec<Point3>,
    edges: Vec<Edge>,
    triangles: Vec<[VertexId; 3]>,
    /// CSR offsets into `incident` for each vertex.
    offsets: Vec<usize>,
    /// Incident edges, grouped by vertex.
    incident: Vec<EdgeId>,
    boundary: Vec<bool>,
    /// Exact position -> first vertex placed there.
    locator: HashMap<[u64; 3], VertexId>,
}

impl TinMesh {
    pub fn builder() -> TinMeshBuilder {
        TinMeshBuilder::default()
    }

    /// Build from vertex positions and triangles given as position indices.
    pub fn from_triangles<P>(positions: P, triangles: &[[usize; 3]]) -> Result<Self, BowlError>
    where
        P: IntoIterator<Item = Point3>,
    {
        let mut b = TinMeshBuilder::default();
        for p in positions {
            b.add_vertex(p)?;
        }
        for t in triangles {
            b.add_triangle(
                VertexId::from_index(t[0])?,
                VertexId::from_index(t[1])?,
                VertexId::from_index(t[2])?,
            )?;
        }
        b.build()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn triangles(&self) -> &[[VertexId; 3]] {
        &self.triangles
    }

    #[inline]
    pub fn positions(&self) -> &[Point3] {
        &self.positions
    }

    fn check_vertex(&self, v: VertexId) -> Result<(), BowlError> {
        if v.index() < self.positions.len() {
            Ok(())
        } else {
            Err(BowlError::VertexOutOfRange {
                vertex: v,
                len: self.positions.len(),
            })
        }
    }
}

impl MeshModel for TinMesh {
    type VertexIter<'a> = std::iter::Map<std::ops::Range<u32>, fn(u32) -> VertexId>;
    type EdgeIter<'a> = std::iter::Copied<std::slice::Iter<'a, EdgeId>>;

    fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    fn vertices(&self) -> Self::VertexIter<'_> {
        // The builder caps the vertex count at u32::MAX.
        (0..self.positions.len() as u32).map(VertexId::new as fn(u32) -> VertexId)
    }

    fn position(&self, v: VertexId) -> Result<Point3, BowlError> {
        self.check_vertex(v)?;
        Ok(self.positions[v.index()])
    }

    fn incident_edges(&self, v: VertexId) -> Result<Self::EdgeIter<'_>, BowlError> {
        self.check_vertex(v)?;
        let i = v.index();
        Ok(self.incident[self.offsets[i]..self.offsets[i + 1]]
            .iter()
            .copied())
    }

    fn edge(&self, e: EdgeId) -> Result<Edge, BowlError> {
        self.edges
            .get(e.index())
            .copied()
            .ok_or(BowlError::EdgeOutOfRange {
                edge: e,
                len: self.edges.len(),
            })
    }

    fn is_boundary(&self, v: VertexId) -> bool {
        self.boundary.get(v.index()).copied().unwrap_or(false)
    }

    fn vertex_at(&self, p: Point3) -> Result<Option<VertexId>, BowlError> {
        Ok(self.locator.get(&p.bits_key()).copied())
    }
}

impl DebugInvariants for TinMesh {
    fn validate_invariants(&self) -> Result<(), BowlError> {
        if self.offsets.len() != self.positions.len() + 1 {
            return Err(BowlError::InvalidGeometry(format!(
                "adjacency offsets cover {} vertices, mesh has {}",
                self.offsets.len().saturating_sub(1),
                self.positions.len()
            )));
        }
        if let Some((i, p)) = self
            .positions
            .iter()
            .enumerate()
            .find(|(_, p)| !p.is_finite())
        {
            return Err(BowlError::InvalidGeometry(format!(
                "vertex {i} has a non-finite position {p}"
            )));
        }
        validate_adjacency(self)
    }
}

/// Incremental constructor for [`TinMesh`].
#[derive(Clone, Debug, Default)]
pub struct TinMeshBuilder {
    positions: Vec<Point3>,
    triangles: Vec<[VertexId; 3]>,
    /// Edge key -> (edge id, number of triangles using it).
    edge_index: HashMap<(VertexId, VertexId), (EdgeId, u32)>,
    edges: Vec<Edge>,
}

impl TinMeshBuilder {
    /// Add a vertex and return its handle.
    pub fn add_vertex(&mut self, position: Point3) -> Result<VertexId, BowlError> {
        if !position.is_finite() {
            return Err(BowlError::InvalidGeometry(format!(
                "non-finite vertex position {position}"
            )));
        }
        let id = VertexId::from_index(self.positions.len())?;
        self.positions.push(position);
        Ok(id)
    }

    /// Add a triangle; its three sides become (or reuse) edges.
    pub fn add_triangle(
        &mut self,
        a: VertexId,
        b: VertexId,
        c: VertexId,
    ) -> Result<&mut Self, BowlError> {
        for v in [a, b, c] {
            self.check_vertex(v)?;
        }
        if a == b || b == c || a == c {
            return Err(BowlError::InvalidGeometry(format!(
                "triangle ({a}, {b}, {c}) repeats a vertex"
            )));
        }
        for (u, v) in [(a, b), (b, c), (c, a)] {
            let (_, uses) = self.insert_edge(u, v)?;
            *uses += 1;
        }
        self.triangles.push([a, b, c]);
        Ok(self)
    }

    /// Add a bare edge not backed by any triangle.
    pub fn add_edge(&mut self, a: VertexId, b: VertexId) -> Result<EdgeId, BowlError> {
        self.check_vertex(a)?;
        self.check_vertex(b)?;
        if a == b {
            return Err(BowlError::InvalidGeometry(format!(
                "edge ({a}, {b}) connects a vertex to itself"
            )));
        }
        let (id, _) = self.insert_edge(a, b)?;
        Ok(*id)
    }

    fn check_vertex(&self, v: VertexId) -> Result<(), BowlError> {
        if v.index() < self.positions.len() {
            Ok(())
        } else {
            Err(BowlError::VertexOutOfRange {
                vertex: v,
                len: self.positions.len(),
            })
        }
    }

    fn insert_edge(
        &mut self,
        a: VertexId,
        b: VertexId,
    ) -> Result<(&mut EdgeId, &mut u32), BowlError> {
        let edge = Edge::new(a, b);
        let next = u32::try_from(self.edges.len())
            .map_err(|_| BowlError::InvalidGeometry("edge count exceeds u32".into()))?;
        let edges = &mut self.edges;
        let (id, uses) = self.edge_index.entry(edge.key()).or_insert_with(|| {
            edges.push(edge);
            (EdgeId::new(next), 0)
        });
        Ok((id, uses))
    }

    /// Freeze into an immutable mesh.
    pub fn build(self) -> Result<TinMesh, BowlError> {
        let n = self.positions.len();
        let mut degree = vec![0usize; n];
        for e in &self.edges {
            degree[e.v1.index()] += 1;
            degree[e.v2.index()] += 1;
        }
        let mut offsets = Vec::with_capacity(n + 1);
        offsets.push(0);
        for d in &degree {
            let last = offsets[offsets.len() - 1];
            offsets.push(last + d);
        }
        let mut cursor = offsets[..n].to_vec();
        let mut incident = vec![EdgeId::new(0); offsets[n]];
        for (i, e) in self.edges.iter().enumerate() {
            let id = EdgeId::new(i as u32);
            for v in [e.v1, e.v2] {
                incident[cursor[v.index()]] = id;
                cursor[v.index()] += 1;
            }
        }

        let mut boundary = vec![false; n];
        for (id, uses) in self.edge_index.values() {
            if *uses == 1 {
                let e = self.edges[id.index()];
                boundary[e.v1.index()] = true;
                boundary[e.v2.index()] = true;
            }
        }

        let mut locator = HashMap::with_capacity(n);
        for (i, p) in self.positions.iter().enumerate() {
            locator.entry(p.bits_key()).or_insert(VertexId::new(i as u32));
        }

        let mesh = TinMesh {
            positions: self.positions,
            edges: self.edges,
            triangles: self.triangles,
            offsets,
            incident,
            boundary,
            locator,
        };
        mesh.debug_assert_invariants();
        log::debug!(
            "built TIN mesh: {} vertices, {} edges, {} triangles",
            mesh.positions.len(),
            mesh.edges.len(),
            mesh.triangles.len()
        );
        Ok(mesh)
    }
}
