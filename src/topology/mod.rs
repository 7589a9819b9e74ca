//! Mesh topology: vertex and edge handles, the read-only mesh capability, and
//! the in-memory triangulated surface.

pub mod edge;
pub mod mesh;
pub mod tin;
pub mod validation;
pub mod vertex;

pub use edge::{Edge, EdgeId};
pub use mesh::MeshModel;
pub use tin::{TinMesh, TinMeshBuilder};
pub use vertex::VertexId;
