//! # Tet Mesh
//!
//! Spatial queries over an immutable tetrahedral mesh, for driving particle
//! transport through a geometry built from tetrahedra.
//!
//! ## Architecture
//!
//! ```text
//! MeshData (tags from a mesh file parser)
//!       ↓
//! MeshStore (dense indices, neighbours, boundary faces, normals)
//!       ↓
//! Octree (all elements) + Octree (boundary elements)
//!       ↓
//! TetMesh → TransportGeometry queries
//! ```
//!
//! ## Queries
//!
//! - **Point location**: which element holds a point
//! - **Nearest boundary**: a lower bound on the distance to the nearest
//!   region boundary, from inside or outside the mesh
//! - **Step distance**: distance along a direction to the next boundary,
//!   with the region, material and surface normal on the other side
//!
//! ## Usage
//!
//! ```rust
//! use glam::DVec3;
//! use tet_mesh::{ElementRecord, MaterialRecord, MeshData, NodeRecord, TetMesh, TransportGeometry};
//!
//! let data = MeshData {
//!     nodes: vec![
//!         NodeRecord::new(1, 0.0, 0.0, 0.0),
//!         NodeRecord::new(2, 1.0, 0.0, 0.0),
//!         NodeRecord::new(3, 0.0, 1.0, 0.0),
//!         NodeRecord::new(4, 0.0, 0.0, 1.0),
//!     ],
//!     elements: vec![ElementRecord::new(1, 1, [1, 2, 3, 4])],
//!     materials: vec![MaterialRecord::new(1, "water")],
//! };
//! let mesh = TetMesh::new(data)?;
//!
//! // a particle outside the mesh heading towards it
//! let step = mesh.step_distance(None, DVec3::new(0.2, 0.2, -1.0), DVec3::Z, 10.0)?;
//! assert_eq!(step.region, Some(0));
//! assert_eq!(mesh.material_of(0)?, 0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod input;
pub mod mesh;
pub mod neighbours;
pub mod octree;
pub mod query;
pub mod store;

#[cfg(test)]
mod fixtures;

pub use config::constants::Tolerances;
pub use error::{MeshError, MeshResult, QueryError, QueryResult};
pub use input::{ElementRecord, MaterialRecord, MeshData, NodeRecord};
pub use mesh::{MeshSummary, TetMesh};
pub use octree::OctreeStats;
pub use query::{Crossing, Step, TransportGeometry};
