//! # Mesh Input Records
//!
//! Plain records handed over by a mesh file parser. Tags are the parser's
//! identifiers; the mesh replaces them with dense indices at construction.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// A mesh node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub tag: i64,
    pub position: DVec3,
}

impl NodeRecord {
    pub fn new(tag: i64, x: f64, y: f64, z: f64) -> Self {
        Self {
            tag,
            position: DVec3::new(x, y, z),
        }
    }
}

/// A tetrahedral element: its material tag and four node tags A, B, C, D.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementRecord {
    pub tag: i64,
    pub material: i64,
    pub nodes: [i64; 4],
}

impl ElementRecord {
    pub fn new(tag: i64, material: i64, nodes: [i64; 4]) -> Self {
        Self { tag, material, nodes }
    }
}

/// A named material group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialRecord {
    pub tag: i64,
    pub name: String,
}

impl MaterialRecord {
    pub fn new(tag: i64, name: impl Into<String>) -> Self {
        Self {
            tag,
            name: name.into(),
        }
    }
}

/// Everything needed to build a mesh.
///
/// # Example
///
/// ```rust
/// use tet_mesh::{ElementRecord, MaterialRecord, MeshData, NodeRecord};
///
/// let data = MeshData {
///     nodes: vec![
///         NodeRecord::new(1, 0.0, 0.0, 0.0),
///         NodeRecord::new(2, 1.0, 0.0, 0.0),
///         NodeRecord::new(3, 0.0, 1.0, 0.0),
///         NodeRecord::new(4, 0.0, 0.0, 1.0),
///     ],
///     elements: vec![ElementRecord::new(1, 10, [1, 2, 3, 4])],
///     materials: vec![MaterialRecord::new(10, "water")],
/// };
/// assert_eq!(data.elements.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshData {
    pub nodes: Vec<NodeRecord>,
    pub elements: Vec<ElementRecord>,
    pub materials: Vec<MaterialRecord>,
}
