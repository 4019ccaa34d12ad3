//! # Error Types
//!
//! Errors for mesh construction and mesh queries.
//!
//! ## Error Policy
//!
//! - Construction is all-or-nothing: a malformed mesh yields an error and no
//!   mesh object
//! - "No containing element" and "no intersection" are ordinary results, not
//!   errors
//! - A lost particle that relocates to its own region is fatal; callers must
//!   stop transporting it rather than retry
//! - A NaN or infinite position or direction is fatal for the same reason

use glam::DVec3;
use thiserror::Error;

// =============================================================================
// CONSTRUCTION ERRORS
// =============================================================================

/// Errors that can occur while building a mesh from raw arrays.
///
/// ## Example
///
/// ```rust
/// use tet_mesh::{MeshData, MeshError, TetMesh};
///
/// match TetMesh::new(MeshData::default()) {
///     Err(MeshError::EmptySection { section }) => assert_eq!(section, "nodes"),
///     other => panic!("unexpected: {other:?}"),
/// }
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    /// One of the input lists is empty.
    #[error("No {section} in mesh data")]
    EmptySection {
        /// Name of the empty list
        section: &'static str,
    },

    /// Two nodes share a tag.
    #[error("Duplicate node tag: {tag}")]
    DuplicateNodeTag { tag: i64 },

    /// Two materials share a tag.
    #[error("Duplicate material tag: {tag}")]
    DuplicateMaterialTag { tag: i64 },

    /// An element references a node tag that does not exist.
    #[error("Element {element} references unknown node tag {node}")]
    UnknownNode { element: i64, node: i64 },

    /// An element references a material tag that does not exist.
    #[error("Element {element} references unknown material tag {material}")]
    UnknownMaterial { element: i64, material: i64 },

    /// An element has repeated nodes or zero volume.
    #[error("Element {element} is degenerate: {reason}")]
    DegenerateElement { element: i64, reason: &'static str },

    /// A face is shared by more than two elements.
    #[error("Non-manifold mesh: face {nodes:?} shared by {count} elements")]
    NonManifoldFace {
        /// Sorted node indices of the face
        nodes: [usize; 3],
        /// Number of elements sharing it
        count: usize,
    },

    /// Too many elements or nodes to index.
    #[error("Too many {what}: {count} (max: {max})")]
    TooLarge {
        what: &'static str,
        count: usize,
        max: usize,
    },

    /// An octree was requested over no elements.
    #[error("Cannot build an octree over an empty element set")]
    EmptyOctree,
}

// =============================================================================
// QUERY ERRORS
// =============================================================================

/// Errors that can occur while querying a mesh.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    /// The region index does not name an element.
    #[error("Region {region} out of bounds for mesh with {count} regions")]
    RegionOutOfRange { region: usize, count: usize },

    /// A particle outside its nominal element was relocated back into the
    /// same element. Continuing would loop forever; the mesh indices are
    /// most likely corrupt.
    #[error(
        "Infinite loop detected in region {region}: position {position:?}, direction {direction:?}"
    )]
    LostParticle {
        region: usize,
        position: DVec3,
        direction: DVec3,
    },

    /// A query received a NaN or infinite position or direction.
    #[error(
        "Non-finite particle state in region {region:?}: position {position:?}, direction {direction:?}"
    )]
    NonFinite {
        region: Option<usize>,
        position: DVec3,
        /// Absent for nearest-boundary queries
        direction: Option<DVec3>,
    },
}

impl QueryError {
    /// Returns true for errors after which the caller must not continue
    /// transporting the particle.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            QueryError::LostParticle { .. } | QueryError::NonFinite { .. }
        )
    }
}

// =============================================================================
// RESULT TYPE ALIASES
// =============================================================================

/// Result type alias for mesh construction.
pub type MeshResult<T> = Result<T, MeshError>;

/// Result type alias for mesh queries.
pub type QueryResult<T> = Result<T, QueryError>;

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MeshError::UnknownNode { element: 7, node: 42 };
        assert!(err.to_string().contains("42"));

        let err = MeshError::NonManifoldFace {
            nodes: [1, 2, 3],
            count: 3,
        };
        assert!(err.to_string().contains("Non-manifold"));

        let err = QueryError::RegionOutOfRange { region: 9, count: 2 };
        assert!(err.to_string().contains("out of bounds"));
    }

    #[test]
    fn test_fatal_errors() {
        let lost = QueryError::LostParticle {
            region: 0,
            position: DVec3::ZERO,
            direction: DVec3::X,
        };
        assert!(lost.is_fatal());
        let poisoned = QueryError::NonFinite {
            region: None,
            position: DVec3::new(f64::NAN, 0.0, 0.0),
            direction: None,
        };
        assert!(poisoned.is_fatal());
        assert!(poisoned.to_string().contains("Non-finite"));
        assert!(!QueryError::RegionOutOfRange { region: 1, count: 1 }.is_fatal());
    }

    /// Test error types are Send + Sync.
    #[test]
    fn test_errors_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MeshError>();
        assert_send_sync::<QueryError>();
    }
}
