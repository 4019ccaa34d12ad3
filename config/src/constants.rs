//! # Configuration Constants
//!
//! Centralized numeric policy for the tetrahedral mesh query engine. Every
//! tolerance used by the geometry routines, the octree leaf thresholds and the
//! mesh size limits are defined here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Transport**: Boundary tolerance applied to step distances
//! - **Octree**: Leaf size thresholds
//! - **Limits**: Maximum element and node counts

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Relative tolerance for approximate equality and zero-length vector tests.
///
/// Two values `a` and `b` are approximately equal when
/// `|a - b| <= ZERO_VECTOR_EPSILON * (|a| + |b| + 1)`.
///
/// # Example
///
/// ```rust
/// use config::constants::ZERO_VECTOR_EPSILON;
///
/// let (a, b) = (1.0_f64, 1.0 + 1e-10);
/// assert!((a - b).abs() <= ZERO_VECTOR_EPSILON * (a.abs() + b.abs() + 1.0));
/// ```
pub const ZERO_VECTOR_EPSILON: f64 = 1e-8;

/// Padding added on every side of an octree root box.
///
/// Elements touching the global bounds would otherwise sit exactly on the
/// half-open upper face of the root box and be classified as outside.
pub const BOUNDING_BOX_PADDING: f64 = 1e-8;

/// Determinant threshold below which a ray is parallel to a triangle plane.
///
/// Also the minimum approach rate `-dot(v, n)` for single-sided intersections.
///
/// # Example
///
/// ```rust
/// use config::constants::RAY_TRIANGLE_EPSILON;
///
/// let det = 1e-12_f64;
/// assert!(det.abs() < RAY_TRIANGLE_EPSILON);
/// ```
pub const RAY_TRIANGLE_EPSILON: f64 = 1e-10;

/// Ray direction components smaller than this are treated as parallel to a
/// bounding box slab.
pub const RAY_SLAB_EPSILON: f64 = 1e-8;

/// Relative margin of the box/triangle separating axis test. A triangle
/// must clear the box by more than this times the box's largest half-extent
/// before it counts as separated.
pub const SEPARATING_AXIS_EPSILON: f64 = 1e-8;

// =============================================================================
// TRANSPORT CONSTANTS
// =============================================================================

/// Half of the boundary thickness used by step distance calculations.
///
/// A boundary crossing closer than this is reported at exactly zero distance,
/// so a particle sitting on a face is considered to be on the boundary.
///
/// # Example
///
/// ```rust
/// use config::constants::HALF_BOUNDARY_TOLERANCE;
///
/// let dist = 1e-12_f64;
/// let snapped = if dist <= HALF_BOUNDARY_TOLERANCE { 0.0 } else { dist };
/// assert_eq!(snapped, 0.0);
/// ```
pub const HALF_BOUNDARY_TOLERANCE: f64 = 5e-11;

// =============================================================================
// OCTREE CONSTANTS
// =============================================================================

/// An octree node over all elements becomes a leaf below this many elements.
///
/// Value from Furuta et al., section 2.1.1.
pub const VOLUME_TREE_LEAF_SIZE: usize = 200;

/// An octree node over boundary elements becomes a leaf below this many
/// elements.
pub const SURFACE_TREE_LEAF_SIZE: usize = 100;

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Maximum number of elements in a mesh (exclusive).
///
/// # Example
///
/// ```rust
/// use config::constants::MAX_ELEMENTS;
///
/// let element_count = 1_000_000;
/// assert!(element_count < MAX_ELEMENTS);
/// ```
pub const MAX_ELEMENTS: usize = i32::MAX as usize;

/// Maximum number of nodes in a mesh (exclusive).
pub const MAX_NODES: usize = i32::MAX as usize;

// =============================================================================
// TOLERANCE SNAPSHOT
// =============================================================================

/// Validated set of the tunable values a mesh is built with.
///
/// The precision constants above are fixed; these three are the knobs a host
/// simulation is allowed to turn.
///
/// # Example
///
/// ```rust
/// use config::constants::{Tolerances, HALF_BOUNDARY_TOLERANCE};
///
/// let tol = Tolerances::default();
/// assert_eq!(tol.half_boundary, HALF_BOUNDARY_TOLERANCE);
///
/// let custom = Tolerances::new(1e-9, 64, 32).unwrap();
/// assert_eq!(custom.volume_leaf_size, 64);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    /// Step distances at or below this are snapped to zero.
    pub half_boundary: f64,
    /// Leaf threshold of the volume octree.
    pub volume_leaf_size: usize,
    /// Leaf threshold of the surface octree.
    pub surface_leaf_size: usize,
}

impl Tolerances {
    /// Builds a tolerance set, rejecting negative or non-finite boundary
    /// tolerances and zero leaf sizes.
    pub fn new(
        half_boundary: f64,
        volume_leaf_size: usize,
        surface_leaf_size: usize,
    ) -> Result<Self, ToleranceError> {
        if !half_boundary.is_finite() || half_boundary < 0.0 {
            return Err(ToleranceError::InvalidBoundaryTolerance(half_boundary));
        }
        if volume_leaf_size == 0 {
            return Err(ToleranceError::InvalidLeafSize(volume_leaf_size));
        }
        if surface_leaf_size == 0 {
            return Err(ToleranceError::InvalidLeafSize(surface_leaf_size));
        }
        Ok(Self {
            half_boundary,
            volume_leaf_size,
            surface_leaf_size,
        })
    }

    /// Returns a copy using the given full boundary thickness, of which half
    /// is applied on each side of a face.
    pub fn with_boundary_tolerance(self, boundary_tolerance: f64) -> Result<Self, ToleranceError> {
        Self::new(
            boundary_tolerance / 2.0,
            self.volume_leaf_size,
            self.surface_leaf_size,
        )
    }
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            half_boundary: HALF_BOUNDARY_TOLERANCE,
            volume_leaf_size: VOLUME_TREE_LEAF_SIZE,
            surface_leaf_size: SURFACE_TREE_LEAF_SIZE,
        }
    }
}

/// Error returned when invalid tolerance values are provided.
#[derive(Debug, PartialEq)]
pub enum ToleranceError {
    /// Boundary tolerance is negative, NaN or infinite.
    InvalidBoundaryTolerance(f64),
    /// An octree leaf threshold of zero would never terminate subdivision.
    InvalidLeafSize(usize),
}

impl fmt::Display for ToleranceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToleranceError::InvalidBoundaryTolerance(value) => {
                write!(f, "boundary tolerance must be finite and non-negative: {value}")
            }
            ToleranceError::InvalidLeafSize(value) => {
                write!(f, "octree leaf size must be positive: {value}")
            }
        }
    }
}

impl std::error::Error for ToleranceError {}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Checks if two values are equal within the relative `ZERO_VECTOR_EPSILON`.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_eq;
///
/// assert!(approx_eq(1.0, 1.0 + 1e-10));
/// assert!(!approx_eq(1.0, 1.1));
/// ```
#[inline]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= ZERO_VECTOR_EPSILON * (a.abs() + b.abs() + 1.0)
}
