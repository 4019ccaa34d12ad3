//! # Tet Geometry
//!
//! Stateless geometry primitives used by the tetrahedral mesh query engine.
//! All calculations use `glam::DVec3` (f64).
//!
//! ## Primitives
//!
//! - **Triangles**: closest point (Ericson's Voronoi region test), ray
//!   intersection (double-sided and single-sided Möller–Trumbore)
//! - **Tetrahedra**: point containment, closest point, face normals
//! - **Boxes**: slab ray intersection, separating axis triangle overlap,
//!   octant subdivision
//!
//! ## Example
//!
//! ```rust
//! use glam::DVec3;
//! use tet_geometry::triangle::ray_intersect_exterior;
//!
//! let (a, b, c) = (DVec3::ZERO, DVec3::X, DVec3::Y);
//! let p = DVec3::new(0.25, 0.25, 1.0);
//! let dist = ray_intersect_exterior(p, DVec3::NEG_Z, a, b, c);
//! assert_eq!(dist, Some(1.0));
//! ```

pub mod aabb;
pub mod numeric;
pub mod tetrahedron;
pub mod triangle;

pub use aabb::{Aabb, RayHit};
pub use tetrahedron::Tetrahedron;
