//! # Config Crate
//!
//! Centralized numeric policy for the tetrahedral mesh query engine.
//! Tolerances, octree thresholds and size limits are defined here so that
//! the geometry and mesh crates never carry bare literals.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{Tolerances, RAY_TRIANGLE_EPSILON};
//!
//! let det: f64 = 1e-11;
//! let parallel = det.abs() < RAY_TRIANGLE_EPSILON;
//! assert!(parallel);
//!
//! let tol = Tolerances::default();
//! assert!(tol.half_boundary > 0.0);
//! ```

pub mod constants;
