//! # Tetrahedron Primitives
//!
//! A tetrahedron ABCD with a fixed face ordering, each face named by the
//! vertex it is opposite to:
//!
//! | face | vertices | opposite |
//! |------|----------|----------|
//! | 0    | B, C, D  | A        |
//! | 1    | A, C, D  | B        |
//! | 2    | A, B, D  | C        |
//! | 3    | A, B, C  | D        |
//!
//! Containment and closest-point queries use the opposite vertex as the
//! interior reference, so they do not depend on vertex winding.

use crate::triangle;
use glam::DVec3;

/// Vertex positions (0 = A .. 3 = D) making up each face, in face order.
pub const FACE_VERTICES: [[usize; 3]; 4] = [[1, 2, 3], [0, 2, 3], [0, 1, 3], [0, 1, 2]];

/// Returns true if `p` and `d` lie strictly on opposite sides of the plane
/// through `a`, `b`, `c`.
///
/// A point on the plane is not outside.
#[inline]
pub fn point_outside_of_plane(p: DVec3, a: DVec3, b: DVec3, c: DVec3, d: DVec3) -> bool {
    let n = (b - a).cross(c - a);
    (p - a).dot(n) * (d - a).dot(n) < 0.0
}

/// A tetrahedron given by its four vertex positions.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use tet_geometry::Tetrahedron;
///
/// let tet = Tetrahedron::new(DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Z);
/// assert!(tet.contains(DVec3::splat(0.1)));
/// assert!(!tet.contains(DVec3::splat(0.5)));
/// assert_eq!(tet.face(3), [DVec3::ZERO, DVec3::X, DVec3::Y]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tetrahedron {
    pub a: DVec3,
    pub b: DVec3,
    pub c: DVec3,
    pub d: DVec3,
}

impl Tetrahedron {
    pub fn new(a: DVec3, b: DVec3, c: DVec3, d: DVec3) -> Self {
        Self { a, b, c, d }
    }

    #[inline]
    pub fn vertices(&self) -> [DVec3; 4] {
        [self.a, self.b, self.c, self.d]
    }

    /// Returns the three vertices of face `index` (0..4).
    #[inline]
    pub fn face(&self, index: usize) -> [DVec3; 3] {
        let vertices = self.vertices();
        FACE_VERTICES[index].map(|v| vertices[v])
    }

    /// Returns the vertex opposite face `index`.
    #[inline]
    pub fn opposite(&self, index: usize) -> DVec3 {
        self.vertices()[index]
    }

    /// Returns true if `p` is outside the plane of face `index`.
    #[inline]
    pub fn is_outside_face(&self, index: usize, p: DVec3) -> bool {
        let [a, b, c] = self.face(index);
        point_outside_of_plane(p, a, b, c, self.opposite(index))
    }

    /// Returns true if `p` is inside or on the boundary of the tetrahedron.
    pub fn contains(&self, p: DVec3) -> bool {
        (0..4).all(|face| !self.is_outside_face(face, p))
    }

    /// Returns the point of the tetrahedron closest to `p`.
    ///
    /// Only faces whose plane `p` lies outside of are searched. A point
    /// outside no face plane is interior and is its own closest point.
    pub fn closest_point(&self, p: DVec3) -> DVec3 {
        let mut best = p;
        let mut best_dist2 = f64::MAX;
        for face in 0..4 {
            if !self.is_outside_face(face, p) {
                continue;
            }
            let [a, b, c] = self.face(face);
            let q = triangle::closest_point(p, a, b, c);
            let dist2 = q.distance_squared(p);
            if dist2 < best_dist2 {
                best_dist2 = dist2;
                best = q;
            }
        }
        best
    }

    /// Computes the unit normal of every face, each pointing away from the
    /// face's opposite vertex.
    ///
    /// Returns `None` for a degenerate tetrahedron (a zero-area face or a
    /// vertex lying in the plane of its opposite face).
    pub fn outward_normals(&self) -> Option<[DVec3; 4]> {
        let mut normals = [DVec3::ZERO; 4];
        for (face, normal) in normals.iter_mut().enumerate() {
            let [a, b, c] = self.face(face);
            let n = (b - a).cross(c - a).try_normalize()?;
            let side = n.dot(self.opposite(face) - a);
            if side == 0.0 {
                return None;
            }
            *normal = if side > 0.0 { -n } else { n };
        }
        Some(normals)
    }

    /// Six times the signed volume; positive for right-handed ABCD.
    pub fn signed_volume6(&self) -> f64 {
        (self.b - self.a).cross(self.c - self.a).dot(self.d - self.a)
    }

    /// Component-wise minimum of the four vertices.
    pub fn min(&self) -> DVec3 {
        self.a.min(self.b).min(self.c).min(self.d)
    }

    /// Component-wise maximum of the four vertices.
    pub fn max(&self) -> DVec3 {
        self.a.max(self.b).max(self.c).max(self.d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_tet() -> Tetrahedron {
        Tetrahedron::new(DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Z)
    }

    #[test]
    fn test_contains_interior_and_boundary() {
        let tet = unit_tet();
        assert!(tet.contains(DVec3::new(0.1, 0.2, 0.3)));
        // on a face and on a vertex
        assert!(tet.contains(DVec3::new(0.2, 0.2, 0.0)));
        assert!(tet.contains(DVec3::X));
        assert!(!tet.contains(DVec3::new(-0.01, 0.2, 0.2)));
        assert!(!tet.contains(DVec3::new(0.4, 0.4, 0.4)));
    }

    #[test]
    fn test_contains_is_winding_independent() {
        let left = Tetrahedron::new(DVec3::ZERO, DVec3::Y, DVec3::X, DVec3::Z);
        assert!(left.signed_volume6() < 0.0);
        assert!(left.contains(DVec3::splat(0.2)));
    }

    #[test]
    fn test_closest_point_interior_is_identity() {
        let p = DVec3::new(0.1, 0.1, 0.1);
        assert_eq!(unit_tet().closest_point(p), p);
    }

    #[test]
    fn test_closest_point_outside() {
        let tet = unit_tet();
        let q = tet.closest_point(DVec3::new(0.2, 0.2, -3.0));
        assert_relative_eq!(q, DVec3::new(0.2, 0.2, 0.0), epsilon = 1e-12);
        let q = tet.closest_point(DVec3::new(5.0, 0.0, 0.0));
        assert_relative_eq!(q, DVec3::X);
        let q = tet.closest_point(DVec3::splat(1.0));
        assert_relative_eq!(q, DVec3::splat(1.0 / 3.0), epsilon = 1e-12);
    }

    #[test]
    fn test_outward_normals_point_away_from_opposite_vertex() {
        let tet = unit_tet();
        let normals = tet.outward_normals().unwrap();
        assert_relative_eq!(normals[1], DVec3::NEG_X);
        assert_relative_eq!(normals[2], DVec3::NEG_Y);
        assert_relative_eq!(normals[3], DVec3::NEG_Z);
        assert_relative_eq!(normals[0], DVec3::ONE.normalize(), epsilon = 1e-12);
        for face in 0..4 {
            let [a, _, _] = tet.face(face);
            assert!(normals[face].dot(tet.opposite(face) - a) < 0.0);
        }
    }

    #[test]
    fn test_degenerate_normals() {
        let flat = Tetrahedron::new(DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::new(1.0, 1.0, 0.0));
        assert!(flat.outward_normals().is_none());
        let repeated = Tetrahedron::new(DVec3::ZERO, DVec3::ZERO, DVec3::Y, DVec3::Z);
        assert!(repeated.outward_normals().is_none());
    }

    #[test]
    fn test_bounds() {
        let tet = Tetrahedron::new(
            DVec3::new(-1.0, 2.0, 0.0),
            DVec3::new(3.0, 0.0, 1.0),
            DVec3::new(0.0, -2.0, 5.0),
            DVec3::new(1.0, 1.0, -4.0),
        );
        assert_eq!(tet.min(), DVec3::new(-1.0, -2.0, -4.0));
        assert_eq!(tet.max(), DVec3::new(3.0, 2.0, 5.0));
    }
}
