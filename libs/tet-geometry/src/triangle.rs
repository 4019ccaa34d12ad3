//! # Triangle Primitives
//!
//! Closest-point and ray intersection routines on a single triangle.
//!
//! The closest-point routine is Ericson's Voronoi region test from
//! "Real-Time Collision Detection", section 5.1.5. The ray routines are
//! Möller–Trumbore, in a double-sided form for rays arriving from outside
//! the mesh and a single-sided form for rays leaving an element.

use config::constants::RAY_TRIANGLE_EPSILON;
use glam::DVec3;

/// Returns the point on triangle `abc` closest to `p`.
///
/// Handles the three vertex regions, the three edge regions and the face
/// interior. Near-zero-area triangles are not treated specially.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use tet_geometry::triangle::closest_point;
///
/// let q = closest_point(DVec3::new(0.2, 0.2, 5.0), DVec3::ZERO, DVec3::X, DVec3::Y);
/// assert!(q.distance(DVec3::new(0.2, 0.2, 0.0)) < 1e-12);
/// ```
pub fn closest_point(p: DVec3, a: DVec3, b: DVec3, c: DVec3) -> DVec3 {
    let ab = b - a;
    let ac = c - a;

    // vertex region A
    let ap = p - a;
    let d1 = ab.dot(ap);
    let d2 = ac.dot(ap);
    if d1 <= 0.0 && d2 <= 0.0 {
        return a;
    }

    // vertex region B
    let bp = p - b;
    let d3 = ab.dot(bp);
    let d4 = ac.dot(bp);
    if d3 >= 0.0 && d4 <= d3 {
        return b;
    }

    // edge region AB
    let vc = d1 * d4 - d3 * d2;
    if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
        let v = d1 / (d1 - d3);
        return a + v * ab;
    }

    // vertex region C
    let cp = p - c;
    let d5 = ab.dot(cp);
    let d6 = ac.dot(cp);
    if d6 >= 0.0 && d5 <= d6 {
        return c;
    }

    // edge region AC
    let vb = d5 * d2 - d1 * d6;
    if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
        let w = d2 / (d2 - d6);
        return a + w * ac;
    }

    // edge region BC
    let va = d3 * d6 - d5 * d4;
    if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
        let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));
        return b + w * (c - b);
    }

    // face interior
    let denom = 1.0 / (va + vb + vc);
    let v = vb * denom;
    let w = vc * denom;
    a + v * ab + w * ac
}

/// Double-sided ray/triangle intersection for rays arriving from outside the
/// mesh.
///
/// Returns the distance along `dir` to the hit point, or `None` when the ray
/// is parallel to the triangle plane, misses the triangle, or the triangle is
/// behind the origin. `dir` is expected to be normalized for the distance to
/// be a length.
///
/// # Arguments
///
/// * `origin` - Ray origin
/// * `dir` - Ray direction
/// * `a`, `b`, `c` - Triangle vertices, any winding
pub fn ray_intersect_exterior(origin: DVec3, dir: DVec3, a: DVec3, b: DVec3, c: DVec3) -> Option<f64> {
    moller_trumbore(origin, dir, a, b, c)
}

/// Single-sided ray/triangle intersection for rays leaving an element.
///
/// `inward_normal` is the unit normal of the face whose positive side holds
/// the element interior. The face only counts when the ray travels against
/// that normal (toward the face) and the origin lies on the interior side of
/// the face plane; faces the ray is moving away from are culled.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use tet_geometry::triangle::ray_intersect_interior;
///
/// let (a, b, c) = (DVec3::ZERO, DVec3::X, DVec3::Y);
/// let inside = DVec3::new(0.1, 0.1, 0.5);
/// // Moving toward the face
/// assert!(ray_intersect_interior(inside, DVec3::NEG_Z, DVec3::Z, a, b, c).is_some());
/// // Moving away from the face
/// assert!(ray_intersect_interior(inside, DVec3::Z, DVec3::Z, a, b, c).is_none());
/// ```
pub fn ray_intersect_interior(
    origin: DVec3,
    dir: DVec3,
    inward_normal: DVec3,
    a: DVec3,
    b: DVec3,
    c: DVec3,
) -> Option<f64> {
    if dir.dot(inward_normal) > -RAY_TRIANGLE_EPSILON {
        return None;
    }
    if inward_normal.dot(origin - a) < 0.0 {
        return None;
    }
    moller_trumbore(origin, dir, a, b, c)
}

fn moller_trumbore(origin: DVec3, dir: DVec3, a: DVec3, b: DVec3, c: DVec3) -> Option<f64> {
    let ab = b - a;
    let ac = c - a;

    let pvec = dir.cross(ac);
    let det = ab.dot(pvec);
    if det.abs() < RAY_TRIANGLE_EPSILON {
        return None;
    }
    let inv_det = 1.0 / det;

    let tvec = origin - a;
    let u = tvec.dot(pvec) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let qvec = tvec.cross(ab);
    let v = dir.dot(qvec) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let dist = ac.dot(qvec) * inv_det;
    (dist >= 0.0).then_some(dist)
}
