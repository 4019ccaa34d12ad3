//! # Axis-Aligned Bounding Box
//!
//! Bounding boxes used as octree cells.
//!
//! ## Octants
//!
//! A box splits into 8 octants by its three midplanes. The octant index has
//! bit 0 set for the +x half, bit 1 for +y and bit 2 for +z:
//!
//! ```text
//!        -z         +z
//!     +---+---+  +---+---+
//!     | 2 | 3 |  | 6 | 7 |
//!  y  +---+---+  +---+---+
//!  ^  | 0 | 1 |  | 4 | 5 |
//!  |  +---+---+  +---+---+
//!  + -- > x
//! ```
//!
//! [`Aabb::octants`] and [`Aabb::octant_of`] share this numbering.

use crate::numeric::{max3, min3};
use crate::tetrahedron::Tetrahedron;
use config::constants::{approx_eq, RAY_SLAB_EPSILON, SEPARATING_AXIS_EPSILON};
use glam::DVec3;

/// Entry point of a ray into a box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Distance along the ray; zero when the origin is inside the box.
    pub distance: f64,
    /// Entry point.
    pub point: DVec3,
}

/// An axis-aligned bounding box.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use tet_geometry::Aabb;
///
/// let bbox = Aabb::new(DVec3::ZERO, DVec3::splat(2.0));
/// assert_eq!(bbox.octant_of(DVec3::new(1.5, 0.5, 1.5)), 5);
/// assert_eq!(bbox.octants()[5].min, DVec3::new(1.0, 0.0, 1.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: DVec3,
    pub max: DVec3,
}

impl Aabb {
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// An inverted box that any [`Aabb::include`] call replaces.
    pub fn empty() -> Self {
        Self {
            min: DVec3::INFINITY,
            max: DVec3::NEG_INFINITY,
        }
    }

    /// Grows the box to hold `tet`.
    pub fn include(&mut self, tet: &Tetrahedron) {
        self.min = self.min.min(tet.min());
        self.max = self.max.max(tet.max());
    }

    /// Returns a copy grown by `delta` on every side.
    pub fn expanded(&self, delta: f64) -> Self {
        Self::new(self.min - DVec3::splat(delta), self.max + DVec3::splat(delta))
    }

    #[inline]
    pub fn mid(&self) -> DVec3 {
        (self.min + self.max) / 2.0
    }

    /// Half-open containment: inclusive at the lower bound, exclusive at the
    /// upper bound, so a point on the interface between two sibling octants
    /// belongs to exactly one of them.
    #[inline]
    pub fn contains(&self, p: DVec3) -> bool {
        p.cmpge(self.min).all() && p.cmplt(self.max).all()
    }

    /// Returns the point of the box closest to `p`; `p` itself when inside.
    pub fn closest_point(&self, p: DVec3) -> DVec3 {
        p.max(self.min).min(self.max)
    }

    /// Euclidean distance from `p` to the box; zero when inside.
    pub fn distance_to(&self, p: DVec3) -> f64 {
        self.closest_point(p).distance(p)
    }

    /// Distance from an interior point to the nearest box face.
    pub fn min_interior_distance(&self, p: DVec3) -> f64 {
        (p - self.min).min(self.max - p).min_element()
    }

    /// Returns true if halving the box would run into floating-point
    /// precision limits on any axis.
    pub fn is_indivisible(&self) -> bool {
        let mid = self.mid();
        (0..3).any(|i| approx_eq(self.min[i], mid[i]) || approx_eq(self.max[i], mid[i]))
    }

    /// Index of the octant holding `p`, by comparison against the midplanes.
    #[inline]
    pub fn octant_of(&self, p: DVec3) -> usize {
        let mid = self.mid();
        let mut octant = 0;
        if p.x >= mid.x {
            octant += 1;
        }
        if p.y >= mid.y {
            octant += 2;
        }
        if p.z >= mid.z {
            octant += 4;
        }
        octant
    }

    /// Splits the box into 8 equal octants, indexed as [`Aabb::octant_of`].
    pub fn octants(&self) -> [Aabb; 8] {
        let mid = self.mid();
        std::array::from_fn(|i| {
            let pick = |bit: usize, axis: usize| {
                if i & bit == 0 {
                    (self.min[axis], mid[axis])
                } else {
                    (mid[axis], self.max[axis])
                }
            };
            let (min_x, max_x) = pick(1, 0);
            let (min_y, max_y) = pick(2, 1);
            let (min_z, max_z) = pick(4, 2);
            Aabb::new(
                DVec3::new(min_x, min_y, min_z),
                DVec3::new(max_x, max_y, max_z),
            )
        })
    }

    /// Box/triangle overlap by the separating axis test.
    ///
    /// Adapted from Ericson section 5.2.9, testing the 13 axes of
    /// Akenine-Möller's formulation: 9 cross products of box axes with
    /// triangle edges, the 3 box face normals and the triangle normal.
    /// Axes are normalized so projections compare as lengths at any mesh
    /// scale. A triangle must clear the box by more than
    /// `SEPARATING_AXIS_EPSILON` times the largest half-extent to be
    /// separated on a derived axis, so near contact counts as overlap.
    /// Zero axes are skipped. Both rules yield false positives and never
    /// false negatives.
    pub fn intersects_triangle(&self, a: DVec3, b: DVec3, c: DVec3) -> bool {
        if min3(a.x, b.x, c.x) >= self.max.x
            || min3(a.y, b.y, c.y) >= self.max.y
            || min3(a.z, b.z, c.z) >= self.max.z
            || max3(a.x, b.x, c.x) <= self.min.x
            || max3(a.y, b.y, c.y) <= self.min.y
            || max3(a.z, b.z, c.z) <= self.min.z
        {
            return false;
        }

        let centre = self.mid();
        let extents = (self.max - self.min) / 2.0;
        let margin = SEPARATING_AXIS_EPSILON * extents.max_element();

        // triangle relative to the box centre
        let v0 = a - centre;
        let v1 = b - centre;
        let v2 = c - centre;
        let edges = [v1 - v0, v2 - v1, v0 - v2];

        // box axes crossed with triangle edges
        for unit in [DVec3::X, DVec3::Y, DVec3::Z] {
            for edge in edges {
                let Some(axis) = unit.cross(edge).try_normalize() else {
                    continue;
                };
                let r = extents.dot(axis.abs());
                let p0 = v0.dot(axis);
                let p1 = v1.dot(axis);
                let p2 = v2.dot(axis);
                if (-max3(p0, p1, p2)).max(min3(p0, p1, p2)) > r + margin {
                    return false;
                }
            }
        }

        // box face normals
        if max3(v0.x, v1.x, v2.x) <= -extents.x
            || min3(v0.x, v1.x, v2.x) >= extents.x
            || max3(v0.y, v1.y, v2.y) <= -extents.y
            || min3(v0.y, v1.y, v2.y) >= extents.y
            || max3(v0.z, v1.z, v2.z) <= -extents.z
            || min3(v0.z, v1.z, v2.z) >= extents.z
        {
            return false;
        }

        // triangle normal
        let Some(n) = edges[0].cross(edges[1]).try_normalize() else {
            return true;
        };
        let r = extents.dot(n.abs());
        n.dot(v0).abs() <= r + margin
    }

    /// Returns true if any face of `tet` overlaps the box.
    pub fn intersects_tetrahedron(&self, tet: &Tetrahedron) -> bool {
        (0..4).any(|face| {
            let [a, b, c] = tet.face(face);
            self.intersects_triangle(a, b, c)
        })
    }

    /// Ray/box intersection by the slab method (Ericson section 5.3.3).
    ///
    /// A ray starting inside the box hits it at distance zero. A direction
    /// component below `RAY_SLAB_EPSILON` is parallel to that slab and only
    /// hits when the origin already lies within it.
    pub fn ray_intersection(&self, origin: DVec3, dir: DVec3) -> Option<RayHit> {
        let mut tmin = 0.0_f64;
        let mut tmax = f64::MAX;
        for i in 0..3 {
            if dir[i].abs() < RAY_SLAB_EPSILON {
                if origin[i] < self.min[i] || origin[i] > self.max[i] {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / dir[i];
            let mut t1 = (self.min[i] - origin[i]) * inv;
            let mut t2 = (self.max[i] - origin[i]) * inv;
            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }
            tmin = tmin.max(t1);
            tmax = tmax.min(t2);
            if tmin > tmax {
                return None;
            }
        }
        Some(RayHit {
            distance: tmin,
            point: origin + dir * tmin,
        })
    }
}
