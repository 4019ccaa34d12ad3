//! # Face Neighbours
//!
//! Builds the element adjacency graph: for every element and every face, the
//! element on the other side of that face.
//!
//! ## Algorithm
//!
//! Each face is keyed by its sorted node indices. The first element to
//! present a key leaves it open; the second closes it and links both
//! elements. A key that is never closed is a boundary face. A key presented
//! a third time means the mesh is not manifold and construction fails.

use crate::error::{MeshError, MeshResult};
use std::collections::HashMap;
use tet_geometry::tetrahedron::FACE_VERTICES;

/// Per-element neighbour across each face; `None` on a boundary face.
pub type Neighbours = [Option<usize>; 4];

enum FaceSlot {
    /// Seen once, by (element, face).
    Open(usize, usize),
    /// Seen this many times (two or more).
    Closed(usize),
}

/// Sorted node indices of face `face` of an element.
#[inline]
pub fn face_key(nodes: &[usize; 4], face: usize) -> [usize; 3] {
    let mut key = FACE_VERTICES[face].map(|v| nodes[v]);
    key.sort_unstable();
    key
}

/// Computes the face neighbours of every element.
///
/// # Arguments
///
/// * `elements` - Node indices (A, B, C, D) per element
///
/// # Returns
///
/// One entry per element, indexed by face as in
/// [`tet_geometry::Tetrahedron::face`].
///
/// # Example
///
/// ```rust
/// use tet_mesh::neighbours::tetrahedron_neighbours;
///
/// // two tetrahedra sharing face (1, 2, 3)
/// let elements = [[0, 1, 2, 3], [4, 1, 2, 3]];
/// let neighbours = tetrahedron_neighbours(&elements).unwrap();
/// assert_eq!(neighbours[0], [Some(1), None, None, None]);
/// assert_eq!(neighbours[1], [Some(0), None, None, None]);
/// ```
pub fn tetrahedron_neighbours(elements: &[[usize; 4]]) -> MeshResult<Vec<Neighbours>> {
    let mut neighbours = vec![[None; 4]; elements.len()];
    let mut faces: HashMap<[usize; 3], FaceSlot> = HashMap::with_capacity(elements.len() * 2);
    let mut first_overshared: Option<[usize; 3]> = None;

    for (elt, nodes) in elements.iter().enumerate() {
        for face in 0..4 {
            let key = face_key(nodes, face);
            match faces.get_mut(&key) {
                None => {
                    faces.insert(key, FaceSlot::Open(elt, face));
                }
                Some(slot) => match *slot {
                    FaceSlot::Open(other, other_face) => {
                        neighbours[elt][face] = Some(other);
                        neighbours[other][other_face] = Some(elt);
                        *slot = FaceSlot::Closed(2);
                    }
                    FaceSlot::Closed(count) => {
                        *slot = FaceSlot::Closed(count + 1);
                        first_overshared.get_or_insert(key);
                    }
                },
            }
        }
    }

    if let Some(key) = first_overshared {
        let count = match faces.get(&key) {
            Some(FaceSlot::Closed(count)) => *count,
            _ => 0,
        };
        return Err(MeshError::NonManifoldFace { nodes: key, count });
    }

    Ok(neighbours)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A cube split into 5 tetrahedra: 4 corner tets around a central one.
    fn five_tet_cube() -> Vec<[usize; 4]> {
        // cube corners: 0..8 with bit 0 = x, bit 1 = y, bit 2 = z
        vec![
            [0, 1, 2, 4],
            [3, 1, 2, 7],
            [5, 1, 4, 7],
            [6, 2, 4, 7],
            [1, 2, 4, 7],
        ]
    }

    #[test]
    fn test_single_element_is_all_boundary() {
        let neighbours = tetrahedron_neighbours(&[[0, 1, 2, 3]]).unwrap();
        assert_eq!(neighbours, vec![[None; 4]]);
    }

    #[test]
    fn test_neighbours_are_symmetric() {
        let elements = five_tet_cube();
        let neighbours = tetrahedron_neighbours(&elements).unwrap();
        for (e, faces) in neighbours.iter().enumerate() {
            for (f, n) in faces.iter().enumerate() {
                if let Some(other) = *n {
                    let back = neighbours[other]
                        .iter()
                        .position(|&m| m == Some(e))
                        .unwrap();
                    assert_eq!(face_key(&elements[e], f), face_key(&elements[other], back));
                }
            }
        }
    }

    #[test]
    fn test_central_tet_touches_all_corners() {
        let neighbours = tetrahedron_neighbours(&five_tet_cube()).unwrap();
        let mut central: Vec<usize> = neighbours[4].iter().flatten().copied().collect();
        central.sort_unstable();
        assert_eq!(central, vec![0, 1, 2, 3]);
        for corner in &neighbours[..4] {
            assert_eq!(corner.iter().flatten().count(), 1);
        }
    }

    #[test]
    fn test_boundary_face_count() {
        let neighbours = tetrahedron_neighbours(&five_tet_cube()).unwrap();
        let total_faces = 4 * neighbours.len();
        let boundary = neighbours.iter().flatten().filter(|n| n.is_none()).count();
        let matched_pairs = neighbours.iter().flatten().filter(|n| n.is_some()).count() / 2;
        // 12 cube triangles on the outside
        assert_eq!(boundary, 12);
        assert_eq!(boundary, total_faces - 2 * matched_pairs);
    }

    #[test]
    fn test_non_manifold_face_is_rejected() {
        let elements = [[0, 1, 2, 3], [4, 1, 2, 3], [5, 3, 2, 1]];
        let err = tetrahedron_neighbours(&elements).unwrap_err();
        assert_eq!(
            err,
            MeshError::NonManifoldFace {
                nodes: [1, 2, 3],
                count: 3
            }
        );
    }
}
