//! Test meshes shared by the unit tests and the integration tests, which
//! include this file by path. Record types are named through the crate root
//! so both crates resolve them.

use crate::{ElementRecord, MaterialRecord, MeshData, NodeRecord};

/// Unit corner tetrahedron (0,0,0), (1,0,0), (0,1,0), (0,0,1) made of "water".
pub fn single_tet() -> MeshData {
    MeshData {
        nodes: vec![
            NodeRecord::new(1, 0.0, 0.0, 0.0),
            NodeRecord::new(2, 1.0, 0.0, 0.0),
            NodeRecord::new(3, 0.0, 1.0, 0.0),
            NodeRecord::new(4, 0.0, 0.0, 1.0),
        ],
        elements: vec![ElementRecord::new(100, 1, [1, 2, 3, 4])],
        materials: vec![MaterialRecord::new(1, "water")],
    }
}

/// The unit corner tetrahedron (element 0, "water") and its mirror through
/// the shared face x + y + z = 1 towards (1,1,1) (element 1, "lead").
pub fn two_tets() -> MeshData {
    MeshData {
        nodes: vec![
            NodeRecord::new(1, 0.0, 0.0, 0.0),
            NodeRecord::new(2, 1.0, 0.0, 0.0),
            NodeRecord::new(3, 0.0, 1.0, 0.0),
            NodeRecord::new(4, 0.0, 0.0, 1.0),
            NodeRecord::new(5, 1.0, 1.0, 1.0),
        ],
        elements: vec![
            ElementRecord::new(100, 1, [1, 2, 3, 4]),
            ElementRecord::new(200, 2, [5, 2, 3, 4]),
        ],
        materials: vec![
            MaterialRecord::new(1, "water"),
            MaterialRecord::new(2, "lead"),
        ],
    }
}

/// A cube of side `n * size` starting at the origin, divided into `n^3`
/// cells of 6 tetrahedra each (Kuhn triangulation along the main cell
/// diagonal). Cells with x below the centre are "lead", the rest "water".
///
/// Element `6 * cell + k` belongs to cell `i + n * (j + n * k)`.
pub fn kuhn_grid(n: usize, size: f64) -> MeshData {
    let stride = n + 1;
    let tag = |i: usize, j: usize, k: usize| (i + stride * (j + stride * k)) as i64 + 1;

    let mut nodes = Vec::with_capacity(stride * stride * stride);
    for k in 0..stride {
        for j in 0..stride {
            for i in 0..stride {
                nodes.push(NodeRecord::new(
                    tag(i, j, k),
                    i as f64 * size,
                    j as f64 * size,
                    k as f64 * size,
                ));
            }
        }
    }

    const PERMUTATIONS: [[usize; 3]; 6] = [
        [0, 1, 2],
        [0, 2, 1],
        [1, 0, 2],
        [1, 2, 0],
        [2, 0, 1],
        [2, 1, 0],
    ];
    let mut elements = Vec::with_capacity(6 * n * n * n);
    for k in 0..n {
        for j in 0..n {
            for i in 0..n {
                let material = if 2 * i < n { 1 } else { 2 };
                for axes in PERMUTATIONS {
                    let mut corner = [i, j, k];
                    let mut path = [tag(i, j, k); 4];
                    for (step, axis) in axes.iter().enumerate() {
                        corner[*axis] += 1;
                        path[step + 1] = tag(corner[0], corner[1], corner[2]);
                    }
                    let id = elements.len() as i64 + 1;
                    elements.push(ElementRecord::new(id, material, path));
                }
            }
        }
    }

    MeshData {
        nodes,
        elements,
        materials: vec![
            MaterialRecord::new(1, "lead"),
            MaterialRecord::new(2, "water"),
        ],
    }
}
