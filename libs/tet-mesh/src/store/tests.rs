//! # Mesh Store Tests

use super::*;
use crate::fixtures::{kuhn_grid, single_tet, two_tets};
use crate::input::{ElementRecord, MaterialRecord, NodeRecord};
use approx::assert_relative_eq;

// =============================================================================
// CONSTRUCTION TESTS
// =============================================================================

#[test]
fn test_single_tet_arrays() {
    let store = MeshStore::from_data(single_tet()).unwrap();
    assert_eq!(store.element_count(), 1);
    assert_eq!(store.node_count(), 4);
    assert_eq!(store.material_count(), 1);
    assert_eq!(store.element_nodes(0), [0, 1, 2, 3]);
    assert_eq!(store.element_tag(0), 100);
    assert_eq!(store.material(0), 0);
    assert_eq!(store.material_name(0), Some("water"));
    assert_eq!(store.material_name(1), None);
    assert!(store.is_boundary(0));
    assert_eq!(store.boundary_face_count(), 4);
    assert_eq!(store.neighbours(0), &[None; 4]);
}

#[test]
fn test_two_tets_share_face_zero() {
    let store = MeshStore::from_data(two_tets()).unwrap();
    assert_eq!(store.neighbours(0), &[Some(1), None, None, None]);
    assert_eq!(store.neighbours(1), &[Some(0), None, None, None]);
    assert!(!store.is_boundary_face(0, 0));
    assert!(store.is_boundary_face(0, 3));
    assert_eq!(store.boundary_face_count(), 6);
    assert_eq!(store.material(1), 1);
    assert_eq!(store.material_names(), &["water".to_string(), "lead".to_string()]);
}

#[test]
fn test_shared_face_normals_are_opposite() {
    let store = MeshStore::from_data(two_tets()).unwrap();
    let n0 = store.face_normal(0, 0);
    let n1 = store.face_normal(1, 0);
    assert_relative_eq!(n0, DVec3::ONE.normalize(), epsilon = 1e-12);
    assert_relative_eq!(n0, -n1, epsilon = 1e-12);
}

#[test]
fn test_kuhn_grid_is_conforming() {
    let n = 3;
    let store = MeshStore::from_data(kuhn_grid(n, 1.0)).unwrap();
    assert_eq!(store.element_count(), 6 * n * n * n);
    // each cube face is split into 2 triangles
    assert_eq!(store.boundary_face_count(), 6 * n * n * 2);
    for e in 0..store.element_count() {
        for (f, neighbour) in store.neighbours(e).iter().enumerate() {
            assert_eq!(neighbour.is_none(), store.is_boundary_face(e, f));
            if let Some(other) = neighbour {
                assert!(store.neighbours(*other).contains(&Some(e)));
            }
        }
    }
}

#[test]
fn test_boundary_elements() {
    let store = MeshStore::from_data(kuhn_grid(3, 1.0)).unwrap();
    let boundary = store.boundary_elements();
    assert!(!boundary.is_empty());
    assert!(boundary.len() < store.element_count());
    assert!(boundary.iter().all(|&e| store.is_boundary(e)));
}

// =============================================================================
// CONSTRUCTION ERROR TESTS
// =============================================================================

#[test]
fn test_empty_sections() {
    let mut data = single_tet();
    data.nodes.clear();
    assert_eq!(
        MeshStore::from_data(data).unwrap_err(),
        MeshError::EmptySection { section: "nodes" }
    );

    let mut data = single_tet();
    data.elements.clear();
    assert_eq!(
        MeshStore::from_data(data).unwrap_err(),
        MeshError::EmptySection { section: "elements" }
    );

    let mut data = single_tet();
    data.materials.clear();
    assert_eq!(
        MeshStore::from_data(data).unwrap_err(),
        MeshError::EmptySection { section: "materials" }
    );
}

#[test]
fn test_duplicate_tags() {
    let mut data = single_tet();
    data.nodes.push(NodeRecord::new(2, 5.0, 5.0, 5.0));
    assert_eq!(
        MeshStore::from_data(data).unwrap_err(),
        MeshError::DuplicateNodeTag { tag: 2 }
    );

    let mut data = single_tet();
    data.materials.push(MaterialRecord::new(1, "air"));
    assert_eq!(
        MeshStore::from_data(data).unwrap_err(),
        MeshError::DuplicateMaterialTag { tag: 1 }
    );
}

#[test]
fn test_unknown_references() {
    let mut data = single_tet();
    data.elements[0].nodes[3] = 99;
    assert_eq!(
        MeshStore::from_data(data).unwrap_err(),
        MeshError::UnknownNode { element: 100, node: 99 }
    );

    let mut data = single_tet();
    data.elements[0].material = 7;
    assert_eq!(
        MeshStore::from_data(data).unwrap_err(),
        MeshError::UnknownMaterial {
            element: 100,
            material: 7
        }
    );
}

#[test]
fn test_degenerate_elements() {
    let mut data = single_tet();
    data.elements[0].nodes = [1, 2, 2, 4];
    assert!(matches!(
        MeshStore::from_data(data).unwrap_err(),
        MeshError::DegenerateElement {
            element: 100,
            reason: "repeated node"
        }
    ));

    let mut data = single_tet();
    data.nodes[3] = NodeRecord::new(4, 1.0, 1.0, 0.0);
    assert!(matches!(
        MeshStore::from_data(data).unwrap_err(),
        MeshError::DegenerateElement {
            reason: "zero volume",
            ..
        }
    ));
}

#[test]
fn test_non_manifold_mesh() {
    let mut data = two_tets();
    data.nodes.push(NodeRecord::new(6, 2.0, 2.0, 2.0));
    data.elements.push(ElementRecord::new(300, 1, [6, 2, 3, 4]));
    assert!(matches!(
        MeshStore::from_data(data).unwrap_err(),
        MeshError::NonManifoldFace { count: 3, .. }
    ));
}

#[test]
fn test_unused_material_is_accepted() {
    let mut data = single_tet();
    data.materials.push(MaterialRecord::new(5, "air"));
    let store = MeshStore::from_data(data).unwrap();
    assert_eq!(store.material_count(), 2);
}

// =============================================================================
// ELEMENT QUERY TESTS
// =============================================================================

#[test]
fn test_contains_point() {
    let store = MeshStore::from_data(two_tets()).unwrap();
    let p = DVec3::splat(0.2);
    assert!(store.contains_point(0, p));
    assert!(!store.contains_point(1, p));
    let q = DVec3::splat(0.6);
    assert!(!store.contains_point(0, q));
    assert!(store.contains_point(1, q));
}

#[test]
fn test_min_face_plane_distance() {
    let store = MeshStore::from_data(single_tet()).unwrap();
    let p = DVec3::new(0.1, 0.2, 0.3);
    assert_relative_eq!(store.min_face_plane_distance(0, p), 0.1, epsilon = 1e-12);
    // near the slanted face x + y + z = 1
    let q = DVec3::new(0.3, 0.3, 0.3);
    let expected = 0.1 / 3.0_f64.sqrt();
    assert_relative_eq!(store.min_face_plane_distance(0, q), expected, epsilon = 1e-12);
}

#[test]
fn test_closest_boundary_face_from_outside() {
    let store = MeshStore::from_data(single_tet()).unwrap();
    let origin = DVec3::new(0.2, 0.2, -2.0);
    let hit = store.closest_boundary_face(0, origin, DVec3::Z).unwrap();
    assert_eq!(hit.face, 3);
    assert_relative_eq!(hit.distance, 2.0, epsilon = 1e-12);
}

#[test]
fn test_closest_boundary_face_rejects_inside_origin() {
    let store = MeshStore::from_data(single_tet()).unwrap();
    let inside = DVec3::splat(0.1);
    assert!(store.closest_boundary_face(0, inside, DVec3::NEG_Z).is_none());
    assert!(store.closest_boundary_face(0, inside, DVec3::X).is_none());
}

#[test]
fn test_closest_boundary_face_skips_interior_faces() {
    let store = MeshStore::from_data(two_tets()).unwrap();
    // from beyond (1,1,1) straight back through element 1 towards the origin;
    // element 0 is only entered through its shared, non-boundary face
    let dir = DVec3::NEG_ONE.normalize();
    let origin = DVec3::splat(3.0);
    assert!(store.closest_boundary_face(0, origin, dir).is_none());
}

#[test]
fn test_closest_boundary_face_ignores_departing_rays() {
    let store = MeshStore::from_data(single_tet()).unwrap();
    let origin = DVec3::new(0.2, 0.2, -2.0);
    assert!(store.closest_boundary_face(0, origin, DVec3::NEG_Z).is_none());
}
