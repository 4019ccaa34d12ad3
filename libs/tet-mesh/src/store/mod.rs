//! # Mesh Store
//!
//! Immutable arrays describing the mesh: node positions, element
//! connectivity, materials, face neighbours, boundary flags and outward face
//! normals. Everything is derived once at construction; elements are
//! addressed by their dense index, which is also the region number.

use crate::error::{MeshError, MeshResult};
use crate::input::MeshData;
use crate::neighbours::{tetrahedron_neighbours, Neighbours};
use config::constants::{MAX_ELEMENTS, MAX_NODES};
use glam::DVec3;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use tet_geometry::{triangle, Tetrahedron};
use tracing::warn;

/// A ray hit on a boundary face of an element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryHit {
    pub element: usize,
    pub face: usize,
    pub distance: f64,
}

/// Validated, index-based mesh arrays.
#[derive(Debug, Clone)]
pub struct MeshStore {
    nodes: Vec<DVec3>,
    elements: Vec<[usize; 4]>,
    element_tags: Vec<i64>,
    element_materials: Vec<usize>,
    material_names: Vec<String>,
    neighbours: Vec<Neighbours>,
    /// Bit `f` set when face `f` is a boundary face.
    boundary_masks: Vec<u8>,
    /// Unit normals pointing away from each face's opposite vertex.
    normals: Vec<[DVec3; 4]>,
}

impl MeshStore {
    /// Validates raw mesh data and derives neighbours and normals.
    ///
    /// # Errors
    ///
    /// Fails on empty lists, duplicate node or material tags, references to
    /// unknown tags, degenerate elements and non-manifold faces.
    pub fn from_data(data: MeshData) -> MeshResult<Self> {
        let MeshData {
            nodes: node_records,
            elements: element_records,
            materials: material_records,
        } = data;

        if node_records.is_empty() {
            return Err(MeshError::EmptySection { section: "nodes" });
        }
        if element_records.is_empty() {
            return Err(MeshError::EmptySection { section: "elements" });
        }
        if material_records.is_empty() {
            return Err(MeshError::EmptySection { section: "materials" });
        }
        if element_records.len() >= MAX_ELEMENTS {
            return Err(MeshError::TooLarge {
                what: "elements",
                count: element_records.len(),
                max: MAX_ELEMENTS,
            });
        }
        if node_records.len() >= MAX_NODES {
            return Err(MeshError::TooLarge {
                what: "nodes",
                count: node_records.len(),
                max: MAX_NODES,
            });
        }

        // tag -> dense index maps, dropped once elements are resolved
        let mut node_index = HashMap::with_capacity(node_records.len());
        let mut nodes = Vec::with_capacity(node_records.len());
        for (i, record) in node_records.iter().enumerate() {
            if node_index.insert(record.tag, i).is_some() {
                return Err(MeshError::DuplicateNodeTag { tag: record.tag });
            }
            nodes.push(record.position);
        }

        let mut material_index = HashMap::with_capacity(material_records.len());
        let mut material_names = Vec::with_capacity(material_records.len());
        for (i, record) in material_records.into_iter().enumerate() {
            match material_index.entry(record.tag) {
                Entry::Occupied(_) => {
                    return Err(MeshError::DuplicateMaterialTag { tag: record.tag });
                }
                Entry::Vacant(slot) => {
                    slot.insert(i);
                }
            }
            material_names.push(record.name);
        }

        let mut elements = Vec::with_capacity(element_records.len());
        let mut element_tags = Vec::with_capacity(element_records.len());
        let mut element_materials = Vec::with_capacity(element_records.len());
        let mut normals = Vec::with_capacity(element_records.len());
        for record in &element_records {
            let mut indices = [0usize; 4];
            for (slot, tag) in indices.iter_mut().zip(record.nodes) {
                *slot = *node_index.get(&tag).ok_or(MeshError::UnknownNode {
                    element: record.tag,
                    node: tag,
                })?;
            }
            let material = *material_index
                .get(&record.material)
                .ok_or(MeshError::UnknownMaterial {
                    element: record.tag,
                    material: record.material,
                })?;

            let distinct: HashSet<usize> = indices.iter().copied().collect();
            if distinct.len() != 4 {
                return Err(MeshError::DegenerateElement {
                    element: record.tag,
                    reason: "repeated node",
                });
            }
            let tet = Tetrahedron::new(
                nodes[indices[0]],
                nodes[indices[1]],
                nodes[indices[2]],
                nodes[indices[3]],
            );
            let face_normals = tet.outward_normals().ok_or(MeshError::DegenerateElement {
                element: record.tag,
                reason: "zero volume",
            })?;

            elements.push(indices);
            element_tags.push(record.tag);
            element_materials.push(material);
            normals.push(face_normals);
        }

        let used: HashSet<usize> = element_materials.iter().copied().collect();
        for (i, name) in material_names.iter().enumerate() {
            if !used.contains(&i) {
                warn!(material = %name, "Material is not used by any element");
            }
        }

        let neighbours = tetrahedron_neighbours(&elements)?;
        let boundary_masks = neighbours
            .iter()
            .map(|faces| {
                faces
                    .iter()
                    .enumerate()
                    .filter(|(_, n)| n.is_none())
                    .fold(0u8, |mask, (f, _)| mask | (1 << f))
            })
            .collect();

        Ok(Self {
            nodes,
            elements,
            element_tags,
            element_materials,
            material_names,
            neighbours,
            boundary_masks,
            normals,
        })
    }

    #[inline]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn material_count(&self) -> usize {
        self.material_names.len()
    }

    #[inline]
    pub fn node(&self, index: usize) -> DVec3 {
        self.nodes[index]
    }

    /// Node indices (A, B, C, D) of element `e`.
    #[inline]
    pub fn element_nodes(&self, e: usize) -> [usize; 4] {
        self.elements[e]
    }

    /// Vertex positions of element `e`.
    #[inline]
    pub fn element(&self, e: usize) -> Tetrahedron {
        let [a, b, c, d] = self.elements[e].map(|n| self.nodes[n]);
        Tetrahedron::new(a, b, c, d)
    }

    /// The tag element `e` had in the input data.
    #[inline]
    pub fn element_tag(&self, e: usize) -> i64 {
        self.element_tags[e]
    }

    /// Material index of element `e`.
    #[inline]
    pub fn material(&self, e: usize) -> usize {
        self.element_materials[e]
    }

    pub fn material_name(&self, material: usize) -> Option<&str> {
        self.material_names.get(material).map(String::as_str)
    }

    pub fn material_names(&self) -> &[String] {
        &self.material_names
    }

    #[inline]
    pub fn neighbours(&self, e: usize) -> &Neighbours {
        &self.neighbours[e]
    }

    #[inline]
    pub fn is_boundary_face(&self, e: usize, face: usize) -> bool {
        self.boundary_masks[e] & (1 << face) != 0
    }

    /// Returns true if element `e` has at least one boundary face.
    #[inline]
    pub fn is_boundary(&self, e: usize) -> bool {
        self.boundary_masks[e] != 0
    }

    /// Indices of all elements with a boundary face.
    pub fn boundary_elements(&self) -> Vec<usize> {
        (0..self.element_count())
            .filter(|&e| self.is_boundary(e))
            .collect()
    }

    pub fn boundary_face_count(&self) -> usize {
        self.boundary_masks
            .iter()
            .map(|mask| mask.count_ones() as usize)
            .sum()
    }

    /// Outward unit normal of face `face` of element `e`.
    #[inline]
    pub fn face_normal(&self, e: usize, face: usize) -> DVec3 {
        self.normals[e][face]
    }

    /// Returns true if `p` is inside or on element `e`.
    #[inline]
    pub fn contains_point(&self, e: usize, p: DVec3) -> bool {
        self.element(e).contains(p)
    }

    /// Smallest perpendicular distance from `p` to the planes of the faces of
    /// element `e`.
    pub fn min_face_plane_distance(&self, e: usize, p: DVec3) -> f64 {
        let tet = self.element(e);
        (0..4)
            .map(|face| {
                let [a, _, _] = tet.face(face);
                self.normals[e][face].dot(p - a).abs()
            })
            .fold(f64::INFINITY, f64::min)
    }

    /// Closest intersection of a ray arriving from outside with a boundary
    /// face of element `e`.
    ///
    /// A face only counts when the origin is strictly outside its plane and
    /// the ray heads into the element, which rejects rays grazing an edge
    /// from inside.
    pub fn closest_boundary_face(&self, e: usize, origin: DVec3, dir: DVec3) -> Option<BoundaryHit> {
        let tet = self.element(e);
        let mut best: Option<BoundaryHit> = None;
        for face in 0..4 {
            if !self.is_boundary_face(e, face)
                || !tet.is_outside_face(face, origin)
                || self.normals[e][face].dot(dir) >= 0.0
            {
                continue;
            }
            let [a, b, c] = tet.face(face);
            let Some(distance) = triangle::ray_intersect_exterior(origin, dir, a, b, c) else {
                continue;
            };
            if best.map_or(true, |hit| distance < hit.distance) {
                best = Some(BoundaryHit {
                    element: e,
                    face,
                    distance,
                });
            }
        }
        best
    }
}

#[cfg(test)]
mod tests;
