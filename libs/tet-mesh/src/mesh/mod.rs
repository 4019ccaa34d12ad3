//! # Tetrahedral Mesh Geometry
//!
//! [`TetMesh`] ties the mesh store and its two octrees together and answers
//! the [`TransportGeometry`] queries.
//!
//! ## Step distance
//!
//! Outside the mesh, a step is a ray query against the boundary faces held
//! by the surface octree.
//!
//! Inside element `r`, each face is tested with a single-sided intersection
//! that ignores faces the particle is moving away from. The particle
//! position takes second place to the region: a point marginally outside
//! `r` from floating-point undershoot is still stepped as if it were inside.
//! Three outcomes follow:
//!
//! 1. A face is hit within the budget. The step ends there, snapped to zero
//!    when within half the boundary tolerance.
//! 2. Faces are hit, but only beyond the budget. The particle stays in `r`.
//! 3. No face can be hit at all, so the particle is genuinely somewhere
//!    else. The neighbours of `r` are searched first, then the whole mesh,
//!    and the particle is moved there with a zero-length step. Finding `r`
//!    again is a contradiction and ends the particle's history with
//!    [`QueryError::LostParticle`].
//!
//! Both distance queries reject a NaN or infinite position or direction
//! with [`QueryError::NonFinite`] before touching the mesh.

use crate::error::{MeshResult, QueryError, QueryResult};
use crate::input::MeshData;
use crate::octree::{Octree, OctreeStats};
use crate::query::{Step, TransportGeometry};
use crate::store::MeshStore;
use config::constants::Tolerances;
use glam::DVec3;
use std::fmt;
use tet_geometry::triangle;
use tracing::{error, info, warn};

/// Counts describing a built mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshSummary {
    pub elements: usize,
    pub nodes: usize,
    pub materials: usize,
    pub boundary_elements: usize,
    pub boundary_faces: usize,
    pub volume_tree: OctreeStats,
    pub surface_tree: OctreeStats,
}

impl fmt::Display for MeshSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Tetrahedral mesh")?;
        writeln!(f, "  elements:          {}", self.elements)?;
        writeln!(f, "  nodes:             {}", self.nodes)?;
        writeln!(f, "  materials:         {}", self.materials)?;
        writeln!(f, "  boundary elements: {}", self.boundary_elements)?;
        writeln!(f, "  boundary faces:    {}", self.boundary_faces)?;
        writeln!(f, "  volume octree:     {}", self.volume_tree)?;
        write!(f, "  surface octree:    {}", self.surface_tree)
    }
}

/// An immutable tetrahedral mesh answering transport geometry queries.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use tet_mesh::{ElementRecord, MaterialRecord, MeshData, NodeRecord, TetMesh, TransportGeometry};
///
/// let data = MeshData {
///     nodes: vec![
///         NodeRecord::new(1, 0.0, 0.0, 0.0),
///         NodeRecord::new(2, 1.0, 0.0, 0.0),
///         NodeRecord::new(3, 0.0, 1.0, 0.0),
///         NodeRecord::new(4, 0.0, 0.0, 1.0),
///     ],
///     elements: vec![ElementRecord::new(1, 1, [1, 2, 3, 4])],
///     materials: vec![MaterialRecord::new(1, "water")],
/// };
/// let mesh = TetMesh::new(data).unwrap();
///
/// let p = DVec3::splat(0.1);
/// assert_eq!(mesh.which_element(p), Some(0));
///
/// let step = mesh.step_distance(Some(0), p, DVec3::NEG_Z, 1.0).unwrap();
/// assert_eq!(step.region, None);
/// assert!((step.distance - 0.1).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct TetMesh {
    store: MeshStore,
    volume_tree: Octree,
    surface_tree: Octree,
    tolerances: Tolerances,
}

impl TetMesh {
    /// Builds a mesh with the default tolerances.
    ///
    /// # Errors
    ///
    /// Any [`crate::MeshError`] raised while validating `data`.
    pub fn new(data: MeshData) -> MeshResult<Self> {
        Self::with_tolerances(data, Tolerances::default())
    }

    /// Builds a mesh with the given boundary tolerance and octree leaf sizes.
    ///
    /// # Errors
    ///
    /// Any [`crate::MeshError`] raised while validating `data`.
    pub fn with_tolerances(data: MeshData, tolerances: Tolerances) -> MeshResult<Self> {
        let store = MeshStore::from_data(data)?;
        let all = (0..store.element_count()).collect();
        let volume_tree = Octree::build(&store, all, tolerances.volume_leaf_size)?;
        let surface_tree = Octree::build(
            &store,
            store.boundary_elements(),
            tolerances.surface_leaf_size,
        )?;

        let mesh = Self {
            store,
            volume_tree,
            surface_tree,
            tolerances,
        };
        let summary = mesh.summary();
        info!(
            elements = summary.elements,
            nodes = summary.nodes,
            materials = summary.materials,
            boundary_faces = summary.boundary_faces,
            volume_leaves = summary.volume_tree.leaves,
            surface_leaves = summary.surface_tree.leaves,
            "Built tetrahedral mesh"
        );
        Ok(mesh)
    }

    pub fn store(&self) -> &MeshStore {
        &self.store
    }

    pub fn tolerances(&self) -> &Tolerances {
        &self.tolerances
    }

    pub fn volume_tree(&self) -> &Octree {
        &self.volume_tree
    }

    pub fn surface_tree(&self) -> &Octree {
        &self.surface_tree
    }

    /// The tag `region` had in the input data.
    pub fn element_tag(&self, region: usize) -> QueryResult<i64> {
        self.check_region(region)?;
        Ok(self.store.element_tag(region))
    }

    pub fn material_name(&self, material: usize) -> Option<&str> {
        self.store.material_name(material)
    }

    /// Material names, indexed by material.
    pub fn materials(&self) -> &[String] {
        self.store.material_names()
    }

    pub fn summary(&self) -> MeshSummary {
        MeshSummary {
            elements: self.store.element_count(),
            nodes: self.store.node_count(),
            materials: self.store.material_count(),
            boundary_elements: self.store.boundary_elements().len(),
            boundary_faces: self.store.boundary_face_count(),
            volume_tree: self.volume_tree.stats(),
            surface_tree: self.surface_tree.stats(),
        }
    }

    fn check_region(&self, region: usize) -> QueryResult<()> {
        let count = self.store.element_count();
        if region >= count {
            return Err(QueryError::RegionOutOfRange { region, count });
        }
        Ok(())
    }

    fn check_finite(
        region: Option<usize>,
        point: DVec3,
        direction: Option<DVec3>,
    ) -> QueryResult<()> {
        if point.is_finite() && direction.map_or(true, |v| v.is_finite()) {
            return Ok(());
        }
        error!(
            region = ?region,
            position = ?point,
            direction = ?direction,
            "Non-finite particle state"
        );
        Err(QueryError::NonFinite {
            region,
            position: point,
            direction,
        })
    }

    fn material_at(&self, region: Option<usize>) -> Option<usize> {
        region.map(|e| self.store.material(e))
    }

    fn step_exterior(&self, point: DVec3, direction: DVec3, max_distance: f64) -> Step {
        let hit = self
            .surface_tree
            .ray_boundary_hit(&self.store, point, direction, max_distance);
        match hit {
            Some(hit) if hit.distance <= max_distance => Step::cross(
                Some(hit.element),
                hit.distance,
                Some(self.store.material(hit.element)),
                // outward normal of a face the ray enters through
                Some(self.store.face_normal(hit.element, hit.face)),
            ),
            _ => Step::stay(None, max_distance),
        }
    }

    fn step_interior(
        &self,
        region: usize,
        point: DVec3,
        direction: DVec3,
        max_distance: f64,
    ) -> QueryResult<Step> {
        let tet = self.store.element(region);
        let mut lost = true;
        for face in 0..4 {
            let inward = -self.store.face_normal(region, face);
            let [a, b, c] = tet.face(face);
            let Some(distance) = triangle::ray_intersect_interior(point, direction, inward, a, b, c)
            else {
                continue;
            };
            lost = false;
            if distance > max_distance {
                continue;
            }
            let distance = if distance <= self.tolerances.half_boundary {
                0.0
            } else {
                distance
            };
            let next = self.store.neighbours(region)[face];
            return Ok(Step::cross(next, distance, self.material_at(next), Some(inward)));
        }

        if !lost {
            return Ok(Step::stay(Some(region), max_distance));
        }

        let found = self.find_lost_particle(region, point, direction)?;
        warn!(
            region,
            new_region = ?found,
            position = ?point,
            "Relocated particle found outside its region"
        );
        Ok(Step::cross(found, 0.0, self.material_at(found), None))
    }

    /// Region a particle numerically outside `region` actually occupies.
    fn find_lost_particle(
        &self,
        region: usize,
        point: DVec3,
        direction: DVec3,
    ) -> QueryResult<Option<usize>> {
        let neighbour = self
            .store
            .neighbours(region)
            .iter()
            .flatten()
            .copied()
            .find(|&e| self.store.contains_point(e, point));
        if neighbour.is_some() {
            return Ok(neighbour);
        }

        let found = self.volume_tree.locate(&self.store, point);
        if found == Some(region) {
            error!(
                region,
                position = ?point,
                direction = ?direction,
                "Infinite loop detected while relocating particle"
            );
            return Err(QueryError::LostParticle {
                region,
                position: point,
                direction,
            });
        }
        Ok(found)
    }
}

impl TransportGeometry for TetMesh {
    fn region_count(&self) -> usize {
        self.store.element_count()
    }

    fn which_element(&self, point: DVec3) -> Option<usize> {
        self.volume_tree.locate(&self.store, point)
    }

    fn distance_to_nearest_boundary(&self, region: Option<usize>, point: DVec3) -> QueryResult<f64> {
        Self::check_finite(region, point, None)?;
        match region {
            Some(r) => {
                self.check_region(r)?;
                Ok(self.store.min_face_plane_distance(r, point))
            }
            None => Ok(self.surface_tree.hownear_exterior(&self.store, point)),
        }
    }

    fn step_distance(
        &self,
        region: Option<usize>,
        point: DVec3,
        direction: DVec3,
        max_distance: f64,
    ) -> QueryResult<Step> {
        Self::check_finite(region, point, Some(direction))?;
        match region {
            Some(r) => {
                self.check_region(r)?;
                self.step_interior(r, point, direction, max_distance)
            }
            None => Ok(self.step_exterior(point, direction, max_distance)),
        }
    }

    fn material_of(&self, region: usize) -> QueryResult<usize> {
        self.check_region(region)?;
        Ok(self.store.material(region))
    }
}
