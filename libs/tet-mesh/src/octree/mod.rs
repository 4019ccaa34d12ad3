//! # Element Octree
//!
//! Regular octree over a subset of mesh elements, used for point location
//! (over all elements) and for exterior distance and ray queries (over
//! boundary elements only).
//!
//! ## Structure
//!
//! Nodes live in a flat pool and refer to their children by index. The root
//! box is the bounding box of the subset padded by `BOUNDING_BOX_PADDING`.
//! A node becomes a leaf when it holds fewer elements than the leaf size or
//! its box is too small to halve. Otherwise every element is copied into
//! each octant it overlaps, so one element may sit in several leaves.
//!
//! ## Queries
//!
//! - [`Octree::locate`] descends by octant and scans one leaf
//! - [`Octree::hownear_exterior`] descends by octant and returns a lower
//!   bound on the distance to the elements
//! - [`Octree::ray_boundary_hit`] walks the octants a ray passes through,
//!   nearest first, until a leaf reports a boundary face hit

use crate::error::{MeshError, MeshResult};
use crate::store::{BoundaryHit, MeshStore};
use config::constants::BOUNDING_BOX_PADDING;
use glam::DVec3;
use std::fmt;
use tet_geometry::Aabb;
use tracing::debug;

/// Index of the root node in the pool.
const ROOT: usize = 0;

/// Contents of an octree node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Indices of the elements overlapping the node box.
    Leaf(Vec<usize>),
    /// Pool indices of the 8 children, in octant order.
    Internal([usize; 8]),
}

/// A node of the octree.
#[derive(Debug, Clone)]
pub struct OctreeNode {
    pub bbox: Aabb,
    pub kind: NodeKind,
}

/// Shape of a built octree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OctreeStats {
    /// Total node count, internal and leaf.
    pub nodes: usize,
    pub leaves: usize,
    /// Depth of the deepest leaf; 0 when the root is a leaf.
    pub depth: usize,
    /// Element count of the fullest leaf.
    pub largest_leaf: usize,
    /// Sum of leaf element counts, counting replicated elements once per leaf.
    pub element_refs: usize,
}

impl fmt::Display for OctreeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} nodes, {} leaves, depth {}, largest leaf {}, {} element refs",
            self.nodes, self.leaves, self.depth, self.largest_leaf, self.element_refs
        )
    }
}

/// Octree over a subset of the elements of a [`MeshStore`].
///
/// The tree keeps element indices only; every query takes the store it was
/// built from.
#[derive(Debug, Clone)]
pub struct Octree {
    nodes: Vec<OctreeNode>,
    leaf_size: usize,
}

impl Octree {
    /// Builds an octree over `elements`.
    ///
    /// # Arguments
    ///
    /// * `store` - Mesh the element indices refer to
    /// * `elements` - Elements to index
    /// * `leaf_size` - A node with fewer elements than this becomes a leaf
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::EmptyOctree`] when `elements` is empty.
    pub fn build(store: &MeshStore, elements: Vec<usize>, leaf_size: usize) -> MeshResult<Self> {
        if elements.is_empty() {
            return Err(MeshError::EmptyOctree);
        }

        let mut bounds = Aabb::empty();
        for &e in &elements {
            bounds.include(&store.element(e));
        }
        let element_count = elements.len();

        let mut tree = Self {
            nodes: Vec::new(),
            leaf_size,
        };
        tree.subdivide(store, elements, bounds.expanded(BOUNDING_BOX_PADDING));

        let stats = tree.stats();
        debug!(
            elements = element_count,
            leaf_size,
            nodes = stats.nodes,
            leaves = stats.leaves,
            depth = stats.depth,
            largest_leaf = stats.largest_leaf,
            "Built octree"
        );
        Ok(tree)
    }

    /// Adds a node for `elements` inside `bbox`, recursing into octants when
    /// it is too full, and returns its pool index.
    fn subdivide(&mut self, store: &MeshStore, elements: Vec<usize>, bbox: Aabb) -> usize {
        let index = self.nodes.len();
        if elements.len() < self.leaf_size || bbox.is_indivisible() {
            self.nodes.push(OctreeNode {
                bbox,
                kind: NodeKind::Leaf(elements),
            });
            return index;
        }

        // placeholder, replaced once the children have indices
        self.nodes.push(OctreeNode {
            bbox,
            kind: NodeKind::Leaf(Vec::new()),
        });

        let octants = bbox.octants();
        let mut buckets: [Vec<usize>; 8] = Default::default();
        for &e in &elements {
            let tet = store.element(e);
            for (bucket, octant) in buckets.iter_mut().zip(&octants) {
                // the centre test catches an octant lying wholly inside one
                // large element, which no face reaches
                if octant.intersects_tetrahedron(&tet) || tet.contains(octant.mid()) {
                    bucket.push(e);
                }
            }
        }
        drop(elements);

        let mut children = [0usize; 8];
        for ((child, bucket), octant) in children.iter_mut().zip(buckets).zip(octants) {
            *child = self.subdivide(store, bucket, octant);
        }
        self.nodes[index].kind = NodeKind::Internal(children);
        index
    }

    /// Bounding box of the root node.
    pub fn bounds(&self) -> Aabb {
        self.nodes[ROOT].bbox
    }

    pub fn leaf_size(&self) -> usize {
        self.leaf_size
    }

    pub fn nodes(&self) -> &[OctreeNode] {
        &self.nodes
    }

    /// Walks down by octant to the leaf whose box holds `p`.
    fn leaf_at(&self, p: DVec3) -> &OctreeNode {
        let mut node = &self.nodes[ROOT];
        while let NodeKind::Internal(children) = &node.kind {
            node = &self.nodes[children[node.bbox.octant_of(p)]];
        }
        node
    }

    /// Candidate elements for point `p`: the contents of the leaf whose box
    /// holds it, or `None` when `p` is outside the root box.
    pub fn leaf_elements_at(&self, p: DVec3) -> Option<&[usize]> {
        if !self.bounds().contains(p) {
            return None;
        }
        match &self.leaf_at(p).kind {
            NodeKind::Leaf(elements) => Some(elements),
            NodeKind::Internal(_) => None,
        }
    }

    /// Finds an element containing `p`.
    ///
    /// On a face shared by two elements either one may be returned.
    pub fn locate(&self, store: &MeshStore, p: DVec3) -> Option<usize> {
        self.leaf_elements_at(p)?
            .iter()
            .copied()
            .find(|&e| store.contains_point(e, p))
    }

    /// Lower bound on the distance from an exterior point `p` to the indexed
    /// elements.
    ///
    /// Outside the root box this is the distance to the box. Inside it, only
    /// the leaf holding `p` is searched: the result is the smaller of the
    /// distance to that leaf's box faces and the distance to each of its
    /// elements. Anything closer than the leaf faces would have to be in the
    /// leaf.
    pub fn hownear_exterior(&self, store: &MeshStore, p: DVec3) -> f64 {
        let root = self.bounds();
        if !root.contains(p) {
            return root.distance_to(p);
        }
        let leaf = self.leaf_at(p);
        let NodeKind::Leaf(elements) = &leaf.kind else {
            return 0.0;
        };
        // squared distances keep tiny negative box distances out of the result
        let box_dist = leaf.bbox.min_interior_distance(p);
        let best = elements
            .iter()
            .map(|&e| store.element(e).closest_point(p).distance_squared(p))
            .fold(box_dist * box_dist, f64::min);
        best.sqrt()
    }

    /// First boundary face hit by the ray `p + t * v`.
    ///
    /// Returns `None` when the ray misses the root box, enters it farther
    /// than `max_dist`, or passes no boundary face. A hit beyond `max_dist`
    /// may still be returned; callers compare the distance themselves.
    pub fn ray_boundary_hit(
        &self,
        store: &MeshStore,
        p: DVec3,
        v: DVec3,
        max_dist: f64,
    ) -> Option<BoundaryHit> {
        let entry = self.bounds().ray_intersection(p, v)?;
        if entry.distance > max_dist {
            return None;
        }
        self.ray_hit_node(ROOT, store, p, v)
    }

    fn ray_hit_node(&self, index: usize, store: &MeshStore, p: DVec3, v: DVec3) -> Option<BoundaryHit> {
        let node = &self.nodes[index];
        let children = match &node.kind {
            NodeKind::Leaf(elements) => return closest_leaf_hit(store, elements, p, v),
            NodeKind::Internal(children) => children,
        };

        let entry = node.bbox.ray_intersection(p, v)?;
        let first = node.bbox.octant_of(entry.point);
        if let Some(hit) = self.ray_hit_node(children[first], store, p, v) {
            return Some(hit);
        }

        // remaining octants on the ray, nearest entry first
        let mut others: Vec<(f64, usize)> = (0..8)
            .filter(|&octant| octant != first)
            .filter_map(|octant| {
                let child = &self.nodes[children[octant]];
                child
                    .bbox
                    .ray_intersection(p, v)
                    .map(|hit| (hit.distance, children[octant]))
            })
            .collect();
        others.sort_by(|a, b| a.0.total_cmp(&b.0));

        others
            .into_iter()
            .find_map(|(_, child)| self.ray_hit_node(child, store, p, v))
    }

    /// Computes node, leaf and depth counts by walking the pool.
    pub fn stats(&self) -> OctreeStats {
        let mut stats = OctreeStats::default();
        let mut stack = vec![(ROOT, 0usize)];
        while let Some((index, depth)) = stack.pop() {
            stats.nodes += 1;
            match &self.nodes[index].kind {
                NodeKind::Leaf(elements) => {
                    stats.leaves += 1;
                    stats.depth = stats.depth.max(depth);
                    stats.largest_leaf = stats.largest_leaf.max(elements.len());
                    stats.element_refs += elements.len();
                }
                NodeKind::Internal(children) => {
                    stack.extend(children.iter().map(|&child| (child, depth + 1)));
                }
            }
        }
        stats
    }
}

/// Nearest boundary face hit over the boundary elements of a leaf.
fn closest_leaf_hit(store: &MeshStore, elements: &[usize], p: DVec3, v: DVec3) -> Option<BoundaryHit> {
    elements
        .iter()
        .filter(|&&e| store.is_boundary(e))
        .filter_map(|&e| store.closest_boundary_face(e, p, v))
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}
