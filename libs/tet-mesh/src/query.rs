//! # Transport Geometry Queries
//!
//! The query surface a particle transport loop drives: point location,
//! nearest-boundary distance and step distance along a direction.
//!
//! ## Regions
//!
//! A region is an element index. `None` stands for the space outside the
//! geometry.

use crate::error::QueryResult;
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// What the particle meets at the end of a step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Crossing {
    /// Material on the other side; `None` when leaving the geometry.
    pub material: Option<usize>,
    /// Unit normal of the crossed face, pointing against the direction of
    /// travel. Absent when a misplaced particle was relocated, since no face
    /// was crossed.
    pub normal: Option<DVec3>,
}

/// Result of a step distance query.
///
/// | situation                        | `region`      | `distance` | `crossing` |
/// |----------------------------------|---------------|------------|------------|
/// | boundary within the budget       | next region   | to face    | `Some`     |
/// | no boundary within the budget    | same region   | budget     | `None`     |
/// | outside, ray misses the geometry | `None`        | budget     | `None`     |
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub region: Option<usize>,
    pub distance: f64,
    pub crossing: Option<Crossing>,
}

impl Step {
    /// The particle stays in `region` for the whole budget.
    pub fn stay(region: Option<usize>, distance: f64) -> Self {
        Self {
            region,
            distance,
            crossing: None,
        }
    }

    /// The particle reaches `region` after `distance`.
    pub fn cross(region: Option<usize>, distance: f64, material: Option<usize>, normal: Option<DVec3>) -> Self {
        Self {
            region,
            distance,
            crossing: Some(Crossing { material, normal }),
        }
    }

    /// Returns true if the step ends on a region boundary.
    pub fn is_crossing(&self) -> bool {
        self.crossing.is_some()
    }
}

/// Geometry queries used by a particle transport loop.
///
/// Implementations are immutable once built; every method takes `&self`
/// and may be called from many threads at once.
pub trait TransportGeometry: Send + Sync {
    /// Number of regions, i.e. valid indices are `0..region_count()`.
    fn region_count(&self) -> usize;

    /// Returns true if `point` lies in some region.
    fn is_inside(&self, point: DVec3) -> bool {
        self.which_element(point).is_some()
    }

    /// Region containing `point`, or `None` outside the geometry.
    fn which_element(&self, point: DVec3) -> Option<usize>;

    /// Distance from `point` to the nearest boundary of `region`, or to the
    /// geometry when `region` is `None`.
    ///
    /// Any value between zero and the true distance is acceptable.
    ///
    /// # Errors
    ///
    /// Fails when `region` is out of range, and with a fatal error when
    /// `point` is not finite.
    fn distance_to_nearest_boundary(&self, region: Option<usize>, point: DVec3) -> QueryResult<f64>;

    /// Distance from `point` along the unit `direction` to the next region
    /// boundary, if it is no farther than `max_distance`.
    ///
    /// # Errors
    ///
    /// Fails when `region` is out of range, and with a fatal error when
    /// `point` or `direction` is not finite or the particle position
    /// contradicts `region` in a way that cannot be resolved.
    fn step_distance(
        &self,
        region: Option<usize>,
        point: DVec3,
        direction: DVec3,
        max_distance: f64,
    ) -> QueryResult<Step>;

    /// Material index of `region`.
    ///
    /// # Errors
    ///
    /// Fails when `region` is out of range.
    fn material_of(&self, region: usize) -> QueryResult<usize>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_constructors() {
        let stay = Step::stay(Some(3), 1.5);
        assert!(!stay.is_crossing());
        assert_eq!(stay.region, Some(3));

        let cross = Step::cross(Some(4), 0.25, Some(1), Some(DVec3::X));
        assert!(cross.is_crossing());
        assert_eq!(
            cross.crossing,
            Some(Crossing {
                material: Some(1),
                normal: Some(DVec3::X)
            })
        );
    }

    #[test]
    fn test_step_serializes_to_json() {
        let step = Step::cross(None, 0.5, None, Some(DVec3::NEG_Z));
        let value = serde_json::to_value(step).unwrap();
        assert_eq!(value["region"], serde_json::Value::Null);
        assert_eq!(value["crossing"]["normal"], serde_json::json!([0.0, 0.0, -1.0]));

        let back: Step = serde_json::from_value(value).unwrap();
        assert_eq!(back, step);
    }
}
