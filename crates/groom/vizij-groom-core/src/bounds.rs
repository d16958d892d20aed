//! Axis-aligned bounds of a groom.
//!
//! The extent is taken from the section centers of the live bundles. With no
//! sections there is nothing to measure and the unit cube around the origin
//! stands in.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::data::Bundle;
use crate::math::Vec3;

const FALLBACK_MIN: Vec3 = [-1.0, -1.0, -1.0];
const FALLBACK_MAX: Vec3 = [1.0, 1.0, 1.0];

/// Center / half-size form of an axis-aligned box.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingVolume {
    pub center: Vec3,
    pub half_size: Vec3,
}

/// Cached bounding box of an asset.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundBox {
    pub min: Vec3,
    pub max: Vec3,
    /// Set when the box no longer matches the asset and must be recomputed.
    pub dirty: bool,
}

impl BoundBox {
    pub fn from_minmax(min: Vec3, max: Vec3) -> Self {
        Self {
            min,
            max,
            dirty: false,
        }
    }

    /// Unit cube around the origin, used when there is no extent.
    pub fn unit() -> Self {
        Self::from_minmax(FALLBACK_MIN, FALLBACK_MAX)
    }

    pub fn center(&self) -> Vec3 {
        ((Vector3::from(self.min) + Vector3::from(self.max)) * 0.5).into()
    }

    pub fn half_size(&self) -> Vec3 {
        ((Vector3::from(self.max) - Vector3::from(self.min)) * 0.5).into()
    }

    pub fn volume(&self) -> BoundingVolume {
        BoundingVolume {
            center: self.center(),
            half_size: self.half_size(),
        }
    }
}

/// Extent of all section centers, or `None` when there are no sections.
pub fn minmax(bundles: &[Bundle]) -> Option<(Vec3, Vec3)> {
    bundles
        .iter()
        .flat_map(|b| b.sections().iter().map(|s| Vector3::from(s.center)))
        .fold(None, |acc, co| match acc {
            None => Some((co, co)),
            Some((lo, hi)) => Some((lo.inf(&co), hi.sup(&co))),
        })
        .map(|(lo, hi)| (lo.into(), hi.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::BundleId;

    #[test]
    fn center_and_half_size() {
        let bb = BoundBox::from_minmax([-1.0, 0.0, 2.0], [3.0, 1.0, 2.0]);
        assert_eq!(bb.center(), [1.0, 0.5, 2.0]);
        assert_eq!(bb.half_size(), [2.0, 0.5, 0.0]);
    }

    #[test]
    fn unit_box_volume() {
        let v = BoundBox::unit().volume();
        assert_eq!(v.center, [0.0; 3]);
        assert_eq!(v.half_size, [1.0; 3]);
    }

    #[test]
    fn minmax_spans_all_bundles() {
        let bundles = vec![
            Bundle::from_centers(BundleId(0), "a", &[[0.0, 1.0, 2.0], [-1.0, 0.0, 0.0]]),
            Bundle::new(BundleId(1), "empty"),
            Bundle::from_centers(BundleId(2), "c", &[[3.0, -2.0, 0.5]]),
        ];
        assert_eq!(minmax(&bundles), Some(([-1.0, -2.0, 0.0], [3.0, 1.0, 2.0])));
    }

    #[test]
    fn minmax_without_sections_is_none() {
        assert_eq!(minmax(&[]), None);
        assert_eq!(minmax(&[Bundle::new(BundleId(0), "empty")]), None);
    }
}
