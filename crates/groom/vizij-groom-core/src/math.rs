//! Point and frame storage types, and the rotation helpers frame propagation needs.
//!
//! Points and frames are stored as plain arrays so they serialize as JSON
//! arrays; arithmetic goes through `nalgebra`. Frames are column-major:
//! `m[i]` is the i-th basis axis and `m[2]` is the forward axis that frame
//! propagation keeps aligned with the curve tangent.

use nalgebra::{Matrix3, Rotation3, Unit, Vector3};

pub type Vec3 = [f32; 3];
pub type Mat3 = [[f32; 3]; 3];

pub const MAT3_IDENTITY: Mat3 = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

/// Minimal rotation taking unit vector `from` onto unit vector `to`.
///
/// Antiparallel vectors turn half a revolution around an axis perpendicular
/// to `from`.
pub fn rotation_between(from: &Vector3<f32>, to: &Vector3<f32>) -> Rotation3<f32> {
    Rotation3::rotation_between(from, to).unwrap_or_else(|| {
        // Cross with the axis `from` is least aligned with.
        let pick = Vector3::ith(from.iamin(), 1.0);
        let axis = Unit::new_normalize(from.cross(&pick));
        Rotation3::from_axis_angle(&axis, std::f32::consts::PI)
    })
}

/// Forward axis of `frame` as a unit vector; `None` for a zero axis.
pub fn forward_axis(frame: &Mat3) -> Option<Vector3<f32>> {
    Vector3::from(frame[2]).try_normalize(0.0)
}

/// Apply `rot` to every basis axis of `frame`.
pub fn rotate_frame(rot: &Rotation3<f32>, frame: &Mat3) -> Mat3 {
    (rot.matrix() * Matrix3::from(*frame)).into()
}
