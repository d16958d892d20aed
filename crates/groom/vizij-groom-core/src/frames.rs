//! Orientation frames along the sampled curve.
//!
//! Each sample's frame is the previous frame rotated by the minimal rotation
//! that carries its forward axis (third column) onto the local tangent. The
//! tangent consistently points back along the curve: from sample 1 to sample 0
//! at the start, from the next sample to the previous one in the interior, and
//! from the last sample to the one before it at the end. Accumulating rotations
//! this way keeps twist between neighbouring samples minimal.

use nalgebra::Vector3;

use crate::data::{CurveSample, Section};
use crate::math::{forward_axis, rotate_frame, rotation_between, Mat3, Vec3};

/// Rotate `prev` so its forward axis follows the direction `from -> to`.
///
/// Coincident points give no direction; the previous frame is kept as is.
pub fn curve_step(prev: &Mat3, from: Vec3, to: Vec3) -> Mat3 {
    let dir = (Vector3::from(to) - Vector3::from(from)).try_normalize(0.0);
    match (forward_axis(prev), dir) {
        (Some(dir_prev), Some(dir)) => rotate_frame(&rotation_between(&dir_prev, &dir), prev),
        _ => *prev,
    }
}

/// Assign a frame to every sample, seeded from `base_frame`.
///
/// Strictly sequential: sample `k` depends on the frame of sample `k - 1`.
pub fn propagate_frames(cache: &mut [CurveSample], base_frame: &Mat3) {
    let n = cache.len();
    match n {
        0 => return,
        1 => {
            cache[0].frame = *base_frame;
            return;
        }
        _ => {}
    }

    // Align to the first segment.
    cache[0].frame = curve_step(base_frame, cache[1].co, cache[0].co);

    // Interior samples follow the average of the previous and next segment.
    for i in 1..n - 1 {
        cache[i].frame = curve_step(&cache[i - 1].frame, cache[i + 1].co, cache[i - 1].co);
    }

    // Align to the last segment.
    cache[n - 1].frame = curve_step(&cache[n - 2].frame, cache[n - 1].co, cache[n - 2].co);
}

/// Copy the frame of the cache sample at each section back onto the section.
pub fn copy_frames_to_sections(sections: &mut [Section], cache: &[CurveSample], resolution: u32) {
    let stride = resolution as usize;
    for (section, sample) in sections.iter_mut().zip(cache.iter().step_by(stride.max(1))) {
        section.frame = sample.frame;
    }
}
