//! Spline sampling of section centers into curve cache positions.
//!
//! Model:
//! - One section: a single sample at its center.
//! - Two sections: linear steps from the first center to the second.
//! - Three or more: a cubic Hermite segment between each pair of consecutive
//!   sections, tangents from neighbouring centers:
//!   - interior: `0.5 * (next - prev)`
//!   - first section: forward difference, paired with a half-difference two ahead
//!   - last section: half-difference two back, paired with a backward difference
//!
//! Segment `i` writes `resolution + 1` samples starting at `resolution * i`; the
//! last sample of a segment is overwritten by the first sample of the next one,
//! so junctions coincide with the section centers.
//!
//! Nothing here allocates: the caller sizes the cache buffer first.

use nalgebra::Vector3;

use crate::data::{cache_len, CurveSample, Section};

/// Evaluate the cubic `a*t^3 + b*t^2 + c*t + d` at `t = i / steps` for
/// `i in 0..=steps` by forward differencing, writing into axis `axis` of
/// consecutive samples.
pub fn forward_diff_cubic(
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    steps: u32,
    out: &mut [CurveSample],
    axis: usize,
) {
    let f = steps as f32;
    let a = a / (f * f * f);
    let b = b / (f * f);
    let c = c / f;

    let mut q0 = d;
    let mut q1 = a + b + c;
    let mut q2 = 6.0 * a + 2.0 * b;
    let q3 = 6.0 * a;

    for sample in out.iter_mut().take(steps as usize + 1) {
        sample.co[axis] = q0;
        q0 += q1;
        q1 += q2;
        q2 += q3;
    }
}

/// Linear steps between section `isection` and `isection + 1`.
pub fn eval_segment_linear(
    sections: &[Section],
    isection: usize,
    resolution: u32,
    cache: &mut [CurveSample],
) {
    debug_assert!(sections.len() > 1);
    debug_assert!(isection + 1 < sections.len());
    debug_assert!(resolution >= 1);

    let co0 = Vector3::from(sections[isection].center);
    let co1 = Vector3::from(sections[isection + 1].center);
    let dx = (co1 - co0) / resolution as f32;

    let start = resolution as usize * isection;
    let mut x = co0;
    for sample in &mut cache[start..=start + resolution as usize] {
        sample.co = x.into();
        x += dx;
    }
}

/// Hermite tangents `(n1, n2)` along one axis at the ends of segment `isection`.
fn segment_tangents(sections: &[Section], isection: usize, axis: usize) -> (f32, f32) {
    let last_segment = sections.len() - 2;
    let co1 = sections[isection].center[axis];
    let co2 = sections[isection + 1].center[axis];

    if isection == 0 {
        let co3 = sections[isection + 2].center[axis];
        (co2 - co1, 0.5 * (co3 - co1))
    } else if isection == last_segment {
        let co0 = sections[isection - 1].center[axis];
        (0.5 * (co2 - co0), co2 - co1)
    } else {
        let co0 = sections[isection - 1].center[axis];
        let co3 = sections[isection + 2].center[axis];
        (0.5 * (co2 - co0), 0.5 * (co3 - co1))
    }
}

/// Cubic Hermite steps between section `isection` and `isection + 1`.
pub fn eval_segment_cubic(
    sections: &[Section],
    isection: usize,
    resolution: u32,
    cache: &mut [CurveSample],
) {
    debug_assert!(sections.len() > 2);
    debug_assert!(isection + 1 < sections.len());
    debug_assert!(resolution >= 1);

    let start = resolution as usize * isection;
    let out = &mut cache[start..=start + resolution as usize];
    for k in 0..3 {
        let (n1, n2) = segment_tangents(sections, isection, k);
        let p1 = sections[isection].center[k];
        let p2 = sections[isection + 1].center[k];

        // Hermite basis to polynomial coefficients.
        let a = 2.0 * (p1 - p2) + n1 + n2;
        let b = 3.0 * (p2 - p1) - 2.0 * n1 - n2;
        let c = n1;
        let d = p1;

        forward_diff_cubic(a, b, c, d, resolution, out, k);
    }
}

/// Fill the positions of `cache` from the section centers.
///
/// `cache` must already hold `(sections - 1) * resolution + 1` samples and
/// `sections` must not be empty.
pub fn sample_positions(sections: &[Section], resolution: u32, cache: &mut [CurveSample]) {
    debug_assert!(resolution >= 1);
    debug_assert_eq!(cache.len(), cache_len(sections.len(), resolution));

    match sections.len() {
        0 => {}
        1 => cache[0].co = sections[0].center,
        2 => eval_segment_linear(sections, 0, resolution, cache),
        n => {
            for isection in 0..n - 1 {
                eval_segment_cubic(sections, isection, resolution, cache);
            }
        }
    }
}
