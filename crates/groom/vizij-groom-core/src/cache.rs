//! Curve cache lifecycle: rebuild and clear per bundle.
//!
//! A rebuild is always complete: the buffer is resized to
//! `(sections - 1) * resolution + 1` samples, positions are resampled, frames
//! propagated and the per-section frames written back. Bundles without
//! sections lose their buffer. Rebuilding is idempotent, so callers may
//! invoke it unconditionally.

use crate::data::{cache_len, Bundle, CurveSample};
use crate::frames::{copy_frames_to_sections, propagate_frames};
use crate::math::Mat3;
use crate::sampling::sample_positions;

impl Bundle {
    /// Rebuild the curve cache from the current sections.
    ///
    /// `curve_resolution` is validated by the owning asset.
    pub(crate) fn evaluate_curve_cache(&mut self, curve_resolution: u32, base_frame: &Mat3) {
        debug_assert!(curve_resolution >= 1);
        if self.sections.is_empty() {
            self.clear_curve_cache();
            return;
        }

        let len = cache_len(self.sections.len(), curve_resolution);
        if self.curve_cache.len() != len {
            self.curve_cache = vec![CurveSample::default(); len];
        }

        sample_positions(&self.sections, curve_resolution, &mut self.curve_cache);
        propagate_frames(&mut self.curve_cache, base_frame);
        copy_frames_to_sections(&mut self.sections, &self.curve_cache, curve_resolution);
        self.cache_stale = false;

        log::trace!(
            "rebuilt curve cache of {} ({} sections, {} samples)",
            self.id,
            self.sections.len(),
            len
        );
    }

    /// Free the curve cache buffer.
    pub fn clear_curve_cache(&mut self) {
        if !self.curve_cache.is_empty() {
            log::trace!("cleared curve cache of {}", self.id);
        }
        self.curve_cache = Vec::new();
        self.cache_stale = false;
    }
}

/// Rebuild the curve cache of every bundle in `bundles`.
///
/// Bundles are independent of each other; with the `parallel` feature they are
/// evaluated on the rayon pool.
pub(crate) fn evaluate_bundles(bundles: &mut [Bundle], curve_resolution: u32, base_frame: &Mat3) {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        bundles
            .par_iter_mut()
            .for_each(|bundle| bundle.evaluate_curve_cache(curve_resolution, base_frame));
    }
    #[cfg(not(feature = "parallel"))]
    {
        for bundle in bundles.iter_mut() {
            bundle.evaluate_curve_cache(curve_resolution, base_frame);
        }
    }
}

/// Free the curve cache of every bundle in `bundles`.
pub(crate) fn clear_bundles(bundles: &mut [Bundle]) {
    for bundle in bundles.iter_mut() {
        bundle.clear_curve_cache();
    }
}
