//! Entry points for the scene evaluation driver.
//!
//! The driver decides when a groom is evaluated; these functions only perform
//! the work. Each call runs to completion.

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::bounds::BoundingVolume;
use crate::draw_cache::DirtyMode;
use crate::groom::Groom;

/// Per-evaluation inputs supplied by the driver.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EvalContext {
    /// Current scene time in seconds. Curve evaluation does not depend on it.
    pub time: f32,
}

/// Full evaluation: rebuild live curve caches, then refresh stale bounds.
pub fn evaluate(groom: &mut Groom, ctx: &EvalContext) {
    log::debug!("evaluate groom '{}' at t={}", groom.name(), ctx.time);
    groom.evaluate_curve_cache();
    groom.eval_geometry();
}

/// Rebuild (or clear, for empty bundles) every live bundle's curve cache.
pub fn evaluate_curve_cache(groom: &mut Groom) {
    groom.evaluate_curve_cache();
}

/// Free every live bundle's curve cache.
pub fn clear_curve_cache(groom: &mut Groom) {
    groom.clear_curve_cache();
}

/// Recompute the bounds; the flag is `false` when the unit-cube fallback was used.
pub fn compute_bounding_volume(groom: &mut Groom) -> (BoundingVolume, bool) {
    groom.compute_bounding_volume()
}

/// Forward a geometry change with a numeric reason code to the draw cache.
pub fn notify_geometry_changed(groom: &Groom, reason_code: i32) -> Result<()> {
    let mode = DirtyMode::from_code(reason_code)?;
    groom.notify_dirty(mode);
    Ok(())
}
