//! Vizij Groom Core (engine-agnostic)
//!
//! Evaluates groom guide curves ("bundles") for hair-like geometry. Each bundle
//! is authored as a short list of cross-sections; evaluation turns it into a
//! dense curve cache of positions and orientation frames at a configurable
//! resolution, and writes the resulting frames back onto the sections.
//!
//! Pipeline per live bundle: `sampling` (linear or cubic Hermite by forward
//! differencing) → `frames` (minimal-twist frame propagation) → section frame
//! write-back, driven by the lifecycle in `cache` and the asset in `groom`.
//! Bounds (`bounds`) and draw-cache signalling (`draw_cache`) sit beside it.

pub mod bounds;
mod cache;
pub mod config;
pub mod data;
pub mod draw_cache;
pub mod error;
pub mod eval;
pub mod frames;
pub mod groom;
pub mod ids;
pub mod math;
pub mod sampling;

// Re-exports for consumers (adapters)
pub use bounds::{BoundBox, BoundingVolume};
pub use config::Config;
pub use data::{cache_len, Bundle, CacheState, CurveSample, Section, SectionVertex};
pub use draw_cache::{DirtyMode, DrawCacheHooks};
pub use error::GroomError;
pub use eval::{
    clear_curve_cache, compute_bounding_volume, evaluate, evaluate_curve_cache,
    notify_geometry_changed, EvalContext,
};
pub use groom::{EditGroom, EditState, Groom};
pub use ids::BundleId;
pub use math::{Mat3, Vec3, MAT3_IDENTITY};

/// Groom core result type
pub type Result<T> = core::result::Result<T, GroomError>;
