//! Error types for groom evaluation and editing.

use serde::{Deserialize, Serialize};

use crate::ids::BundleId;

/// Everything the groom core can reject.
///
/// Degenerate geometry (a bundle without sections) and a missing bounding
/// extent are handled in place and never surface here.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum GroomError {
    /// Curve resolution must be at least one step per segment
    #[error("Invalid curve resolution: {value} (must be >= 1)")]
    InvalidCurveResolution { value: u32 },

    /// Curve cache length disagrees with `(sections - 1) * resolution + 1`
    #[error("Curve cache of {bundle} has {actual} samples, expected {expected}")]
    StructuralInconsistency {
        bundle: BundleId,
        expected: usize,
        actual: usize,
    },

    /// Section index past the end of the bundle
    #[error("Section index {index} out of range (bundle has {len} sections)")]
    SectionOutOfRange { index: usize, len: usize },

    /// Loop vertex buffer does not cover every section
    #[error("Loop vertex count mismatch: expected {expected}, got {actual}")]
    LoopVertexMismatch { expected: usize, actual: usize },

    /// Two bundles of one asset share an id
    #[error("Duplicate bundle id: {id}")]
    DuplicateBundle { id: BundleId },

    /// No bundle with this id in the live list
    #[error("Bundle not found: {id}")]
    UnknownBundle { id: BundleId },

    #[error("Groom is already in an edit session")]
    AlreadyEditing,

    #[error("Groom is not in an edit session")]
    NotEditing,

    /// Draw-cache reason code outside the known set
    #[error("Unknown draw cache dirty mode: {code}")]
    UnknownDirtyMode { code: i32 },
}
