//! Core configuration for vizij-groom-core.

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::error::GroomError;
use crate::math::{Mat3, MAT3_IDENTITY};

/// Default number of curve steps between two sections.
pub const DEFAULT_CURVE_RESOLUTION: u32 = 12;

/// Settings applied to newly created groom assets.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Samples per segment between consecutive sections (>= 1).
    pub curve_resolution: u32,
    /// Seed orientation for frame propagation along each bundle.
    pub base_frame: Mat3,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            curve_resolution: DEFAULT_CURVE_RESOLUTION,
            base_frame: MAT3_IDENTITY,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        validate_curve_resolution(self.curve_resolution)
    }
}

pub(crate) fn validate_curve_resolution(value: u32) -> Result<()> {
    if value == 0 {
        return Err(GroomError::InvalidCurveResolution { value });
    }
    Ok(())
}
