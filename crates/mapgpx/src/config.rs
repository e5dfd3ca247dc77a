//! Generator settings
//!
//! Deserialized from the `[generator]` table of `.mapgpx.toml`; every field
//! is optional there and falls back to the defaults below.

use serde::{Deserialize, Serialize};

use crate::elevation::{ElevationMode, ElevationSource, DEFAULT_ELEVATION, DEFAULT_SEED};
use crate::error::{MapGpxError, Result};

/// Default `creator` attribute of the `<gpx>` root
pub const DEFAULT_CREATOR: &str = "StravaGPX";
/// Default `<type>` of generated tracks
pub const DEFAULT_TRACK_TYPE: &str = "cycling";

/// GPX generator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Value of the root `creator` attribute
    pub creator: String,
    /// Track `<type>` element
    pub track_type: String,
    /// How track point elevations are produced
    pub elevation: ElevationMode,
    /// Elevation used by [`ElevationMode::Constant`], in meters
    pub constant_elevation: f64,
    /// Seed used by [`ElevationMode::Seeded`]
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            creator: DEFAULT_CREATOR.to_string(),
            track_type: DEFAULT_TRACK_TYPE.to_string(),
            elevation: ElevationMode::default(),
            constant_elevation: DEFAULT_ELEVATION,
            seed: DEFAULT_SEED,
        }
    }
}

impl GeneratorConfig {
    /// Check values that would produce an invalid document
    ///
    /// # Errors
    ///
    /// Returns [`MapGpxError::Config`] for an empty creator or a non-finite
    /// constant elevation.
    pub fn validate(&self) -> Result<()> {
        if self.creator.trim().is_empty() {
            return Err(MapGpxError::Config("creator must not be empty".to_string()));
        }
        if !self.constant_elevation.is_finite() {
            return Err(MapGpxError::Config(format!(
                "constant_elevation must be finite, got {}",
                self.constant_elevation
            )));
        }
        Ok(())
    }

    /// Elevation source described by this configuration
    #[must_use]
    pub fn elevation_source(&self) -> Box<dyn ElevationSource + Send> {
        self.elevation.build(self.constant_elevation, self.seed)
    }
}
