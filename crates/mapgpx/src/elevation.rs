//! Placeholder elevation for generated track points
//!
//! URLs carry no elevation data, so every track point gets a synthetic
//! `<ele>` value. Both strategies here are deterministic: the same input
//! always yields the same document.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::types::Coordinate;

/// Lower bound of the synthetic elevation band, in meters
pub const ELEVATION_MIN: f64 = 50.0;
/// Upper bound (exclusive) of the synthetic elevation band, in meters
pub const ELEVATION_MAX: f64 = 80.0;
/// Default constant elevation: the middle of the band
pub const DEFAULT_ELEVATION: f64 = 65.0;
/// Default seed for [`SeededElevation`]
pub const DEFAULT_SEED: u64 = 0x6d61_7067_7078;

/// Source of elevation values for track points
pub trait ElevationSource {
    /// Elevation in meters for the `index`-th point of a track
    fn elevation(&mut self, index: usize, point: &Coordinate) -> f64;
}

/// Same elevation for every point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantElevation(pub f64);

impl Default for ConstantElevation {
    fn default() -> Self {
        Self(DEFAULT_ELEVATION)
    }
}

impl ElevationSource for ConstantElevation {
    fn elevation(&mut self, _index: usize, _point: &Coordinate) -> f64 {
        self.0
    }
}

/// Pseudo-random elevation in `[ELEVATION_MIN, ELEVATION_MAX)` from a fixed seed
#[derive(Debug, Clone)]
pub struct SeededElevation {
    rng: StdRng,
}

impl SeededElevation {
    /// Create a generator; equal seeds produce equal sequences
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for SeededElevation {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl ElevationSource for SeededElevation {
    fn elevation(&mut self, _index: usize, _point: &Coordinate) -> f64 {
        self.rng.random_range(ELEVATION_MIN..ELEVATION_MAX)
    }
}

/// Configurable elevation strategy, as read from `[generator]` config
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElevationMode {
    /// [`ConstantElevation`]
    #[default]
    Constant,
    /// [`SeededElevation`]
    Seeded,
}

impl ElevationMode {
    /// Build the boxed source for this mode
    #[must_use]
    pub fn build(self, constant: f64, seed: u64) -> Box<dyn ElevationSource + Send> {
        match self {
            Self::Constant => Box::new(ConstantElevation(constant)),
            Self::Seeded => Box::new(SeededElevation::new(seed)),
        }
    }
}

impl std::str::FromStr for ElevationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "constant" => Ok(Self::Constant),
            "seeded" => Ok(Self::Seeded),
            other => Err(format!(
                "unknown elevation mode '{other}' (expected 'constant' or 'seeded')"
            )),
        }
    }
}
