//! # mapgpx
//!
//! Turn Google Maps links into GPX files.
//!
//! The crate has two pure stages, run in sequence:
//!
//! 1. [`extract`] reads a Maps URL (long or shortened form) and recovers a
//!    [`RouteInfo`]: either a route between two points or a single location.
//! 2. [`GpxGenerator::generate`] writes that `RouteInfo` as a GPX 1.1
//!    document.
//!
//! Neither stage performs network IO. Shortened links are matched as text,
//! never followed, so a short link without embedded coordinates or names
//! cannot be resolved.
//!
//! ## Quick Start
//!
//! ```
//! use mapgpx::{extract, suggested_filename, GpxGenerator};
//!
//! let info = extract("https://www.google.com/maps/@40.712800,-74.006000,12z/@34.052200,-118.243700,12z")?;
//! let gpx = GpxGenerator::default().generate(&info)?;
//!
//! assert!(gpx.contains("<trkseg>"));
//! assert_eq!(suggested_filename(&info), "route_Latitude___to_Latitude__.gpx");
//! # Ok::<(), mapgpx::MapGpxError>(())
//! ```
//!
//! ## Recognized URLs
//!
//! | Pattern | Example | Result |
//! |---------|---------|--------|
//! | Directions | `/maps/dir/New+York/Boston/` | `Route` with names only |
//! | Coordinates | `@40.71,-74.00 … @34.05,-118.24` | `Route` with start, waypoints, end |
//! | Pin | `@48.85,2.29,17z`, also after `/place/…` | `Location` "Pinned Location" |
//! | Place | `/place/Eiffel+Tower` with no pin | `Location` with name, no coordinates |
//!
//! ## Reproducible Output
//!
//! Track point elevations come from an [`ElevationSource`] and timestamps from
//! a [`Clock`]; both can be replaced:
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use mapgpx::{FixedClock, GpxGenerator, SeededElevation};
//!
//! let generator = GpxGenerator::default()
//!     .with_clock(FixedClock(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()))
//!     .with_elevation(|| SeededElevation::new(42));
//! # let _ = generator;
//! ```
//!
//! ## Error Handling
//!
//! ```
//! use mapgpx::{extract, ExtractionError};
//!
//! match extract("https://example.com") {
//!     Err(ExtractionError::NoMatch) => {}
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```

pub mod clock;
pub mod config;
pub mod elevation;
pub mod error;
pub mod extract;
pub mod gpx;
pub mod save;
pub mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::GeneratorConfig;
pub use elevation::{ConstantElevation, ElevationMode, ElevationSource, SeededElevation};
pub use error::{ExtractionError, GenerationError, MapGpxError, Result};
pub use extract::extract;
pub use gpx::{generate, GpxGenerator};
pub use save::{save_gpx, suggested_filename, write_gpx};
pub use types::{is_google_maps_url, Coordinate, RouteInfo, UrlKind};

/// Extract `url` and render it with `generator`
///
/// # Errors
///
/// Returns [`MapGpxError::Extraction`] or [`MapGpxError::Generation`] from the
/// failing stage; no partial document is returned.
pub fn convert(url: &str, generator: &GpxGenerator) -> Result<(RouteInfo, String)> {
    let info = extract(url)?;
    let gpx = generator.generate(&info)?;
    Ok((info, gpx))
}
