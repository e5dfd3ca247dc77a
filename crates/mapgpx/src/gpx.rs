//! GPX 1.1 document generation
//!
//! Writes a [`RouteInfo`] as GPX text with `quick-xml`. Output shape:
//!
//! | Input | Body |
//! |-------|------|
//! | `Location` with coordinates | one `<wpt>` with `<ele>0.0</ele>`, name, time |
//! | `Route` with at least one coordinate | one `<trk>` / `<trkseg>`, one `<trkpt>` per point |
//! | anything without coordinates | `<metadata>` only, with a `<desc>` note |
//!
//! Every document carries `<metadata>` with the title, a fixed author block,
//! a copyright block stamped with the current year, and a link to the maps
//! homepage. Text and attribute values are XML-escaped.

use chrono::{DateTime, Datelike, Utc};
use quick_xml::events::{BytesDecl, BytesText, Event};
use quick_xml::Writer;

use crate::clock::{iso8601_millis, Clock, SystemClock};
use crate::config::GeneratorConfig;
use crate::elevation::ElevationSource;
use crate::error::GenerationError;
use crate::types::{Coordinate, RouteInfo};

/// GPX 1.1 namespace
pub const GPX_NAMESPACE: &str = "http://www.topografix.com/GPX/1/1";
const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
const SCHEMA_LOCATION: &str =
    "http://www.topografix.com/GPX/1/1 http://www.topografix.com/GPX/1/1/gpx.xsd";

/// Link attached to metadata, author and tracks
pub const MAPS_HOMEPAGE: &str = "https://maps.google.com";
const AUTHOR_NAME: &str = "Google Maps URL to GPX Converter";
const COPYRIGHT_HOLDER: &str = "OpenStreetMap contributors";
const LICENSE_URL: &str = "https://www.openstreetmap.org/copyright";
const WAYPOINT_ELEVATION: &str = "0.0";

type ElevationFactory = Box<dyn Fn() -> Box<dyn ElevationSource + Send> + Send + Sync>;

/// GPX writer with a pluggable clock and elevation strategy
///
/// The elevation source is rebuilt for every document, so a seeded strategy
/// yields identical output for identical input.
pub struct GpxGenerator {
    config: GeneratorConfig,
    clock: Box<dyn Clock + Send + Sync>,
    elevation: Option<ElevationFactory>,
}

impl std::fmt::Debug for GpxGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GpxGenerator")
            .field("config", &self.config)
            .field("custom_elevation", &self.elevation.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for GpxGenerator {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

impl GpxGenerator {
    /// Generator using the system clock and the configured elevation mode
    #[must_use]
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            clock: Box::new(SystemClock),
            elevation: None,
        }
    }

    /// Replace the time source
    #[must_use]
    pub fn with_clock<C: Clock + Send + Sync + 'static>(mut self, clock: C) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Replace the configured elevation mode with a custom source
    ///
    /// `factory` is called once per generated document.
    #[must_use]
    pub fn with_elevation<F, S>(mut self, factory: F) -> Self
    where
        F: Fn() -> S + Send + Sync + 'static,
        S: ElevationSource + Send + 'static,
    {
        self.elevation = Some(Box::new(move || -> Box<dyn ElevationSource + Send> {
            Box::new(factory())
        }));
        self
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Render `info` as a GPX 1.1 document
    ///
    /// # Examples
    ///
    /// ```
    /// use mapgpx::{Coordinate, GpxGenerator, RouteInfo};
    ///
    /// let info = RouteInfo::Location {
    ///     location_name: "Harbour Bridge".to_string(),
    ///     coordinates: Some(Coordinate { lat: -33.852, lng: 151.2108 }),
    /// };
    /// let gpx = GpxGenerator::default().generate(&info)?;
    /// assert!(gpx.contains(r#"<wpt lat="-33.852" lon="151.2108">"#));
    /// # Ok::<(), mapgpx::GenerationError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::InvalidConfig`] when the configuration fails
    /// [`GeneratorConfig::validate`], [`GenerationError::InvalidElevation`]
    /// when the elevation source yields a non-finite value, and
    /// [`GenerationError::Xml`] if the XML writer fails.
    pub fn generate(&self, info: &RouteInfo) -> Result<String, GenerationError> {
        self.config
            .validate()
            .map_err(|e| GenerationError::InvalidConfig(e.to_string()))?;

        let now = self.clock.now();
        let title = info.title();
        let points = info.points();
        let elevations = if info.is_route() {
            self.track_elevations(&points)?
        } else {
            Vec::new()
        };

        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        writer
            .create_element("gpx")
            .with_attribute(("creator", self.config.creator.as_str()))
            .with_attribute(("version", "1.1"))
            .with_attribute(("xmlns", GPX_NAMESPACE))
            .with_attribute(("xmlns:xsi", XSI_NAMESPACE))
            .with_attribute(("xsi:schemaLocation", SCHEMA_LOCATION))
            .write_inner_content(|w| {
                let note = points.is_empty().then(|| missing_coordinates_note(info));
                write_metadata(w, &title, note.as_deref(), &now)?;

                match info {
                    RouteInfo::Location {
                        coordinates: Some(coordinate),
                        ..
                    } => write_waypoint(w, coordinate, &title, &now),
                    RouteInfo::Location {
                        coordinates: None, ..
                    } => Ok(()),
                    RouteInfo::Route { .. } if points.is_empty() => Ok(()),
                    RouteInfo::Route { .. } => write_track(
                        w,
                        &points,
                        &elevations,
                        &title,
                        &self.config.track_type,
                    ),
                }
            })?;

        let bytes = writer.into_inner();
        log::debug!(
            "generated GPX for '{title}' ({} points, {} bytes)",
            points.len(),
            bytes.len()
        );
        String::from_utf8(bytes).map_err(|e| GenerationError::Utf8(e.to_string()))
    }

    fn track_elevations(&self, points: &[Coordinate]) -> Result<Vec<f64>, GenerationError> {
        let mut source = match &self.elevation {
            Some(factory) => factory(),
            None => self.config.elevation_source(),
        };
        points
            .iter()
            .enumerate()
            .map(|(index, point)| {
                let ele = source.elevation(index, point);
                if ele.is_finite() {
                    Ok(ele)
                } else {
                    Err(GenerationError::InvalidElevation { index })
                }
            })
            .collect()
    }
}

/// Render `info` with the default generator (system clock, constant elevation)
///
/// # Errors
///
/// Returns [`GenerationError`] if the XML writer fails.
pub fn generate(info: &RouteInfo) -> Result<String, GenerationError> {
    GpxGenerator::default().generate(info)
}

fn missing_coordinates_note(info: &RouteInfo) -> String {
    match info {
        RouteInfo::Route {
            start_point,
            end_point,
            ..
        } => format!(
            "Route from {start_point} to {end_point}. Note: Exact coordinates not available."
        ),
        RouteInfo::Location { .. } => {
            format!("{}. Note: Exact coordinates not available.", info.title())
        }
    }
}

fn write_metadata(
    w: &mut Writer<Vec<u8>>,
    title: &str,
    description: Option<&str>,
    now: &DateTime<Utc>,
) -> quick_xml::Result<()> {
    let year = now.year().to_string();
    w.create_element("metadata").write_inner_content(|w| {
        w.create_element("name")
            .write_text_content(BytesText::new(title))?;
        if let Some(description) = description {
            w.create_element("desc")
                .write_text_content(BytesText::new(description))?;
        }
        w.create_element("author").write_inner_content(|w| {
            w.create_element("name")
                .write_text_content(BytesText::new(AUTHOR_NAME))?;
            w.create_element("link")
                .with_attribute(("href", MAPS_HOMEPAGE))
                .write_empty()?;
            Ok::<(), quick_xml::Error>(())
        })?;
        w.create_element("copyright")
            .with_attribute(("author", COPYRIGHT_HOLDER))
            .write_inner_content(|w| {
                w.create_element("year")
                    .write_text_content(BytesText::new(&year))?;
                w.create_element("license")
                    .write_text_content(BytesText::new(LICENSE_URL))?;
                Ok::<(), quick_xml::Error>(())
            })?;
        w.create_element("link")
            .with_attribute(("href", MAPS_HOMEPAGE))
            .write_empty()?;
        Ok::<(), quick_xml::Error>(())
    })?;
    Ok(())
}

fn write_waypoint(
    w: &mut Writer<Vec<u8>>,
    point: &Coordinate,
    title: &str,
    now: &DateTime<Utc>,
) -> quick_xml::Result<()> {
    let timestamp = iso8601_millis(now);
    w.create_element("wpt")
        .with_attribute(("lat", point.lat.to_string().as_str()))
        .with_attribute(("lon", point.lng.to_string().as_str()))
        .write_inner_content(|w| {
            w.create_element("ele")
                .write_text_content(BytesText::new(WAYPOINT_ELEVATION))?;
            w.create_element("name")
                .write_text_content(BytesText::new(title))?;
            w.create_element("time")
                .write_text_content(BytesText::new(&timestamp))?;
            Ok::<(), quick_xml::Error>(())
        })?;
    Ok(())
}

fn write_track(
    w: &mut Writer<Vec<u8>>,
    points: &[Coordinate],
    elevations: &[f64],
    title: &str,
    track_type: &str,
) -> quick_xml::Result<()> {
    w.create_element("trk").write_inner_content(|w| {
        w.create_element("name")
            .write_text_content(BytesText::new(title))?;
        w.create_element("link")
            .with_attribute(("href", MAPS_HOMEPAGE))
            .write_empty()?;
        w.create_element("type")
            .write_text_content(BytesText::new(track_type))?;
        w.create_element("trkseg").write_inner_content(|w| {
            for (point, elevation) in points.iter().zip(elevations) {
                let ele = format!("{elevation:.2}");
                w.create_element("trkpt")
                    .with_attribute(("lat", point.lat.to_string().as_str()))
                    .with_attribute(("lon", point.lng.to_string().as_str()))
                    .write_inner_content(|w| {
                        w.create_element("ele")
                            .write_text_content(BytesText::new(&ele))?;
                        Ok::<(), quick_xml::Error>(())
                    })?;
            }
            Ok::<(), quick_xml::Error>(())
        })?;
        Ok::<(), quick_xml::Error>(())
    })?;
    Ok(())
}
