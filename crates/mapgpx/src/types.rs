//! Data model shared by the extractor and the generator

use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;

/// Title used when a location carries no usable name
pub const DEFAULT_LOCATION_TITLE: &str = "Google Maps Location";

/// Name given to locations recovered from a bare `@lat,lng` pin
pub const PINNED_LOCATION_NAME: &str = "Pinned Location";

/// WGS84 coordinate in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees, within [-90, 90]
    pub lat: f64,
    /// Longitude in degrees, within [-180, 180]
    pub lng: f64,
}

impl Coordinate {
    /// Build a coordinate, rejecting non-finite or out-of-range values
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError::InvalidCoordinates`] when either component
    /// is NaN, infinite, or outside its valid range.
    pub fn new(lat: f64, lng: f64) -> Result<Self, ExtractionError> {
        let coordinate = Self { lat, lng };
        if coordinate.is_valid() {
            Ok(coordinate)
        } else {
            Err(ExtractionError::InvalidCoordinates { lat, lng })
        }
    }

    /// Whether both components are finite and in range
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    /// Human-readable label used when no place name is known
    #[must_use]
    pub fn label(&self) -> String {
        format!("Latitude: {:.6}, Longitude: {:.6}", self.lat, self.lng)
    }
}

/// Result of URL extraction: either a two-point route or a single location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RouteInfo {
    /// Route between two endpoints with optional intermediate waypoints
    #[serde(rename_all = "camelCase")]
    Route {
        /// Start label: decoded place name or a coordinate label
        start_point: String,
        /// End label: decoded place name or a coordinate label
        end_point: String,
        /// Start coordinate, `None` when only a name was recovered
        start_coordinates: Option<Coordinate>,
        /// End coordinate, `None` when only a name was recovered
        end_coordinates: Option<Coordinate>,
        /// Points strictly between start and end, in URL order
        #[serde(default)]
        waypoints: Vec<Coordinate>,
    },
    /// Single named or pinned location
    #[serde(rename_all = "camelCase")]
    Location {
        /// Decoded place name, or "Pinned Location"
        location_name: String,
        /// Location coordinate, `None` when only a name was recovered
        coordinates: Option<Coordinate>,
    },
}

impl RouteInfo {
    /// Document title: `Route: {start} to {end}` or the location name
    #[must_use]
    pub fn title(&self) -> String {
        match self {
            Self::Route {
                start_point,
                end_point,
                ..
            } => format!("Route: {start_point} to {end_point}"),
            Self::Location { location_name, .. } if location_name.trim().is_empty() => {
                DEFAULT_LOCATION_TITLE.to_string()
            }
            Self::Location { location_name, .. } => location_name.clone(),
        }
    }

    /// All known coordinates in travel order
    ///
    /// For a route this is start (if known), waypoints, end (if known).
    #[must_use]
    pub fn points(&self) -> Vec<Coordinate> {
        match self {
            Self::Route {
                start_coordinates,
                end_coordinates,
                waypoints,
                ..
            } => start_coordinates
                .iter()
                .chain(waypoints)
                .chain(end_coordinates)
                .copied()
                .collect(),
            Self::Location { coordinates, .. } => coordinates.iter().copied().collect(),
        }
    }

    /// Whether this is the route variant
    #[must_use]
    pub const fn is_route(&self) -> bool {
        matches!(self, Self::Route { .. })
    }
}

/// Shape of the input link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UrlKind {
    /// Redirect-style short link (`maps.app.goo.gl`, `goo.gl/maps`)
    Shortened,
    /// Any other URL
    Standard,
}

impl UrlKind {
    /// Classify a raw URL string
    #[must_use]
    pub fn detect(url: &str) -> Self {
        if url.contains("maps.app.goo.gl") || url.contains("goo.gl/maps") {
            Self::Shortened
        } else {
            Self::Standard
        }
    }
}

impl std::fmt::Display for UrlKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Shortened => write!(f, "shortened"),
            Self::Standard => write!(f, "standard"),
        }
    }
}

/// Whether a URL looks like a Google Maps link
///
/// Accepts `google.<tld>/maps`, `maps.google.<tld>`, and the two short-link
/// hosts. Extraction does not require this to hold.
#[must_use]
pub fn is_google_maps_url(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    let rest = lower
        .strip_prefix("https://")
        .or_else(|| lower.strip_prefix("http://"))
        .unwrap_or(lower.as_str());
    let (host, path) = rest.split_once('/').unwrap_or((rest, ""));
    let host = host.strip_prefix("www.").unwrap_or(host);

    if host == "maps.app.goo.gl" || (host == "goo.gl" && path.starts_with("maps")) {
        return true;
    }
    if host.starts_with("maps.google.") {
        return true;
    }
    host.starts_with("google.") && path.starts_with("maps")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_range() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
        assert!(Coordinate::new(90.000_001, 0.0).is_err());
        assert!(Coordinate::new(0.0, -180.5).is_err());
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_coordinate_label() {
        let c = Coordinate {
            lat: 40.7128,
            lng: -74.006,
        };
        assert_eq!(c.label(), "Latitude: 40.712800, Longitude: -74.006000");
    }

    #[test]
    fn test_route_points_order() {
        let info = RouteInfo::Route {
            start_point: "a".into(),
            end_point: "b".into(),
            start_coordinates: Some(Coordinate { lat: 1.0, lng: 2.0 }),
            end_coordinates: Some(Coordinate { lat: 5.0, lng: 6.0 }),
            waypoints: vec![Coordinate { lat: 3.0, lng: 4.0 }],
        };
        let lats: Vec<f64> = info.points().iter().map(|c| c.lat).collect();
        assert_eq!(lats, vec![1.0, 3.0, 5.0]);
    }

    #[test]
    fn test_route_points_skip_unknown() {
        let info = RouteInfo::Route {
            start_point: "a".into(),
            end_point: "b".into(),
            start_coordinates: None,
            end_coordinates: Some(Coordinate { lat: 5.0, lng: 6.0 }),
            waypoints: vec![],
        };
        assert_eq!(info.points().len(), 1);
    }

    #[test]
    fn test_titles() {
        let route = RouteInfo::Route {
            start_point: "New York".into(),
            end_point: "Boston".into(),
            start_coordinates: None,
            end_coordinates: None,
            waypoints: vec![],
        };
        assert_eq!(route.title(), "Route: New York to Boston");

        let blank = RouteInfo::Location {
            location_name: "  ".into(),
            coordinates: None,
        };
        assert_eq!(blank.title(), DEFAULT_LOCATION_TITLE);
    }

    #[test]
    fn test_serde_shape() {
        let info = RouteInfo::Location {
            location_name: "Pinned Location".into(),
            coordinates: Some(Coordinate { lat: 1.5, lng: 2.5 }),
        };
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["type"], "location");
        assert_eq!(json["locationName"], "Pinned Location");
        assert_eq!(json["coordinates"]["lat"], 1.5);

        let back: RouteInfo = serde_json::from_value(json).unwrap();
        assert_eq!(back, info);
    }

    #[test]
    fn test_url_kind() {
        assert_eq!(
            UrlKind::detect("https://maps.app.goo.gl/abc"),
            UrlKind::Shortened
        );
        assert_eq!(UrlKind::detect("https://goo.gl/maps/xyz"), UrlKind::Shortened);
        assert_eq!(
            UrlKind::detect("https://www.google.com/maps/@1.0,2.0,3z"),
            UrlKind::Standard
        );
    }

    #[test]
    fn test_is_google_maps_url() {
        assert!(is_google_maps_url("https://www.google.com/maps/dir/A/B/"));
        assert!(is_google_maps_url("https://google.co.uk/maps/place/X"));
        assert!(is_google_maps_url("https://maps.google.com/?q=1"));
        assert!(is_google_maps_url("https://maps.app.goo.gl/abc"));
        assert!(is_google_maps_url("goo.gl/maps/abc"));
        assert!(!is_google_maps_url("https://example.com"));
        assert!(!is_google_maps_url("https://www.google.com/search?q=maps"));
    }
}
