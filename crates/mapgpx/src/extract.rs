//! Route and location extraction from Google Maps URLs
//!
//! Extraction is pure pattern matching over the URL text. Short links are
//! never followed; they only yield a result when the literal string already
//! carries a directions path, a place path, or `@lat,lng` pairs.
//!
//! Matchers run in a fixed order and the first one that recognizes the URL
//! decides the outcome, including its error:
//!
//! | Order | Matcher | Recognizes | Produces |
//! |-------|---------|------------|----------|
//! | 1 | directions | `/maps/dir/<A>/<B>/` | `Route` with names, no coordinates |
//! | 2 | coordinates | two or more `@lat,lng` | `Route` with start, waypoints, end |
//! | 2 | coordinates | exactly one `@lat,lng` | `Location` "Pinned Location" |
//! | 3 | place | `/place/<name>` without any `@lat,lng` | `Location` named, no coordinates |
//!
//! A place URL that also carries a pin is therefore a pinned location.
//! Coordinates must match `-?[0-9]+\.[0-9]+`; integers such as `@40,-74` are
//! not recognized. Name segments must be well-formed percent-encoding: a `%`
//! not followed by two hex digits is rejected.

use std::borrow::Cow;
use std::sync::LazyLock;

use percent_encoding::percent_decode_str;
use regex::{Captures, Regex};

use crate::error::ExtractionError;
use crate::types::{is_google_maps_url, Coordinate, RouteInfo, UrlKind, PINNED_LOCATION_NAME};

static RE_DIRECTIONS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/maps/dir/([^/]+)/([^/]+)/").expect("valid directions regex")
});
static RE_COORDINATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@(-?[0-9]+\.[0-9]+),(-?[0-9]+\.[0-9]+)").expect("valid coordinate regex")
});
static RE_PLACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/place/([^/@]+)").expect("valid place regex"));

type MatchResult = Option<Result<RouteInfo, ExtractionError>>;

/// Matchers in priority order; `None` means "not my pattern, try the next"
const MATCHERS: [(&str, fn(&str) -> MatchResult); 3] = [
    ("directions", match_directions),
    ("coordinates", match_coordinates),
    ("place", match_place),
];

/// Extract a route or location from a Google Maps URL
///
/// # Examples
///
/// ```
/// use mapgpx::{extract, RouteInfo};
///
/// let info = extract("https://www.google.com/maps/dir/New+York/Los+Angeles/@38,-97,5z")?;
/// match info {
///     RouteInfo::Route { start_point, end_point, .. } => {
///         assert_eq!(start_point, "New York");
///         assert_eq!(end_point, "Los Angeles");
///     }
///     RouteInfo::Location { .. } => unreachable!(),
/// }
/// # Ok::<(), mapgpx::ExtractionError>(())
/// ```
///
/// # Errors
///
/// - [`ExtractionError::NoMatch`] when no pattern recognizes the URL
/// - [`ExtractionError::InvalidCoordinates`] / [`ExtractionError::InvalidNumber`]
///   when a matched coordinate is out of range or not finite
/// - [`ExtractionError::InvalidEncoding`] when a name segment does not decode
pub fn extract(url: &str) -> Result<RouteInfo, ExtractionError> {
    let url = url.trim();
    let kind = UrlKind::detect(url);

    if !is_google_maps_url(url) {
        log::warn!("URL does not look like a Google Maps link: {url}");
    }

    for (name, matcher) in MATCHERS {
        if let Some(result) = matcher(url) {
            log::debug!("{name} pattern matched {kind} URL");
            return result;
        }
    }

    log::debug!("no pattern matched {kind} URL");
    Err(ExtractionError::NoMatch)
}

fn match_directions(url: &str) -> MatchResult {
    let caps = RE_DIRECTIONS.captures(url)?;
    Some(directions_route(&caps))
}

fn directions_route(caps: &Captures<'_>) -> Result<RouteInfo, ExtractionError> {
    Ok(RouteInfo::Route {
        start_point: decode_segment(&caps[1])?,
        end_point: decode_segment(&caps[2])?,
        start_coordinates: None,
        end_coordinates: None,
        waypoints: Vec::new(),
    })
}

fn match_coordinates(url: &str) -> MatchResult {
    let pairs: Vec<Captures<'_>> = RE_COORDINATE.captures_iter(url).collect();
    match pairs.as_slice() {
        [] => None,
        [single] => Some(pinned_location(single)),
        _ => Some(coordinate_route(&pairs)),
    }
}

fn pinned_location(caps: &Captures<'_>) -> Result<RouteInfo, ExtractionError> {
    Ok(RouteInfo::Location {
        location_name: PINNED_LOCATION_NAME.to_string(),
        coordinates: Some(parse_pair(caps)?),
    })
}

fn coordinate_route(pairs: &[Captures<'_>]) -> Result<RouteInfo, ExtractionError> {
    let coords = pairs
        .iter()
        .map(parse_pair)
        .collect::<Result<Vec<_>, _>>()?;

    // Caller guarantees at least two pairs.
    let (start, rest) = coords.split_first().ok_or(ExtractionError::NoMatch)?;
    let (end, waypoints) = rest.split_last().ok_or(ExtractionError::NoMatch)?;

    Ok(RouteInfo::Route {
        start_point: start.label(),
        end_point: end.label(),
        start_coordinates: Some(*start),
        end_coordinates: Some(*end),
        waypoints: waypoints.to_vec(),
    })
}

fn match_place(url: &str) -> MatchResult {
    let caps = RE_PLACE.captures(url)?;
    // Any `@lat,lng` was already claimed by the coordinates matcher.
    Some(decode_segment(&caps[1]).map(|location_name| RouteInfo::Location {
        location_name,
        coordinates: None,
    }))
}

/// Parse and validate the `(lat, lng)` capture groups of a coordinate match
fn parse_pair(caps: &Captures<'_>) -> Result<Coordinate, ExtractionError> {
    let lat = parse_component(&caps[1])?;
    let lng = parse_component(&caps[2])?;
    Coordinate::new(lat, lng)
}

fn parse_component(text: &str) -> Result<f64, ExtractionError> {
    text.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ExtractionError::InvalidNumber(text.to_string()))
}

/// Decode a `+`-for-space, percent-encoded path segment
fn decode_segment(segment: &str) -> Result<String, ExtractionError> {
    if has_malformed_escape(segment) {
        return Err(ExtractionError::InvalidEncoding(segment.to_string()));
    }
    let spaced = segment.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(Cow::into_owned)
        .map_err(|_| ExtractionError::InvalidEncoding(segment.to_string()))
}

/// Whether a `%` is not followed by two hex digits
fn has_malformed_escape(segment: &str) -> bool {
    let bytes = segment.as_bytes();
    bytes.iter().enumerate().any(|(i, &b)| {
        b == b'%'
            && !(bytes.get(i + 1).is_some_and(u8::is_ascii_hexdigit)
                && bytes.get(i + 2).is_some_and(u8::is_ascii_hexdigit))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route_parts(info: RouteInfo) -> (String, String, Option<Coordinate>, Option<Coordinate>, Vec<Coordinate>) {
        match info {
            RouteInfo::Route {
                start_point,
                end_point,
                start_coordinates,
                end_coordinates,
                waypoints,
            } => (start_point, end_point, start_coordinates, end_coordinates, waypoints),
            RouteInfo::Location { .. } => panic!("expected route, got {info:?}"),
        }
    }

    fn location_parts(info: RouteInfo) -> (String, Option<Coordinate>) {
        match info {
            RouteInfo::Location {
                location_name,
                coordinates,
            } => (location_name, coordinates),
            RouteInfo::Route { .. } => panic!("expected location, got {info:?}"),
        }
    }

    #[test]
    fn test_directions_url() {
        let info = extract(
            "https://www.google.com/maps/dir/New+York/Los+Angeles/@37.0,-95.7,4z/data=!3m1!4b1",
        )
        .unwrap();
        let (start, end, sc, ec, wps) = route_parts(info);
        assert_eq!(start, "New York");
        assert_eq!(end, "Los Angeles");
        assert!(sc.is_none());
        assert!(ec.is_none());
        assert!(wps.is_empty());
    }

    #[test]
    fn test_directions_percent_decoding() {
        let info =
            extract("https://www.google.com/maps/dir/Caf%C3%A9+de+Flore/Gare+du+Nord%2C+Paris/")
                .unwrap();
        let (start, end, ..) = route_parts(info);
        assert_eq!(start, "Café de Flore");
        assert_eq!(end, "Gare du Nord, Paris");
    }

    #[test]
    fn test_directions_invalid_utf8() {
        let err = extract("https://www.google.com/maps/dir/%FF%FE/B/").unwrap_err();
        assert!(matches!(err, ExtractionError::InvalidEncoding(_)));
    }

    #[test]
    fn test_directions_wins_over_coordinates() {
        let info = extract(
            "https://www.google.com/maps/dir/A/B/@40.712800,-74.006000/@34.052200,-118.243700",
        )
        .unwrap();
        let (start, _, sc, ..) = route_parts(info);
        assert_eq!(start, "A");
        assert!(sc.is_none());
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn test_two_coordinates_route() {
        let info = extract(
            "https://www.google.com/maps/@40.712800,-74.006000,12z/@34.052200,-118.243700,12z",
        )
        .unwrap();
        let (start, end, sc, ec, wps) = route_parts(info);
        let sc = sc.unwrap();
        let ec = ec.unwrap();
        assert_eq!((sc.lat, sc.lng), (40.7128, -74.006));
        assert_eq!((ec.lat, ec.lng), (34.0522, -118.2437));
        assert!(wps.is_empty());
        assert_eq!(start, "Latitude: 40.712800, Longitude: -74.006000");
        assert_eq!(end, "Latitude: 34.052200, Longitude: -118.243700");
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn test_intermediate_coordinates_become_waypoints() {
        let info = extract(
            "https://www.google.com/maps/@1.0,2.0/@3.0,4.0/@5.0,6.0/@7.0,8.0",
        )
        .unwrap();
        let (_, _, sc, ec, wps) = route_parts(info);
        assert_eq!(sc.unwrap().lat, 1.0);
        assert_eq!(ec.unwrap().lat, 7.0);
        let mids: Vec<f64> = wps.iter().map(|c| c.lat).collect();
        assert_eq!(mids, vec![3.0, 5.0]);
    }

    // Short links used to skip waypoints; both URL kinds now share one chain.
    #[test]
    fn test_short_link_populates_waypoints() {
        let info = extract("https://maps.app.goo.gl/x?q=@1.0,2.0/@3.0,4.0/@5.0,6.0").unwrap();
        let (_, _, _, _, wps) = route_parts(info);
        assert_eq!(wps.len(), 1);
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn test_single_coordinate_is_pinned_location() {
        let info = extract("https://www.google.com/maps/@-33.868820,151.209296,15z").unwrap();
        let (name, coords) = location_parts(info);
        assert_eq!(name, PINNED_LOCATION_NAME);
        let coords = coords.unwrap();
        assert_eq!((coords.lat, coords.lng), (-33.86882, 151.209_296));
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn test_place_with_single_pin_is_pinned_location() {
        let info = extract(
            "https://www.google.com/maps/place/Eiffel+Tower/@48.858370,2.294481,17z/data=!3m1",
        )
        .unwrap();
        let (name, coords) = location_parts(info);
        assert_eq!(name, PINNED_LOCATION_NAME);
        let coords = coords.unwrap();
        assert_eq!((coords.lat, coords.lng), (48.85837, 2.294_481));
    }

    #[test]
    fn test_place_with_two_pins_is_route() {
        let info = extract(
            "https://www.google.com/maps/place/Louvre/@48.860600,2.337600,17z/@48.858370,2.294481,17z",
        )
        .unwrap();
        assert!(info.is_route());
    }

    #[test]
    fn test_place_without_coordinates() {
        let info = extract("https://www.google.com/maps/place/Sydney+Opera+House").unwrap();
        let (name, coords) = location_parts(info);
        assert_eq!(name, "Sydney Opera House");
        assert!(coords.is_none());
    }

    #[test]
    fn test_place_terminated_by_at_sign() {
        let info = extract("https://www.google.com/maps/place/Big%20Ben@home").unwrap();
        let (name, _) = location_parts(info);
        assert_eq!(name, "Big Ben");
    }

    #[test]
    fn test_out_of_range_latitude() {
        let err = extract("https://www.google.com/maps/@95.0,10.0,12z").unwrap_err();
        assert!(matches!(err, ExtractionError::InvalidCoordinates { .. }));
    }

    #[test]
    fn test_out_of_range_longitude_in_route() {
        let err = extract("https://www.google.com/maps/@10.0,10.0/@10.0,190.0").unwrap_err();
        assert!(matches!(err, ExtractionError::InvalidCoordinates { .. }));
    }

    #[test]
    fn test_out_of_range_waypoint() {
        let err = extract("https://www.google.com/maps/@10.0,10.0/@-91.0,0.0/@11.0,11.0").unwrap_err();
        assert!(matches!(err, ExtractionError::InvalidCoordinates { .. }));
    }

    #[test]
    fn test_out_of_range_place_coordinate() {
        let err = extract("https://www.google.com/maps/place/Nowhere/@100.5,10.0,12z").unwrap_err();
        assert!(matches!(err, ExtractionError::InvalidCoordinates { .. }));
    }

    #[test]
    fn test_integer_coordinates_not_recognized() {
        let err = extract("https://www.google.com/maps/@40,-74,12z").unwrap_err();
        assert_eq!(err, ExtractionError::NoMatch);
    }

    #[test]
    fn test_no_match() {
        assert_eq!(extract("https://example.com").unwrap_err(), ExtractionError::NoMatch);
        assert_eq!(extract("").unwrap_err(), ExtractionError::NoMatch);
        assert_eq!(
            extract("https://maps.app.goo.gl/abcDEF123").unwrap_err(),
            ExtractionError::NoMatch
        );
    }

    #[test]
    fn test_surrounding_whitespace_ignored() {
        let info = extract("  https://www.google.com/maps/@1.5,2.5,3z \n").unwrap();
        assert!(!info.is_route());
    }

    #[test]
    fn test_decode_segment() {
        assert_eq!(decode_segment("A+B%20C").unwrap(), "A B C");
        assert_eq!(decode_segment("%2B1").unwrap(), "+1");
        assert_eq!(decode_segment("100%25").unwrap(), "100%");
    }

    #[test]
    fn test_malformed_escape_rejected() {
        let err = extract("https://www.google.com/maps/dir/%ZZ/B/").unwrap_err();
        assert_eq!(err, ExtractionError::InvalidEncoding("%ZZ".to_string()));

        assert!(decode_segment("50%").is_err());
        assert!(decode_segment("%4").is_err());
        assert!(decode_segment("a%g1").is_err());
    }
}
