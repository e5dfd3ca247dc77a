//! Error types for URL extraction and GPX generation

use std::io;
use thiserror::Error;

/// Errors raised while extracting a route or location from a URL
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtractionError {
    /// None of the recognized URL patterns matched
    #[error("could not extract route or location information")]
    NoMatch,

    /// A coordinate pair was parsed but lies outside the valid range
    #[error("invalid coordinates: latitude {lat}, longitude {lng}")]
    InvalidCoordinates { lat: f64, lng: f64 },

    /// A coordinate component did not parse as a finite number
    #[error("invalid coordinates: '{0}' is not a finite number")]
    InvalidNumber(String),

    /// A percent-encoded path segment did not decode to UTF-8
    #[error("invalid percent-encoding in '{0}'")]
    InvalidEncoding(String),
}

/// Errors raised while writing a GPX document
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The XML writer failed
    #[error("XML write error: {0}")]
    Xml(String),

    /// The writer produced bytes that are not UTF-8
    #[error("generated document is not UTF-8: {0}")]
    Utf8(String),

    /// The generator configuration would produce an invalid document
    #[error("invalid generator configuration: {0}")]
    InvalidConfig(String),

    /// The elevation source returned NaN or infinity
    #[error("elevation for track point {index} is not finite")]
    InvalidElevation { index: usize },
}

impl From<quick_xml::Error> for GenerationError {
    fn from(e: quick_xml::Error) -> Self {
        Self::Xml(e.to_string())
    }
}

/// Umbrella error for the whole convert pipeline
#[derive(Debug, Error)]
pub enum MapGpxError {
    /// URL extraction failed
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    /// GPX generation failed
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// IO error while saving
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Invalid generator configuration
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result type for mapgpx operations
pub type Result<T> = std::result::Result<T, MapGpxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_match_message() {
        assert_eq!(
            ExtractionError::NoMatch.to_string(),
            "could not extract route or location information"
        );
    }

    #[test]
    fn test_invalid_coordinates_message() {
        let err = ExtractionError::InvalidCoordinates {
            lat: 95.0,
            lng: 10.0,
        };
        assert!(err.to_string().starts_with("invalid coordinates"));
    }

    #[test]
    fn test_umbrella_is_transparent() {
        let err: MapGpxError = ExtractionError::NoMatch.into();
        assert_eq!(
            err.to_string(),
            "could not extract route or location information"
        );
    }
}
