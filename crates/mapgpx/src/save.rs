//! Output file naming and saving

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::types::RouteInfo;

const ROUTE_LABEL_CHARS: usize = 10;
const LOCATION_LABEL_CHARS: usize = 20;

/// Derive the output file name for `info`
///
/// Routes become `route_{start}_to_{end}.gpx` with each label cut to its
/// first 10 characters; locations become `location_{name}.gpx` with the name
/// cut to 20 characters. Whitespace, commas and colons turn into `_`, as do
/// path separators so a decoded name cannot escape the output directory.
///
/// # Examples
///
/// ```
/// use mapgpx::{suggested_filename, RouteInfo};
///
/// let info = RouteInfo::Location {
///     location_name: "Eiffel Tower".to_string(),
///     coordinates: None,
/// };
/// assert_eq!(suggested_filename(&info), "location_Eiffel_Tower.gpx");
/// ```
#[must_use]
pub fn suggested_filename(info: &RouteInfo) -> String {
    let raw = match info {
        RouteInfo::Route {
            start_point,
            end_point,
            ..
        } => format!(
            "route_{}_to_{}.gpx",
            truncate_chars(start_point, ROUTE_LABEL_CHARS),
            truncate_chars(end_point, ROUTE_LABEL_CHARS)
        ),
        RouteInfo::Location { location_name, .. } => format!(
            "location_{}.gpx",
            truncate_chars(location_name, LOCATION_LABEL_CHARS)
        ),
    };
    raw.chars()
        .map(|c| {
            if c.is_whitespace() || matches!(c, ',' | ':' | '/' | '\\') {
                '_'
            } else {
                c
            }
        })
        .collect()
}

fn truncate_chars(s: &str, max: usize) -> &str {
    s.char_indices().nth(max).map_or(s, |(end, _)| &s[..end])
}

/// Write `content` to `dir` under the name derived from `info`
///
/// Returns the path written.
///
/// # Errors
///
/// Returns [`MapGpxError::Io`](crate::MapGpxError::Io) if the file cannot be
/// written.
pub fn save_gpx(dir: &Path, info: &RouteInfo, content: &str) -> Result<PathBuf> {
    let path = dir.join(suggested_filename(info));
    write_gpx(&path, content)?;
    Ok(path)
}

/// Write `content` to an explicit path
///
/// # Errors
///
/// Returns [`MapGpxError::Io`](crate::MapGpxError::Io) if the file cannot be
/// written.
pub fn write_gpx(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)?;
    log::info!("wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}
