//! Plain-text coordinate files and georeferenced image filenames
//!
//! Body format: one `lat lng` pair per line, separated by any whitespace.
//! Blank and malformed lines are skipped. Image overlays carry their extent in
//! the filename as `{swLat}_{swLng}_{neLat}_{neLng}.{ext}`.
//!
//! Nothing in here fails on bad input; the worst case is an empty result.

use crate::{
    core::geo::{LatLng, LatLngBounds},
    Result,
};
use std::{path::Path, sync::Arc};

/// An uploaded file, parsed both ways
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateFile {
    name: String,
    contents: Arc<[u8]>,
    bounds: Option<LatLngBounds>,
    points: Vec<LatLng>,
}

impl CoordinateFile {
    /// Parses raw file bytes. Non-UTF-8 content yields no points.
    pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        let name = name.into();
        let contents = bytes.into();
        let bounds = parse_filename_bounds(&name);
        let points = match std::str::from_utf8(&contents) {
            Ok(text) => parse_points(text),
            Err(_) => {
                log::debug!("'{}' is not text, no coordinate lines read", name);
                Vec::new()
            }
        };

        Self {
            name,
            contents,
            bounds,
            points,
        }
    }

    /// Parses already decoded text content
    pub fn from_text(name: impl Into<String>, text: &str) -> Self {
        Self::from_bytes(name, text.as_bytes())
    }

    /// Reads and parses a file. I/O failure yields an empty point list;
    /// the filename is still checked for bounds.
    pub fn read(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read(path) {
            Ok(bytes) => Self::from_bytes(file_name(path), bytes),
            Err(e) => Self::unreadable(path, e),
        }
    }

    /// Like [`CoordinateFile::read`] but hands the I/O error back
    pub fn read_strict(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        Ok(Self::from_bytes(file_name(path), bytes))
    }

    /// Non-blocking [`CoordinateFile::read`]
    #[cfg(feature = "tokio-runtime")]
    pub async fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match tokio::fs::read(path).await {
            Ok(bytes) => Self::from_bytes(file_name(path), bytes),
            Err(e) => Self::unreadable(path, e),
        }
    }

    fn unreadable(path: &Path, error: std::io::Error) -> Self {
        log::warn!("could not read {}: {}", path.display(), error);
        Self::from_bytes(file_name(path), Vec::<u8>::new())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw bytes, used as the image payload of an overlay
    pub fn contents(&self) -> &[u8] {
        &self.contents
    }

    pub(crate) fn shared_contents(&self) -> Arc<[u8]> {
        Arc::clone(&self.contents)
    }

    /// Overlay extent taken from the filename, if it encodes one
    pub fn bounds(&self) -> Option<&LatLngBounds> {
        self.bounds.as_ref()
    }

    /// Coordinates in file order
    pub fn points(&self) -> &[LatLng] {
        &self.points
    }

    pub fn into_points(self) -> Vec<LatLng> {
        self.points
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn parse_finite(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Reads `{swLat}_{swLng}_{neLat}_{neLng}.{ext}` into bounds.
///
/// An all-digit suffix after the last dot is the fraction of the last token,
/// not an extension, so `1_2_3_4.5` ends at 4.5. Any other shape gives `None`.
pub fn parse_filename_bounds(file_name: &str) -> Option<LatLngBounds> {
    let name = Path::new(file_name).file_name()?.to_str()?;
    let stem = match name.rsplit_once('.') {
        Some((stem, ext)) if !ext.is_empty() && !ext.bytes().all(|b| b.is_ascii_digit()) => stem,
        _ => name,
    };
    let tokens: Vec<&str> = stem.split('_').collect();
    if tokens.len() != 4 {
        log::debug!("'{}' does not encode overlay bounds", file_name);
        return None;
    }

    let mut values = [0.0; 4];
    for (slot, token) in values.iter_mut().zip(&tokens) {
        match parse_finite(token) {
            Some(value) => *slot = value,
            None => {
                log::debug!("'{}': bad bounds token '{}'", file_name, token);
                return None;
            }
        }
    }

    let [south, west, north, east] = values;
    Some(LatLngBounds::from_coords(south, west, north, east))
}

/// Parses one coordinate per line, in order. Bad lines are dropped.
pub fn parse_points(content: &str) -> Vec<LatLng> {
    content
        .split(|c| c == '\n' || c == '\r')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let point = parse_line(line);
            if point.is_none() {
                log::debug!("skipping malformed coordinate line '{}'", line);
            }
            point
        })
        .collect()
}

fn parse_line(line: &str) -> Option<LatLng> {
    let mut tokens = line.split_whitespace();
    let lat = parse_finite(tokens.next()?)?;
    let lng = parse_finite(tokens.next()?)?;
    Some(LatLng::new(lat, lng))
}

/// Writes points in the format [`parse_points`] reads
pub fn serialize_points(points: &[LatLng]) -> String {
    points
        .iter()
        .map(|p| format!("{} {}\n", p.lat, p.lng))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skips_blank_and_malformed_lines() {
        let points = parse_points("-22.8 -43.0\n\nbad line\n-22.9 -43.1");
        assert_eq!(
            points,
            vec![LatLng::new(-22.8, -43.0), LatLng::new(-22.9, -43.1)]
        );
    }

    #[test]
    fn test_crlf_tabs_and_extra_columns() {
        let points = parse_points("  -22.8\t-43.0  \r\n-22.9    -43.1 trailing\r\n\r\n");
        assert_eq!(
            points,
            vec![LatLng::new(-22.8, -43.0), LatLng::new(-22.9, -43.1)]
        );
    }

    #[test]
    fn test_single_token_and_non_finite_lines_dropped() {
        let points = parse_points("-22.8\nNaN 1.0\n1.0 inf\n+1.5 .5");
        assert_eq!(points, vec![LatLng::new(1.5, 0.5)]);
    }

    #[test]
    fn test_round_trip() {
        let points = vec![
            LatLng::new(-22.812345678, -43.000001),
            LatLng::new(0.0, 180.0),
            LatLng::new(89.5, -179.25),
        ];
        assert_eq!(parse_points(&serialize_points(&points)), points);
    }

    #[test]
    fn test_filename_bounds() {
        let bounds = parse_filename_bounds("-23.0_-43.5_-22.5_-43.0.jpg").unwrap();
        assert_eq!(bounds.south_west, LatLng::new(-23.0, -43.5));
        assert_eq!(bounds.north_east, LatLng::new(-22.5, -43.0));
    }

    #[test]
    fn test_filename_fraction_is_not_an_extension() {
        let bare = parse_filename_bounds("1_2_3_4.5").unwrap();
        assert_eq!(bare.north_east, LatLng::new(3.0, 4.5));

        let with_ext = parse_filename_bounds("1_2_3_4.5.png").unwrap();
        assert_eq!(with_ext.north_east, LatLng::new(3.0, 4.5));

        let integral = parse_filename_bounds("-23_-44_-22_-43").unwrap();
        assert_eq!(integral.south_west, LatLng::new(-23.0, -44.0));
    }

    #[test]
    fn test_filename_without_bounds() {
        assert!(parse_filename_bounds("chart.jpg").is_none());
        assert!(parse_filename_bounds("1_2_3.png").is_none());
        assert!(parse_filename_bounds("1_2_3_4_5.png").is_none());
        assert!(parse_filename_bounds("1_2_x_4.png").is_none());
        assert!(parse_filename_bounds("1_2_NaN_4.png").is_none());
        assert!(parse_filename_bounds("").is_none());
    }

    #[test]
    fn test_file_can_carry_bounds_and_points() {
        let file = CoordinateFile::from_text("-23_-44_-22_-43.txt", "-22.5 -43.5\n-22.6 -43.6\n");
        assert!(file.bounds().is_some());
        assert_eq!(file.points().len(), 2);
    }

    #[test]
    fn test_binary_content_has_no_points() {
        let file = CoordinateFile::from_bytes(
            "-23_-44_-22_-43.png",
            vec![0x89, b'P', b'N', b'G', 0xFF, 0xFE],
        );
        assert!(file.bounds().is_some());
        assert!(file.points().is_empty());
        assert_eq!(file.contents().len(), 6);
    }

    #[test]
    fn test_unreadable_file_is_empty() {
        let file = CoordinateFile::read("/definitely/not/here/-23_-44_-22_-43.png");
        assert!(file.points().is_empty());
        assert!(file.bounds().is_some());
        assert!(CoordinateFile::read_strict("/definitely/not/here.txt").is_err());
    }
}
