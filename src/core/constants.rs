//! Core constants for distance annotation and default map setup.
//! Keeping them in a single place makes it easier to tweak crate-wide magic numbers.

/// Mean earth radius used by the spherical (Haversine) distance formula.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// One international nautical mile in meters.
pub const METERS_PER_NAUTICAL_MILE: f64 = 1852.0;

/// Suffix appended to every segment distance label.
pub const NAUTICAL_MILE_SUFFIX: &str = "NM";

/// Decimal places printed on segment distance labels.
pub const DISTANCE_LABEL_PRECISION: usize = 2;

/// Default container the map view is bound to.
pub const DEFAULT_CONTAINER: &str = "map";

/// Default initial view (Guanabara Bay).
pub const DEFAULT_CENTER: (f64, f64) = (-22.9, -43.2);

/// Default initial zoom level.
pub const DEFAULT_ZOOM: f64 = 10.0;

/// Dash pattern of the temporary route preview line.
pub const PREVIEW_DASH_PATTERN: [f32; 2] = [5.0, 5.0];
