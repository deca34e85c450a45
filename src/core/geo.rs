use crate::core::constants::EARTH_RADIUS_METERS;
use geo::BoundingRect;
use serde::{Deserialize, Serialize};

/// Represents a geographical coordinate with latitude and longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Creates a new LatLng coordinate
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validates that the coordinates are within valid ranges
    pub fn is_valid(&self) -> bool {
        self.lat >= -90.0 && self.lat <= 90.0 && self.lng >= -180.0 && self.lng <= 180.0
    }

    /// Great-circle distance to another LatLng in meters (Haversine, spherical earth)
    pub fn distance_to(&self, other: &LatLng) -> f64 {
        let lat1_rad = self.lat.to_radians();
        let lat2_rad = other.lat.to_radians();
        let delta_lat = (other.lat - self.lat).to_radians();
        let delta_lng = (other.lng - self.lng).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_METERS * c
    }

    /// Longitude wrapped into [-180, 180) and latitude clamped to the poles.
    ///
    /// Engines that repeat the world horizontally report clicks on a copy
    /// with longitudes outside that range.
    pub fn wrapped(&self) -> LatLng {
        LatLng::new(
            self.lat.clamp(-90.0, 90.0),
            (self.lng + 180.0).rem_euclid(360.0) - 180.0,
        )
    }

    /// Arithmetic midpoint of latitude and longitude.
    ///
    /// This is a label anchor, not the geodesic midpoint.
    pub fn midpoint(&self, other: &LatLng) -> LatLng {
        LatLng::new((self.lat + other.lat) / 2.0, (self.lng + other.lng) / 2.0)
    }
}

impl Default for LatLng {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl From<LatLng> for geo_types::Coord<f64> {
    fn from(lat_lng: LatLng) -> Self {
        geo_types::coord! { x: lat_lng.lng, y: lat_lng.lat }
    }
}

impl From<geo_types::Coord<f64>> for LatLng {
    fn from(coord: geo_types::Coord<f64>) -> Self {
        LatLng::new(coord.y, coord.x)
    }
}

/// Represents a bounding box of geographical coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl LatLngBounds {
    pub fn new(south_west: LatLng, north_east: LatLng) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    /// Creates bounds from individual coordinates
    pub fn from_coords(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self::new(LatLng::new(south, west), LatLng::new(north, east))
    }

    /// Smallest bounds containing every point, or `None` for an empty slice
    pub fn from_points(points: &[LatLng]) -> Option<Self> {
        let line: geo_types::LineString<f64> = points
            .iter()
            .map(|p| geo_types::Coord::from(*p))
            .collect::<Vec<_>>()
            .into();
        line.bounding_rect()
            .map(|rect| Self::new(rect.min().into(), rect.max().into()))
    }

    /// Checks if the bounds contain a point
    pub fn contains(&self, point: &LatLng) -> bool {
        point.lat >= self.south_west.lat
            && point.lat <= self.north_east.lat
            && point.lng >= self.south_west.lng
            && point.lng <= self.north_east.lng
    }

    /// Gets the center point of the bounds
    pub fn center(&self) -> LatLng {
        self.south_west.midpoint(&self.north_east)
    }

    /// Returns the union of this bounds with another bounds
    pub fn union(&self, other: &LatLngBounds) -> LatLngBounds {
        let south = self.south_west.lat.min(other.south_west.lat);
        let west = self.south_west.lng.min(other.south_west.lng);
        let north = self.north_east.lat.max(other.north_east.lat);
        let east = self.north_east.lng.max(other.north_east.lng);

        LatLngBounds::new(LatLng::new(south, west), LatLng::new(north, east))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lat_lng_creation() {
        let coord = LatLng::new(-22.9068, -43.1729);
        assert_eq!(coord.lat, -22.9068);
        assert_eq!(coord.lng, -43.1729);
        assert!(coord.is_valid());
        assert!(!LatLng::new(91.0, 0.0).is_valid());
        assert!(!LatLng::new(0.0, -180.5).is_valid());
    }

    #[test]
    fn test_lat_lng_distance() {
        let nyc = LatLng::new(40.7128, -74.0060);
        let la = LatLng::new(34.0522, -118.2437);
        let distance = nyc.distance_to(&la);

        // Distance should be approximately 3936 km
        assert!((distance - 3_936_000.0).abs() < 10_000.0);
    }

    #[test]
    fn test_one_minute_of_latitude_is_about_one_nautical_mile() {
        let a = LatLng::new(0.0, 0.0);
        let b = LatLng::new(1.0 / 60.0, 0.0);
        assert!((a.distance_to(&b) - 1852.0).abs() < 5.0);
    }

    #[test]
    fn test_midpoint() {
        let mid = LatLng::new(-22.8, -43.0).midpoint(&LatLng::new(-22.9, -43.2));
        assert!((mid.lat + 22.85).abs() < 1e-9);
        assert!((mid.lng + 43.1).abs() < 1e-9);
    }

    #[test]
    fn test_bounds_from_points() {
        let bounds = LatLngBounds::from_points(&[
            LatLng::new(-22.8, -43.0),
            LatLng::new(-23.1, -43.4),
            LatLng::new(-22.9, -42.9),
        ])
        .unwrap();
        assert_eq!(bounds.south_west, LatLng::new(-23.1, -43.4));
        assert_eq!(bounds.north_east, LatLng::new(-22.8, -42.9));
        assert!(LatLngBounds::from_points(&[]).is_none());
    }

    #[test]
    fn test_wrapped_longitude() {
        let wrapped = LatLng::new(-22.9, 316.9).wrapped();
        assert!((wrapped.lng + 43.1).abs() < 1e-9);
        assert_eq!(wrapped.lat, -22.9);
        assert!((LatLng::new(10.0, -200.0).wrapped().lng - 160.0).abs() < 1e-9);
        assert_eq!(LatLng::new(-22.8, -43.0).wrapped(), LatLng::new(-22.8, -43.0));
        assert_eq!(LatLng::new(95.0, 0.0).wrapped().lat, 90.0);
    }

    #[test]
    fn test_bounds_union() {
        let a = LatLngBounds::from_coords(-23.0, -43.5, -22.5, -43.0);
        let b = LatLngBounds::from_coords(-22.8, -43.2, -22.0, -42.0);
        let both = a.union(&b);
        assert_eq!(both, LatLngBounds::from_coords(-23.0, -43.5, -22.0, -42.0));
        assert_eq!(b.union(&a), both);
    }

    #[test]
    fn test_bounds_contains() {
        let bounds = LatLngBounds::from_coords(40.0, -75.0, 41.0, -73.0);
        assert!(bounds.contains(&LatLng::new(40.5, -74.0)));
        assert!(!bounds.contains(&LatLng::new(42.0, -74.0)));
    }
}
