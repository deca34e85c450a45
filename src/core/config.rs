//! Configuration for the map view and the layers the controller builds
//!
//! Everything here has a sensible default, so a host only spells out what it
//! wants to change. Options can also be loaded from JSON.

use crate::{
    core::{constants, geo::LatLng},
    layers::vector::{Color, LabelStyle, LineStyle, PointStyle, PolygonStyle},
    MapError, Result,
};
use serde::{Deserialize, Serialize};

/// Concrete tile endpoint for the base imagery layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileSource {
    pub url_template: String,
    pub attribution: String,
    #[serde(default)]
    pub subdomains: Vec<String>,
    pub max_zoom: u8,
}

/// Base imagery presets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum BaseImagery {
    #[default]
    EsriWorldImagery,
    OpenStreetMap,
    Custom(TileSource),
}

impl BaseImagery {
    pub fn resolve(&self) -> TileSource {
        match self {
            Self::EsriWorldImagery => TileSource {
                url_template: "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}".to_string(),
                attribution: "© Esri, Maxar, Earthstar Geographics, and the GIS User Community".to_string(),
                subdomains: Vec::new(),
                max_zoom: 19,
            },
            Self::OpenStreetMap => TileSource {
                url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
                attribution: "© OpenStreetMap contributors".to_string(),
                subdomains: vec!["a".to_string(), "b".to_string(), "c".to_string()],
                max_zoom: 19,
            },
            Self::Custom(source) => source.clone(),
        }
    }
}

/// Styles applied to every layer kind the controller builds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerStyles {
    pub marker: PointStyle,
    pub polyline: LineStyle,
    pub polygon: PolygonStyle,
    pub label: LabelStyle,
    pub overlay_opacity: f32,
    pub preview_marker: PointStyle,
    pub preview_line: LineStyle,
}

impl Default for LayerStyles {
    fn default() -> Self {
        Self {
            marker: PointStyle::default(),
            polyline: LineStyle {
                color: Color::rgb(255, 200, 0),
                width: 3.0,
                ..LineStyle::default()
            },
            polygon: PolygonStyle::default(),
            label: LabelStyle::default(),
            overlay_opacity: 0.8,
            preview_marker: PointStyle {
                fill_color: Color::rgb(255, 255, 255),
                stroke_color: Color::rgb(255, 200, 0),
                radius: 4.0,
                ..PointStyle::default()
            },
            preview_line: LineStyle {
                color: Color::rgb(255, 200, 0),
                width: 2.0,
                opacity: 0.8,
                dash_pattern: constants::PREVIEW_DASH_PATTERN.to_vec(),
            },
        }
    }
}

/// Options the map view is created with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapOptions {
    /// Id of the host container the view is bound to
    pub container: String,
    pub center: LatLng,
    pub zoom: f64,
    pub min_zoom: Option<f64>,
    pub max_zoom: Option<f64>,
    pub base_imagery: BaseImagery,
    pub styles: LayerStyles,
}

impl Default for MapOptions {
    fn default() -> Self {
        let (lat, lng) = constants::DEFAULT_CENTER;
        Self {
            container: constants::DEFAULT_CONTAINER.to_string(),
            center: LatLng::new(lat, lng),
            zoom: constants::DEFAULT_ZOOM,
            min_zoom: None,
            max_zoom: None,
            base_imagery: BaseImagery::default(),
            styles: LayerStyles::default(),
        }
    }
}

impl MapOptions {
    /// Parses options from JSON; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let options: MapOptions = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<()> {
        if self.container.trim().is_empty() {
            return Err(MapError::Config("container id is empty".to_string()));
        }
        if !self.center.is_valid() {
            return Err(MapError::InvalidCoordinates(format!(
                "center ({}, {}) out of range",
                self.center.lat, self.center.lng
            )));
        }
        if let (Some(min), Some(max)) = (self.min_zoom, self.max_zoom) {
            if min > max {
                return Err(MapError::Config(format!(
                    "min_zoom {} exceeds max_zoom {}",
                    min, max
                )));
            }
        }
        Ok(())
    }

    pub fn with_container(mut self, container: impl Into<String>) -> Self {
        self.container = container.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = MapOptions::default();
        assert_eq!(options.container, "map");
        assert_eq!(options.base_imagery, BaseImagery::EsriWorldImagery);
        assert!(options.styles.preview_line.is_dashed());
        assert!(!options.styles.polyline.is_dashed());
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let options = MapOptions::from_json(
            r#"{"container": "chart", "zoom": 12.0, "base_imagery": "OpenStreetMap"}"#,
        )
        .unwrap();
        assert_eq!(options.container, "chart");
        assert_eq!(options.zoom, 12.0);
        assert_eq!(options.center, MapOptions::default().center);
        assert_eq!(
            options.base_imagery.resolve().url_template,
            "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png"
        );
    }

    #[test]
    fn test_from_json_rejects_bad_center() {
        let result = MapOptions::from_json(r#"{"center": {"lat": 120.0, "lng": 0.0}}"#);
        assert!(matches!(result, Err(MapError::InvalidCoordinates(_))));
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            MapOptions::from_json("not json"),
            Err(MapError::Serialization(_))
        ));
    }

    #[test]
    fn test_custom_imagery_resolves_to_itself() {
        let source = TileSource {
            url_template: "https://tiles.example/{z}/{x}/{y}.png".to_string(),
            attribution: String::new(),
            subdomains: Vec::new(),
            max_zoom: 16,
        };
        assert_eq!(BaseImagery::Custom(source.clone()).resolve(), source);
    }
}
