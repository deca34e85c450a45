use crate::{
    core::{
        config::TileSource,
        geo::{LatLng, LatLngBounds},
    },
    layers::image::OverlayImage,
};
use serde::{Deserialize, Serialize};

/// Plain RGBA color, serialized as its components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// Style for point features
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointStyle {
    /// Fill color
    pub fill_color: Color,
    /// Border color
    pub stroke_color: Color,
    /// Border width
    pub stroke_width: f32,
    /// Point radius
    pub radius: f32,
    /// Opacity (0.0 to 1.0)
    pub opacity: f32,
}

impl Default for PointStyle {
    fn default() -> Self {
        Self {
            fill_color: Color::rgb(255, 0, 0),
            stroke_color: Color::rgb(255, 255, 255),
            stroke_width: 2.0,
            radius: 5.0,
            opacity: 1.0,
        }
    }
}

/// Style for line features
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    /// Line color
    pub color: Color,
    /// Line width
    pub width: f32,
    /// Opacity (0.0 to 1.0)
    pub opacity: f32,
    /// Line dash pattern (empty for solid line)
    pub dash_pattern: Vec<f32>,
}

impl LineStyle {
    pub fn is_dashed(&self) -> bool {
        !self.dash_pattern.is_empty()
    }
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: Color::rgb(0, 0, 255),
            width: 2.0,
            opacity: 1.0,
            dash_pattern: Vec::new(),
        }
    }
}

/// Style for polygon features
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonStyle {
    /// Fill color
    pub fill_color: Color,
    /// Border color
    pub stroke_color: Color,
    /// Border width
    pub stroke_width: f32,
    /// Fill opacity (0.0 to 1.0)
    pub fill_opacity: f32,
    /// Stroke opacity (0.0 to 1.0)
    pub stroke_opacity: f32,
}

impl Default for PolygonStyle {
    fn default() -> Self {
        Self {
            fill_color: Color::new(0, 255, 0, 100),
            stroke_color: Color::rgb(0, 200, 0),
            stroke_width: 2.0,
            fill_opacity: 0.4,
            stroke_opacity: 1.0,
        }
    }
}

/// Style for text labels placed on the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelStyle {
    pub text_color: Color,
    pub background: Option<Color>,
    pub text_size: f32,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            text_color: Color::rgb(0, 0, 0),
            background: Some(Color::new(255, 255, 255, 200)),
            text_size: 12.0,
        }
    }
}

/// A single drawable primitive handed to the map engine
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MapElement {
    /// A point marker
    Marker { position: LatLng, style: PointStyle },
    /// A line string (path)
    Polyline {
        points: Vec<LatLng>,
        style: LineStyle,
    },
    /// A closed ring
    Polygon {
        points: Vec<LatLng>,
        style: PolygonStyle,
    },
    /// A georeferenced image stretched over its bounds
    ImageOverlay {
        bounds: LatLngBounds,
        image: OverlayImage,
        opacity: f32,
    },
    /// A text label anchored at a position
    Label {
        position: LatLng,
        text: String,
        style: LabelStyle,
    },
    /// Base imagery tiles
    Tiles(TileSource),
}

impl MapElement {
    /// Geographic extent of the element, if it has one.
    ///
    /// Labels and tiles never contribute to a layer's extent.
    pub fn bounds(&self) -> Option<LatLngBounds> {
        match self {
            MapElement::Marker { position, .. } => Some(LatLngBounds::new(*position, *position)),
            MapElement::Polyline { points, .. } | MapElement::Polygon { points, .. } => {
                LatLngBounds::from_points(points)
            }
            MapElement::ImageOverlay { bounds, .. } => Some(bounds.clone()),
            MapElement::Label { .. } | MapElement::Tiles(_) => None,
        }
    }

    pub fn is_label(&self) -> bool {
        matches!(self, MapElement::Label { .. })
    }

    /// Short type name used in logs and layer summaries
    pub fn kind_name(&self) -> &'static str {
        match self {
            MapElement::Marker { .. } => "marker",
            MapElement::Polyline { .. } => "polyline",
            MapElement::Polygon { .. } => "polygon",
            MapElement::ImageOverlay { .. } => "image_overlay",
            MapElement::Label { .. } => "label",
            MapElement::Tiles(_) => "tiles",
        }
    }
}
