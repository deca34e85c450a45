use crate::{core::geo::LatLngBounds, layers::vector::MapElement};
use serde::{Deserialize, Serialize};

/// Opaque handle to a layer owned by a [`LayerManager`](crate::layers::manager::LayerManager)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LayerId(pub(crate) u64);

impl std::fmt::Display for LayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "layer-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayerKind {
    Markers,
    Polyline,
    Polygon,
    Overlay,
    /// Temporary feedback while a route is being drawn
    Preview,
}

impl std::fmt::Display for LayerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayerKind::Markers => write!(f, "markers"),
            LayerKind::Polyline => write!(f, "polyline"),
            LayerKind::Polygon => write!(f, "polygon"),
            LayerKind::Overlay => write!(f, "overlay"),
            LayerKind::Preview => write!(f, "preview"),
        }
    }
}

/// A named group of drawable elements that is shown and hidden as a unit
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    id: LayerId,
    name: String,
    kind: LayerKind,
    elements: Vec<MapElement>,
    bounds: Option<LatLngBounds>,
}

impl Layer {
    pub(crate) fn new(
        id: LayerId,
        name: String,
        kind: LayerKind,
        elements: Vec<MapElement>,
        bounds: Option<LatLngBounds>,
    ) -> Self {
        Self {
            id,
            name,
            kind,
            elements,
            bounds,
        }
    }

    pub fn id(&self) -> LayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> LayerKind {
        self.kind
    }

    pub fn elements(&self) -> &[MapElement] {
        &self.elements
    }

    pub fn bounds(&self) -> Option<&LatLngBounds> {
        self.bounds.as_ref()
    }

    /// Number of drawable primitives, labels excluded
    pub fn shape_count(&self) -> usize {
        self.elements.iter().filter(|e| !e.is_label()).count()
    }

    pub fn labels(&self) -> impl Iterator<Item = &MapElement> {
        self.elements.iter().filter(|e| e.is_label())
    }

    pub fn label_count(&self) -> usize {
        self.labels().count()
    }

    /// JSON summary for layer lists
    pub fn options(&self) -> serde_json::Value {
        serde_json::json!({
            "id": self.id.to_string(),
            "name": self.name,
            "kind": self.kind.to_string(),
            "shapes": self.shape_count(),
            "labels": self.label_count(),
            "bounds": self.bounds.as_ref().map(|b| serde_json::json!({
                "south": b.south_west.lat,
                "west": b.south_west.lng,
                "north": b.north_east.lat,
                "east": b.north_east.lng
            })),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::geo::LatLng,
        layers::vector::{LabelStyle, LineStyle},
    };

    fn sample_layer() -> Layer {
        let points = vec![LatLng::new(-22.8, -43.0), LatLng::new(-22.9, -43.1)];
        Layer::new(
            LayerId(7),
            "Route".to_string(),
            LayerKind::Polyline,
            vec![
                MapElement::Polyline {
                    points: points.clone(),
                    style: LineStyle::default(),
                },
                MapElement::Label {
                    position: points[0].midpoint(&points[1]),
                    text: "8.16 NM".to_string(),
                    style: LabelStyle::default(),
                },
            ],
            LatLngBounds::from_points(&points),
        )
    }

    #[test]
    fn test_layer_counts() {
        let layer = sample_layer();
        assert_eq!(layer.shape_count(), 1);
        assert_eq!(layer.label_count(), 1);
        assert_eq!(layer.elements().len(), 2);
    }

    #[test]
    fn test_layer_options() {
        let options = sample_layer().options();
        assert_eq!(options["id"], "layer-7");
        assert_eq!(options["kind"], "polyline");
        assert_eq!(options["bounds"]["south"], -22.9);
        assert_eq!(options["bounds"]["east"], -43.0);
    }

    #[test]
    fn test_layer_kind_display() {
        assert_eq!(LayerKind::Overlay.to_string(), "overlay");
        assert_eq!(LayerKind::Preview.to_string(), "preview");
    }
}
