use crate::{
    core::{
        config::LayerStyles,
        geo::{LatLng, LatLngBounds},
    },
    layers::{
        base::{LayerId, LayerKind},
        image::OverlayImage,
        manager::LayerManager,
        vector::MapElement,
    },
    plugins::measure::DistanceAnnotator,
};

/// Builds layers of every kind and registers them, hidden, with a manager.
///
/// The route tool finalizes through the same `polyline` path as direct calls,
/// so both end up with identical elements and labels.
#[derive(Debug, Clone)]
pub struct LayerFactory {
    styles: LayerStyles,
    annotator: DistanceAnnotator,
}

impl LayerFactory {
    pub fn new(styles: LayerStyles) -> Self {
        let annotator = DistanceAnnotator::with_style(styles.label.clone());
        Self { styles, annotator }
    }

    pub fn markers(&self, layers: &mut LayerManager, points: &[LatLng]) -> LayerId {
        let elements: Vec<MapElement> = points
            .iter()
            .map(|position| MapElement::Marker {
                position: *position,
                style: self.styles.marker.clone(),
            })
            .collect();
        let bounds = extent(&elements);
        layers.create(
            LayerKind::Markers,
            format!("Markers ({})", points.len()),
            elements,
            bounds,
        )
    }

    pub fn polygon(&self, layers: &mut LayerManager, points: &[LatLng]) -> LayerId {
        let elements = vec![MapElement::Polygon {
            points: points.to_vec(),
            style: self.styles.polygon.clone(),
        }];
        let bounds = extent(&elements);
        layers.create(
            LayerKind::Polygon,
            format!("Polygon ({} vertices)", points.len()),
            elements,
            bounds,
        )
    }

    /// The line plus one distance label per leg, sharing a single layer
    pub fn polyline(&self, layers: &mut LayerManager, points: &[LatLng]) -> LayerId {
        let mut elements = vec![MapElement::Polyline {
            points: points.to_vec(),
            style: self.styles.polyline.clone(),
        }];
        elements.extend(self.annotator.label_elements(points));

        let name = format!(
            "Route {}",
            self.annotator
                .format(self.annotator.total_nautical_miles(points))
        );
        let bounds = extent(&elements);
        layers.create(LayerKind::Polyline, name, elements, bounds)
    }

    pub fn overlay(
        &self,
        layers: &mut LayerManager,
        bounds: LatLngBounds,
        image: OverlayImage,
    ) -> LayerId {
        let name = match image.mime_type() {
            Some(mime) => format!("Overlay ({})", mime),
            None => "Overlay".to_string(),
        };
        let elements = vec![MapElement::ImageOverlay {
            bounds,
            image,
            opacity: self.styles.overlay_opacity,
        }];
        let bounds = extent(&elements);
        layers.create(LayerKind::Overlay, name, elements, bounds)
    }

    /// A marker per point and, from two points on, a dashed line through them.
    ///
    /// Has no bounds so showing it never moves the viewport.
    pub fn preview(&self, layers: &mut LayerManager, points: &[LatLng]) -> LayerId {
        let mut elements: Vec<MapElement> = points
            .iter()
            .map(|position| MapElement::Marker {
                position: *position,
                style: self.styles.preview_marker.clone(),
            })
            .collect();
        if points.len() >= 2 {
            elements.push(MapElement::Polyline {
                points: points.to_vec(),
                style: self.styles.preview_line.clone(),
            });
        }
        layers.create(LayerKind::Preview, "Route preview", elements, None)
    }
}

/// Union of the element extents; labels and tiles do not count
fn extent(elements: &[MapElement]) -> Option<LatLngBounds> {
    elements
        .iter()
        .filter_map(MapElement::bounds)
        .reduce(|acc, bounds| acc.union(&bounds))
}

impl Default for LayerFactory {
    fn default() -> Self {
        Self::new(LayerStyles::default())
    }
}
