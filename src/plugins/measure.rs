use crate::{
    core::{
        constants::{DISTANCE_LABEL_PRECISION, METERS_PER_NAUTICAL_MILE, NAUTICAL_MILE_SUFFIX},
        geo::LatLng,
    },
    layers::vector::{LabelStyle, MapElement},
};

/// Distance of one route leg
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceLabel {
    pub from: LatLng,
    pub to: LatLng,
    /// Where the label is anchored (arithmetic midpoint of the leg)
    pub position: LatLng,
    pub meters: f64,
    pub nautical_miles: f64,
    /// Display text, e.g. `"3.27 NM"`
    pub text: String,
}

/// Labels every consecutive leg of a route with its great-circle length in
/// nautical miles.
#[derive(Debug, Clone)]
pub struct DistanceAnnotator {
    precision: usize,
    style: LabelStyle,
}

impl DistanceAnnotator {
    pub fn new() -> Self {
        Self {
            precision: DISTANCE_LABEL_PRECISION,
            style: LabelStyle::default(),
        }
    }

    pub fn with_style(style: LabelStyle) -> Self {
        Self {
            style,
            ..Self::new()
        }
    }

    /// One label per leg; fewer than two points gives none
    pub fn annotate(&self, points: &[LatLng]) -> Vec<DistanceLabel> {
        points
            .windows(2)
            .map(|pair| {
                let (from, to) = (pair[0], pair[1]);
                let meters = from.distance_to(&to);
                let nautical_miles = meters / METERS_PER_NAUTICAL_MILE;
                DistanceLabel {
                    from,
                    to,
                    position: from.midpoint(&to),
                    meters,
                    nautical_miles,
                    text: self.format(nautical_miles),
                }
            })
            .collect()
    }

    /// Labels as drawable elements, ready to sit in the same layer as the line
    pub fn label_elements(&self, points: &[LatLng]) -> Vec<MapElement> {
        self.annotate(points)
            .into_iter()
            .map(|label| MapElement::Label {
                position: label.position,
                text: label.text,
                style: self.style.clone(),
            })
            .collect()
    }

    /// Sum of all legs in nautical miles
    pub fn total_nautical_miles(&self, points: &[LatLng]) -> f64 {
        self.annotate(points)
            .iter()
            .map(|label| label.nautical_miles)
            .sum()
    }

    pub fn format(&self, nautical_miles: f64) -> String {
        format!(
            "{:.*} {}",
            self.precision, nautical_miles, NAUTICAL_MILE_SUFFIX
        )
    }
}

impl Default for DistanceAnnotator {
    fn default() -> Self {
        Self::new()
    }
}
