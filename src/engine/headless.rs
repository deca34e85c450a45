use crate::{
    core::{
        config::MapOptions,
        geo::{LatLng, LatLngBounds},
    },
    engine::{ClickSubscription, ElementHandle, MapCursor, MapEngine},
    layers::vector::MapElement,
    prelude::HashSet,
    MapError, Result,
};
use std::collections::BTreeMap;

/// In-memory engine that records what would be on screen.
///
/// Useful for hosts without a display and for exercising the controller.
#[derive(Debug)]
pub struct HeadlessEngine {
    container: String,
    center: LatLng,
    zoom: f64,
    elements: BTreeMap<ElementHandle, MapElement>,
    next_handle: u64,
    subscriptions: HashSet<u64>,
    next_subscription: u64,
    cursor: MapCursor,
    last_fit: Option<LatLngBounds>,
    destroyed: bool,
}

impl HeadlessEngine {
    pub fn container(&self) -> &str {
        &self.container
    }

    pub fn center(&self) -> LatLng {
        self.center
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Elements currently drawn, in insertion order
    pub fn elements(&self) -> impl Iterator<Item = &MapElement> {
        self.elements.values()
    }

    pub fn element(&self, handle: ElementHandle) -> Option<&MapElement> {
        self.elements.get(&handle)
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Text of every label currently drawn
    pub fn label_texts(&self) -> Vec<&str> {
        self.elements
            .values()
            .filter_map(|element| match element {
                MapElement::Label { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn count_kind(&self, kind_name: &str) -> usize {
        self.elements
            .values()
            .filter(|element| element.kind_name() == kind_name)
            .count()
    }

    pub fn cursor(&self) -> MapCursor {
        self.cursor
    }

    pub fn active_subscriptions(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn last_fit(&self) -> Option<&LatLngBounds> {
        self.last_fit.as_ref()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}

impl MapEngine for HeadlessEngine {
    fn create(container: &str, options: &MapOptions) -> Result<Self> {
        if container.trim().is_empty() {
            return Err(MapError::Engine("no container to bind the map to".to_string()));
        }
        log::debug!(
            "headless map bound to '{}' at ({:.4}, {:.4}) z{}",
            container,
            options.center.lat,
            options.center.lng,
            options.zoom
        );
        Ok(Self {
            container: container.to_string(),
            center: options.center,
            zoom: options.zoom,
            elements: BTreeMap::new(),
            next_handle: 0,
            subscriptions: HashSet::default(),
            next_subscription: 0,
            cursor: MapCursor::Default,
            last_fit: None,
            destroyed: false,
        })
    }

    fn destroy(&mut self) {
        self.elements.clear();
        self.subscriptions.clear();
        self.cursor = MapCursor::Default;
        self.destroyed = true;
    }

    fn add_element(&mut self, element: &MapElement) -> ElementHandle {
        let handle = ElementHandle(self.next_handle);
        self.next_handle += 1;
        self.elements.insert(handle, element.clone());
        handle
    }

    fn remove_element(&mut self, handle: ElementHandle) {
        self.elements.remove(&handle);
    }

    fn subscribe_click(&mut self) -> ClickSubscription {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.subscriptions.insert(id);
        ClickSubscription::new(id)
    }

    fn unsubscribe_click(&mut self, subscription: ClickSubscription) {
        self.subscriptions.remove(&subscription.id());
    }

    fn fit_bounds(&mut self, bounds: &LatLngBounds) {
        self.center = bounds.center();
        self.last_fit = Some(bounds.clone());
    }

    fn set_cursor(&mut self, cursor: MapCursor) {
        self.cursor = cursor;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::vector::PointStyle;

    fn marker(lat: f64, lng: f64) -> MapElement {
        MapElement::Marker {
            position: LatLng::new(lat, lng),
            style: PointStyle::default(),
        }
    }

    #[test]
    fn test_create_requires_container() {
        assert!(HeadlessEngine::create("", &MapOptions::default()).is_err());
        let engine = HeadlessEngine::create("map", &MapOptions::default()).unwrap();
        assert_eq!(engine.container(), "map");
        assert_eq!(engine.center(), MapOptions::default().center);
    }

    #[test]
    fn test_add_and_remove_elements() {
        let mut engine = HeadlessEngine::create("map", &MapOptions::default()).unwrap();
        let a = engine.add_element(&marker(1.0, 1.0));
        let b = engine.add_element(&marker(2.0, 2.0));
        assert_ne!(a, b);
        assert_eq!(engine.element_count(), 2);

        engine.remove_element(a);
        engine.remove_element(a);
        assert_eq!(engine.element_count(), 1);
        assert!(engine.element(b).is_some());
    }

    #[test]
    fn test_subscriptions_and_destroy() {
        let mut engine = HeadlessEngine::create("map", &MapOptions::default()).unwrap();
        let subscription = engine.subscribe_click();
        engine.set_cursor(MapCursor::Crosshair);
        assert_eq!(engine.active_subscriptions(), 1);

        engine.unsubscribe_click(subscription);
        assert_eq!(engine.active_subscriptions(), 0);

        engine.add_element(&marker(0.0, 0.0));
        engine.destroy();
        assert!(engine.is_destroyed());
        assert_eq!(engine.element_count(), 0);
        assert_eq!(engine.cursor(), MapCursor::Default);
    }
}
