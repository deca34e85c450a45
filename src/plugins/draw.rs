use crate::{
    core::geo::LatLng,
    engine::{ClickSubscription, MapCursor, MapEngine},
    layers::{base::LayerId, factory::LayerFactory, manager::LayerManager},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawState {
    #[default]
    Idle,
    Drawing,
}

/// Click-by-click route drawing session.
///
/// While drawing, the session holds the engine click subscription and a
/// preview layer that is rebuilt from scratch on every accepted click.
/// Finishing turns the points into a permanent, distance-labelled polyline.
#[derive(Debug, Default)]
pub struct RouteDrawing {
    state: DrawState,
    points: Vec<LatLng>,
    preview: Option<LayerId>,
    subscription: Option<ClickSubscription>,
}

impl RouteDrawing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DrawState {
        self.state
    }

    pub fn is_drawing(&self) -> bool {
        self.state == DrawState::Drawing
    }

    pub fn points(&self) -> &[LatLng] {
        &self.points
    }

    pub fn preview(&self) -> Option<LayerId> {
        self.preview
    }

    /// Enters draw mode. Restarts the session if one is already running.
    pub fn start<E: MapEngine + ?Sized>(&mut self, layers: &mut LayerManager, engine: &mut E) {
        if self.is_drawing() {
            log::debug!("restarting route drawing, {} points discarded", self.points.len());
        }
        self.cancel(layers, engine);

        engine.set_cursor(MapCursor::Crosshair);
        self.subscription = Some(engine.subscribe_click());
        self.state = DrawState::Drawing;
        log::info!("route drawing started");
    }

    /// Appends a clicked point and rebuilds the preview.
    ///
    /// Clicks on a repeated world copy are wrapped back into range. Returns
    /// false when the click was not taken.
    pub fn handle_click<E: MapEngine + ?Sized>(
        &mut self,
        point: LatLng,
        layers: &mut LayerManager,
        engine: &mut E,
        factory: &LayerFactory,
    ) -> bool {
        if !self.is_drawing() || self.subscription.is_none() {
            return false;
        }
        if !point.lat.is_finite() || !point.lng.is_finite() {
            log::warn!("ignoring non-finite click ({}, {})", point.lat, point.lng);
            return false;
        }
        let point = point.wrapped();

        self.points.push(point);
        self.remove_preview(layers, engine);
        let preview = factory.preview(layers, &self.points);
        layers.show(preview, engine);
        self.preview = Some(preview);
        log::debug!("route point {} at ({:.5}, {:.5})", self.points.len(), point.lat, point.lng);
        true
    }

    /// Turns the collected points into a shown polyline layer.
    ///
    /// Needs an active session with at least two points; otherwise returns
    /// `None` and leaves the session untouched.
    pub fn finish<E: MapEngine + ?Sized>(
        &mut self,
        layers: &mut LayerManager,
        engine: &mut E,
        factory: &LayerFactory,
    ) -> Option<LayerId> {
        if !self.is_drawing() || self.points.len() < 2 {
            log::debug!(
                "finish ignored: {:?} with {} points",
                self.state,
                self.points.len()
            );
            return None;
        }

        let points = std::mem::take(&mut self.points);
        self.cancel(layers, engine);

        let route = factory.polyline(layers, &points);
        layers.show(route, engine);
        log::info!("route finished with {} points as {}", points.len(), route);
        Some(route)
    }

    /// Leaves draw mode and clears everything the session put on the map.
    /// Safe in any state.
    pub fn cancel<E: MapEngine + ?Sized>(&mut self, layers: &mut LayerManager, engine: &mut E) {
        if let Some(subscription) = self.subscription.take() {
            engine.unsubscribe_click(subscription);
        }
        engine.set_cursor(MapCursor::Default);
        self.remove_preview(layers, engine);
        self.points.clear();
        self.state = DrawState::Idle;
    }

    /// Drops the session without touching the engine, for when the engine
    /// itself is going away.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn remove_preview<E: MapEngine + ?Sized>(&mut self, layers: &mut LayerManager, engine: &mut E) {
        if let Some(preview) = self.preview.take() {
            layers.remove(preview, engine);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::config::MapOptions,
        engine::HeadlessEngine,
        layers::base::LayerKind,
    };

    struct Fixture {
        engine: HeadlessEngine,
        layers: LayerManager,
        factory: LayerFactory,
        drawing: RouteDrawing,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                engine: HeadlessEngine::create("map", &MapOptions::default()).unwrap(),
                layers: LayerManager::new(),
                factory: LayerFactory::default(),
                drawing: RouteDrawing::new(),
            }
        }

        fn start(&mut self) {
            self.drawing.start(&mut self.layers, &mut self.engine);
        }

        fn click(&mut self, lat: f64, lng: f64) -> bool {
            self.drawing.handle_click(
                LatLng::new(lat, lng),
                &mut self.layers,
                &mut self.engine,
                &self.factory,
            )
        }

        fn finish(&mut self) -> Option<LayerId> {
            self.drawing
                .finish(&mut self.layers, &mut self.engine, &self.factory)
        }

        fn cancel(&mut self) {
            self.drawing.cancel(&mut self.layers, &mut self.engine);
        }
    }

    #[test]
    fn test_start_enters_draw_mode() {
        let mut fx = Fixture::new();
        fx.start();
        assert_eq!(fx.drawing.state(), DrawState::Drawing);
        assert_eq!(fx.engine.cursor(), MapCursor::Crosshair);
        assert_eq!(fx.engine.active_subscriptions(), 1);
    }

    #[test]
    fn test_clicks_ignored_when_idle() {
        let mut fx = Fixture::new();
        assert!(!fx.click(-22.8, -43.0));
        assert!(fx.drawing.points().is_empty());
        assert_eq!(fx.engine.element_count(), 0);
    }

    #[test]
    fn test_preview_rebuilt_per_click() {
        let mut fx = Fixture::new();
        fx.start();

        assert!(fx.click(-22.8, -43.0));
        let first = fx.drawing.preview().unwrap();
        assert_eq!(fx.engine.count_kind("marker"), 1);
        assert_eq!(fx.engine.count_kind("polyline"), 0);

        assert!(fx.click(-22.9, -43.1));
        let second = fx.drawing.preview().unwrap();
        assert_ne!(first, second);
        assert!(!fx.layers.contains(first));
        assert_eq!(fx.engine.count_kind("marker"), 2);
        assert_eq!(fx.engine.count_kind("polyline"), 1);
        assert_eq!(fx.layers.len(), 1);
    }

    #[test]
    fn test_finish_needs_two_points() {
        let mut fx = Fixture::new();
        assert!(fx.finish().is_none());
        assert_eq!(fx.drawing.state(), DrawState::Idle);

        fx.start();
        assert!(fx.finish().is_none());
        fx.click(-22.8, -43.0);
        assert!(fx.finish().is_none());
        assert_eq!(fx.drawing.state(), DrawState::Drawing);
        assert_eq!(fx.drawing.points().len(), 1);
        assert_eq!(fx.engine.active_subscriptions(), 1);
    }

    #[test]
    fn test_finish_builds_route() {
        let mut fx = Fixture::new();
        fx.start();
        fx.click(-22.8, -43.0);
        fx.click(-22.9, -43.1);
        fx.click(-23.0, -43.1);

        let route = fx.finish().unwrap();
        let layer = fx.layers.get(route).unwrap();
        assert_eq!(layer.kind(), LayerKind::Polyline);
        assert_eq!(layer.label_count(), 2);
        assert!(fx.layers.is_shown(route));

        assert_eq!(fx.drawing.state(), DrawState::Idle);
        assert!(fx.drawing.points().is_empty());
        assert!(fx.drawing.preview().is_none());
        assert_eq!(fx.engine.cursor(), MapCursor::Default);
        assert_eq!(fx.engine.active_subscriptions(), 0);
        assert_eq!(fx.engine.label_texts().len(), 2);
        assert_eq!(fx.engine.count_kind("marker"), 0);
        assert!(fx.engine.last_fit().is_some());
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut fx = Fixture::new();
        fx.cancel();
        fx.start();
        fx.click(-22.8, -43.0);
        fx.click(-22.9, -43.1);
        fx.cancel();
        fx.cancel();

        assert_eq!(fx.drawing.state(), DrawState::Idle);
        assert!(fx.layers.is_empty());
        assert_eq!(fx.engine.element_count(), 0);
        assert_eq!(fx.engine.active_subscriptions(), 0);
        assert_eq!(fx.engine.cursor(), MapCursor::Default);
    }

    #[test]
    fn test_restart_discards_points() {
        let mut fx = Fixture::new();
        fx.start();
        fx.click(-22.8, -43.0);
        fx.click(-22.9, -43.1);
        fx.start();

        assert_eq!(fx.drawing.state(), DrawState::Drawing);
        assert!(fx.drawing.points().is_empty());
        assert!(fx.layers.is_empty());
        assert_eq!(fx.engine.active_subscriptions(), 1);
    }

    #[test]
    fn test_wrapped_click_is_kept() {
        let mut fx = Fixture::new();
        fx.start();
        assert!(fx.click(-22.8, -43.0));
        assert!(fx.click(-22.9, 316.9));

        let points = fx.drawing.points();
        assert_eq!(points.len(), 2);
        assert!((points[1].lng + 43.1).abs() < 1e-9);
        assert!(points[1].is_valid());
        assert_eq!(fx.engine.count_kind("polyline"), 1);
    }

    #[test]
    fn test_non_finite_click_rejected() {
        let mut fx = Fixture::new();
        fx.start();
        assert!(!fx.click(f64::NAN, 0.0));
        assert!(!fx.click(0.0, f64::INFINITY));
        assert!(fx.drawing.points().is_empty());
    }

    #[test]
    fn test_cancel_restores_cursor_when_idle() {
        let mut fx = Fixture::new();
        fx.engine.set_cursor(MapCursor::Crosshair);
        fx.cancel();
        assert_eq!(fx.engine.cursor(), MapCursor::Default);
        assert_eq!(fx.drawing.state(), DrawState::Idle);
    }
}
