use crate::{
    core::{
        config::MapOptions,
        geo::{LatLng, LatLngBounds},
    },
    data::coordinates::CoordinateFile,
    engine::{ElementHandle, MapEngine},
    layers::{
        base::{Layer, LayerId},
        factory::LayerFactory,
        image::OverlayImage,
        manager::LayerManager,
        vector::MapElement,
    },
    plugins::draw::{DrawState, RouteDrawing},
    Result,
};

/// Which layers to build from an uploaded file.
///
/// Every requested layer the file can satisfy is built; asking for an overlay
/// and a polyline from the same file is fine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UploadRequest {
    pub overlay: bool,
    pub markers: bool,
    pub polygon: bool,
    pub polyline: bool,
}

impl UploadRequest {
    pub fn all() -> Self {
        Self {
            overlay: true,
            markers: true,
            polygon: true,
            polyline: true,
        }
    }

    pub fn overlay(mut self) -> Self {
        self.overlay = true;
        self
    }

    pub fn markers(mut self) -> Self {
        self.markers = true;
        self
    }

    pub fn polygon(mut self) -> Self {
        self.polygon = true;
        self
    }

    pub fn polyline(mut self) -> Self {
        self.polyline = true;
        self
    }
}

/// Owner of the map engine, its layers and the route drawing session.
///
/// The host calls [`MapController::initialize`] when the view mounts and
/// [`MapController::teardown`] when it goes away. Every other call is a no-op
/// (returning `None` where there is a result) while no map exists.
pub struct MapController<E: MapEngine> {
    options: MapOptions,
    engine: Option<E>,
    base_layer: Option<ElementHandle>,
    layers: LayerManager,
    factory: LayerFactory,
    drawing: RouteDrawing,
}

impl<E: MapEngine> MapController<E> {
    pub fn new(options: MapOptions) -> Self {
        let factory = LayerFactory::new(options.styles.clone());
        Self {
            options,
            engine: None,
            base_layer: None,
            layers: LayerManager::new(),
            factory,
            drawing: RouteDrawing::new(),
        }
    }

    /// Creates the map view and its base imagery and returns the engine
    /// handle. A second call returns the existing handle untouched.
    pub fn initialize(&mut self) -> Result<&E> {
        let engine = match self.engine.take() {
            Some(engine) => {
                log::debug!("map already initialized");
                engine
            }
            None => {
                let mut engine = E::create(&self.options.container, &self.options)?;
                let base = self.options.base_imagery.resolve();
                log::info!(
                    "map initialized in '{}' with base imagery {}",
                    self.options.container,
                    base.url_template
                );
                self.base_layer = Some(engine.add_element(&MapElement::Tiles(base)));
                engine
            }
        };
        Ok(self.engine.insert(engine))
    }

    /// Destroys the map view along with every layer and the drawing session.
    /// Safe to call without a prior `initialize`.
    pub fn teardown(&mut self) {
        if let Some(mut engine) = self.engine.take() {
            self.drawing.cancel(&mut self.layers, &mut engine);
            engine.destroy();
            log::info!("map torn down, {} layers released", self.layers.len());
        }
        self.drawing.reset();
        self.layers.clear();
        self.base_layer = None;
    }

    pub fn is_initialized(&self) -> bool {
        self.engine.is_some()
    }

    pub fn engine(&self) -> Option<&E> {
        self.engine.as_ref()
    }

    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    pub fn base_layer(&self) -> Option<ElementHandle> {
        self.base_layer
    }

    pub fn add_markers(&mut self, points: &[LatLng]) -> Option<LayerId> {
        self.engine.as_ref()?;
        Some(self.factory.markers(&mut self.layers, points))
    }

    pub fn add_polygon(&mut self, points: &[LatLng]) -> Option<LayerId> {
        self.engine.as_ref()?;
        Some(self.factory.polygon(&mut self.layers, points))
    }

    /// The line and its per-leg distance labels, in one layer
    pub fn add_polyline(&mut self, points: &[LatLng]) -> Option<LayerId> {
        self.engine.as_ref()?;
        Some(self.factory.polyline(&mut self.layers, points))
    }

    pub fn add_overlay(&mut self, bounds: LatLngBounds, image: OverlayImage) -> Option<LayerId> {
        self.engine.as_ref()?;
        Some(self.factory.overlay(&mut self.layers, bounds, image))
    }

    /// Builds every requested layer the file can satisfy
    pub fn apply_upload(&mut self, file: &CoordinateFile, request: &UploadRequest) -> Vec<LayerId> {
        if self.engine.is_none() {
            log::debug!("upload '{}' arrived without a map, dropped", file.name());
            return Vec::new();
        }

        let mut created = Vec::new();
        if request.overlay {
            match file.bounds() {
                Some(bounds) => created.extend(self.add_overlay(
                    bounds.clone(),
                    OverlayImage::from_bytes(file.shared_contents()),
                )),
                None => log::debug!("'{}' has no overlay bounds in its name", file.name()),
            }
        }

        let points = file.points();
        if points.is_empty() {
            if request.markers || request.polygon || request.polyline {
                log::debug!("'{}' has no coordinate lines", file.name());
            }
            return created;
        }
        if request.markers {
            created.extend(self.add_markers(points));
        }
        if request.polygon {
            created.extend(self.add_polygon(points));
        }
        if request.polyline {
            created.extend(self.add_polyline(points));
        }
        created
    }

    /// Shows a hidden layer (fitting the viewport to it when it has bounds)
    /// or hides a shown one. Hiding the route preview cancels the drawing.
    ///
    /// Returns the new visibility, or `None` without a map or for an unknown
    /// layer.
    pub fn toggle_from_map(&mut self, id: LayerId) -> Option<bool> {
        let engine = self.engine.as_mut()?;
        if !self.layers.contains(id) {
            log::debug!("toggle for unknown {}", id);
            return None;
        }

        if self.layers.is_shown(id) {
            if self.drawing.preview() == Some(id) {
                self.drawing.cancel(&mut self.layers, engine);
            } else {
                self.layers.hide(id, engine);
            }
            Some(false)
        } else {
            self.layers.show(id, engine);
            Some(true)
        }
    }

    /// Hides and forgets a layer
    pub fn remove_layer(&mut self, id: LayerId) -> Option<Layer> {
        let engine = self.engine.as_mut()?;
        if self.drawing.preview() == Some(id) {
            let layer = self.layers.get(id).cloned();
            self.drawing.cancel(&mut self.layers, engine);
            return layer;
        }
        self.layers.remove(id, engine)
    }

    pub fn start_drawing_route(&mut self) {
        if let Some(engine) = self.engine.as_mut() {
            self.drawing.start(&mut self.layers, engine);
        }
    }

    /// Entry point for clicks delivered by the engine subscription
    pub fn handle_click(&mut self, point: LatLng) -> bool {
        match self.engine.as_mut() {
            Some(engine) => {
                self.drawing
                    .handle_click(point, &mut self.layers, engine, &self.factory)
            }
            None => false,
        }
    }

    /// `None` unless drawing with at least two points
    pub fn finish_drawing_route(&mut self) -> Option<LayerId> {
        let engine = self.engine.as_mut()?;
        self.drawing.finish(&mut self.layers, engine, &self.factory)
    }

    pub fn cancel_drawing_route(&mut self) {
        match self.engine.as_mut() {
            Some(engine) => self.drawing.cancel(&mut self.layers, engine),
            None => self.drawing.reset(),
        }
    }

    pub fn drawing_state(&self) -> DrawState {
        self.drawing.state()
    }

    pub fn drawing_points(&self) -> &[LatLng] {
        self.drawing.points()
    }

    pub fn drawing_preview(&self) -> Option<LayerId> {
        self.drawing.preview()
    }

    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.get(id)
    }

    /// All registered layers in creation order
    pub fn layers(&self) -> Vec<&Layer> {
        self.layers.layers()
    }

    /// Shown layers in the order they were shown
    pub fn active_layers(&self) -> &[LayerId] {
        self.layers.active()
    }

    pub fn is_shown(&self, id: LayerId) -> bool {
        self.layers.is_shown(id)
    }

    /// JSON summaries of every layer plus its visibility
    pub fn layer_summaries(&self) -> serde_json::Value {
        serde_json::Value::Array(
            self.layers
                .layers()
                .into_iter()
                .map(|layer| {
                    let mut summary = layer.options();
                    summary["shown"] = self.layers.is_shown(layer.id()).into();
                    summary
                })
                .collect(),
        )
    }
}

impl<E: MapEngine> Default for MapController<E> {
    fn default() -> Self {
        Self::new(MapOptions::default())
    }
}
