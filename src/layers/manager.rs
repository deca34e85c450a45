use crate::{
    core::geo::LatLngBounds,
    engine::{ElementHandle, MapEngine},
    layers::{
        base::{Layer, LayerId, LayerKind},
        vector::MapElement,
    },
    prelude::HashMap,
};

/// Owns every layer created for a map and tracks which ones are on screen.
///
/// Shown-ness is membership in the active set, nothing else. The engine is
/// borrowed per call and never stored.
pub struct LayerManager {
    /// All layers indexed by ID
    layers: HashMap<LayerId, Layer>,
    /// Layer IDs in creation order
    creation_order: Vec<LayerId>,
    /// Engine handles of every shown layer
    shown: HashMap<LayerId, Vec<ElementHandle>>,
    /// Shown layer IDs in the order they went on screen
    active: Vec<LayerId>,
    next_id: u64,
}

impl LayerManager {
    pub fn new() -> Self {
        Self {
            layers: HashMap::default(),
            creation_order: Vec::new(),
            shown: HashMap::default(),
            active: Vec::new(),
            next_id: 0,
        }
    }

    /// Registers a new, hidden layer
    pub fn create(
        &mut self,
        kind: LayerKind,
        name: impl Into<String>,
        elements: Vec<MapElement>,
        bounds: Option<LatLngBounds>,
    ) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;

        let layer = Layer::new(id, name.into(), kind, elements, bounds);
        log::debug!(
            "created {} '{}' ({} elements)",
            id,
            layer.name(),
            layer.elements().len()
        );
        self.layers.insert(id, layer);
        self.creation_order.push(id);
        id
    }

    /// Gets a reference to a layer by ID
    pub fn get(&self, id: LayerId) -> Option<&Layer> {
        self.layers.get(&id)
    }

    pub fn contains(&self, id: LayerId) -> bool {
        self.layers.contains_key(&id)
    }

    pub fn is_shown(&self, id: LayerId) -> bool {
        self.shown.contains_key(&id)
    }

    /// Puts a layer on screen and fits the viewport to it when it has bounds.
    ///
    /// Returns false for unknown or already shown layers.
    pub fn show<E: MapEngine + ?Sized>(&mut self, id: LayerId, engine: &mut E) -> bool {
        if self.is_shown(id) {
            return false;
        }
        let Some(layer) = self.layers.get(&id) else {
            log::warn!("show requested for unknown {}", id);
            return false;
        };

        let handles = layer
            .elements()
            .iter()
            .map(|element| engine.add_element(element))
            .collect();
        if let Some(bounds) = layer.bounds() {
            engine.fit_bounds(bounds);
        }

        log::debug!("showing {} '{}'", id, layer.name());
        self.shown.insert(id, handles);
        self.active.push(id);
        true
    }

    /// Takes a layer off screen, keeping it registered.
    ///
    /// Returns false if it was not shown.
    pub fn hide<E: MapEngine + ?Sized>(&mut self, id: LayerId, engine: &mut E) -> bool {
        let Some(handles) = self.shown.remove(&id) else {
            return false;
        };
        for handle in handles {
            engine.remove_element(handle);
        }
        self.active.retain(|active| *active != id);
        log::debug!("hid {}", id);
        true
    }

    /// Hides and unregisters a layer
    pub fn remove<E: MapEngine + ?Sized>(&mut self, id: LayerId, engine: &mut E) -> Option<Layer> {
        self.hide(id, engine);
        self.creation_order.retain(|existing| *existing != id);
        let removed = self.layers.remove(&id);
        if removed.is_some() {
            log::debug!("removed {}", id);
        }
        removed
    }

    /// Gets all layers in creation order
    pub fn layers(&self) -> Vec<&Layer> {
        self.creation_order
            .iter()
            .filter_map(|id| self.layers.get(id))
            .collect()
    }

    /// IDs of shown layers, in the order they were shown
    pub fn active(&self) -> &[LayerId] {
        &self.active
    }

    /// Forgets every layer without touching the engine.
    ///
    /// Only valid when the engine's elements are going away anyway.
    pub fn clear(&mut self) {
        self.layers.clear();
        self.creation_order.clear();
        self.shown.clear();
        self.active.clear();
    }

    /// Gets the number of layers
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Checks if the manager is empty
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl Default for LayerManager {
    fn default() -> Self {
        Self::new()
    }
}
