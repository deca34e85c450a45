//! Boundary to the map-rendering engine
//!
//! The controller never renders anything itself. It hands drawable elements to
//! an engine behind [`MapEngine`] and gets opaque handles back.

pub mod headless;

use crate::{
    core::{config::MapOptions, geo::LatLngBounds},
    layers::vector::MapElement,
    Result,
};
use serde::{Deserialize, Serialize};

pub use headless::HeadlessEngine;

/// Handle to an element the engine is currently drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementHandle(pub u64);

/// Live click subscription.
///
/// Not `Clone`: unsubscribing consumes it, so a subscription can only be
/// released once.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct ClickSubscription(u64);

impl ClickSubscription {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Cursor shown over the map surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MapCursor {
    #[default]
    Default,
    /// Draw mode
    Crosshair,
}

/// What the controller needs from a map engine
pub trait MapEngine {
    /// Create a map view bound to `container`, centered and zoomed per `options`
    fn create(container: &str, options: &MapOptions) -> Result<Self>
    where
        Self: Sized;

    /// Destroy the view; every element and subscription goes with it
    fn destroy(&mut self);

    fn add_element(&mut self, element: &MapElement) -> ElementHandle;

    /// Unknown handles are ignored
    fn remove_element(&mut self, handle: ElementHandle);

    /// Start delivering map clicks to the host
    fn subscribe_click(&mut self) -> ClickSubscription;

    fn unsubscribe_click(&mut self, subscription: ClickSubscription);

    fn fit_bounds(&mut self, bounds: &LatLngBounds);

    fn set_cursor(&mut self, cursor: MapCursor);
}
