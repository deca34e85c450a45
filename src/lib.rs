//! # Chartlet
//!
//! Layer and route management for Leaflet-style chart views.
//!
//! A [`MapController`] owns one map engine instance for the lifetime of a
//! mounted view. It builds marker, polyline, polygon and image overlay layers
//! from direct calls or uploaded coordinate files, shows and hides them, and
//! runs an interactive route drawing session whose legs are labelled with
//! their distance in nautical miles. Rendering itself is left to whatever
//! implements [`engine::MapEngine`].

pub mod core;
pub mod data;
pub mod engine;
pub mod layers;
pub mod plugins;
pub mod prelude;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::{BaseImagery, LayerStyles, MapOptions, TileSource},
    geo::{LatLng, LatLngBounds},
    map::{MapController, UploadRequest},
};

pub use crate::data::coordinates::CoordinateFile;

pub use crate::engine::{ClickSubscription, ElementHandle, HeadlessEngine, MapCursor, MapEngine};

pub use crate::layers::{
    base::{Layer, LayerId, LayerKind},
    image::OverlayImage,
    manager::LayerManager,
    vector::MapElement,
};

pub use crate::plugins::{
    draw::{DrawState, RouteDrawing},
    measure::{DistanceAnnotator, DistanceLabel},
};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Engine error: {0}")]
    Engine(String),

    #[error("Config error: {0}")]
    Config(String),
}

/// Error type alias for convenience
pub type Error = MapError;

/// Routes `log` output through `env_logger`, honoring `RUST_LOG`.
///
/// Calling it more than once is harmless.
#[cfg(feature = "debug")]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init();
}
