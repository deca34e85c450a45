//! Prelude module for common chartlet types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use chartlet::prelude::*;`

pub use crate::core::{
    config::{BaseImagery, LayerStyles, MapOptions, TileSource},
    geo::{LatLng, LatLngBounds},
    map::{MapController, UploadRequest},
};

pub use crate::data::coordinates::{
    parse_filename_bounds, parse_points, serialize_points, CoordinateFile,
};

pub use crate::engine::{ClickSubscription, ElementHandle, HeadlessEngine, MapCursor, MapEngine};

pub use crate::layers::{
    base::{Layer, LayerId, LayerKind},
    factory::LayerFactory,
    image::OverlayImage,
    manager::LayerManager,
    vector::{Color, LabelStyle, LineStyle, MapElement, PointStyle, PolygonStyle},
};

pub use crate::plugins::{
    draw::{DrawState, RouteDrawing},
    measure::{DistanceAnnotator, DistanceLabel},
};

pub use crate::{Error as MapError, Result};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
