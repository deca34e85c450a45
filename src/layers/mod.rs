pub mod base;
pub mod factory;
pub mod image;
pub mod manager;
pub mod vector;

// Re-export the essential types
pub use base::{Layer, LayerId, LayerKind};
pub use factory::LayerFactory;
pub use image::OverlayImage;
pub use manager::LayerManager;
pub use vector::{Color, LabelStyle, LineStyle, MapElement, PointStyle, PolygonStyle};
