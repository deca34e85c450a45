pub mod config;
pub mod constants;
pub mod geo;
pub mod map;

pub use config::{BaseImagery, LayerStyles, MapOptions, TileSource};
pub use geo::{LatLng, LatLngBounds};
pub use map::{MapController, UploadRequest};
