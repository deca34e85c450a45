pub mod draw;
pub mod measure;

pub use draw::{DrawState, RouteDrawing};
pub use measure::{DistanceAnnotator, DistanceLabel};
