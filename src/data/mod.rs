pub mod coordinates;

pub use coordinates::{parse_filename_bounds, parse_points, serialize_points, CoordinateFile};
