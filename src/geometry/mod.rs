pub mod bbox;
pub mod edge;
pub mod polygon;

pub use bbox::{Aabb2, Axis};
pub use edge::Edge;
pub use polygon::{Orientation, WinPolygon};
