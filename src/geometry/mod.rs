mod containment;
pub mod types;

pub use types::{InvalidPolygon, Point, Polygon};
