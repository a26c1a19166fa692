use thiserror::Error;

/// Minimum number of vertices for a usable polygon
pub const MIN_VERTICES: usize = 3;

/// Rejected polygon geometry
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidPolygon {
    #[error("polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),
    #[error("polygon vertex {0} has a non-finite coordinate")]
    NonFiniteVertex(usize),
}

/// A point in planar Cartesian coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// True if both coordinates are finite (no NaN, no infinities)
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

/// A simple closed polygon: ordered vertices, the last implicitly
/// connected back to the first.
///
/// Construction validates the vertex-count and finiteness invariants, so
/// every `Polygon` in circulation is usable by the containment test.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    /// Build a polygon from its boundary vertices
    ///
    /// # Arguments
    /// * `vertices` - ordered boundary, without a repeated closing vertex
    pub fn new(vertices: Vec<Point>) -> Result<Self, InvalidPolygon> {
        if vertices.len() < MIN_VERTICES {
            return Err(InvalidPolygon::TooFewVertices(vertices.len()));
        }
        if let Some(i) = vertices.iter().position(|v| !v.is_finite()) {
            return Err(InvalidPolygon::NonFiniteVertex(i));
        }
        Ok(Self { vertices })
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Iterate over boundary edges as (start, end) pairs, wrapping the
    /// closing edge from the last vertex back to the first.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }
}
