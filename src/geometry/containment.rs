//! Point-in-polygon containment test.

use super::types::{Point, Polygon};

impl Polygon {
    /// Decide whether `point` lies inside or on the boundary of this
    /// polygon. Boundary and vertex membership both count as contained.
    ///
    /// Three ordered stages, each may short-circuit:
    /// 1. exact vertex coincidence
    /// 2. collinearity with an axis-aligned edge (strictly between its
    ///    endpoints)
    /// 3. horizontal ray cast toward +x, alternating parity with the
    ///    half-open convention `min(y1,y2) < y <= max(y1,y2)`
    ///
    /// All comparisons are exact `f64` equality; no tolerance is applied,
    /// so floating-point noise in upstream coordinates can miss boundary
    /// detection. Points on diagonal edges are not caught by stage 2 and
    /// fall through to the ray cast, which classifies them by parity
    /// alone.
    pub fn contains(&self, point: Point) -> bool {
        if self
            .vertices()
            .iter()
            .any(|v| v.x == point.x && v.y == point.y)
        {
            return true;
        }

        for (p1, p2) in self.edges() {
            // Horizontal edge sharing the point's y
            if p1.y == p2.y
                && point.y == p1.y
                && point.x > p1.x.min(p2.x)
                && point.x < p1.x.max(p2.x)
            {
                return true;
            }
            // Vertical edge sharing the point's x
            if p1.x == p2.x
                && point.x == p1.x
                && point.y > p1.y.min(p2.y)
                && point.y < p1.y.max(p2.y)
            {
                return true;
            }
        }

        let mut inside = false;
        for (p1, p2) in self.edges() {
            if point.y > p1.y.min(p2.y)
                && point.y <= p1.y.max(p2.y)
                && point.x <= p1.x.max(p2.x)
            {
                // The half-open window above excludes horizontal edges,
                // so p1.y != p2.y and the division below is safe.
                let crossed = if p1.x == p2.x {
                    true
                } else {
                    let x_intercept =
                        (point.y - p1.y) * (p2.x - p1.x) / (p2.y - p1.y) + p1.x;
                    point.x <= x_intercept
                };
                if crossed {
                    inside = !inside;
                }
            }
        }
        inside
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poly(vertices: &[(f64, f64)]) -> Polygon {
        Polygon::new(vertices.iter().map(|&(x, y)| Point::new(x, y)).collect()).unwrap()
    }

    fn unit_square() -> Polygon {
        poly(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)])
    }

    /// Non-convex polygon with a triangular bump on its lower boundary
    fn irregular() -> Polygon {
        poly(&[
            (1.0, 1.0),
            (2.0, 4.0),
            (3.0, 5.0),
            (6.0, 3.0),
            (5.0, 2.0),
            (4.0, 3.0),
            (3.0, 2.0),
        ])
    }

    #[test]
    fn test_point_inside() {
        assert!(unit_square().contains(Point::new(0.5, 0.5)));
    }

    #[test]
    fn test_point_outside() {
        assert!(!unit_square().contains(Point::new(2.0, 2.0)));
    }

    #[test]
    fn test_point_far_outside_bounding_box() {
        let square = unit_square();
        assert!(!square.contains(Point::new(9.0, 9.0)));
        assert!(!square.contains(Point::new(-3.0, 0.5)));
        assert!(!square.contains(Point::new(0.5, -7.0)));
    }

    #[test]
    fn test_every_vertex_is_contained() {
        for fence in [unit_square(), irregular()] {
            for &v in fence.vertices() {
                assert!(fence.contains(v), "vertex {v:?} should be contained");
            }
        }
    }

    #[test]
    fn test_vertical_edge_boundary() {
        // On the left edge of the square, strictly between its endpoints
        assert!(unit_square().contains(Point::new(0.0, 0.7)));
    }

    #[test]
    fn test_horizontal_edge_boundary() {
        // On the top edge of the square, strictly between its endpoints
        assert!(unit_square().contains(Point::new(0.3, 1.0)));
    }

    #[test]
    fn test_closing_edge_boundary() {
        // The closing edge of the square runs from (1,0) back to (0,0);
        // boundary detection must cover it like any other edge.
        assert!(unit_square().contains(Point::new(0.5, 0.0)));
    }

    #[test]
    fn test_irregular_polygon_contains_point_near_concave_arm() {
        assert!(irregular().contains(Point::new(3.0, 3.0)));
    }

    #[test]
    fn test_irregular_polygon_excludes_notch_below_bump() {
        // Between the bump edges and y = 2, i.e. outside the boundary
        assert!(!irregular().contains(Point::new(4.5, 2.2)));
    }

    #[test]
    fn test_irregular_polygon_interior_points() {
        let fence = irregular();
        assert!(fence.contains(Point::new(2.0, 2.0)));
        assert!(fence.contains(Point::new(2.0, 3.5)));
        assert!(fence.contains(Point::new(3.0, 4.5)));
    }

    #[test]
    fn test_diagonal_boundary_depends_on_ray_parity() {
        // Both points sit exactly on a diagonal edge of the triangle.
        // Stage 2 only detects axis-aligned boundaries, so these fall
        // through to the ray cast and classify asymmetrically. This pins
        // the current behavior.
        let triangle = poly(&[(0.0, 0.0), (4.0, 4.0), (8.0, 0.0)]);
        assert!(!triangle.contains(Point::new(2.0, 2.0)));
        assert!(triangle.contains(Point::new(6.0, 2.0)));
    }

    #[test]
    fn test_no_tolerance_near_boundary() {
        // Exact comparison only: a hair outside the square is outside
        let square = unit_square();
        assert!(!square.contains(Point::new(1.0 + 1e-12, 0.5)));
        assert!(square.contains(Point::new(1.0 - 1e-12, 0.5)));
    }

    #[test]
    fn test_contains_is_pure() {
        let fence = irregular();
        let before = fence.vertices().to_vec();
        let first = fence.contains(Point::new(3.0, 3.0));
        let second = fence.contains(Point::new(3.0, 3.0));
        assert_eq!(first, second);
        assert_eq!(fence.vertices(), &before[..]);
    }

    #[test]
    fn test_interior_and_exterior_agree_with_geo() {
        use geo::{Contains, point, polygon};

        let ours = irregular();
        let reference = polygon![
            (x: 1.0, y: 1.0),
            (x: 2.0, y: 4.0),
            (x: 3.0, y: 5.0),
            (x: 6.0, y: 3.0),
            (x: 5.0, y: 2.0),
            (x: 4.0, y: 3.0),
            (x: 3.0, y: 2.0),
        ];

        // Clearly interior or exterior points only: geo classifies the
        // boundary as outside, while this system counts it as inside.
        for (x, y) in [
            (3.0, 3.0),
            (2.0, 3.5),
            (3.0, 4.5),
            (0.0, 0.0),
            (7.0, 7.0),
            (4.5, 2.2),
        ] {
            assert_eq!(
                ours.contains(Point::new(x, y)),
                reference.contains(&point!(x: x, y: y)),
                "disagreement with geo at ({x}, {y})"
            );
        }
    }
}
