use super::{Point2, Vector2, AXIS_EPSILON};

/// Intersects the infinite line `origin + t * direction` with the boundary of
/// the rectangle `[0, length] x [0, width]`.
///
/// Near-axis directions short-circuit to the full chord along that axis
/// (`x = origin.x` for vertical lines, `y = origin.y` for horizontal ones),
/// regardless of whether the origin lies inside the rectangle.
///
/// In the general case the edges are tested in the order `x = 0`,
/// `x = length`, `y = 0`, `y = width`; an intersection is kept when its other
/// coordinate lies on the closed edge, and the search stops at the second
/// hit. Returns `None` when the line misses the rectangle or only touches it
/// once.
#[must_use]
pub fn clip_line_to_rect(
    origin: &Point2,
    direction: &Vector2,
    length: f64,
    width: f64,
) -> Option<(Point2, Point2)> {
    if direction.x.abs() < AXIS_EPSILON {
        return Some((Point2::new(origin.x, 0.0), Point2::new(origin.x, width)));
    }
    if direction.y.abs() < AXIS_EPSILON {
        return Some((Point2::new(0.0, origin.y), Point2::new(length, origin.y)));
    }

    let within = |v: f64, max: f64| (0.0..=max).contains(&v);

    let candidates = [
        edge_x(origin, direction, 0.0).filter(|p| within(p.y, width)),
        edge_x(origin, direction, length).filter(|p| within(p.y, width)),
        edge_y(origin, direction, 0.0).filter(|p| within(p.x, length)),
        edge_y(origin, direction, width).filter(|p| within(p.x, length)),
    ];

    let mut hits = candidates.into_iter().flatten();
    let first = hits.next()?;
    let second = hits.next()?;
    Some((first, second))
}

/// Point where the line crosses the vertical edge `x = x_edge`.
fn edge_x(origin: &Point2, direction: &Vector2, x_edge: f64) -> Option<Point2> {
    let t = (x_edge - origin.x) / direction.x;
    let y = origin.y + t * direction.y;
    y.is_finite().then_some(Point2::new(x_edge, y))
}

/// Point where the line crosses the horizontal edge `y = y_edge`.
fn edge_y(origin: &Point2, direction: &Vector2, y_edge: f64) -> Option<Point2> {
    let t = (y_edge - origin.y) / direction.y;
    let x = origin.x + t * direction.x;
    x.is_finite().then_some(Point2::new(x, y_edge))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn v(x: f64, y: f64) -> Vector2 {
        Vector2::new(x, y)
    }

    // ── Axis-aligned lines ──

    #[test]
    fn horizontal_line_spans_full_length() {
        for y0 in [0.0, 1.25, 7.5, 10.0] {
            let (a, b) = clip_line_to_rect(&p(3.0, y0), &v(1.0, 0.0), 20.0, 10.0).unwrap();
            assert_eq!(a, p(0.0, y0));
            assert_eq!(b, p(20.0, y0));
        }
    }

    #[test]
    fn vertical_line_spans_full_width() {
        for x0 in [0.0, 4.0, 20.0] {
            let (a, b) = clip_line_to_rect(&p(x0, 2.0), &v(0.0, -1.0), 20.0, 10.0).unwrap();
            assert_eq!(a, p(x0, 0.0));
            assert_eq!(b, p(x0, 10.0));
        }
    }

    #[test]
    fn nearly_vertical_line_uses_axis_shortcut() {
        let (a, b) = clip_line_to_rect(&p(5.0, 5.0), &v(5e-5, 1.0), 20.0, 10.0).unwrap();
        assert_eq!(a, p(5.0, 0.0));
        assert_eq!(b, p(5.0, 10.0));
    }

    // ── General case ──

    #[test]
    fn diagonal_through_center_hits_opposite_edges() {
        // 45° line through (5, 5) in a 10x10 square: corner to corner.
        let (a, b) = clip_line_to_rect(&p(5.0, 5.0), &v(1.0, 1.0), 10.0, 10.0).unwrap();
        assert!((a - p(0.0, 0.0)).norm() < TOL, "a={a}");
        assert!((b - p(10.0, 10.0)).norm() < TOL, "b={b}");
    }

    #[test]
    fn slanted_line_hits_right_and_top() {
        // Direction (-1, 1) through (2, 9): hits x=0 at y=11 (out), x=10 at y=1,
        // y=0 at x=11 (out), y=10 at x=1.
        let (a, b) = clip_line_to_rect(&p(2.0, 9.0), &v(-1.0, 1.0), 10.0, 10.0).unwrap();
        assert!((a - p(10.0, 1.0)).norm() < TOL, "a={a}");
        assert!((b - p(1.0, 10.0)).norm() < TOL, "b={b}");
    }

    #[test]
    fn edge_order_is_left_right_bottom_top() {
        // Shallow line crossing both vertical edges.
        let (a, b) = clip_line_to_rect(&p(10.0, 5.0), &v(2.0, 0.1), 20.0, 10.0).unwrap();
        assert!((a.x - 0.0).abs() < TOL);
        assert!((b.x - 20.0).abs() < TOL);
        assert!((a.y - 4.5).abs() < TOL, "a={a}");
        assert!((b.y - 5.5).abs() < TOL, "b={b}");
    }

    #[test]
    fn reference_point_outside_still_clips() {
        // Origin outside the rectangle, line still crosses it.
        let (a, b) = clip_line_to_rect(&p(-5.0, 0.0), &v(1.0, 1.0), 10.0, 10.0).unwrap();
        assert!((a - p(0.0, 5.0)).norm() < TOL, "a={a}");
        assert!((b - p(5.0, 10.0)).norm() < TOL, "b={b}");
    }

    #[test]
    fn line_missing_rectangle_returns_none() {
        assert!(clip_line_to_rect(&p(30.0, 30.0), &v(1.0, -1.0), 10.0, 10.0).is_none());
    }

    #[test]
    fn line_grazing_a_corner_has_one_distinct_point() {
        // x + y = 20 only touches (10, 10); both hits coincide.
        let (a, b) = clip_line_to_rect(&p(15.0, 5.0), &v(-1.0, 1.0), 10.0, 10.0).unwrap();
        assert!((a - b).norm() < TOL);
    }
}
