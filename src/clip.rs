//! Clipping an infinite line to the visible rectangle.

use serde::Serialize;

use crate::geom::Point;
use crate::line::{EPSILON, Line};
use crate::view::Viewport;

/// Relative tolerance used for edge membership and duplicate detection,
/// scaled by the larger side of the viewport.
const EDGE_TOLERANCE: f64 = 1e-9;

/// The visible part of a line, in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    /// First endpoint.
    pub start: Point,
    /// Second endpoint.
    pub end: Point,
}

impl Segment {
    /// Create a new segment.
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Segment midpoint.
    pub fn midpoint(&self) -> Point {
        self.start.midpoint(self.end)
    }

    /// Segment length.
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    /// Both endpoints, in order.
    pub fn endpoints(&self) -> [Point; 2] {
        [self.start, self.end]
    }
}

/// Compute the visible segment of `line` inside `viewport`.
///
/// Candidates are collected in a fixed order: the left and right edges first
/// (when the line is not near-vertical), then the bottom and top edges (when
/// it is not near-horizontal). Candidates outside the rectangle and
/// duplicates (a line through a corner) are dropped; the segment runs from the
/// first to the last remaining candidate. A near-vertical line is clipped
/// directly against the bottom and top edges.
///
/// Returns `None` for degenerate lines and for lines that miss the rectangle
/// or only touch it at a single point.
pub fn clip(line: &Line, viewport: &Viewport) -> Option<Segment> {
    if line.is_degenerate() || !line.is_finite() {
        return None;
    }

    let xs = viewport.x_range();
    let ys = viewport.y_range();
    let tolerance = EDGE_TOLERANCE * xs.span().max(ys.span());

    if line.b().abs() <= EPSILON {
        let x = line.c() / line.a();
        if !xs.contains(x, tolerance) {
            return None;
        }
        let x = xs.clamp(x);
        return Some(Segment::new(Point::new(x, ys.min), Point::new(x, ys.max)));
    }

    let mut candidates: Vec<Point> = Vec::with_capacity(4);
    let mut push = |point: Point| {
        if !candidates
            .iter()
            .any(|existing| existing.distance(point) <= tolerance)
        {
            candidates.push(point);
        }
    };

    for x in [xs.min, xs.max] {
        if let Some(y) = line.y_at(x) {
            if ys.contains(y, tolerance) {
                push(Point::new(x, ys.clamp(y)));
            }
        }
    }

    if line.a().abs() > EPSILON {
        for y in [ys.min, ys.max] {
            if let Some(x) = line.x_at(y) {
                if xs.contains(x, tolerance) {
                    push(Point::new(xs.clamp(x), y));
                }
            }
        }
    }

    match candidates.as_slice() {
        [first, .., last] => Some(Segment::new(*first, *last)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{ViewLimits, ViewRect};

    fn viewport() -> Viewport {
        Viewport::new(ViewRect::new(-10.0, -10.0, 20.0, 20.0), ViewLimits::default())
    }

    fn assert_point(actual: Point, x: f64, y: f64) {
        assert!(
            (actual.x - x).abs() < 1e-9 && (actual.y - y).abs() < 1e-9,
            "expected ({x}, {y}), got {actual:?}"
        );
    }

    fn assert_inside(segment: &Segment, viewport: &Viewport) {
        let rect = viewport.rect();
        for point in segment.endpoints() {
            assert!(point.x >= rect.origin_x - 1e-9 && point.x <= rect.origin_x + rect.width + 1e-9);
            assert!(point.y >= rect.origin_y - 1e-9 && point.y <= rect.origin_y + rect.height + 1e-9);
        }
    }

    #[test]
    fn diagonal_crosses_side_edges() {
        let segment = clip(&Line::new(-1.0, 1.0, 0.0), &viewport()).unwrap();
        assert_point(segment.start, -10.0, -10.0);
        assert_point(segment.end, 10.0, 10.0);
    }

    #[test]
    fn steep_line_uses_bottom_and_top() {
        // y = 4x: crosses y = -10 at x = -2.5 and y = 10 at x = 2.5.
        let segment = clip(&Line::new(-4.0, 1.0, 0.0), &viewport()).unwrap();
        assert_point(segment.start, -2.5, -10.0);
        assert_point(segment.end, 2.5, 10.0);
    }

    #[test]
    fn side_candidates_come_first() {
        // y = 0.5x + 8 enters on the left edge and leaves through the top edge.
        let segment = clip(&Line::new(-0.5, 1.0, 8.0), &viewport()).unwrap();
        assert_point(segment.start, -10.0, 3.0);
        assert_point(segment.end, 4.0, 10.0);
    }

    #[test]
    fn horizontal_and_vertical_lines() {
        let horizontal = clip(&Line::new(0.0, 2.0, 6.0), &viewport()).unwrap();
        assert_point(horizontal.start, -10.0, 3.0);
        assert_point(horizontal.end, 10.0, 3.0);

        let vertical = clip(&Line::new(2.0, 0.0, 8.0), &viewport()).unwrap();
        assert_point(vertical.start, 4.0, -10.0);
        assert_point(vertical.end, 4.0, 10.0);
    }

    #[test]
    fn lines_outside_are_not_drawn() {
        assert!(clip(&Line::new(1.0, 1.0, 50.0), &viewport()).is_none());
        assert!(clip(&Line::new(0.0, 1.0, -11.0), &viewport()).is_none());
        assert!(clip(&Line::new(1.0, 0.0, 10.5), &viewport()).is_none());
    }

    #[test]
    fn corner_touch_is_not_a_segment() {
        // x + y = 20 only touches the (10, 10) corner.
        assert!(clip(&Line::new(1.0, 1.0, 20.0), &viewport()).is_none());
    }

    #[test]
    fn degenerate_line_is_not_drawn() {
        assert!(clip(&Line::new(0.0, 0.0, 3.0), &viewport()).is_none());
        assert!(clip(&Line::new(1e-12, 1e-12, 0.0), &viewport()).is_none());
    }

    #[test]
    fn endpoints_stay_inside_viewport() {
        let vp = Viewport::new(ViewRect::new(-3.7, 1.2, 11.3, 6.9), ViewLimits::default());
        let lines = [
            Line::new(1.0, 1.0, 5.0),
            Line::new(-2.5, 0.3, 1.0),
            Line::new(0.01, 1.0, 4.0),
            Line::new(7.0, -0.001, 2.0),
            Line::new(3.0, 2.0, 6.0),
            Line::new(1.0, -1.0, 2.0),
        ];
        for line in lines {
            if let Some(segment) = clip(&line, &vp) {
                assert_inside(&segment, &vp);
                assert!(segment.length() > 0.0);
                for point in segment.endpoints() {
                    assert!(line.residual(point).abs() < 1e-6, "{line:?} {point:?}");
                }
            }
        }
    }
}
