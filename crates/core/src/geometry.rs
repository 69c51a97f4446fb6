//! Geometry - point rotation and integer line rasterization
//!
//! Both functions are stateless and allocation-free. [`rasterize_line`]
//! returns a lazy iterator so a renderer can plot edges without collecting
//! them first.

use crate::types::Point;

/// Rotate `point` around `center` by `angle_degrees`.
///
/// The rotated offset is truncated toward zero, not rounded. Rendering depends
/// on this exact behaviour, so e.g. an offset of `-1.9999` lands on `-1`.
///
/// ```
/// use tui_scene_core::geometry::rotate;
/// use tui_scene_types::Point;
///
/// let c = Point::new(10, 10);
/// assert_eq!(rotate(Point::new(12, 10), c, 90.0), Point::new(10, 12));
/// ```
pub fn rotate(point: Point, center: Point, angle_degrees: f64) -> Point {
    let (sin, cos) = angle_degrees.to_radians().sin_cos();
    let px = f64::from(point.x - center.x);
    let py = f64::from(point.y - center.y);

    let dx = px * cos - py * sin;
    let dy = px * sin + py * cos;

    // `as` truncates toward zero.
    Point::new(center.x + dx as i32, center.y + dy as i32)
}

/// Every grid cell on the segment from `start` to `end`, both inclusive.
///
/// Integer Bresenham using the error-accumulator form, valid in all eight
/// octants. A zero-length segment yields exactly one point.
///
/// Plain Bresenham breaks error ties towards the direction of travel, so a
/// segment and its reverse can disagree on a cell. Walking "backwards"
/// (`start > end` in `(x, y)` order) breaks ties the other way, which keeps
/// the covered cell set independent of direction.
pub fn rasterize_line(start: Point, end: Point) -> LineIter {
    LineIter::new(start, end)
}

/// Iterator produced by [`rasterize_line`].
#[derive(Debug, Clone)]
pub struct LineIter {
    current: Point,
    end: Point,
    dx: i32,
    dy: i32,
    step_x: i32,
    step_y: i32,
    err: i32,
    strict_ties: bool,
    done: bool,
}

impl LineIter {
    fn new(start: Point, end: Point) -> Self {
        let dx = (end.x - start.x).abs();
        let dy = -(end.y - start.y).abs();
        Self {
            current: start,
            end,
            dx,
            dy,
            step_x: (end.x - start.x).signum(),
            step_y: (end.y - start.y).signum(),
            err: dx + dy,
            strict_ties: start > end,
            done: false,
        }
    }
}

impl Iterator for LineIter {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.done {
            return None;
        }

        let out = self.current;
        if self.current == self.end {
            self.done = true;
            return Some(out);
        }

        let e2 = 2 * self.err;
        let (step_x, step_y) = if self.strict_ties {
            (e2 > self.dy, e2 < self.dx)
        } else {
            (e2 >= self.dy, e2 <= self.dx)
        };
        if step_x {
            self.err += self.dy;
            self.current.x += self.step_x;
        }
        if step_y {
            self.err += self.dx;
            self.current.y += self.step_y;
        }
        Some(out)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        // Chebyshev distance to the end, plus the end itself.
        let remaining = (self.end.x - self.current.x)
            .abs()
            .max((self.end.y - self.current.y).abs()) as usize
            + 1;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for LineIter {}

impl std::iter::FusedIterator for LineIter {}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn line(a: (i32, i32), b: (i32, i32)) -> Vec<Point> {
        rasterize_line(a.into(), b.into()).collect()
    }

    #[test]
    fn zero_angle_is_identity() {
        let c = Point::new(-3, 7);
        for p in [Point::new(0, 0), Point::new(-5, 2), Point::new(9, -9)] {
            assert_eq!(rotate(p, c, 0.0), p);
        }
    }

    #[test]
    fn quarter_turns_about_center() {
        let c = Point::new(5, 5);
        assert_eq!(rotate(Point::new(7, 5), c, 90.0), Point::new(5, 7));
        assert_eq!(rotate(Point::new(7, 5), c, 180.0), Point::new(3, 5));
        // cos(270deg) is a tiny negative number; 2*cos truncates to 0, not -1.
        assert_eq!(rotate(Point::new(7, 5), c, 270.0), Point::new(5, 3));
    }

    #[test]
    fn rotation_truncates_toward_zero() {
        // 45 degrees: (2, 0) -> (1.414.., 1.414..) truncates to (1, 1).
        let c = Point::new(0, 0);
        assert_eq!(rotate(Point::new(2, 0), c, 45.0), Point::new(1, 1));
        // (-2, 0) -> (-1.414.., -1.414..) truncates to (-1, -1), not (-2, -2) as floor would.
        assert_eq!(rotate(Point::new(-2, 0), c, 45.0), Point::new(-1, -1));
        // 0.7 rounds to 1 but truncates to 0.
        assert_eq!(rotate(Point::new(1, 0), c, 45.0), Point::new(0, 0));
    }

    #[test]
    fn full_turn_lands_within_one_cell() {
        let c = Point::new(4, 4);
        for p in [Point::new(2, 2), Point::new(6, 2), Point::new(6, 6), Point::new(2, 6)] {
            let r = rotate(p, c, 360.0);
            assert!((r.x - p.x).abs() <= 1 && (r.y - p.y).abs() <= 1, "{p:?} -> {r:?}");
        }
    }

    #[test]
    fn degenerate_line_is_single_point() {
        assert_eq!(line((3, 4), (3, 4)), vec![Point::new(3, 4)]);
    }

    #[test]
    fn axis_aligned_lines() {
        assert_eq!(
            line((0, 0), (3, 0)),
            vec![Point::new(0, 0), Point::new(1, 0), Point::new(2, 0), Point::new(3, 0)]
        );
        assert_eq!(
            line((0, 2), (0, 0)),
            vec![Point::new(0, 2), Point::new(0, 1), Point::new(0, 0)]
        );
    }

    #[test]
    fn backwards_walk_breaks_ties_strictly() {
        // 2 * err == dx on the first step: a non-strict tie would step both
        // axes and visit (1, 0), which the forward walk never touches.
        assert_eq!(
            line((0, 0), (2, 1)),
            vec![Point::new(0, 0), Point::new(1, 1), Point::new(2, 1)]
        );
        assert_eq!(
            line((2, 1), (0, 0)),
            vec![Point::new(2, 1), Point::new(1, 1), Point::new(0, 0)]
        );
    }

    #[test]
    fn shallow_and_steep_lines() {
        assert_eq!(
            line((0, 0), (4, 2)),
            vec![
                Point::new(0, 0),
                Point::new(1, 1),
                Point::new(2, 1),
                Point::new(3, 2),
                Point::new(4, 2)
            ]
        );
        assert_eq!(
            line((4, 2), (0, 0)),
            vec![
                Point::new(4, 2),
                Point::new(3, 2),
                Point::new(2, 1),
                Point::new(1, 1),
                Point::new(0, 0)
            ]
        );
        assert_eq!(
            line((0, 0), (-1, -3)),
            vec![Point::new(0, 0), Point::new(0, -1), Point::new(-1, -2), Point::new(-1, -3)]
        );
    }

    #[test]
    fn all_octants_reach_the_end_with_unit_steps() {
        let origin = Point::new(0, 0);
        for end in [
            (5, 2),
            (2, 5),
            (-2, 5),
            (-5, 2),
            (-5, -2),
            (-2, -5),
            (2, -5),
            (5, -2),
        ] {
            let pts = line((0, 0), end);
            assert_eq!(pts.first(), Some(&origin));
            assert_eq!(pts.last(), Some(&Point::from(end)));
            assert_eq!(pts.len(), 6);
            for w in pts.windows(2) {
                assert!((w[1].x - w[0].x).abs() <= 1 && (w[1].y - w[0].y).abs() <= 1);
            }
        }
    }

    #[test]
    fn size_hint_matches_output_length() {
        let it = rasterize_line(Point::new(-4, 1), Point::new(7, -3));
        let expected = it.len();
        assert_eq!(it.count(), expected);
    }

    proptest! {
        #[test]
        fn zero_rotation_is_identity(px in -500i32..500, py in -500i32..500, cx in -500i32..500, cy in -500i32..500) {
            let p = Point::new(px, py);
            prop_assert_eq!(rotate(p, Point::new(cx, cy), 0.0), p);
        }

        #[test]
        fn full_rotation_error_is_at_most_one(px in -200i32..200, py in -200i32..200, cx in -200i32..200, cy in -200i32..200) {
            let p = Point::new(px, py);
            let r = rotate(p, Point::new(cx, cy), 360.0);
            prop_assert!((r.x - p.x).abs() <= 1);
            prop_assert!((r.y - p.y).abs() <= 1);
        }

        #[test]
        fn lines_are_endpoint_inclusive(ax in -50i32..50, ay in -50i32..50, bx in -50i32..50, by in -50i32..50) {
            let pts = line((ax, ay), (bx, by));
            prop_assert_eq!(pts.first().copied(), Some(Point::new(ax, ay)));
            prop_assert_eq!(pts.last().copied(), Some(Point::new(bx, by)));
        }

        #[test]
        fn reversed_line_covers_same_cells(ax in -50i32..50, ay in -50i32..50, bx in -50i32..50, by in -50i32..50) {
            let forward: BTreeSet<Point> = line((ax, ay), (bx, by)).into_iter().collect();
            let backward: BTreeSet<Point> = line((bx, by), (ax, ay)).into_iter().collect();
            prop_assert_eq!(forward, backward);
        }
    }
}
