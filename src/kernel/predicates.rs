// SPDX-License-Identifier: MIT
//
// Copyright (c) 2025 Alexandre Severino
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use crate::geometry::Point2;
use crate::kernel::orientation::{EPS, orient2d};

pub fn are_equal(p1: &Point2, p2: &Point2) -> bool {
    (p1.x - p2.x).abs() <= EPS && (p1.y - p2.y).abs() <= EPS
}

/// In-circle determinant. Positive iff `d` lies inside the circle through
/// `a`, `b`, `c` when those are counter-clockwise.
pub fn incircle(a: &Point2, b: &Point2, c: &Point2, d: &Point2) -> f64 {
    let adx = a.x - d.x;
    let ady = a.y - d.y;
    let bdx = b.x - d.x;
    let bdy = b.y - d.y;
    let cdx = c.x - d.x;
    let cdy = c.y - d.y;

    let alift = adx * adx + ady * ady;
    let blift = bdx * bdx + bdy * bdy;
    let clift = cdx * cdx + cdy * cdy;

    alift * (bdx * cdy - cdx * bdy) + blift * (cdx * ady - adx * cdy)
        + clift * (adx * bdy - bdx * ady)
}

/// `d` strictly inside the circumcircle of the counter-clockwise triangle `abc`.
/// Cocircular points (within `EPS`) are outside.
#[inline]
pub fn in_circumcircle(a: &Point2, b: &Point2, c: &Point2, d: &Point2) -> bool {
    incircle(a, b, c, d) > EPS
}

/// Center of the circle through `a`, `b`, `c`; `None` for (near) collinear input.
pub fn circumcenter(a: &Point2, b: &Point2, c: &Point2) -> Option<Point2> {
    let bx = b.x - a.x;
    let by = b.y - a.y;
    let cx = c.x - a.x;
    let cy = c.y - a.y;
    let d = 2.0 * (bx * cy - by * cx);
    if d.abs() <= EPS {
        return None;
    }
    let b2 = bx * bx + by * by;
    let c2 = cx * cx + cy * cy;
    let ux = (cy * b2 - by * c2) / d;
    let uy = (bx * c2 - cx * b2) / d;
    Some(Point2::new(a.x + ux, a.y + uy))
}

pub fn centroid(a: &Point2, b: &Point2, c: &Point2) -> Point2 {
    Point2::new((a.x + b.x + c.x) / 3.0, (a.y + b.y + c.y) / 3.0)
}

/// Signed area, positive for counter-clockwise triangles.
#[inline]
pub fn triangle_area(a: &Point2, b: &Point2, c: &Point2) -> f64 {
    0.5 * orient2d(a, b, c)
}

/// Smallest interior angle of the triangle, in degrees. Zero for degenerate input.
pub fn min_angle_degrees(a: &Point2, b: &Point2, c: &Point2) -> f64 {
    let angle_at = |p: &Point2, q: &Point2, r: &Point2| -> f64 {
        let u = *q - *p;
        let v = *r - *p;
        let lu = u.dot(&u).sqrt();
        let lv = v.dot(&v).sqrt();
        if lu == 0.0 || lv == 0.0 {
            return 0.0;
        }
        (u.dot(&v) / (lu * lv)).clamp(-1.0, 1.0).acos()
    };
    let m = angle_at(a, b, c).min(angle_at(b, c, a)).min(angle_at(c, a, b));
    m.to_degrees()
}

/// Shoelace area of a closed ring of points; positive when counter-clockwise.
///
/// Summed relative to the first point so that rings far from the origin keep
/// their precision.
pub fn polygon_signed_area<'a, I>(ring: I) -> f64
where
    I: IntoIterator<Item = &'a Point2>,
{
    let mut ring = ring.into_iter();
    let Some(&origin) = ring.next() else {
        return 0.0;
    };
    let mut prev = Point2::default();
    let mut twice = 0.0;
    for p in ring {
        let d = *p - origin;
        twice += prev.cross(&d);
        prev = d;
    }
    0.5 * twice
}

/// Even-odd point in polygon. Points exactly on the ring give an unspecified
/// but deterministic answer; callers test points known to be off the boundary.
pub fn point_in_polygon(p: &Point2, ring: &[Point2]) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (pi, pj) = (&ring[i], &ring[j]);
        if (pi.y > p.y) != (pj.y > p.y) {
            let x_cross = (pj.x - pi.x) * (p.y - pi.y) / (pj.y - pi.y) + pi.x;
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn incircle_sign() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(1.0, 0.0);
        let c = Point2::new(0.0, 1.0);
        assert!(in_circumcircle(&a, &b, &c, &Point2::new(0.5, 0.5 - 1e-3)));
        assert!(!in_circumcircle(&a, &b, &c, &Point2::new(2.0, 2.0)));
        // (1, 1) is cocircular with the right triangle.
        assert!(!in_circumcircle(&a, &b, &c, &Point2::new(1.0, 1.0)));
    }

    #[test]
    fn circumcenter_of_right_triangle_is_hypotenuse_midpoint() {
        let cc = circumcenter(
            &Point2::new(0.0, 0.0),
            &Point2::new(2.0, 0.0),
            &Point2::new(0.0, 2.0),
        )
        .unwrap();
        assert_relative_eq!(cc.x, 1.0);
        assert_relative_eq!(cc.y, 1.0);
        assert!(
            circumcenter(
                &Point2::new(0.0, 0.0),
                &Point2::new(1.0, 1.0),
                &Point2::new(2.0, 2.0)
            )
            .is_none()
        );
    }

    #[test]
    fn equilateral_min_angle() {
        let h = 3f64.sqrt() / 2.0;
        let m = min_angle_degrees(
            &Point2::new(0.0, 0.0),
            &Point2::new(1.0, 0.0),
            &Point2::new(0.5, h),
        );
        assert_relative_eq!(m, 60.0, epsilon = 1e-9);
    }

    #[test]
    fn ring_area_and_containment() {
        let square = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ];
        assert_relative_eq!(polygon_signed_area(&square), 1.0);
        let cw: Vec<Point2> = square.iter().rev().copied().collect();
        assert_relative_eq!(polygon_signed_area(&cw), -1.0);

        assert!(point_in_polygon(&Point2::new(0.5, 0.5), &square));
        assert!(!point_in_polygon(&Point2::new(1.5, 0.5), &square));
    }

    #[test]
    fn ring_area_far_from_origin() {
        let ring: Vec<Point2> = [(0.0, 0.0), (0.75, 0.0), (0.75, 0.5), (0.0, 0.5)]
            .iter()
            .map(|&(x, y)| Point2::new(1e7 + x, 1e7 + y))
            .collect();
        assert_eq!(polygon_signed_area(&ring), 0.375);
        assert_eq!(polygon_signed_area(&ring[..2]), 0.0);
        assert_eq!(polygon_signed_area(&Vec::<Point2>::new()), 0.0);
    }
}
