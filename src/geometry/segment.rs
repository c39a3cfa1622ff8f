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
use crate::kernel::orientation::{EPS, Orientation, orientation};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment2 {
    pub a: Point2,
    pub b: Point2,
}

impl Segment2 {
    pub fn new(a: Point2, b: Point2) -> Self {
        Self { a, b }
    }

    pub fn midpoint(&self) -> Point2 {
        self.a.midpoint(&self.b)
    }

    /// `p` lies on the segment, strictly between its endpoints.
    pub fn contains_interior(&self, p: &Point2) -> bool {
        if orientation(&self.a, &self.b, p) != Orientation::Collinear {
            return false;
        }
        let d = self.b - self.a;
        let len2 = d.dot(&d);
        if len2 <= EPS {
            return false;
        }
        let t = (*p - self.a).dot(&d) / len2;
        let tol = EPS / len2.sqrt();
        t > tol && t < 1.0 - tol
    }

    /// `p` lies on the closed segment.
    fn contains_closed(&self, p: &Point2) -> bool {
        if orientation(&self.a, &self.b, p) != Orientation::Collinear {
            return false;
        }
        let min_x = self.a.x.min(self.b.x) - EPS;
        let max_x = self.a.x.max(self.b.x) + EPS;
        let min_y = self.a.y.min(self.b.y) - EPS;
        let max_y = self.a.y.max(self.b.y) + EPS;
        p.x >= min_x && p.x <= max_x && p.y >= min_y && p.y <= max_y
    }

    /// Both segments share at least one point (touching and collinear overlap
    /// included).
    pub fn intersects(&self, other: &Segment2) -> bool {
        let o1 = orientation(&self.a, &self.b, &other.a);
        let o2 = orientation(&self.a, &self.b, &other.b);
        let o3 = orientation(&other.a, &other.b, &self.a);
        let o4 = orientation(&other.a, &other.b, &self.b);

        if o1 != o2
            && o3 != o4
            && o1 != Orientation::Collinear
            && o2 != Orientation::Collinear
            && o3 != Orientation::Collinear
            && o4 != Orientation::Collinear
        {
            return true;
        }

        self.contains_closed(&other.a)
            || self.contains_closed(&other.b)
            || other.contains_closed(&self.a)
            || other.contains_closed(&self.b)
    }

    /// The segments cross at a single point interior to both.
    pub fn crosses_properly(&self, other: &Segment2) -> bool {
        let o1 = orientation(&self.a, &self.b, &other.a);
        let o2 = orientation(&self.a, &self.b, &other.b);
        let o3 = orientation(&other.a, &other.b, &self.a);
        let o4 = orientation(&other.a, &other.b, &self.b);
        o1 != Orientation::Collinear
            && o2 != Orientation::Collinear
            && o3 != Orientation::Collinear
            && o4 != Orientation::Collinear
            && o1 != o2
            && o3 != o4
    }

    /// `p` lies strictly inside the circle having this segment as diameter.
    pub fn is_encroached_by(&self, p: &Point2) -> bool {
        let m = self.midpoint();
        let r2 = 0.25 * self.a.distance_squared_to(&self.b);
        m.distance_squared_to(p) < r2 - EPS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(ax: f64, ay: f64, bx: f64, by: f64) -> Segment2 {
        Segment2::new(Point2::new(ax, ay), Point2::new(bx, by))
    }

    #[test]
    fn crossing_and_touching() {
        let s = seg(0.0, 0.0, 1.0, 1.0);
        assert!(s.crosses_properly(&seg(0.0, 1.0, 1.0, 0.0)));
        assert!(s.intersects(&seg(0.0, 1.0, 1.0, 0.0)));

        // T-junction: touches without crossing.
        let t = seg(0.5, 0.5, 1.0, 0.0);
        assert!(!s.crosses_properly(&t));
        assert!(s.intersects(&t));

        assert!(!s.intersects(&seg(2.0, 0.0, 3.0, 0.0)));
    }

    #[test]
    fn collinear_overlap_intersects() {
        let s = seg(0.0, 0.0, 2.0, 0.0);
        assert!(s.intersects(&seg(1.0, 0.0, 3.0, 0.0)));
        assert!(!s.intersects(&seg(2.5, 0.0, 3.0, 0.0)));
        assert!(!s.crosses_properly(&seg(1.0, 0.0, 3.0, 0.0)));
    }

    #[test]
    fn interior_points() {
        let s = seg(0.0, 0.0, 2.0, 0.0);
        assert!(s.contains_interior(&Point2::new(1.0, 0.0)));
        assert!(!s.contains_interior(&Point2::new(0.0, 0.0)));
        assert!(!s.contains_interior(&Point2::new(3.0, 0.0)));
        assert!(!s.contains_interior(&Point2::new(1.0, 0.1)));
    }

    #[test]
    fn diametral_circle() {
        let s = seg(0.0, 0.0, 2.0, 0.0);
        assert!(s.is_encroached_by(&Point2::new(1.0, 0.5)));
        assert!(!s.is_encroached_by(&Point2::new(1.0, 1.0)));
        assert!(!s.is_encroached_by(&Point2::new(1.0, 2.0)));
    }
}
