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

use approx::assert_relative_eq;

use femesh::geometry::{Aabb2, Point2, Segment2};
use femesh::kernel::{
    EPS, Orientation, are_equal, circumcenter, in_circumcircle, min_angle_degrees, orient2d,
    orientation, point_in_polygon, polygon_signed_area,
};

#[test]
fn test_are_equal() {
    let p1 = Point2::new(1.0, 2.0);
    let p2 = Point2::new(1.0 + 0.5 * EPS, 2.0);
    assert!(are_equal(&p1, &p2));
    assert!(!are_equal(&p1, &Point2::new(1.0 + 1e-9, 2.0)));
}

#[test]
fn ccw_test() {
    let a = Point2::new(0.0, 0.0);
    let b = Point2::new(1.0, 0.0);
    let c = Point2::new(0.0, 1.0);

    assert!(orient2d(&a, &b, &c) > 0.0); // Counter-clockwise
    assert_eq!(orientation(&a, &b, &c), Orientation::CounterClockwise);
    assert_eq!(
        orientation(&a, &b, &Point2::new(2.0, 0.0)),
        Orientation::Collinear
    );
}

#[test]
fn test_point_on_segment() {
    let seg = Segment2::new(Point2::new(0.0, 0.0), Point2::new(2.0, 2.0));
    assert!(seg.contains_interior(&Point2::new(1.0, 1.0)));
    assert!(!seg.contains_interior(&Point2::new(3.0, 3.0)));
    assert!(!seg.contains_interior(&Point2::new(2.0, 2.0)));
}

#[test]
fn test_circumcircle() {
    let a = Point2::new(0.0, 0.0);
    let b = Point2::new(2.0, 0.0);
    let c = Point2::new(0.0, 2.0);

    let cc = circumcenter(&a, &b, &c).unwrap();
    assert_relative_eq!(cc.x, 1.0);
    assert_relative_eq!(cc.y, 1.0);

    assert!(in_circumcircle(&a, &b, &c, &Point2::new(1.0, 1.5)));
    // cocircular is not inside
    assert!(!in_circumcircle(&a, &b, &c, &Point2::new(2.0, 2.0)));
    assert!(circumcenter(&a, &b, &Point2::new(4.0, 0.0)).is_none());
}

#[test]
fn test_min_angle() {
    let a = Point2::new(0.0, 0.0);
    let b = Point2::new(1.0, 0.0);
    let c = Point2::new(0.5, 3f64.sqrt() / 2.0);
    assert_relative_eq!(min_angle_degrees(&a, &b, &c), 60.0, epsilon = 1e-9);
    assert_relative_eq!(
        min_angle_degrees(&a, &b, &Point2::new(0.0, 1.0)),
        45.0,
        epsilon = 1e-9
    );
}

#[test]
fn test_polygon_queries() {
    let square = [
        Point2::new(0.0, 0.0),
        Point2::new(2.0, 0.0),
        Point2::new(2.0, 2.0),
        Point2::new(0.0, 2.0),
    ];
    assert_relative_eq!(polygon_signed_area(&square), 4.0);
    assert_relative_eq!(polygon_signed_area(square.iter().rev()), -4.0);
    assert!(point_in_polygon(&Point2::new(1.0, 1.0), &square));
    assert!(!point_in_polygon(&Point2::new(3.0, 1.0), &square));

    let b = Aabb2::from_points(&square).unwrap();
    assert_eq!(b.center(), Point2::new(1.0, 1.0));
}
