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

/// Tolerance under which orientation and in-circle determinants count as zero.
///
/// Triangulation runs its predicates on coordinates normalized into the unit
/// square, so the value is meaningful independently of the caller's units.
pub const EPS: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    CounterClockwise,
    Clockwise,
    Collinear,
}

/// Returns:
/// - >0 if counter-clockwise
/// - <0 if clockwise
/// - =0 if collinear
///
/// The value is twice the signed area of the triangle `abc`.
#[inline]
pub fn orient2d(a: &Point2, b: &Point2, c: &Point2) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Sign of [`orient2d`] with `|det| <= EPS` snapped to collinear.
#[inline]
pub fn orientation(a: &Point2, b: &Point2, c: &Point2) -> Orientation {
    let o = orient2d(a, b, c);
    if o > EPS {
        Orientation::CounterClockwise
    } else if o < -EPS {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

#[inline]
pub fn is_ccw(a: &Point2, b: &Point2, c: &Point2) -> bool {
    orient2d(a, b, c) > EPS
}
