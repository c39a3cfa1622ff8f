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

use std::collections::VecDeque;

use ahash::AHashSet;

use super::delaunay::{Cdt, Locate, Triangle};
use crate::geometry::{Point2, Segment2};
use crate::kernel::{centroid, circumcenter, min_angle_degrees};

/// Steiner points closer than this to an existing vertex are rejected.
const MIN_VERTEX_SPACING: f64 = 1e-9;

impl Cdt {
    fn min_angle_of(&self, t: Triangle) -> f64 {
        let Triangle(a, b, c) = t;
        min_angle_degrees(&self.points[a], &self.points[b], &self.points[c])
    }

    fn is_poor(&self, ti: usize, min_angle: f64) -> bool {
        self.interior[ti] && self.min_angle_of(self.triangles[ti]) < min_angle
    }

    /// Triangle that will receive `c`, if `c` is an acceptable Steiner point
    /// for the poor triangle `ti`.
    fn steiner_host(&self, ti: usize, c: &Point2) -> Option<usize> {
        let host = match self.locate(c, ti) {
            Locate::Inside(t) if self.interior[t] => t,
            _ => return None,
        };

        let Triangle(a, b, d) = self.triangles[ti];
        let probe = Segment2::new(centroid(&self.points[a], &self.points[b], &self.points[d]), *c);
        let blocked = self.constrained.iter().any(|e| {
            let s = Segment2::new(self.points[e.0], self.points[e.1]);
            s.intersects(&probe) || s.is_encroached_by(c)
        });
        if blocked {
            return None;
        }

        let near = self.triangles[host]
            .vertices()
            .into_iter()
            .any(|v| self.points[v].distance_to(c) < MIN_VERTEX_SPACING);
        (!near).then_some(host)
    }

    /// Inserts circumcenters of interior triangles whose smallest angle is
    /// below `min_angle`, until none is left that can be improved or
    /// `max_points` have been added. Returns the number of points inserted.
    ///
    /// Constrained edges are never split; a circumcenter that would encroach
    /// on one is skipped instead. The angle is therefore a target, not a
    /// guarantee: triangles resting on short boundary edges, such as those of
    /// a long thin rectangle, can stay below it.
    pub fn refine(&mut self, min_angle: f64, max_points: usize) -> usize {
        let mut queue: VecDeque<(usize, Triangle)> = (0..self.triangles.len())
            .filter(|&ti| self.is_poor(ti, min_angle))
            .map(|ti| (ti, self.triangles[ti]))
            .collect();
        let mut skipped: AHashSet<[usize; 3]> = AHashSet::default();
        let mut inserted = 0usize;

        log::debug!("refinement: {} poor triangles to start", queue.len());

        while let Some((ti, tri)) = queue.pop_front() {
            if inserted >= max_points {
                log::warn!("refinement stopped at the limit of {max_points} Steiner points");
                break;
            }
            // slot was reused since it was queued
            if self.triangles[ti] != tri || !self.is_poor(ti, min_angle) {
                continue;
            }
            let key = tri.as_sorted_indices();
            if skipped.contains(&key) {
                continue;
            }

            let Triangle(a, b, c) = tri;
            let accepted = circumcenter(&self.points[a], &self.points[b], &self.points[c])
                .and_then(|cc| self.steiner_host(ti, &cc).map(|host| (cc, host)));
            let Some((cc, host)) = accepted else {
                skipped.insert(key);
                continue;
            };

            self.points.push(cc);
            let pid = self.points.len() - 1;
            match self.insert_at(pid, host) {
                Ok(created) => {
                    inserted += 1;
                    log::trace!("steiner point {pid} at {cc}");
                    for nt in created {
                        if self.is_poor(nt, min_angle) {
                            queue.push_back((nt, self.triangles[nt]));
                        }
                    }
                }
                Err(reason) => {
                    log::trace!("steiner point at {cc} rejected: {reason:?}");
                    self.points.pop();
                    skipped.insert(key);
                }
            }
        }

        log::debug!(
            "refinement: {inserted} Steiner points, {} triangles skipped",
            skipped.len()
        );
        inserted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn polygon(n: usize) -> Vec<Point2> {
        (0..n)
            .map(|k| {
                let a = 2.0 * std::f64::consts::PI * k as f64 / n as f64;
                Point2::new(0.5 + 0.5 * a.cos(), 0.5 + 0.5 * a.sin())
            })
            .collect()
    }

    fn constrained_polygon(n: usize) -> Cdt {
        let pts = polygon(n);
        let ring = pts.clone();
        let mut dt = Cdt::build(pts).unwrap();
        for i in 0..n {
            dt.recover_constraint(i, (i + 1) % n).unwrap();
        }
        dt.legalize();
        dt.classify(&[ring], 0);
        dt
    }

    #[test]
    fn refinement_raises_the_minimum_angle() {
        let mut dt = constrained_polygon(16);
        let added = dt.refine(20.0, 100);
        assert!(added >= 1);
        for (ti, t) in dt.triangles.iter().enumerate() {
            if dt.interior[ti] {
                assert!(dt.min_angle_of(*t) >= 20.0 - 1e-9);
            }
        }
    }

    #[test]
    fn refinement_respects_the_point_limit() {
        let mut dt = constrained_polygon(16);
        assert_eq!(dt.refine(20.0, 0), 0);
        assert_eq!(dt.points.len(), 16 + 3);
    }
}
