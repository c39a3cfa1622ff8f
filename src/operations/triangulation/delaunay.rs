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

use ahash::{AHashMap, AHashSet};
use smallvec::SmallVec;

use crate::error::{DegenerateReason, TriangulationError};
use crate::geometry::{Aabb2, Point2, Segment2};
use crate::kernel::{EPS, are_equal, centroid, in_circumcircle, is_ccw, min_angle_degrees, orient2d, point_in_polygon};

const SQRT_3: f64 = 1.7320508075688772;

/// Inradius of the super-triangle, in units of the input's largest extent.
const SUPER_RADIUS: f64 = 32.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct Edge(pub usize, pub usize);

impl Edge {
    #[inline]
    pub fn new(a: usize, b: usize) -> Self {
        if a < b { Edge(a, b) } else { Edge(b, a) }
    }
}

/// Counter-clockwise triple of point indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Triangle(pub usize, pub usize, pub usize);

impl Triangle {
    #[inline]
    pub fn vertices(&self) -> [usize; 3] {
        [self.0, self.1, self.2]
    }

    #[inline]
    pub fn directed_edges(&self) -> [(usize, usize); 3] {
        [(self.0, self.1), (self.1, self.2), (self.2, self.0)]
    }

    #[inline]
    pub fn edges(&self) -> [Edge; 3] {
        [
            Edge::new(self.0, self.1),
            Edge::new(self.1, self.2),
            Edge::new(self.2, self.0),
        ]
    }

    /// Third vertex, if the triangle contains the directed edge `u -> v`.
    #[inline]
    pub fn apex(&self, u: usize, v: usize) -> Option<usize> {
        self.directed_edges()
            .into_iter()
            .position(|(a, b)| a == u && b == v)
            .map(|i| self.vertices()[(i + 2) % 3])
    }

    #[inline]
    pub fn as_sorted_indices(&self) -> [usize; 3] {
        let mut v = self.vertices();
        v.sort_unstable();
        v
    }
}

#[derive(Default)]
struct Adj {
    // undirected edge -> up to 2 triangle indices
    edge2tris: AHashMap<Edge, SmallVec<[usize; 2]>>,
}

impl Adj {
    #[inline]
    fn add_tri(&mut self, ti: usize, t: Triangle) {
        for e in t.edges() {
            self.edge2tris.entry(e).or_default().push(ti);
        }
    }

    #[inline]
    fn remove_tri(&mut self, ti: usize, t: Triangle) {
        for e in t.edges() {
            if let Some(v) = self.edge2tris.get_mut(&e) {
                if let Some(pos) = v.iter().position(|&x| x == ti) {
                    v.swap_remove(pos);
                }
                if v.is_empty() {
                    self.edge2tris.remove(&e);
                }
            }
        }
    }

    #[inline]
    fn replace_tri(&mut self, ti: usize, old_t: Triangle, new_t: Triangle) {
        self.remove_tri(ti, old_t);
        self.add_tri(ti, new_t);
    }

    #[inline]
    fn contains(&self, e: Edge) -> bool {
        self.edge2tris.contains_key(&e)
    }

    /// Triangle on the other side of `e` from `ti`.
    #[inline]
    fn neighbor(&self, ti: usize, e: Edge) -> Option<usize> {
        self.edge2tris
            .get(&e)
            .and_then(|v| v.iter().copied().find(|&x| x != ti))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Locate {
    Inside(usize),
    Vertex(usize),
    Outside,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InsertRejection {
    OnVertex(usize),
    Outside,
    NotVisible,
}

/// The two triangles around an interior edge: `(u, v, c)` and `(v, u, d)`.
#[derive(Debug, Clone, Copy)]
struct Quad {
    t0: usize,
    t1: usize,
    u: usize,
    v: usize,
    c: usize,
    d: usize,
}

/// Constrained Delaunay triangulation under construction.
///
/// Point indices: the input points first, then the three super-triangle
/// corners, then Steiner points.
pub(crate) struct Cdt {
    pub points: Vec<Point2>,
    pub triangles: Vec<Triangle>,
    adj: Adj,
    pub constrained: AHashSet<Edge>,
    /// Filled by [`Cdt::classify`].
    pub interior: Vec<bool>,
    input_len: usize,
    last: usize,
}

impl Cdt {
    /// Delaunay triangulation of `pts` by Bowyer-Watson insertion in input order.
    pub fn build(pts: Vec<Point2>) -> Result<Self, TriangulationError> {
        let input_len = pts.len();
        let mut points = pts;

        let bounds = Aabb2::from_points(&points)
            .unwrap_or(Aabb2::new(Point2::default(), Point2::default()));
        let c = bounds.center();
        let r = SUPER_RADIUS * bounds.extent().max(1.0);
        points.push(Point2::new(c.x, c.y + 2.0 * r));
        points.push(Point2::new(c.x - SQRT_3 * r, c.y - r));
        points.push(Point2::new(c.x + SQRT_3 * r, c.y - r));

        let s0 = input_len;
        let first = Triangle(s0, s0 + 1, s0 + 2);
        let mut adj = Adj::default();
        adj.add_tri(0, first);

        let mut dt = Self {
            points,
            triangles: vec![first],
            adj,
            constrained: AHashSet::default(),
            interior: Vec::new(),
            input_len,
            last: 0,
        };

        for pid in 0..input_len {
            match dt.insert_point(pid) {
                Ok(_) => {}
                Err(InsertRejection::OnVertex(v)) => {
                    return Err(DegenerateReason::CoincidentNodes { a: v, b: pid }.into());
                }
                Err(_) => return Err(DegenerateReason::Unplaceable { node: pid }.into()),
            }
        }
        log::debug!(
            "delaunay: {} points, {} triangles (with super-triangle)",
            input_len,
            dt.triangles.len()
        );
        Ok(dt)
    }

    #[inline]
    fn is_super(&self, v: usize) -> bool {
        v >= self.input_len && v < self.input_len + 3
    }

    #[inline]
    fn touches_super(&self, t: Triangle) -> bool {
        t.vertices().into_iter().any(|v| self.is_super(v))
    }

    #[inline]
    fn contains_point(&self, t: Triangle, p: &Point2) -> bool {
        t.directed_edges()
            .into_iter()
            .all(|(u, v)| orient2d(&self.points[u], &self.points[v], p) >= -EPS)
    }

    /// Visibility walk from `hint`, falling back to a scan if the walk does
    /// not settle.
    pub fn locate(&self, p: &Point2, hint: usize) -> Locate {
        let mut t = if hint < self.triangles.len() { hint } else { 0 };
        let max_steps = self.triangles.len() + 8;

        for step in 0..max_steps {
            let tri = self.triangles[t];
            if let Some(v) = tri
                .vertices()
                .into_iter()
                .find(|&v| are_equal(&self.points[v], p))
            {
                return Locate::Vertex(v);
            }
            let edges = tri.directed_edges();
            let mut next = None;
            for k in 0..3 {
                let (u, v) = edges[(k + step) % 3];
                if orient2d(&self.points[u], &self.points[v], p) < -EPS {
                    match self.adj.neighbor(t, Edge::new(u, v)) {
                        Some(n) => next = Some(n),
                        None => return Locate::Outside,
                    }
                    break;
                }
            }
            match next {
                Some(n) => t = n,
                None => return Locate::Inside(t),
            }
        }

        log::trace!("walk did not settle, scanning {} triangles", self.triangles.len());
        for (ti, &tri) in self.triangles.iter().enumerate() {
            if let Some(v) = tri
                .vertices()
                .into_iter()
                .find(|&v| are_equal(&self.points[v], p))
            {
                return Locate::Vertex(v);
            }
            if self.contains_point(tri, p) {
                return Locate::Inside(ti);
            }
        }
        Locate::Outside
    }

    pub fn insert_point(&mut self, pid: usize) -> Result<Vec<usize>, InsertRejection> {
        let p = self.points[pid];
        match self.locate(&p, self.last) {
            Locate::Inside(t) => self.insert_at(pid, t),
            Locate::Vertex(v) => Err(InsertRejection::OnVertex(v)),
            Locate::Outside => Err(InsertRejection::Outside),
        }
    }

    /// Bowyer-Watson insertion of point `pid`, known to lie in triangle `start`.
    /// The cavity never crosses a constrained edge. Returns the new triangles.
    pub fn insert_at(&mut self, pid: usize, start: usize) -> Result<Vec<usize>, InsertRejection> {
        let p = self.points[pid];
        let cavity = self.cavity(&p, start)?;

        let members: AHashSet<usize> = cavity.iter().copied().collect();
        let mut boundary = Vec::with_capacity(cavity.len() + 2);
        for &t in &cavity {
            for (u, v) in self.triangles[t].directed_edges() {
                let outside = match self.adj.neighbor(t, Edge::new(u, v)) {
                    Some(n) => !members.contains(&n),
                    None => true,
                };
                if outside {
                    boundary.push((u, v));
                }
            }
        }
        // a star-shaped cavity of k triangles is bounded by k + 2 edges
        if boundary.len() != cavity.len() + 2 {
            return Err(InsertRejection::NotVisible);
        }

        let inside = self.interior.get(start).copied().unwrap_or(false);
        for &t in &cavity {
            self.adj.remove_tri(t, self.triangles[t]);
        }

        let mut slots = cavity.iter().copied();
        let mut created = Vec::with_capacity(boundary.len());
        for (u, v) in boundary {
            let nt = Triangle(u, v, pid);
            let ti = match slots.next() {
                Some(s) => {
                    self.triangles[s] = nt;
                    s
                }
                None => {
                    self.triangles.push(nt);
                    self.triangles.len() - 1
                }
            };
            self.adj.add_tri(ti, nt);
            created.push(ti);
        }
        if !self.interior.is_empty() {
            self.interior.resize(self.triangles.len(), false);
            for &ti in &created {
                self.interior[ti] = inside;
            }
        }
        if let Some(&ti) = created.last() {
            self.last = ti;
        }
        Ok(created)
    }

    /// Triangles whose circumcircle contains `p`, grown from `start` without
    /// crossing constrained edges, then widened until every boundary edge is
    /// strictly visible from `p`. Sorted by index.
    fn cavity(&self, p: &Point2, start: usize) -> Result<Vec<usize>, InsertRejection> {
        let mut members: AHashSet<usize> = AHashSet::default();
        members.insert(start);
        let mut order = vec![start];
        let mut queue = VecDeque::from([start]);

        while let Some(t) = queue.pop_front() {
            for e in self.triangles[t].edges() {
                if self.constrained.contains(&e) {
                    continue;
                }
                let Some(n) = self.adj.neighbor(t, e) else {
                    continue;
                };
                if members.contains(&n) {
                    continue;
                }
                let Triangle(a, b, c) = self.triangles[n];
                if in_circumcircle(&self.points[a], &self.points[b], &self.points[c], p) {
                    members.insert(n);
                    order.push(n);
                    queue.push_back(n);
                }
            }
        }

        loop {
            let mut grown = Vec::new();
            for &t in &order {
                for (u, v) in self.triangles[t].directed_edges() {
                    let e = Edge::new(u, v);
                    let n = self.adj.neighbor(t, e);
                    if n.is_some_and(|n| members.contains(&n)) {
                        continue;
                    }
                    if orient2d(&self.points[u], &self.points[v], p) > EPS {
                        continue;
                    }
                    match n {
                        Some(n) if !self.constrained.contains(&e) => {
                            if !grown.contains(&n) {
                                grown.push(n);
                            }
                        }
                        _ => return Err(InsertRejection::NotVisible),
                    }
                }
            }
            if grown.is_empty() {
                break;
            }
            for n in grown {
                members.insert(n);
                order.push(n);
            }
        }

        order.sort_unstable();
        Ok(order)
    }

    fn quad(&self, e: Edge) -> Option<Quad> {
        let tris = self.adj.edge2tris.get(&e)?;
        if tris.len() != 2 {
            return None;
        }
        let (u, v) = (e.0, e.1);
        let (t0, t1) = if self.triangles[tris[0]].apex(u, v).is_some() {
            (tris[0], tris[1])
        } else {
            (tris[1], tris[0])
        };
        let c = self.triangles[t0].apex(u, v)?;
        let d = self.triangles[t1].apex(v, u)?;
        Some(Quad { t0, t1, u, v, c, d })
    }

    /// The quad around `q` is strictly convex, so its diagonal can be swapped.
    #[inline]
    fn is_flippable(&self, q: &Quad) -> bool {
        let p = &self.points;
        is_ccw(&p[q.u], &p[q.d], &p[q.c]) && is_ccw(&p[q.d], &p[q.v], &p[q.c])
    }

    /// Smallest angle of the two triangles a flip of `q` would produce.
    fn flip_quality(&self, q: &Quad) -> f64 {
        let p = &self.points;
        min_angle_degrees(&p[q.u], &p[q.d], &p[q.c]).min(min_angle_degrees(&p[q.d], &p[q.v], &p[q.c]))
    }

    /// Swaps the diagonal `u-v` of `q` for `c-d`.
    fn flip(&mut self, q: Quad) -> Edge {
        let n0 = Triangle(q.u, q.d, q.c);
        let n1 = Triangle(q.d, q.v, q.c);
        let o0 = self.triangles[q.t0];
        let o1 = self.triangles[q.t1];
        self.triangles[q.t0] = n0;
        self.triangles[q.t1] = n1;
        self.adj.replace_tri(q.t0, o0, n0);
        self.adj.replace_tri(q.t1, o1, n1);
        log::trace!("flip ({}, {}) -> ({}, {})", q.u, q.v, q.c, q.d);
        Edge::new(q.c, q.d)
    }

    /// Unconstrained edges properly crossed by `seg`, in triangle order.
    fn crossing_edges(&self, seg: &Segment2) -> Vec<Edge> {
        let mut seen: AHashSet<Edge> = AHashSet::default();
        let mut out = Vec::new();
        for t in &self.triangles {
            for e in t.edges() {
                if !seen.insert(e) {
                    continue;
                }
                let s = Segment2::new(self.points[e.0], self.points[e.1]);
                if s.crosses_properly(seg) {
                    out.push(e);
                }
            }
        }
        out
    }

    /// Makes `a-b` an edge of the triangulation by flipping the edges it
    /// crosses, and marks it constrained.
    ///
    /// Crossing edges are processed first-in first-out. Among flippable
    /// crossings, a flip whose new diagonal no longer crosses `a-b` is
    /// preferred, and among those the one giving the largest minimum angle.
    pub fn recover_constraint(&mut self, a: usize, b: usize) -> Result<(), TriangulationError> {
        let target = Edge::new(a, b);
        if self.adj.contains(target) {
            self.constrained.insert(target);
            return Ok(());
        }

        let seg = Segment2::new(self.points[a], self.points[b]);
        let mut crossing = self.crossing_edges(&seg);
        if crossing.iter().any(|e| self.constrained.contains(e)) {
            return Err(TriangulationError::UnresolvableConstraint { a, b, attempts: 0 });
        }
        let budget = 4 * (crossing.len() + 1) * (crossing.len() + 1) + 64;
        let mut flips = 0usize;

        while !crossing.is_empty() {
            let mut resolving: Option<(usize, f64)> = None;
            let mut first_convex: Option<usize> = None;
            for (i, &e) in crossing.iter().enumerate() {
                let Some(q) = self.quad(e) else { continue };
                if !self.is_flippable(&q) {
                    continue;
                }
                if first_convex.is_none() {
                    first_convex = Some(i);
                }
                let diag = Segment2::new(self.points[q.c], self.points[q.d]);
                if !diag.crosses_properly(&seg) {
                    let quality = self.flip_quality(&q);
                    if resolving.is_none_or(|(_, best)| quality > best) {
                        resolving = Some((i, quality));
                    }
                }
            }

            let Some(i) = resolving.map(|(i, _)| i).or(first_convex) else {
                return Err(TriangulationError::UnresolvableConstraint { a, b, attempts: flips });
            };
            let e = crossing.remove(i);
            let Some(q) = self.quad(e) else {
                return Err(TriangulationError::UnresolvableConstraint { a, b, attempts: flips });
            };
            let new_e = self.flip(q);
            flips += 1;

            let s = Segment2::new(self.points[new_e.0], self.points[new_e.1]);
            if s.crosses_properly(&seg) {
                crossing.push(new_e);
            }
            if flips > budget {
                return Err(TriangulationError::UnresolvableConstraint { a, b, attempts: flips });
            }
        }

        if !self.adj.contains(target) {
            return Err(TriangulationError::UnresolvableConstraint { a, b, attempts: flips });
        }
        log::trace!("recovered ({a}, {b}) with {flips} flips");
        self.constrained.insert(target);
        Ok(())
    }

    /// Lawson flips until no unconstrained edge has its opposite vertex
    /// inside a neighboring circumcircle.
    pub fn legalize(&mut self) -> usize {
        let mut stack: Vec<Edge> = Vec::new();
        let mut queued: AHashSet<Edge> = AHashSet::default();
        for t in &self.triangles {
            for e in t.edges() {
                if !self.constrained.contains(&e) && queued.insert(e) {
                    stack.push(e);
                }
            }
        }

        let budget = 16 * self.triangles.len() + 1024;
        let mut flips = 0usize;
        while let Some(e) = stack.pop() {
            queued.remove(&e);
            if self.constrained.contains(&e) {
                continue;
            }
            let Some(q) = self.quad(e) else { continue };
            let p = &self.points;
            if !in_circumcircle(&p[q.u], &p[q.v], &p[q.c], &p[q.d]) || !self.is_flippable(&q) {
                continue;
            }
            self.flip(q);
            flips += 1;
            if flips >= budget {
                log::warn!("legalization stopped after {flips} flips");
                break;
            }
            for ne in [
                Edge::new(q.u, q.d),
                Edge::new(q.d, q.v),
                Edge::new(q.v, q.c),
                Edge::new(q.c, q.u),
            ] {
                if !self.constrained.contains(&ne) && queued.insert(ne) {
                    stack.push(ne);
                }
            }
        }
        log::debug!("legalization: {flips} flips");
        flips
    }

    /// Marks triangles inside the domain. Regions are the connected sets of
    /// triangles separated by constrained edges; a region is interior when a
    /// representative centroid is inside `outer` and outside every hole.
    pub fn classify(&mut self, rings: &[Vec<Point2>], outer: usize) {
        let n = self.triangles.len();
        let mut region = vec![usize::MAX; n];
        let mut interior = vec![false; n];
        let mut regions = 0usize;
        let mut kept = 0usize;

        for seed in 0..n {
            if region[seed] != usize::MAX {
                continue;
            }
            let mut members = vec![seed];
            region[seed] = regions;
            let mut stack = vec![seed];
            while let Some(t) = stack.pop() {
                for e in self.triangles[t].edges() {
                    if self.constrained.contains(&e) {
                        continue;
                    }
                    if let Some(nb) = self.adj.neighbor(t, e) {
                        if region[nb] == usize::MAX {
                            region[nb] = regions;
                            members.push(nb);
                            stack.push(nb);
                        }
                    }
                }
            }

            let Triangle(a, b, c) = self.triangles[seed];
            let probe = centroid(&self.points[a], &self.points[b], &self.points[c]);
            let inside = point_in_polygon(&probe, &rings[outer])
                && rings
                    .iter()
                    .enumerate()
                    .all(|(l, ring)| l == outer || !point_in_polygon(&probe, ring));

            for m in members {
                interior[m] = inside && !self.touches_super(self.triangles[m]);
                if interior[m] {
                    kept += 1;
                }
            }
            regions += 1;
        }
        log::debug!("classification: {regions} regions, {kept} of {n} triangles inside");
        self.interior = interior;
    }

    /// Interior triangles with point indices shifted past the super-triangle,
    /// and the Steiner points in insertion order.
    pub fn into_parts(self) -> (Vec<[usize; 3]>, Vec<Point2>) {
        let n = self.input_len;
        let remap = |v: usize| if v < n { v } else { v - 3 };
        let elements = self
            .triangles
            .iter()
            .zip(&self.interior)
            .filter(|&(_, &inside)| inside)
            .map(|(t, _)| [remap(t.0), remap(t.1), remap(t.2)])
            .collect();
        let steiner = self.points[n + 3..].to_vec();
        (elements, steiner)
    }
}
