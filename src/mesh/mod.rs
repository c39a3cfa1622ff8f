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

//! Triangular meshes produced from a [`Domain`](crate::Domain).

mod refine;

use ahash::AHashMap;
use smallvec::SmallVec;

use crate::geometry::Point2;
use crate::kernel::{orient2d, triangle_area};

/// A mesh edge lying on the domain boundary, tagged with the marker of the
/// loop it came from (1 for the outer boundary, 2, 3, ... for holes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundaryEdge {
    pub a: usize,
    pub b: usize,
    pub marker: u32,
}

impl BoundaryEdge {
    pub fn new(a: usize, b: usize, marker: u32) -> Self {
        Self { a, b, marker }
    }
}

/// Nodes and counter-clockwise triangular elements.
///
/// The first nodes are the domain's nodes, unchanged and in the same order;
/// any points inserted while meshing follow them.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    nodes: Vec<Point2>,
    elements: Vec<[usize; 3]>,
    boundaries: Vec<BoundaryEdge>,
}

#[inline]
fn edge_key(a: usize, b: usize) -> (usize, usize) {
    if a < b { (a, b) } else { (b, a) }
}

#[inline]
fn element_edges(e: &[usize; 3]) -> [(usize, usize); 3] {
    [
        edge_key(e[0], e[1]),
        edge_key(e[1], e[2]),
        edge_key(e[2], e[0]),
    ]
}

impl Mesh {
    pub(crate) fn from_parts(
        nodes: Vec<Point2>,
        elements: Vec<[usize; 3]>,
        boundaries: Vec<BoundaryEdge>,
    ) -> Self {
        Self {
            nodes,
            elements,
            boundaries,
        }
    }

    pub fn nodes(&self) -> &[Point2] {
        &self.nodes
    }

    pub fn elements(&self) -> &[[usize; 3]] {
        &self.elements
    }

    /// Tagged boundary edges, in the order of the domain's edges.
    pub fn boundaries(&self) -> &[BoundaryEdge] {
        &self.boundaries
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    fn corners(&self, e: &[usize; 3]) -> [&Point2; 3] {
        [&self.nodes[e[0]], &self.nodes[e[1]], &self.nodes[e[2]]]
    }

    fn edge_elements(&self) -> AHashMap<(usize, usize), SmallVec<[usize; 2]>> {
        let mut map: AHashMap<(usize, usize), SmallVec<[usize; 2]>> =
            AHashMap::with_capacity(self.elements.len() * 2);
        for (ei, e) in self.elements.iter().enumerate() {
            for k in element_edges(e) {
                map.entry(k).or_default().push(ei);
            }
        }
        map
    }

    /// Edges that belong to exactly one element, as sorted `[min, max]` pairs.
    pub fn boundary_edges(&self) -> Vec<[usize; 2]> {
        let map = self.edge_elements();
        let mut out: Vec<[usize; 2]> = map
            .into_iter()
            .filter(|(_, owners)| owners.len() == 1)
            .map(|((a, b), _)| [a, b])
            .collect();
        out.sort_unstable();
        out
    }

    /// Area of element `i`.
    pub fn element_area(&self, i: usize) -> Option<f64> {
        let e = self.elements.get(i)?;
        let [a, b, c] = self.corners(e);
        Some(triangle_area(a, b, c))
    }

    /// Elements sharing an edge with element `i`, ascending.
    pub fn neighbors(&self, i: usize) -> Option<Vec<usize>> {
        let e = self.elements.get(i)?;
        let edges = element_edges(e);
        let out: Vec<usize> = self
            .elements
            .iter()
            .enumerate()
            .filter(|&(j, other)| {
                j != i && element_edges(other).iter().any(|k| edges.contains(k))
            })
            .map(|(j, _)| j)
            .collect();
        Some(out)
    }

    pub fn total_area(&self) -> f64 {
        (0..self.elements.len())
            .filter_map(|i| self.element_area(i))
            .sum()
    }

    /// `true` when every element is strictly counter-clockwise.
    pub fn check_element_orientations(&self) -> bool {
        self.elements.iter().all(|e| {
            let [a, b, c] = self.corners(e);
            orient2d(a, b, c) > 0.0
        })
    }

    /// Length of the shortest element edge; `None` for an empty mesh.
    pub fn min_edge_length(&self) -> Option<f64> {
        self.elements
            .iter()
            .flat_map(element_edges)
            .map(|(a, b)| self.nodes[a].distance_to(&self.nodes[b]))
            .min_by(f64::total_cmp)
    }

    /// Node `i` is an endpoint of a tagged boundary edge.
    pub fn is_boundary_node(&self, i: usize) -> bool {
        self.boundaries.iter().any(|b| b.a == i || b.b == i)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use approx::assert_relative_eq;

    pub(crate) fn unit_square() -> Mesh {
        Mesh::from_parts(
            vec![
                Point2::new(0.0, 1.0),
                Point2::new(1.0, 1.0),
                Point2::new(1.0, 0.0),
                Point2::new(0.0, 0.0),
            ],
            vec![[1, 0, 2], [2, 0, 3]],
            vec![
                BoundaryEdge::new(0, 3, 1),
                BoundaryEdge::new(3, 2, 1),
                BoundaryEdge::new(2, 1, 1),
                BoundaryEdge::new(1, 0, 1),
            ],
        )
    }

    #[test]
    fn queries_on_two_triangles() {
        let m = unit_square();
        assert_eq!(m.element_count(), 2);
        assert_relative_eq!(m.element_area(0).unwrap(), 0.5);
        assert_relative_eq!(m.total_area(), 1.0);
        assert_eq!(m.neighbors(0), Some(vec![1]));
        assert_eq!(m.neighbors(1), Some(vec![0]));
        assert_eq!(m.neighbors(2), None);
        assert_eq!(m.boundary_edges(), vec![[0, 1], [0, 3], [1, 2], [2, 3]]);
        assert!(m.check_element_orientations());
        assert_relative_eq!(m.min_edge_length().unwrap(), 1.0);
        assert!(m.is_boundary_node(3));
        assert!(!m.is_boundary_node(4));
    }

    #[test]
    fn clockwise_element_is_reported() {
        let m = Mesh::from_parts(
            vec![
                Point2::new(-1.0, -1.0),
                Point2::new(1.0, -1.0),
                Point2::new(-1.0, 1.0),
            ],
            vec![[0, 2, 1]],
            Vec::new(),
        );
        assert!(!m.check_element_orientations());
        assert!(m.element_area(0).unwrap() < 0.0);
    }
}
