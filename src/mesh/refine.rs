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

use ahash::AHashMap;

use crate::geometry::Point2;
use crate::mesh::{BoundaryEdge, Mesh, edge_key};

impl Mesh {
    /// Uniform refinement: every element is split into four by joining its
    /// edge midpoints. Midpoints are shared between neighboring elements and
    /// boundary edges are split in two, keeping their marker.
    pub fn refine_all_elements(&self) -> Mesh {
        let mut nodes = self.nodes.clone();
        let mut midpoints: AHashMap<(usize, usize), usize> =
            AHashMap::with_capacity(self.elements.len() * 3 / 2 + 1);

        let mut midpoint = |a: usize, b: usize, nodes: &mut Vec<Point2>| -> usize {
            *midpoints.entry(edge_key(a, b)).or_insert_with(|| {
                let m = nodes[a].midpoint(&nodes[b]);
                nodes.push(m);
                nodes.len() - 1
            })
        };

        let mut elements = Vec::with_capacity(self.elements.len() * 4);
        for &[a, b, c] in &self.elements {
            let d = midpoint(a, b, &mut nodes);
            let e = midpoint(b, c, &mut nodes);
            let f = midpoint(c, a, &mut nodes);
            elements.push([a, d, f]);
            elements.push([d, b, e]);
            elements.push([f, d, e]);
            elements.push([f, e, c]);
        }

        let mut boundaries = Vec::with_capacity(self.boundaries.len() * 2);
        for be in &self.boundaries {
            let m = midpoint(be.a, be.b, &mut nodes);
            boundaries.push(BoundaryEdge::new(be.a, m, be.marker));
            boundaries.push(BoundaryEdge::new(m, be.b, be.marker));
        }

        log::debug!(
            "uniform refinement: {} -> {} elements, {} -> {} nodes",
            self.elements.len(),
            elements.len(),
            self.nodes.len(),
            nodes.len()
        );

        Mesh::from_parts(nodes, elements, boundaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn single_triangle_splits_into_four() {
        let m = Mesh::from_parts(
            vec![
                Point2::new(-1.0, -1.0),
                Point2::new(1.0, -1.0),
                Point2::new(-1.0, 1.0),
            ],
            vec![[0, 1, 2]],
            vec![
                BoundaryEdge::new(0, 1, 1),
                BoundaryEdge::new(1, 2, 2),
                BoundaryEdge::new(2, 0, 3),
            ],
        );
        let r = m.refine_all_elements();
        assert_eq!(
            r.nodes()[3..],
            [
                Point2::new(0.0, -1.0),
                Point2::new(0.0, 0.0),
                Point2::new(-1.0, 0.0)
            ]
        );
        assert_eq!(r.elements(), &[[0, 3, 5], [3, 1, 4], [5, 3, 4], [5, 4, 2]]);
        assert_eq!(
            r.boundaries(),
            &[
                BoundaryEdge::new(0, 3, 1),
                BoundaryEdge::new(3, 1, 1),
                BoundaryEdge::new(1, 4, 2),
                BoundaryEdge::new(4, 2, 2),
                BoundaryEdge::new(2, 5, 3),
                BoundaryEdge::new(5, 0, 3),
            ]
        );
        assert!(r.check_element_orientations());
        assert_relative_eq!(r.min_edge_length().unwrap(), 1.0);
    }

    #[test]
    fn shared_midpoints_are_not_duplicated() {
        let m = crate::mesh::tests::unit_square();
        let r = m.refine_all_elements();
        // 4 corners + 5 distinct edge midpoints
        assert_eq!(r.node_count(), 9);
        assert_eq!(r.element_count(), 8);
        assert_relative_eq!(r.total_area(), 1.0);
        assert_eq!(r.boundary_edges().len(), 8);
    }
}
