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

//! Planar domains: nodes plus closed loops of boundary edges.

mod loops;

use num_traits::ToPrimitive;

use crate::error::{DomainError, TriangulationError};
use crate::geometry::{Aabb2, Point2};
use crate::kernel::polygon_signed_area;
use crate::mesh::Mesh;
use crate::operations::triangulation::{TriangulationOptions, Triangulator};

/// A 2D region described by its boundary.
///
/// The boundary edges must decompose into closed loops. The loop enclosing the
/// largest area is the outer boundary, every other loop is a hole. Node order
/// is kept exactly as supplied since mesh indices refer to it.
///
/// ```
/// use femesh::Domain;
///
/// let d = Domain::new(
///     [[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0]],
///     [(0, 1), (1, 2), (2, 3), (3, 0)],
/// )
/// .unwrap();
/// assert_eq!(d.edges()[1], [1, 2]);
/// assert_eq!(d.boundary_area(), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Domain {
    nodes: Vec<Point2>,
    edges: Vec<[usize; 2]>,
    loops: Vec<Vec<usize>>,
    edge_loop: Vec<usize>,
}

impl Domain {
    /// Builds a domain from nodes and boundary edges.
    ///
    /// Edges may be given as `[a, b]` or `(a, b)`; both normalize to `[a, b]`.
    pub fn new<P, E>(
        nodes: impl IntoIterator<Item = P>,
        edges: impl IntoIterator<Item = E>,
    ) -> Result<Self, DomainError>
    where
        P: Into<Point2>,
        E: Into<[usize; 2]>,
    {
        let nodes: Vec<Point2> = nodes.into_iter().map(Into::into).collect();
        let edges: Vec<[usize; 2]> = edges.into_iter().map(Into::into).collect();

        if let Some(node) = nodes.iter().position(|p| !p.is_finite()) {
            return Err(DomainError::NonFiniteCoordinate { node });
        }

        let loops = loops::find_loops(nodes.len(), &edges)?;
        log::trace!(
            "domain: {} nodes, {} edges, {} loops",
            nodes.len(),
            edges.len(),
            loops.rings.len()
        );

        Ok(Self {
            nodes,
            edges,
            loops: loops.rings,
            edge_loop: loops.edge_loop,
        })
    }

    /// Same as [`Domain::new`] for any numeric coordinate type, e.g. integers.
    pub fn from_coords<T, E>(
        nodes: impl IntoIterator<Item = [T; 2]>,
        edges: impl IntoIterator<Item = E>,
    ) -> Result<Self, DomainError>
    where
        T: ToPrimitive,
        E: Into<[usize; 2]>,
    {
        let nodes = nodes
            .into_iter()
            .enumerate()
            .map(|(node, [x, y])| match (x.to_f64(), y.to_f64()) {
                (Some(x), Some(y)) => Ok(Point2::new(x, y)),
                _ => Err(DomainError::UnrepresentableCoordinate { node }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(nodes, edges)
    }

    /// Builds a domain from an editor graph: `positions[i]` is the location of
    /// node `i`, `adjacency[i]` lists its neighbors. Each undirected edge is
    /// kept once, from its lower endpoint. The result is normalized into the
    /// unit square.
    pub fn from_graph<P>(positions: &[P], adjacency: &[Vec<usize>]) -> Result<Self, DomainError>
    where
        P: Into<Point2> + Copy,
    {
        let edges: Vec<[usize; 2]> = adjacency
            .iter()
            .enumerate()
            .flat_map(|(i, ns)| ns.iter().filter(move |&&n| n > i).map(move |&n| [i, n]))
            .collect();
        Ok(Self::new(positions.iter().copied(), edges)?.normalize())
    }

    pub fn nodes(&self) -> &[Point2] {
        &self.nodes
    }

    pub fn edges(&self) -> &[[usize; 2]] {
        &self.edges
    }

    /// Closed boundary loops as cyclic node sequences.
    pub fn loops(&self) -> &[Vec<usize>] {
        &self.loops
    }

    pub fn node(&self, i: usize) -> Option<&Point2> {
        self.nodes.get(i)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Index of the loop containing edge `e`.
    pub fn loop_of_edge(&self, e: usize) -> Option<usize> {
        self.edge_loop.get(e).copied()
    }

    fn loop_area(&self, l: usize) -> f64 {
        polygon_signed_area(self.loops[l].iter().map(|&i| &self.nodes[i]))
    }

    /// The loop enclosing the largest area; ties go to the earlier loop.
    pub fn outer_loop(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for l in 0..self.loops.len() {
            let a = self.loop_area(l).abs();
            if best.is_none_or(|(_, b)| a > b) {
                best = Some((l, a));
            }
        }
        best.map(|(l, _)| l)
    }

    /// Boundary marker per loop: 1 for the outer loop, 2, 3, ... for the holes
    /// in loop order.
    pub fn loop_markers(&self) -> Vec<u32> {
        let outer = self.outer_loop();
        let mut next = 2;
        (0..self.loops.len())
            .map(|l| {
                if Some(l) == outer {
                    1
                } else {
                    next += 1;
                    next - 1
                }
            })
            .collect()
    }

    /// Area of the outer loop minus the areas of the holes.
    pub fn boundary_area(&self) -> f64 {
        let Some(outer) = self.outer_loop() else {
            return 0.0;
        };
        (0..self.loops.len()).fold(0.0, |acc, l| {
            let a = self.loop_area(l).abs();
            if l == outer { acc + a } else { acc - a }
        })
    }

    /// New domain whose bounding box is mapped onto the given rectangle.
    ///
    /// Each axis is scaled independently; an axis with no extent collapses
    /// onto the rectangle's lower edge.
    pub fn fit_into_rectangle(
        &self,
        x0: f64,
        y0: f64,
        width: f64,
        height: f64,
    ) -> Result<Self, DomainError> {
        if !(width > 0.0 && height > 0.0) {
            return Err(DomainError::InvalidRectangle { width, height });
        }
        let Some(bounds) = Aabb2::from_points(&self.nodes) else {
            return Ok(self.clone());
        };

        fn factor(extent: f64, target: f64) -> f64 {
            if extent.abs() < 1e-12 { 0.0 } else { target / extent }
        }
        let sx = factor(bounds.width(), width);
        let sy = factor(bounds.height(), height);

        let nodes = self
            .nodes
            .iter()
            .map(|p| {
                Point2::new(
                    x0 + sx * (p.x - bounds.min.x),
                    y0 + sy * (p.y - bounds.min.y),
                )
            })
            .collect();

        Ok(Self {
            nodes,
            ..self.clone()
        })
    }

    /// New domain fitted into the unit square.
    pub fn normalize(&self) -> Self {
        match self.fit_into_rectangle(0.0, 0.0, 1.0, 1.0) {
            Ok(d) => d,
            Err(_) => self.clone(),
        }
    }

    /// Shorthand for [`Triangulator::triangulate`].
    pub fn triangulate(&self, options: &TriangulationOptions) -> Result<Mesh, TriangulationError> {
        Triangulator::triangulate(self, options)
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Domain:")?;
        writeln!(f, "    nodes:")?;
        for (i, p) in self.nodes.iter().enumerate() {
            writeln!(f, "        {i}: {p}")?;
        }
        writeln!(f, "    boundary edges:")?;
        for [a, b] in &self.edges {
            writeln!(f, "        ({a}, {b})")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square_with_triangular_hole() -> Domain {
        Domain::new(
            [
                [0.0, 0.0],
                [0.0, 1.0],
                [1.0, 1.0],
                [1.0, 0.0],
                [0.25, 0.25],
                [0.25, 0.75],
                [0.75, 0.5],
            ],
            [[0, 1], [3, 2], [1, 2], [3, 0], [4, 5], [5, 6], [6, 4]],
        )
        .unwrap()
    }

    #[test]
    fn accessors_keep_insertion_order() {
        let d = square_with_triangular_hole();
        assert_eq!(d.len(), 7);
        assert_eq!(d.nodes()[6], Point2::new(0.75, 0.5));
        assert_eq!(d.edges()[1], [3, 2]);
        assert_eq!(d.loops().len(), 2);
        assert_eq!(d.loop_of_edge(5), Some(1));
        assert_eq!(d.outer_loop(), Some(0));
        assert_eq!(d.loop_markers(), vec![1, 2]);
    }

    #[test]
    fn hole_is_subtracted_from_area() {
        let d = square_with_triangular_hole();
        // inner triangle has area 0.125
        assert_relative_eq!(d.boundary_area(), 0.875);
    }

    #[test]
    fn tuple_and_integer_inputs_normalize() {
        let d = Domain::from_coords([[0, 0], [2, 0], [0, 2]], [(0, 1), (1, 2), (2, 0)]).unwrap();
        assert_eq!(d.edges(), &[[0, 1], [1, 2], [2, 0]]);
        assert_relative_eq!(d.boundary_area(), 2.0);
    }

    #[test]
    fn rejects_bad_indices_and_coordinates() {
        assert_eq!(
            Domain::new([[0.0, 0.0], [1.0, 0.0]], [[0, 1], [1, 5]]).unwrap_err(),
            DomainError::IndexOutOfRange {
                edge: 1,
                node: 5,
                len: 2
            }
        );
        assert_eq!(
            Domain::new([[0.0, f64::NAN]], Vec::<[usize; 2]>::new()).unwrap_err(),
            DomainError::NonFiniteCoordinate { node: 0 }
        );
    }

    #[test]
    fn fit_and_normalize() {
        let d = Domain::new(
            [
                [0.0, 0.0],
                [0.0, 2.0],
                [2.0, 2.0],
                [2.0, 0.0],
                [0.5, 0.5],
                [0.5, 1.5],
                [1.5, 1.0],
            ],
            [[0, 1], [3, 2], [1, 2], [3, 0], [4, 5], [5, 6], [6, 4]],
        )
        .unwrap();
        let n = d.normalize();
        assert_eq!(n.nodes(), square_with_triangular_hole().nodes());
        assert_eq!(n.edges(), d.edges());

        let f = square_with_triangular_hole().fit_into_rectangle(1.0, -1.0, 4.0, 2.0).unwrap();
        assert_eq!(f.nodes()[2], Point2::new(5.0, 1.0));
        assert_eq!(f.nodes()[4], Point2::new(2.0, -0.5));

        assert!(matches!(
            d.fit_into_rectangle(0.0, 0.0, 0.0, 1.0),
            Err(DomainError::InvalidRectangle { .. })
        ));
    }

    #[test]
    fn graph_input() {
        let positions = [[69.0, 269.0], [284.0, 267.0], [285.0, 107.0], [75.0, 99.0]];
        let adjacency = vec![vec![1, 3], vec![0, 2], vec![1, 3], vec![2, 0]];
        let d = Domain::from_graph(&positions, &adjacency).unwrap();
        assert_eq!(d.edges(), &[[0, 1], [0, 3], [1, 2], [2, 3]]);
        let b = Aabb2::from_points(d.nodes()).unwrap();
        assert_relative_eq!(b.min.x, 0.0);
        assert_relative_eq!(b.max.y, 1.0);
    }
}
