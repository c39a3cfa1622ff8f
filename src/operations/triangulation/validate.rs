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

use std::cmp::Ordering;

use crate::domain::Domain;
use crate::error::DegenerateReason;
use crate::geometry::{Point2, Segment2};
use crate::kernel::{EPS, point_in_polygon, polygon_signed_area};

/// Boundary loops of a validated domain, as rings of frame coordinates.
pub(crate) struct BoundaryGeometry {
    pub outer: usize,
    pub rings: Vec<Vec<Point2>>,
}

/// Rejects domains whose boundary cannot be meshed.
///
/// `local` holds the domain's nodes in the normalized frame, in node order.
pub(crate) fn check_domain(
    domain: &Domain,
    local: &[Point2],
) -> Result<BoundaryGeometry, DegenerateReason> {
    let edges = domain.edges();
    let Some(outer) = domain.outer_loop().filter(|_| !edges.is_empty()) else {
        return Err(DegenerateReason::NoBoundary);
    };

    check_coincident(local)?;
    check_nodes_on_edges(edges, local)?;
    check_crossings(edges, local)?;

    let rings: Vec<Vec<Point2>> = domain
        .loops()
        .iter()
        .map(|ring| ring.iter().map(|&i| local[i]).collect())
        .collect();

    for (l, ring) in rings.iter().enumerate() {
        if polygon_signed_area(ring).abs() <= EPS {
            return Err(DegenerateReason::ZeroArea { loop_index: l });
        }
    }

    // no crossings remain, so one vertex decides containment of a whole loop
    for (l, ring) in rings.iter().enumerate() {
        if l != outer && !point_in_polygon(&ring[0], &rings[outer]) {
            return Err(DegenerateReason::HoleOutsideOuter { loop_index: l });
        }
    }
    for (inner, ring) in rings.iter().enumerate() {
        if inner == outer {
            continue;
        }
        if let Some(host) = (0..rings.len())
            .find(|&h| h != outer && h != inner && point_in_polygon(&ring[0], &rings[h]))
        {
            return Err(DegenerateReason::NestedHoles { inner, outer: host });
        }
    }

    Ok(BoundaryGeometry { outer, rings })
}

/// Sweep over nodes sorted by x.
fn check_coincident(local: &[Point2]) -> Result<(), DegenerateReason> {
    let mut order: Vec<usize> = (0..local.len()).collect();
    order.sort_by(|&i, &j| {
        local[i]
            .lex_cmp(&local[j])
            .unwrap_or(Ordering::Equal)
            .then(i.cmp(&j))
    });

    for (k, &i) in order.iter().enumerate() {
        for &j in &order[k + 1..] {
            if local[j].x - local[i].x > EPS {
                break;
            }
            if (local[j].y - local[i].y).abs() <= EPS {
                return Err(DegenerateReason::CoincidentNodes {
                    a: i.min(j),
                    b: i.max(j),
                });
            }
        }
    }
    Ok(())
}

fn check_nodes_on_edges(edges: &[[usize; 2]], local: &[Point2]) -> Result<(), DegenerateReason> {
    for &[a, b] in edges {
        let seg = Segment2::new(local[a], local[b]);
        if let Some(node) = (0..local.len())
            .find(|&k| k != a && k != b && seg.contains_interior(&local[k]))
        {
            return Err(DegenerateReason::NodeOnEdge { node, edge: [a, b] });
        }
    }
    Ok(())
}

/// Edges sharing an endpoint can only overlap if a node lies on an edge,
/// which is reported before this runs.
fn check_crossings(edges: &[[usize; 2]], local: &[Point2]) -> Result<(), DegenerateReason> {
    for (i, &first) in edges.iter().enumerate() {
        let s = Segment2::new(local[first[0]], local[first[1]]);
        for &second in &edges[i + 1..] {
            if first.iter().any(|v| second.contains(v)) {
                continue;
            }
            let t = Segment2::new(local[second[0]], local[second[1]]);
            if s.intersects(&t) {
                return Err(DegenerateReason::SelfIntersection { first, second });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(nodes: &[[f64; 2]], edges: &[[usize; 2]]) -> Result<BoundaryGeometry, DegenerateReason> {
        let d = Domain::new(nodes.iter().copied(), edges.iter().copied()).unwrap();
        check_domain(&d, d.nodes())
    }

    #[test]
    fn accepts_square_with_hole() {
        let g = check(
            &[
                [0.0, 0.0],
                [1.0, 0.0],
                [1.0, 1.0],
                [0.0, 1.0],
                [0.4, 0.4],
                [0.6, 0.4],
                [0.5, 0.6],
            ],
            &[[0, 1], [1, 2], [2, 3], [3, 0], [4, 5], [5, 6], [6, 4]],
        )
        .unwrap();
        assert_eq!(g.outer, 0);
        assert_eq!(g.rings.len(), 2);
        assert_eq!(g.rings[1][2], Point2::new(0.5, 0.6));
    }

    #[test]
    fn no_edges() {
        assert!(matches!(check(&[[0.0, 0.0]], &[]), Err(DegenerateReason::NoBoundary)));
    }

    #[test]
    fn bow_tie_crosses_itself() {
        let r = check(
            &[[0.0, 0.0], [1.0, 1.0], [1.0, 0.0], [0.0, 1.0]],
            &[[0, 1], [1, 2], [2, 3], [3, 0]],
        );
        assert!(matches!(
            r,
            Err(DegenerateReason::SelfIntersection {
                first: [0, 1],
                second: [2, 3]
            })
        ));
    }

    #[test]
    fn coincident_and_on_edge_nodes() {
        let r = check(
            &[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 0.0]],
            &[[0, 1], [1, 2], [2, 0]],
        );
        assert!(matches!(r, Err(DegenerateReason::CoincidentNodes { a: 1, b: 3 })));

        let r = check(
            &[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [0.5, 0.0], [0.2, 0.2], [0.1, 0.3]],
            &[[0, 1], [1, 2], [2, 0], [3, 4], [4, 5], [5, 3]],
        );
        assert!(matches!(
            r,
            Err(DegenerateReason::NodeOnEdge { node: 3, edge: [0, 1] })
        ));
    }

    #[test]
    fn hole_placement() {
        let outside = check(
            &[
                [0.0, 0.0],
                [1.0, 0.0],
                [1.0, 1.0],
                [0.0, 1.0],
                [2.0, 0.0],
                [2.5, 0.0],
                [2.2, 0.3],
            ],
            &[[0, 1], [1, 2], [2, 3], [3, 0], [4, 5], [5, 6], [6, 4]],
        );
        assert!(matches!(
            outside,
            Err(DegenerateReason::HoleOutsideOuter { loop_index: 1 })
        ));

        let nested = check(
            &[
                [0.0, 0.0],
                [1.0, 0.0],
                [1.0, 1.0],
                [0.0, 1.0],
                [0.2, 0.2],
                [0.8, 0.2],
                [0.5, 0.8],
                [0.45, 0.35],
                [0.55, 0.35],
                [0.5, 0.45],
            ],
            &[
                [0, 1],
                [1, 2],
                [2, 3],
                [3, 0],
                [4, 5],
                [5, 6],
                [6, 4],
                [7, 8],
                [8, 9],
                [9, 7],
            ],
        );
        assert!(matches!(
            nested,
            Err(DegenerateReason::NestedHoles { inner: 2, outer: 1 })
        ));
    }
}
