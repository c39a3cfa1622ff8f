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
use smallvec::SmallVec;

use crate::error::DomainError;

/// Closed boundary loops and, per edge, the loop it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Loops {
    pub rings: Vec<Vec<usize>>,
    pub edge_loop: Vec<usize>,
}

/// Checks the edge list structurally and decomposes it into closed loops.
///
/// Loops are reported in the order of their first edge; each ring starts at
/// that edge's first node and follows the edge's direction.
pub(crate) fn find_loops(node_count: usize, edges: &[[usize; 2]]) -> Result<Loops, DomainError> {
    let mut seen: AHashMap<(usize, usize), usize> = AHashMap::with_capacity(edges.len());
    let mut incident: Vec<SmallVec<[usize; 2]>> = vec![SmallVec::new(); node_count];

    for (ei, &[a, b]) in edges.iter().enumerate() {
        for node in [a, b] {
            if node >= node_count {
                return Err(DomainError::IndexOutOfRange {
                    edge: ei,
                    node,
                    len: node_count,
                });
            }
        }
        if a == b {
            return Err(DomainError::SelfLoop { edge: ei, node: a });
        }
        let key = if a < b { (a, b) } else { (b, a) };
        if let Some(&first) = seen.get(&key) {
            return Err(DomainError::DuplicateEdge {
                first,
                second: ei,
                a: key.0,
                b: key.1,
            });
        }
        seen.insert(key, ei);
        incident[a].push(ei);
        incident[b].push(ei);
    }

    // every touched node must close exactly one loop through it
    if let Some((node, inc)) = incident
        .iter()
        .enumerate()
        .find(|(_, inc)| !inc.is_empty() && inc.len() != 2)
    {
        return Err(DomainError::OpenBoundary {
            node,
            count: inc.len(),
        });
    }

    let mut rings = Vec::new();
    let mut edge_loop = vec![usize::MAX; edges.len()];
    for start_edge in 0..edges.len() {
        if edge_loop[start_edge] != usize::MAX {
            continue;
        }
        let loop_id = rings.len();
        let [start, mut cur] = edges[start_edge];
        edge_loop[start_edge] = loop_id;

        let mut ring = vec![start];
        let mut came_from = start_edge;
        while cur != start {
            ring.push(cur);
            let Some(next) = incident[cur].iter().copied().find(|&e| e != came_from) else {
                return Err(DomainError::OpenBoundary {
                    node: cur,
                    count: incident[cur].len(),
                });
            };
            edge_loop[next] = loop_id;
            let [p, q] = edges[next];
            cur = if p == cur { q } else { p };
            came_from = next;
        }
        rings.push(ring);
    }

    Ok(Loops { rings, edge_loop })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_with_triangular_hole() {
        let edges = [[0, 1], [3, 2], [2, 1], [3, 0], [4, 5], [5, 6], [6, 4]];
        let loops = find_loops(7, &edges).unwrap();
        assert_eq!(loops.rings, vec![vec![0, 1, 2, 3], vec![4, 5, 6]]);
        assert_eq!(loops.edge_loop, vec![0, 0, 0, 0, 1, 1, 1]);
    }

    #[test]
    fn open_chain_is_rejected() {
        let err = find_loops(4, &[[0, 1], [3, 0], [2, 3]]).unwrap_err();
        assert_eq!(err, DomainError::OpenBoundary { node: 1, count: 1 });
    }

    #[test]
    fn branching_node_is_rejected() {
        let edges = [[0, 1], [1, 2], [2, 0], [0, 3], [3, 4], [4, 0]];
        let err = find_loops(5, &edges).unwrap_err();
        assert_eq!(err, DomainError::OpenBoundary { node: 0, count: 4 });
    }

    #[test]
    fn duplicate_and_self_edges() {
        assert_eq!(
            find_loops(3, &[[0, 1], [1, 0]]).unwrap_err(),
            DomainError::DuplicateEdge {
                first: 0,
                second: 1,
                a: 0,
                b: 1
            }
        );
        assert_eq!(
            find_loops(3, &[[2, 2]]).unwrap_err(),
            DomainError::SelfLoop { edge: 0, node: 2 }
        );
    }
}
