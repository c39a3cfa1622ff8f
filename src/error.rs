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

use thiserror::Error;

/// Structural problems in a boundary description.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("edge {edge} references node {node}, but the domain has only {len} nodes")]
    IndexOutOfRange { edge: usize, node: usize, len: usize },

    #[error("edge {edge} connects node {node} to itself")]
    SelfLoop { edge: usize, node: usize },

    #[error("edges {first} and {second} both join nodes {a} and {b}")]
    DuplicateEdge {
        first: usize,
        second: usize,
        a: usize,
        b: usize,
    },

    #[error("node {node} has {count} incident boundary edges, expected exactly 2")]
    OpenBoundary { node: usize, count: usize },

    #[error("node {node} has a non-finite coordinate")]
    NonFiniteCoordinate { node: usize },

    #[error("a coordinate of node {node} cannot be represented as f64")]
    UnrepresentableCoordinate { node: usize },

    #[error("target rectangle must have positive width and height, got {width} x {height}")]
    InvalidRectangle { width: f64, height: f64 },
}

/// Geometric reasons a structurally valid domain cannot be meshed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DegenerateReason {
    #[error("the domain has no boundary edges")]
    NoBoundary,

    #[error("nodes {a} and {b} coincide")]
    CoincidentNodes { a: usize, b: usize },

    #[error("boundary loop {loop_index} encloses zero area")]
    ZeroArea { loop_index: usize },

    #[error("boundary edges {first:?} and {second:?} intersect")]
    SelfIntersection {
        first: [usize; 2],
        second: [usize; 2],
    },

    #[error("node {node} lies on boundary edge {edge:?}")]
    NodeOnEdge { node: usize, edge: [usize; 2] },

    #[error("hole loop {loop_index} is not inside the outer boundary")]
    HoleOutsideOuter { loop_index: usize },

    #[error("hole loop {inner} lies inside hole loop {outer}")]
    NestedHoles { inner: usize, outer: usize },

    #[error("node {node} could not be placed in the triangulation")]
    Unplaceable { node: usize },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TriangulationError {
    #[error("degenerate domain: {0}")]
    Degenerate(#[from] DegenerateReason),

    #[error("boundary edge ({a}, {b}) could not be recovered after {attempts} flips")]
    UnresolvableConstraint { a: usize, b: usize, attempts: usize },

    #[error("invalid triangulation options: {0}")]
    InvalidOptions(String),
}

/// Every error the crate can report.
#[derive(Debug, Error)]
pub enum FemeshError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Triangulation(#[from] TriangulationError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FemeshError>;
