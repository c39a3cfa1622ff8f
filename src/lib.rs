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

//! Planar domain description and constrained Delaunay meshing for 2D finite
//! element work.
//!
//! A [`Domain`] holds boundary nodes and closed loops of boundary edges; the
//! largest loop is the outer boundary and the others are holes.
//! [`Triangulator`] turns it into a [`Mesh`] of counter-clockwise triangles,
//! optionally refined to a minimum angle.
//!
//! ```
//! use femesh::{Domain, TriangulationOptions};
//!
//! let domain = Domain::new(
//!     [[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.25, 0.25], [0.25, 0.75], [0.75, 0.5]],
//!     [(0, 1), (3, 2), (1, 2), (3, 0), (4, 5), (5, 6), (6, 4)],
//! )?;
//! let mesh = domain.triangulate(&TriangulationOptions::default())?;
//! assert!((mesh.total_area() - 0.875).abs() < 1e-12);
//! # Ok::<(), femesh::FemeshError>(())
//! ```

pub mod domain;
pub mod error;
pub mod geometry;
pub mod io;
pub mod kernel;
pub mod mesh;
pub mod operations;

pub use domain::Domain;
pub use error::{DegenerateReason, DomainError, FemeshError, Result, TriangulationError};
pub use geometry::Point2;
pub use mesh::{BoundaryEdge, Mesh};
pub use operations::triangulation::{
    DEFAULT_MAX_STEINER_POINTS, Triangulate2D, TriangulationOptions, Triangulator,
};
