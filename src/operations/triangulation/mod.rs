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

mod delaunay;
mod quality;
mod validate;

use serde::{Deserialize, Serialize};

use crate::domain::Domain;
use crate::error::{DegenerateReason, TriangulationError};
use crate::geometry::{Aabb2, Point2};
use crate::mesh::{BoundaryEdge, Mesh};

use delaunay::Cdt;

pub const DEFAULT_MIN_ANGLE: f64 = 20.0;
pub const DEFAULT_MAX_STEINER_POINTS: usize = 10_000;

/// Settings for [`Triangulator`].
///
/// Missing fields take their defaults when deserialized, so `{}` and
/// `{"refine": true}` are both valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriangulationOptions {
    /// Insert Steiner points until interior angles reach `min_angle`.
    pub refine: bool,
    /// Target minimum angle in degrees, used when `refine` is set.
    ///
    /// Best effort. Boundary edges are never split, so elements next to them
    /// may end up with smaller angles.
    pub min_angle: f64,
    /// Upper bound on inserted points; [`DEFAULT_MAX_STEINER_POINTS`] when unset.
    pub max_steiner_points: Option<usize>,
}

impl Default for TriangulationOptions {
    fn default() -> Self {
        Self {
            refine: false,
            min_angle: DEFAULT_MIN_ANGLE,
            max_steiner_points: None,
        }
    }
}

impl TriangulationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_refine(mut self, refine: bool) -> Self {
        self.refine = refine;
        self
    }

    pub fn with_min_angle(mut self, degrees: f64) -> Self {
        self.min_angle = degrees;
        self
    }

    pub fn with_max_steiner_points(mut self, limit: usize) -> Self {
        self.max_steiner_points = Some(limit);
        self
    }

    /// A refinement angle must be finite and strictly between 0 and 60 degrees.
    pub fn validate(&self) -> Result<(), TriangulationError> {
        if self.refine && !(self.min_angle.is_finite() && self.min_angle > 0.0 && self.min_angle < 60.0) {
            return Err(TriangulationError::InvalidOptions(format!(
                "min_angle must be in (0, 60) degrees, got {}",
                self.min_angle
            )));
        }
        Ok(())
    }

    pub fn steiner_limit(&self) -> usize {
        self.max_steiner_points.unwrap_or(DEFAULT_MAX_STEINER_POINTS)
    }
}

pub trait Triangulate2D {
    fn triangulate(domain: &Domain, options: &TriangulationOptions) -> Result<Mesh, TriangulationError>;
}

/// Constrained Delaunay triangulation of a [`Domain`].
pub struct Triangulator;

/// Translation to the bounding box minimum and uniform scaling by the largest
/// extent, so predicate tolerances do not depend on the input's units.
#[derive(Debug, Clone, Copy)]
struct Frame {
    origin: Point2,
    scale: f64,
}

impl Frame {
    fn fit(points: &[Point2]) -> Self {
        match Aabb2::from_points(points) {
            Some(b) if b.extent() > 0.0 => Frame {
                origin: b.min,
                scale: b.extent(),
            },
            Some(b) => Frame {
                origin: b.min,
                scale: 1.0,
            },
            None => Frame {
                origin: Point2::default(),
                scale: 1.0,
            },
        }
    }

    #[inline]
    fn to_local(&self, p: &Point2) -> Point2 {
        Point2::new((p.x - self.origin.x) / self.scale, (p.y - self.origin.y) / self.scale)
    }

    #[inline]
    fn to_world(&self, p: &Point2) -> Point2 {
        Point2::new(self.origin.x + p.x * self.scale, self.origin.y + p.y * self.scale)
    }
}

impl Triangulator {
    /// Meshes the region enclosed by the domain's outer loop minus its holes.
    ///
    /// Domain nodes keep their indices and exact coordinates in the mesh;
    /// Steiner points follow them. Boundary edges are listed in domain edge
    /// order with their loop markers. The result depends only on the inputs.
    pub fn triangulate(
        domain: &Domain,
        options: &TriangulationOptions,
    ) -> Result<Mesh, TriangulationError> {
        options.validate()?;

        let frame = Frame::fit(domain.nodes());
        let local: Vec<Point2> = domain.nodes().iter().map(|p| frame.to_local(p)).collect();
        let boundary = validate::check_domain(domain, &local)?;

        let mut cdt = Cdt::build(local)?;
        for &[a, b] in domain.edges() {
            cdt.recover_constraint(a, b)?;
        }
        cdt.legalize();
        cdt.classify(&boundary.rings, boundary.outer);

        if options.refine {
            cdt.refine(options.min_angle, options.steiner_limit());
        }

        let (elements, steiner) = cdt.into_parts();
        if elements.is_empty() {
            return Err(DegenerateReason::ZeroArea {
                loop_index: boundary.outer,
            }
            .into());
        }

        let mut nodes = domain.nodes().to_vec();
        nodes.extend(steiner.iter().map(|p| frame.to_world(p)));

        let markers = domain.loop_markers();
        let boundaries = domain
            .edges()
            .iter()
            .enumerate()
            .map(|(i, &[a, b])| {
                let marker = domain.loop_of_edge(i).map_or(1, |l| markers[l]);
                BoundaryEdge::new(a, b, marker)
            })
            .collect();

        log::info!(
            "triangulated {} nodes / {} edges into {} elements ({} Steiner points)",
            domain.len(),
            domain.edges().len(),
            elements.len(),
            steiner.len()
        );
        Ok(Mesh::from_parts(nodes, elements, boundaries))
    }
}

impl Triangulate2D for Triangulator {
    fn triangulate(domain: &Domain, options: &TriangulationOptions) -> Result<Mesh, TriangulationError> {
        Triangulator::triangulate(domain, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_defaults_and_builders() {
        let o = TriangulationOptions::default();
        assert!(!o.refine);
        assert_eq!(o.min_angle, 20.0);
        assert_eq!(o.steiner_limit(), DEFAULT_MAX_STEINER_POINTS);

        let o = TriangulationOptions::new()
            .with_refine(true)
            .with_min_angle(25.0)
            .with_max_steiner_points(12);
        assert_eq!(o.steiner_limit(), 12);
        assert!(o.validate().is_ok());
    }

    #[test]
    fn angle_is_checked_only_when_refining() {
        let bad = TriangulationOptions::new().with_min_angle(75.0);
        assert!(bad.validate().is_ok());
        for angle in [0.0, 60.0, -3.0, f64::NAN, f64::INFINITY] {
            let o = bad.clone().with_refine(true).with_min_angle(angle);
            assert!(matches!(o.validate(), Err(TriangulationError::InvalidOptions(_))));
        }
    }

    #[test]
    fn frame_round_trip() {
        let pts = [Point2::new(10.0, -4.0), Point2::new(14.0, -2.0)];
        let f = Frame::fit(&pts);
        assert_eq!(f.to_local(&pts[1]), Point2::new(1.0, 0.5));
        assert_eq!(f.to_world(&Point2::new(0.5, 0.25)), Point2::new(12.0, -3.0));
    }
}
