//! # Polygons
//!
//! Planar polygons and their embedding in space.
//!
//! A [`Polygon`] is an ordered closed loop of at least three 2D points.
//! Counter-clockwise winding has positive signed area. Consecutive
//! duplicate points are allowed; builders collapse them while stitching.

use std::f64::consts::TAU;

use config::constants::MIN_SEGMENTS;
use glam::{DVec2, DVec3};

use super::basis::Basis;
use crate::error::{SolidError, SolidResult};

// =============================================================================
// POLYGON
// =============================================================================

/// A closed loop of 2D points.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    points: Vec<DVec2>,
}

impl Polygon {
    /// Creates a polygon.
    ///
    /// Consecutive duplicate points are accepted and count towards the
    /// arity. Builders collapse them when profiles are stitched, so a quad
    /// touching a repeated point becomes a triangle.
    ///
    /// # Errors
    ///
    /// [`SolidError::DegeneratePolygon`] with fewer than three points or a
    /// non-finite coordinate.
    pub fn new(points: Vec<DVec2>) -> SolidResult<Self> {
        if points.len() < 3 {
            return Err(SolidError::degenerate_polygon(format!(
                "{} points, need at least 3",
                points.len()
            )));
        }
        if points.iter().any(|p| !p.is_finite()) {
            return Err(SolidError::degenerate_polygon("non-finite coordinate"));
        }
        Ok(Self { points })
    }

    /// Axis-aligned rectangle with one corner at the origin, counter-clockwise.
    pub fn rectangle(width: f64, height: f64) -> SolidResult<Self> {
        Self::new(vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(width, 0.0),
            DVec2::new(width, height),
            DVec2::new(0.0, height),
        ])
    }

    /// Regular polygon approximating a circle centered at the origin.
    pub fn circle(radius: f64, segments: u32) -> SolidResult<Self> {
        if segments < MIN_SEGMENTS {
            return Err(SolidError::degenerate_polygon(format!(
                "{segments} segments, need at least {MIN_SEGMENTS}"
            )));
        }
        let points = (0..segments)
            .map(|i| {
                let theta = TAU * i as f64 / segments as f64;
                DVec2::new(theta.cos(), theta.sin()) * radius
            })
            .collect();
        Self::new(points)
    }

    /// Points in loop order.
    pub fn points(&self) -> &[DVec2] {
        &self.points
    }

    /// Number of points, duplicates included.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; a polygon has at least three points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Shoelace signed area, positive for counter-clockwise loops.
    pub fn signed_area(&self) -> f64 {
        let n = self.points.len();
        let twice: f64 = (0..n)
            .map(|i| self.points[i].perp_dot(self.points[(i + 1) % n]))
            .sum();
        twice * 0.5
    }

    /// Whether the loop winds clockwise.
    pub fn is_clockwise(&self) -> bool {
        self.signed_area() < 0.0
    }

    /// Same loop with opposite winding.
    pub fn reversed(&self) -> Self {
        let mut points = self.points.clone();
        points.reverse();
        Self { points }
    }

    /// Polygon shifted by `offset`.
    pub fn translated(&self, offset: DVec2) -> Self {
        Self {
            points: self.points.iter().map(|p| *p + offset).collect(),
        }
    }
}

// =============================================================================
// PLANAR POLYGON
// =============================================================================

/// A [`Polygon`] anchored in space by a [`Basis`].
///
/// # Example
///
/// ```rust
/// use glam::{DVec2, DVec3};
/// use solid_mesh::{Basis, PlanarPolygon, Polygon};
///
/// let tri = Polygon::new(vec![
///     DVec2::new(0.0, 0.0),
///     DVec2::new(0.0, 2.0),
///     DVec2::new(1.0, 1.0),
/// ])
/// .unwrap();
/// let planar = PlanarPolygon::new(Basis::XY, tri);
/// assert_eq!(planar.polygon3d()[1], DVec3::new(0.0, 2.0, 0.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PlanarPolygon {
    basis: Basis,
    polygon: Polygon,
}

impl PlanarPolygon {
    /// Anchors `polygon` on `basis`.
    pub fn new(basis: Basis, polygon: Polygon) -> Self {
        Self { basis, polygon }
    }

    /// Embedding basis.
    pub fn basis(&self) -> &Basis {
        &self.basis
    }

    /// Planar loop.
    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    /// Point count of the planar loop.
    pub fn len(&self) -> usize {
        self.polygon.len()
    }

    /// Always false; see [`Polygon::is_empty`].
    pub fn is_empty(&self) -> bool {
        self.polygon.is_empty()
    }

    /// Vertices in space, same order and count as the planar loop.
    pub fn polygon3d(&self) -> Vec<DVec3> {
        self.polygon
            .points()
            .iter()
            .map(|p| self.basis.to_space(*p))
            .collect()
    }

    /// Same loop on a basis shifted by `offset`.
    pub fn translated(&self, offset: DVec3) -> Self {
        Self {
            basis: self.basis.translated(offset),
            polygon: self.polygon.clone(),
        }
    }
}
