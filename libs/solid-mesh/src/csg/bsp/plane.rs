//! # Plane for BSP Operations
//!
//! Oriented plane with tolerant point classification.

use config::constants::EPSILON;
use glam::DVec3;

use crate::geometry::newell_normal;

// =============================================================================
// CLASSIFICATION
// =============================================================================

/// Position of a point or polygon relative to a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Within tolerance of the plane.
    Coplanar,
    /// On the side the normal points to.
    Front,
    /// On the side opposite the normal.
    Back,
    /// Polygon with vertices on both sides.
    Spanning,
}

// =============================================================================
// PLANE
// =============================================================================

/// Plane `normal · p = w` with a unit normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    normal: DVec3,
    w: f64,
}

impl Plane {
    /// Creates a plane from a unit normal and offset.
    pub fn new(normal: DVec3, w: f64) -> Self {
        Self { normal, w }
    }

    /// Plane of a loop, oriented by its winding.
    ///
    /// Returns `None` for loops without area.
    pub fn from_loop(points: &[DVec3]) -> Option<Self> {
        let n = newell_normal(points);
        let len = n.length();
        if !(len > 0.0) || !len.is_finite() {
            return None;
        }
        let normal = n / len;
        let centroid = points.iter().copied().sum::<DVec3>() / points.len() as f64;
        Some(Self {
            normal,
            w: normal.dot(centroid),
        })
    }

    /// Unit normal.
    pub fn normal(&self) -> DVec3 {
        self.normal
    }

    /// Offset along the normal.
    pub fn w(&self) -> f64 {
        self.w
    }

    /// Reverses the plane in place.
    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.w = -self.w;
    }

    /// Signed distance, positive in front.
    pub fn signed_distance(&self, point: DVec3) -> f64 {
        self.normal.dot(point) - self.w
    }

    /// Classifies a point with the [`EPSILON`] tolerance.
    pub fn classify_point(&self, point: DVec3) -> Classification {
        let d = self.signed_distance(point);
        if d > EPSILON {
            Classification::Front
        } else if d < -EPSILON {
            Classification::Back
        } else {
            Classification::Coplanar
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_from_loop() {
        let plane = Plane::from_loop(&[
            DVec3::new(0.0, 0.0, 2.0),
            DVec3::new(1.0, 0.0, 2.0),
            DVec3::new(0.0, 1.0, 2.0),
        ])
        .unwrap();
        assert!((plane.normal().z - 1.0).abs() < 1e-12);
        assert!((plane.w() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_loop_has_no_plane() {
        assert!(Plane::from_loop(&[DVec3::ZERO, DVec3::X, DVec3::X * 2.0]).is_none());
    }

    #[test]
    fn test_classify_point_with_tolerance() {
        let plane = Plane::new(DVec3::Z, 0.0);
        assert_eq!(plane.classify_point(DVec3::Z), Classification::Front);
        assert_eq!(plane.classify_point(-DVec3::Z), Classification::Back);
        assert_eq!(
            plane.classify_point(DVec3::new(3.0, 1.0, EPSILON * 0.5)),
            Classification::Coplanar
        );
    }

    #[test]
    fn test_flip() {
        let mut plane = Plane::new(DVec3::Z, 5.0);
        plane.flip();
        assert_eq!(plane.normal(), -DVec3::Z);
        assert_eq!(plane.w(), -5.0);
    }
}
