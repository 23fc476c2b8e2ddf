//! # Geometry
//!
//! Planar embedding, polygon helpers and triangulation.
//!
//! ## Submodules
//!
//! - [`basis`]: orthonormal 2D-to-3D mapping
//! - [`polygon`]: planar polygons and their embedded form
//! - [`triangulate`]: ear clipping with deterministic tie-breaking

use glam::{DMat4, DVec3};

pub mod basis;
pub mod polygon;
pub mod triangulate;

/// Returns a unit vector perpendicular to `axis`.
///
/// Crosses the axis with the coordinate axis it is least aligned with.
/// A zero axis yields a zero vector.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use solid_mesh::geometry::perpendicular;
///
/// let axis = DVec3::new(1.0, 1.0, 1.0);
/// assert!(perpendicular(axis).dot(axis).abs() < 1e-12);
/// ```
pub fn perpendicular(axis: DVec3) -> DVec3 {
    let a = axis.abs();
    let other = if a.x <= a.y && a.x <= a.z {
        DVec3::X
    } else if a.y <= a.z {
        DVec3::Y
    } else {
        DVec3::Z
    };
    axis.cross(other).normalize_or_zero()
}

/// Newell normal of a closed loop.
///
/// The result is not normalized; its length is twice the loop's area.
/// Works for non-convex and slightly non-planar loops.
pub fn newell_normal(points: &[DVec3]) -> DVec3 {
    let n = points.len();
    let mut normal = DVec3::ZERO;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        normal += a.cross(b);
    }
    normal
}

/// Area of a closed planar loop.
pub fn loop_area(points: &[DVec3]) -> f64 {
    newell_normal(points).length() * 0.5
}

/// Vertex average of a loop.
pub fn centroid(points: &[DVec3]) -> DVec3 {
    if points.is_empty() {
        return DVec3::ZERO;
    }
    points.iter().copied().sum::<DVec3>() / points.len() as f64
}

/// Rotation by `angle` radians around the line through `origin` along `axis`.
pub fn rotation_about(origin: DVec3, axis: DVec3, angle: f64) -> DMat4 {
    DMat4::from_translation(origin)
        * DMat4::from_axis_angle(axis.normalize(), angle)
        * DMat4::from_translation(-origin)
}
