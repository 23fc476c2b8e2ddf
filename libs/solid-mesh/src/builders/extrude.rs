//! # Extrusion
//!
//! Stitching of translated or otherwise placed planar slices.

use glam::DVec3;

use super::{check_profiles, finish, stitch, Closure};
use crate::error::SolidResult;
use crate::geometry::polygon::PlanarPolygon;
use crate::mesh::Mesh;

/// A solid built from two or more slices of equal arity.
///
/// The first slice and the last slice become end caps; every adjacent pair
/// is joined by a ring of quads.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use solid_mesh::builders::Extrusion;
/// use solid_mesh::{Basis, PlanarPolygon, Polygon};
///
/// let square = Polygon::rectangle(1.0, 1.0).unwrap();
/// let extrusion = Extrusion::new(vec![
///     PlanarPolygon::new(Basis::XY, square.clone()),
///     PlanarPolygon::new(Basis::XY + DVec3::Z, square),
/// ])
/// .unwrap();
/// assert_eq!(extrusion.faces().face_count(), 6);
/// ```
#[derive(Debug, Clone)]
pub struct Extrusion {
    slices: Vec<PlanarPolygon>,
}

impl Extrusion {
    /// Checks the slices and creates the builder.
    ///
    /// # Errors
    ///
    /// - [`SolidError::InsufficientSlices`](crate::SolidError::InsufficientSlices)
    ///   with fewer than two slices
    /// - [`SolidError::Arity`](crate::SolidError::Arity) when a slice's point
    ///   count differs from the first
    pub fn new(slices: Vec<PlanarPolygon>) -> SolidResult<Self> {
        check_profiles(slices.iter().map(PlanarPolygon::len))?;
        Ok(Self { slices })
    }

    /// Slices in stitching order.
    pub fn slices(&self) -> &[PlanarPolygon] {
        &self.slices
    }

    /// Untriangulated outward-facing faces: rings of quads plus two caps.
    pub fn faces(&self) -> Mesh {
        let rings: Vec<Vec<DVec3>> = self.slices.iter().map(PlanarPolygon::polygon3d).collect();
        stitch(&rings, Closure::Capped)
    }

    /// Triangulated, validated mesh.
    ///
    /// # Errors
    ///
    /// [`SolidError::Validation`](crate::SolidError::Validation) when the
    /// stitched surface is not watertight.
    pub fn mesh(&self) -> SolidResult<Mesh> {
        finish(self.faces())
    }
}

/// A single profile swept along a vector.
///
/// Equivalent to an [`Extrusion`] of the profile and its translate.
#[derive(Debug, Clone)]
pub struct PolygonExtrusion {
    inner: Extrusion,
    direction: DVec3,
}

impl PolygonExtrusion {
    /// Sweeps `profile` along `direction`.
    pub fn new(profile: PlanarPolygon, direction: DVec3) -> Self {
        let top = profile.translated(direction);
        Self {
            inner: Extrusion {
                slices: vec![profile, top],
            },
            direction,
        }
    }

    /// Sweep vector.
    pub fn direction(&self) -> DVec3 {
        self.direction
    }

    /// Base profile.
    pub fn profile(&self) -> &PlanarPolygon {
        &self.inner.slices[0]
    }

    /// Untriangulated faces.
    pub fn faces(&self) -> Mesh {
        self.inner.faces()
    }

    /// Triangulated, validated mesh.
    pub fn mesh(&self) -> SolidResult<Mesh> {
        self.inner.mesh()
    }
}
