//! # Basis
//!
//! Orthonormal mapping between a 2D plane and 3D space.
//!
//! A basis is an origin plus two perpendicular unit vectors. Any plane has
//! infinitely many bases; the choice fixes how 2D coordinates land in space.

use config::constants::{approx_zero, EPSILON};
use glam::{DVec2, DVec3};

use crate::error::{SolidError, SolidResult};

/// An origin and two orthonormal spanning vectors.
///
/// # Example
///
/// ```rust
/// use glam::{DVec2, DVec3};
/// use solid_mesh::Basis;
///
/// let basis = Basis::new(DVec3::new(1.0, 0.0, 0.0), DVec3::Y, DVec3::Z).unwrap();
/// assert_eq!(basis.to_space(DVec2::new(2.0, 3.0)), DVec3::new(1.0, 2.0, 3.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Basis {
    origin: DVec3,
    bx: DVec3,
    by: DVec3,
}

impl Basis {
    /// The XY plane through the origin.
    pub const XY: Basis = Basis {
        origin: DVec3::ZERO,
        bx: DVec3::X,
        by: DVec3::Y,
    };

    /// The YZ plane through the origin.
    pub const YZ: Basis = Basis {
        origin: DVec3::ZERO,
        bx: DVec3::Y,
        by: DVec3::Z,
    };

    /// The XZ plane through the origin.
    pub const XZ: Basis = Basis {
        origin: DVec3::ZERO,
        bx: DVec3::X,
        by: DVec3::Z,
    };

    /// Creates a basis from an origin and two spanning vectors.
    ///
    /// Both vectors are normalized and `by` is made perpendicular to `bx`,
    /// so any pair of non-parallel vectors is accepted.
    ///
    /// # Errors
    ///
    /// [`SolidError::DegenerateBasis`] when either vector is zero or the two
    /// are parallel.
    pub fn new(origin: DVec3, bx: DVec3, by: DVec3) -> SolidResult<Self> {
        if !origin.is_finite() || !bx.is_finite() || !by.is_finite() {
            return Err(SolidError::degenerate_basis("non-finite component"));
        }
        if bx.length() < EPSILON || by.length() < EPSILON {
            return Err(SolidError::degenerate_basis("zero-length spanning vector"));
        }
        let ux = bx.normalize();
        let uy = by.normalize();
        let rejected = uy - ux * ux.dot(uy);
        if rejected.length() < EPSILON {
            return Err(SolidError::degenerate_basis("spanning vectors are parallel"));
        }
        Ok(Self {
            origin,
            bx: ux,
            by: rejected.normalize(),
        })
    }

    /// Creates a basis from vectors already known to be orthonormal.
    pub(crate) fn from_orthonormal(origin: DVec3, bx: DVec3, by: DVec3) -> Self {
        Self { origin, bx, by }
    }

    /// Origin of the plane.
    pub fn origin(&self) -> DVec3 {
        self.origin
    }

    /// Unit vector mapped from the 2D x axis.
    pub fn bx(&self) -> DVec3 {
        self.bx
    }

    /// Unit vector mapped from the 2D y axis.
    pub fn by(&self) -> DVec3 {
        self.by
    }

    /// Unit normal, `bx × by`.
    pub fn normal(&self) -> DVec3 {
        self.bx.cross(self.by)
    }

    /// Lifts a planar point into space.
    pub fn to_space(&self, point: DVec2) -> DVec3 {
        self.origin + self.bx * point.x + self.by * point.y
    }

    /// Maps a point of the plane back to planar coordinates.
    ///
    /// # Errors
    ///
    /// [`SolidError::OffPlane`] when the point is farther than the tolerance
    /// from the plane.
    pub fn to_plane(&self, point: DVec3) -> SolidResult<DVec2> {
        let d = point - self.origin;
        let distance = d.dot(self.normal());
        if !approx_zero(distance) {
            return Err(SolidError::OffPlane { distance });
        }
        Ok(DVec2::new(d.dot(self.bx), d.dot(self.by)))
    }

    /// Returns the basis shifted by `offset`.
    pub fn translated(&self, offset: DVec3) -> Self {
        Self {
            origin: self.origin + offset,
            ..*self
        }
    }
}

impl std::ops::Add<DVec3> for Basis {
    type Output = Basis;

    fn add(self, offset: DVec3) -> Basis {
        self.translated(offset)
    }
}
