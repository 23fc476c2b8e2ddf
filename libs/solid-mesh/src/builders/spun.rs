//! # Spun Solids
//!
//! Profiles revolved around an axis.
//!
//! Profile `k` is drawn on a basis whose x direction is the start vector
//! rotated by the profile's angle and whose y direction is the axis. So a
//! profile point `(r, h)` lands at radius `r` from the axis, at height `h`
//! along it. Points on the axis (`r = 0`) coincide for every profile and
//! collapse into shared vertices.
//!
//! ## Seam
//!
//! [`SeamPolicy::Weld`] spaces `n` profiles over a full turn and stitches
//! the last profile back to the first, reusing the start orientation. A
//! profile repeated `n` times therefore yields a closed solid of revolution.
//! Callers building features that must not close into themselves (a thread
//! whose ends are offset, say) use [`SeamPolicy::Open`], which spaces the
//! profiles from angle zero to the sweep end inclusive and caps both ends.

use std::f64::consts::TAU;

use config::constants::{approx_zero, EPSILON};
use config::kernel::{KernelConfig, SeamPolicy};
use glam::{DQuat, DVec3};

use super::{check_profiles, finish, stitch, Closure};
use crate::error::{SolidError, SolidResult};
use crate::geometry::basis::Basis;
use crate::geometry::polygon::{PlanarPolygon, Polygon};
use crate::mesh::Mesh;

/// Options for [`Spun`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpunOptions {
    /// Seam handling.
    pub seam: SeamPolicy,
    /// Sweep angle in radians for [`SeamPolicy::Open`]. Welded sweeps always
    /// cover a full turn.
    pub sweep: f64,
}

impl Default for SpunOptions {
    fn default() -> Self {
        Self {
            seam: SeamPolicy::default(),
            sweep: TAU,
        }
    }
}

/// Profiles distributed at equal angles around an axis.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use solid_mesh::builders::Spun;
/// use solid_mesh::Polygon;
///
/// let ring = Polygon::rectangle(1.0, 1.0).unwrap().translated(glam::DVec2::new(2.0, 0.0));
/// let torus = Spun::new(DVec3::Z, DVec3::X, vec![ring; 24]).unwrap();
/// assert!(torus.mesh().unwrap().is_watertight());
/// ```
#[derive(Debug, Clone)]
pub struct Spun {
    origin: DVec3,
    axis: DVec3,
    start: DVec3,
    profiles: Vec<Polygon>,
    options: SpunOptions,
}

impl Spun {
    /// Revolves `profiles` around `axis` through the origin, starting at
    /// `start`.
    ///
    /// # Errors
    ///
    /// - [`SolidError::Orientation`] when the axis or start vector is zero
    ///   or they are not perpendicular
    /// - [`SolidError::InsufficientSlices`] with fewer than two profiles
    /// - [`SolidError::Arity`] when profile point counts differ
    pub fn new(axis: DVec3, start: DVec3, profiles: Vec<Polygon>) -> SolidResult<Self> {
        if axis.length() < EPSILON || !axis.is_finite() {
            return Err(SolidError::orientation("spin axis has zero length"));
        }
        if start.length() < EPSILON || !start.is_finite() {
            return Err(SolidError::orientation("start vector has zero length"));
        }
        let axis = axis.normalize();
        let cosine = start.normalize().dot(axis);
        if !approx_zero(cosine) {
            return Err(SolidError::orientation(format!(
                "start vector is not perpendicular to the axis (cos = {cosine:.6})"
            )));
        }
        check_profiles(profiles.iter().map(Polygon::len))?;
        let start = (start - axis * start.dot(axis)).normalize();
        Ok(Self {
            origin: DVec3::ZERO,
            axis,
            start,
            profiles,
            options: SpunOptions::default(),
        })
    }

    /// Moves the axis to pass through `origin`.
    pub fn with_origin(mut self, origin: DVec3) -> Self {
        self.origin = origin;
        self
    }

    /// Replaces the options.
    ///
    /// # Errors
    ///
    /// [`SolidError::Orientation`] for an open sweep that is not a positive
    /// angle of at most one turn.
    pub fn with_options(mut self, options: SpunOptions) -> SolidResult<Self> {
        if options.seam == SeamPolicy::Open
            && !(options.sweep > EPSILON && options.sweep <= TAU + EPSILON)
        {
            return Err(SolidError::orientation(format!(
                "open sweep must lie in (0, 2π], got {}",
                options.sweep
            )));
        }
        self.options = options;
        Ok(self)
    }

    /// Applies the configured seam policy, keeping the current sweep.
    ///
    /// # Errors
    ///
    /// As [`Spun::with_options`].
    pub fn with_config(self, config: &KernelConfig) -> SolidResult<Self> {
        let options = SpunOptions {
            seam: config.seam_policy,
            sweep: self.options.sweep,
        };
        self.with_options(options)
    }

    /// Unit spin axis.
    pub fn axis(&self) -> DVec3 {
        self.axis
    }

    /// Unit start vector, perpendicular to the axis.
    pub fn start(&self) -> DVec3 {
        self.start
    }

    /// Angle of each profile in radians.
    pub fn angles(&self) -> Vec<f64> {
        let n = self.profiles.len();
        match self.options.seam {
            SeamPolicy::Weld => (0..n).map(|k| TAU * k as f64 / n as f64).collect(),
            SeamPolicy::Open => (0..n)
                .map(|k| self.options.sweep * k as f64 / (n - 1) as f64)
                .collect(),
        }
    }

    /// Profiles anchored on their rotated bases.
    pub fn placed_profiles(&self) -> Vec<PlanarPolygon> {
        self.angles()
            .into_iter()
            .zip(&self.profiles)
            .map(|(theta, profile)| {
                let radial = DQuat::from_axis_angle(self.axis, theta) * self.start;
                let basis = Basis::from_orthonormal(self.origin, radial, self.axis);
                PlanarPolygon::new(basis, profile.clone())
            })
            .collect()
    }

    /// Untriangulated outward-facing faces.
    pub fn faces(&self) -> Mesh {
        let rings: Vec<Vec<DVec3>> = self
            .placed_profiles()
            .iter()
            .map(PlanarPolygon::polygon3d)
            .collect();
        let closure = match self.options.seam {
            SeamPolicy::Weld => Closure::Looped,
            SeamPolicy::Open => Closure::Capped,
        };
        stitch(&rings, closure)
    }

    /// Triangulated, validated mesh.
    ///
    /// # Errors
    ///
    /// [`SolidError::Validation`] when the stitched surface is not
    /// watertight, for example an open sweep over a full turn whose end
    /// caps coincide.
    pub fn mesh(&self) -> SolidResult<Mesh> {
        finish(self.faces())
    }
}
