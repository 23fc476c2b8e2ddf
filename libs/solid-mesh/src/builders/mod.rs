//! # Solid Builders
//!
//! Watertight meshes from sequences of planar profiles.
//!
//! ## Builders
//!
//! - [`Extrusion`]: profiles stitched in order, first and last capped
//! - [`PolygonExtrusion`]: one profile swept along a vector
//! - [`Spun`]: profiles placed at equal angles around an axis
//! - [`cuboid`], [`cylinder`], [`cylinder_with_config`]: common primitives
//!
//! ## Stitching
//!
//! Adjacent profiles are joined by one quad per profile edge, connecting
//! vertex `i` of one profile to vertex `i` of the next. Points that coincide
//! within tolerance share a vertex, so zero-length edges collapse: quads
//! become triangles and loops with fewer than three distinct vertices are
//! dropped. The assembled surface is flipped if it encloses negative
//! volume, which makes the result outward-facing whatever the profile
//! winding.

use config::constants::VERTEX_WELD_EPSILON;
use config::kernel::KernelConfig;
use glam::DVec3;
use tracing::debug;

use crate::error::{SolidError, SolidResult};
use crate::geometry::basis::Basis;
use crate::geometry::perpendicular;
use crate::geometry::polygon::{PlanarPolygon, Polygon};
use crate::mesh::{clean_loop, Mesh, VertexWelder};

mod extrude;
mod spun;

#[cfg(test)]
mod tests;

pub use extrude::{Extrusion, PolygonExtrusion};
pub use spun::{Spun, SpunOptions};

/// How consecutive rings are closed off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Closure {
    /// Cap the first and last ring.
    Capped,
    /// Join the last ring back to the first.
    Looped,
}

/// Checks profile count and arity shared by every builder.
pub(crate) fn check_profiles(counts: impl ExactSizeIterator<Item = usize>) -> SolidResult<usize> {
    let count = counts.len();
    let mut counts = counts.enumerate();
    let expected = match counts.next() {
        Some((_, n)) if count >= 2 => n,
        _ => return Err(SolidError::InsufficientSlices { count }),
    };
    for (index, found) in counts {
        if found != expected {
            return Err(SolidError::Arity {
                expected,
                found,
                index,
            });
        }
    }
    Ok(expected)
}

/// Stitches rings of equal length into an outward-facing polygon mesh.
pub(crate) fn stitch(rings: &[Vec<DVec3>], closure: Closure) -> Mesh {
    let mut welder = VertexWelder::new(VERTEX_WELD_EPSILON);
    let indexed: Vec<Vec<usize>> = rings
        .iter()
        .map(|ring| ring.iter().map(|p| welder.insert(*p)).collect())
        .collect();

    let mut loops = Vec::new();
    let (Some(first), Some(last)) = (indexed.first(), indexed.last()) else {
        return Mesh::new();
    };
    if closure == Closure::Capped {
        loops.push(first.clone());
    }

    let mut pairs: Vec<(usize, usize)> = (1..indexed.len()).map(|k| (k - 1, k)).collect();
    if closure == Closure::Looped {
        pairs.push((indexed.len() - 1, 0));
    }
    for (k, l) in pairs {
        let (a, b) = (&indexed[k], &indexed[l]);
        let m = a.len();
        for i in 0..m {
            let j = (i + 1) % m;
            loops.push(vec![a[i], b[i], b[j], a[j]]);
        }
    }

    if closure == Closure::Capped {
        loops.push(last.iter().rev().copied().collect());
    }

    let loops: Vec<Vec<usize>> = loops.into_iter().filter_map(clean_loop).collect();
    let mesh = Mesh::from_loops(welder.into_vertices(), loops);
    let mesh = if mesh.volume() < 0.0 { mesh.inverted() } else { mesh };
    debug!(
        rings = rings.len(),
        faces = mesh.face_count(),
        vertices = mesh.vertex_count(),
        "stitched profiles"
    );
    mesh
}

/// Triangulates a stitched mesh and checks it is watertight.
pub(crate) fn finish(faces: Mesh) -> SolidResult<Mesh> {
    let mesh = faces.triangulated();
    mesh.validate()?;
    Ok(mesh)
}

// =============================================================================
// PRIMITIVES
// =============================================================================

/// Axis-aligned box with one corner at `origin`.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use solid_mesh::builders::cuboid;
///
/// let mesh = cuboid(DVec3::ZERO, DVec3::new(3.0, 3.0, 1.0)).unwrap();
/// assert!((mesh.volume() - 9.0).abs() < 1e-9);
/// ```
pub fn cuboid(origin: DVec3, size: DVec3) -> SolidResult<Mesh> {
    let footprint = Polygon::rectangle(size.x, size.y)?;
    let base = PlanarPolygon::new(Basis::XY.translated(origin), footprint);
    PolygonExtrusion::new(base, DVec3::new(0.0, 0.0, size.z)).mesh()
}

/// Cylinder of `radius` around `axis`, whose length is the height.
///
/// `segments` defaults to [`KernelConfig::default`]'s resolution when
/// `None`.
pub fn cylinder(
    origin: DVec3,
    axis: DVec3,
    radius: f64,
    segments: Option<u32>,
) -> SolidResult<Mesh> {
    cylinder_with_config(&KernelConfig::default(), origin, axis, radius, segments)
}

/// [`cylinder`] whose segment count defaults to `config.default_segments`.
///
/// # Example
///
/// ```rust
/// use config::kernel::KernelConfig;
/// use glam::DVec3;
/// use solid_mesh::builders::cylinder_with_config;
///
/// let coarse = KernelConfig::new(6).unwrap();
/// let mesh = cylinder_with_config(&coarse, DVec3::ZERO, DVec3::Z, 1.0, None).unwrap();
/// assert_eq!(mesh.vertex_count(), 12);
/// ```
pub fn cylinder_with_config(
    config: &KernelConfig,
    origin: DVec3,
    axis: DVec3,
    radius: f64,
    segments: Option<u32>,
) -> SolidResult<Mesh> {
    let bx = perpendicular(axis);
    let basis = Basis::new(origin, bx, axis.cross(bx))?;
    let footprint = Polygon::circle(radius, config.segments(segments))?;
    PolygonExtrusion::new(PlanarPolygon::new(basis, footprint), axis).mesh()
}
