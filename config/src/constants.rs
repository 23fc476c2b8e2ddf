//! # Kernel Constants
//!
//! Numeric tolerances and defaults shared by the geometry kernel.
//!
//! ## Categories
//!
//! - **Precision**: plane classification, area culling, vertex welding
//! - **Resolution**: default angular subdivision
//! - **Recursion**: stack growth parameters for BSP traversal
//! - **Backends**: environment override and default preference order

// =============================================================================
// PRECISION
// =============================================================================

/// Plane classification tolerance.
///
/// A vertex closer than this to a splitting plane is treated as lying on it.
/// Also used as the point coincidence tolerance by the mesh builders.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
/// let distance: f64 = 5.0e-6;
/// assert!(distance.abs() < EPSILON);
/// ```
pub const EPSILON: f64 = 1.0e-5;

/// Minimum polygon area kept after splitting (EPSILON squared).
pub const AREA_EPSILON: f64 = EPSILON * EPSILON;

/// Distance under which builder and mesh vertices are welded into one.
///
/// Must not be smaller than [`EPSILON`].
pub const VERTEX_WELD_EPSILON: f64 = EPSILON;

/// Snap distance used when boolean fragments are assembled into a mesh.
///
/// Fragments of neighbouring faces are split independently, and a vertex
/// within [`EPSILON`] of a plane counts as lying on it, so cut points that
/// belong together can land a few `EPSILON` apart. Welding, sliver removal
/// and T-junction insertion during assembly all use this distance.
///
/// # Example
///
/// ```rust
/// use config::constants::{ASSEMBLY_EPSILON, EPSILON};
/// let drift = 2.13e-5;
/// assert!(drift > EPSILON && drift < ASSEMBLY_EPSILON);
/// ```
pub const ASSEMBLY_EPSILON: f64 = 10.0 * EPSILON;

/// Relative tolerance used when comparing enclosed volumes.
pub const VOLUME_RELATIVE_TOLERANCE: f64 = 1.0e-4;

// =============================================================================
// RESOLUTION
// =============================================================================

/// Default segment count for round primitives (cylinders, spun profiles).
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_SEGMENTS;
/// assert!(DEFAULT_SEGMENTS >= 3);
/// ```
pub const DEFAULT_SEGMENTS: u32 = 32;

/// Minimum segment count that still forms a closed polygon.
pub const MIN_SEGMENTS: u32 = 3;

// =============================================================================
// RECURSION
// =============================================================================

/// Remaining stack below which `stacker` allocates a new segment.
pub const STACKER_RED_ZONE_BYTES: usize = 64 * 1024;

/// Size of each stack segment allocated by `stacker`.
pub const STACKER_STACK_SIZE_BYTES: usize = 8 * 1024 * 1024;

// =============================================================================
// BACKENDS
// =============================================================================

/// Environment variable holding a comma-separated backend preference list.
///
/// # Example
///
/// ```text
/// SOLID_CSG_BACKEND=bsp,raycast
/// ```
pub const BACKEND_ENV_VAR: &str = "SOLID_CSG_BACKEND";

/// Backend names in default fallback order.
pub const DEFAULT_BACKEND_ORDER: &[&str] = &["raycast", "bsp"];

// =============================================================================
// HELPERS
// =============================================================================

/// Check if two values are approximately equal within [`EPSILON`].
///
/// # Example
///
/// ```rust
/// use config::constants::approx_equal;
/// assert!(approx_equal(1.0, 1.0 + 1.0e-7));
/// assert!(!approx_equal(1.0, 1.001));
/// ```
#[inline]
pub fn approx_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Check if a value is approximately zero within [`EPSILON`].
#[inline]
pub fn approx_zero(value: f64) -> bool {
    value.abs() < EPSILON
}

/// Compare two volumes with a relative tolerance, falling back to an
/// absolute one near zero.
///
/// # Example
///
/// ```rust
/// use config::constants::volumes_match;
/// assert!(volumes_match(1000.0, 1000.0000001));
/// assert!(volumes_match(0.0, 1.0e-9));
/// assert!(!volumes_match(8.0, 7.0));
/// ```
pub fn volumes_match(a: f64, b: f64) -> bool {
    let scale = a.abs().max(b.abs());
    if scale < EPSILON {
        return true;
    }
    (a - b).abs() <= scale * VOLUME_RELATIVE_TOLERANCE + AREA_EPSILON
}
