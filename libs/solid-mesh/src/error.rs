//! # Solid Errors
//!
//! Error types for solid construction, validation and boolean combination.
//! Every error is raised synchronously by the call that detects it.

use config::kernel::ConfigError;
use thiserror::Error;

/// Result alias for solid operations.
pub type SolidResult<T> = Result<T, SolidError>;

/// Reasons a mesh fails the watertightness invariant.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A face references a vertex that does not exist.
    #[error("face {face} references vertex {index} but the mesh has {count} vertices")]
    IndexOutOfRange {
        /// Offending face.
        face: usize,
        /// Offending vertex index.
        index: usize,
        /// Number of vertices in the mesh.
        count: usize,
    },

    /// A face has fewer than three distinct vertices or repeats one in a row.
    #[error("face {face} is degenerate")]
    DegenerateFace {
        /// Offending face.
        face: usize,
    },

    /// An edge is used by a single face.
    #[error("boundary edge ({a}, {b})")]
    BoundaryEdge {
        /// First vertex of the edge.
        a: usize,
        /// Second vertex of the edge.
        b: usize,
    },

    /// An edge is shared by more than two faces.
    #[error("edge ({a}, {b}) is shared by {count} faces")]
    NonManifoldEdge {
        /// First vertex of the edge.
        a: usize,
        /// Second vertex of the edge.
        b: usize,
        /// Number of faces using the edge.
        count: usize,
    },

    /// Both faces sharing an edge traverse it in the same direction.
    #[error("edge ({a}, {b}) is traversed in the same direction by both faces")]
    InconsistentOrientation {
        /// First vertex of the edge.
        a: usize,
        /// Second vertex of the edge.
        b: usize,
    },

    /// The mesh is closed but its faces point inward.
    #[error("mesh is inside-out (signed volume {volume})")]
    InvertedVolume {
        /// Signed enclosed volume.
        volume: f64,
    },
}

/// Errors produced by the solid kernel.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolidError {
    /// Basis vectors are zero or parallel.
    #[error("degenerate basis: {message}")]
    DegenerateBasis {
        /// What was wrong with the spanning vectors.
        message: String,
    },

    /// Profiles stitched together have different point counts.
    #[error("profile {index} has {found} points, expected {expected}")]
    Arity {
        /// Point count of the first profile.
        expected: usize,
        /// Point count of the offending profile.
        found: usize,
        /// Position of the offending profile.
        index: usize,
    },

    /// Fewer than two profiles were supplied.
    #[error("at least two profiles are required, got {count}")]
    InsufficientSlices {
        /// Number of profiles supplied.
        count: usize,
    },

    /// Spin axis and start vector are not usable together.
    #[error("orientation error: {message}")]
    Orientation {
        /// What was wrong with the axis or start vector.
        message: String,
    },

    /// A mesh failed the watertightness invariant.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// No CSG backend could be bound.
    #[error("no CSG backend available (tried: {})", .requested.join(", "))]
    BackendUnavailable {
        /// Backend names that were tried.
        requested: Vec<String>,
    },

    /// A polygon has too few points to enclose an area.
    #[error("degenerate polygon: {message}")]
    DegeneratePolygon {
        /// What was wrong with the polygon.
        message: String,
    },

    /// A point handed to a basis does not lie on its plane.
    #[error("point is {distance} away from the basis plane")]
    OffPlane {
        /// Distance from the plane.
        distance: f64,
    },

    /// Kernel configuration was rejected.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl SolidError {
    /// Creates a degenerate basis error.
    pub fn degenerate_basis(message: impl Into<String>) -> Self {
        Self::DegenerateBasis {
            message: message.into(),
        }
    }

    /// Creates an orientation error.
    pub fn orientation(message: impl Into<String>) -> Self {
        Self::Orientation {
            message: message.into(),
        }
    }

    /// Creates a degenerate polygon error.
    pub fn degenerate_polygon(message: impl Into<String>) -> Self {
        Self::DegeneratePolygon {
            message: message.into(),
        }
    }

    /// Creates a backend unavailable error from the names that were tried.
    pub fn backend_unavailable<I, S>(requested: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::BackendUnavailable {
            requested: requested.into_iter().map(Into::into).collect(),
        }
    }
}
