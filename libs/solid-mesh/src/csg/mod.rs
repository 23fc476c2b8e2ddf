//! # Constructive Solid Geometry
//!
//! Boolean operations on closed meshes behind a pluggable engine.
//!
//! ## Engines
//!
//! | Engine    | Feature   | Approach                                        |
//! |-----------|-----------|-------------------------------------------------|
//! | `raycast` | `raycast` | Mutual BSP splitting, ray-parity classification |
//! | `bsp`     | always    | csg.js style BSP clipping                       |
//!
//! Engines are tried in [`EngineKind::FALLBACK_ORDER`] unless configured
//! otherwise; see [`CsgContext`].

use std::fmt;
use std::sync::Arc;

use crate::error::SolidResult;
use crate::mesh::Mesh;

pub mod bsp;
pub mod context;
#[cfg(feature = "raycast")]
pub mod raycast;
pub(crate) mod repair;


pub use bsp::BspEngine;
pub use context::CsgContext;
#[cfg(feature = "raycast")]
pub use raycast::RaycastEngine;

/// A boolean operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BooleanOp {
    /// `a ∪ b`
    Union,
    /// `a \ b`
    Subtract,
    /// `a ∩ b`
    Intersect,
}

impl fmt::Display for BooleanOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Union => "union",
            Self::Subtract => "subtract",
            Self::Intersect => "intersect",
        })
    }
}

/// A boolean engine over closed, outward-facing meshes.
///
/// Implementations may assume their inputs are watertight and may panic on
/// face indices past the vertex table. [`CsgContext`] checks indices under
/// every validation policy and watertightness under
/// [`ValidationPolicy::Strict`](config::kernel::ValidationPolicy::Strict).
pub trait CsgEngine: Send + Sync {
    /// Short identifier used in configuration and logs.
    fn name(&self) -> &'static str;

    /// Points inside either operand.
    fn union(&self, a: &Mesh, b: &Mesh) -> SolidResult<Mesh>;

    /// Points inside `a` but not `b`.
    fn subtract(&self, a: &Mesh, b: &Mesh) -> SolidResult<Mesh>;

    /// Points inside both operands.
    fn intersect(&self, a: &Mesh, b: &Mesh) -> SolidResult<Mesh>;

    /// Dispatches on `op`.
    fn apply(&self, op: BooleanOp, a: &Mesh, b: &Mesh) -> SolidResult<Mesh> {
        match op {
            BooleanOp::Union => self.union(a, b),
            BooleanOp::Subtract => self.subtract(a, b),
            BooleanOp::Intersect => self.intersect(a, b),
        }
    }
}

/// The built-in engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineKind {
    /// [`RaycastEngine`], behind the `raycast` feature.
    Raycast,
    /// [`BspEngine`].
    Bsp,
}

impl EngineKind {
    /// Engines in order of preference.
    pub const FALLBACK_ORDER: [EngineKind; 2] = [EngineKind::Raycast, EngineKind::Bsp];

    /// Configuration name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Raycast => "raycast",
            Self::Bsp => "bsp",
        }
    }

    /// Looks up an engine by configuration name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::FALLBACK_ORDER
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Whether this build includes the engine.
    pub fn is_available(self) -> bool {
        match self {
            Self::Raycast => cfg!(feature = "raycast"),
            Self::Bsp => true,
        }
    }

    /// Instantiates the engine if it is available.
    pub fn engine(self) -> Option<Arc<dyn CsgEngine>> {
        match self {
            #[cfg(feature = "raycast")]
            Self::Raycast => Some(Arc::new(RaycastEngine::new())),
            #[cfg(not(feature = "raycast"))]
            Self::Raycast => None,
            Self::Bsp => Some(Arc::new(BspEngine::new())),
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of an operation with an empty operand, if it is trivial.
///
/// The empty mesh is the empty set, so these never need an engine.
pub(crate) fn trivial_result(op: BooleanOp, a: &Mesh, b: &Mesh) -> Option<Mesh> {
    match (op, a.is_empty(), b.is_empty()) {
        (BooleanOp::Union, true, _) => Some(b.clone()),
        (BooleanOp::Union, false, true) => Some(a.clone()),
        (BooleanOp::Subtract, true, _) => Some(Mesh::new()),
        (BooleanOp::Subtract, false, true) => Some(a.clone()),
        (BooleanOp::Intersect, true, _) | (BooleanOp::Intersect, _, true) => Some(Mesh::new()),
        _ => None,
    }
}
