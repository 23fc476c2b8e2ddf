//! # Solid Mesh
//!
//! Watertight solid construction and constructive solid geometry.
//!
//! ## Architecture
//!
//! ```text
//! PlanarPolygon (Polygon + Basis)
//!       ↓
//! Solid builders (Extrusion, PolygonExtrusion, Spun)
//!       ↓
//! Mesh (indexed polygon soup, validated watertight)
//!       ↓
//! Boolean composition (Solid + operator)
//!       ↓
//! CsgContext → CsgEngine (bsp | raycast)
//!       ↓
//! Mesh
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use glam::DVec3;
//! use solid_mesh::builders::cuboid;
//! use solid_mesh::csg::{CsgContext, EngineKind};
//! use solid_mesh::solid::{combine_subtract, Solid};
//!
//! let ctx = CsgContext::with_engine(EngineKind::Bsp).unwrap();
//! let block = Solid::new(cuboid(DVec3::ZERO, DVec3::splat(2.0)).unwrap());
//! let notch = Solid::new(cuboid(DVec3::new(1.0, 1.0, 1.0), DVec3::splat(2.0)).unwrap());
//!
//! let carved = combine_subtract(&ctx, &block, &notch).unwrap();
//! assert!((carved.mesh().volume() - 7.0).abs() < 1e-6);
//! ```

pub mod builders;
pub mod csg;
pub mod error;
pub mod geometry;
pub mod mesh;
pub mod solid;

pub use csg::{BooleanOp, CsgContext, CsgEngine, EngineKind};
pub use error::{SolidError, SolidResult, ValidationError};
pub use geometry::basis::Basis;
pub use geometry::polygon::{PlanarPolygon, Polygon};
pub use mesh::{Face, Mesh};
pub use solid::{Collection, DisplayMetadata, Solid};
