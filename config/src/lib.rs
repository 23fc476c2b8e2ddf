//! # Config Crate
//!
//! Centralized tolerances and kernel configuration for the solid modeling
//! workspace. Every magic number used by the geometry kernel lives here so
//! the builders, the CSG backends and the file collaborators agree on what
//! "close enough" means.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{EPSILON, AREA_EPSILON};
//!
//! // Points closer than EPSILON are treated as the same point
//! let gap: f64 = 1.0e-7;
//! assert!(gap < EPSILON);
//!
//! // Split fragments smaller than AREA_EPSILON are discarded
//! assert!(AREA_EPSILON < EPSILON);
//! ```
//!
//! ```rust
//! use config::kernel::{KernelConfig, SeamPolicy};
//!
//! let cfg = KernelConfig::default();
//! assert_eq!(cfg.seam_policy, SeamPolicy::Weld);
//! assert_eq!(cfg.backend_preference[0], "raycast");
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: tolerances are defined once
//! - **Validated**: runtime configuration is checked on construction
//! - **No Dependencies**: pure data, usable from every crate

pub mod constants;
pub mod kernel;
