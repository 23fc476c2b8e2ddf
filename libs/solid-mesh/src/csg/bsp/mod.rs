//! # BSP Engine
//!
//! Reference boolean engine: both operands become BSP trees that clip each
//! other, following csg.js.
//!
//! ```text
//! union:     a.clip_to(b); b.clip_to(a); b.invert(); b.clip_to(a); b.invert(); a.build(b)
//! subtract:  invert(union(invert(a), b))
//! intersect: invert(union(invert(a), invert(b)))
//! ```
//!
//! Output fragments are reassembled by the repair pass so the result is a
//! welded, watertight triangle mesh.

use tracing::debug;

use super::{repair, trivial_result, BooleanOp, CsgEngine};
use crate::error::SolidResult;
use crate::mesh::Mesh;

pub mod node;
pub mod plane;
pub mod polygon;

pub use node::BspNode;
pub use plane::{Classification, Plane};
pub use polygon::{CsgPolygon, SplitBuckets};

/// csg.js style BSP engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct BspEngine;

impl BspEngine {
    /// Creates the engine.
    pub fn new() -> Self {
        Self
    }

    fn run(&self, op: BooleanOp, a: &Mesh, b: &Mesh) -> SolidResult<Mesh> {
        if let Some(mesh) = trivial_result(op, a, b) {
            return Ok(mesh);
        }
        let mut a = BspNode::new(to_polygons(a));
        let mut b = BspNode::new(to_polygons(b));
        debug!(
            %op,
            a_polygons = a.polygon_count(),
            b_polygons = b.polygon_count(),
            "BSP trees built"
        );

        match op {
            BooleanOp::Union => {
                a.clip_to(&b);
                b.clip_to(&a);
                b.invert();
                b.clip_to(&a);
                b.invert();
                a.build(b.all_polygons());
            }
            BooleanOp::Subtract => {
                a.invert();
                a.clip_to(&b);
                b.clip_to(&a);
                b.invert();
                b.clip_to(&a);
                b.invert();
                a.build(b.all_polygons());
                a.invert();
            }
            BooleanOp::Intersect => {
                a.invert();
                b.clip_to(&a);
                b.invert();
                a.clip_to(&b);
                b.clip_to(&a);
                a.build(b.all_polygons());
                a.invert();
            }
        }

        Ok(from_polygons(a.all_polygons()))
    }
}

impl CsgEngine for BspEngine {
    fn name(&self) -> &'static str {
        "bsp"
    }

    fn union(&self, a: &Mesh, b: &Mesh) -> SolidResult<Mesh> {
        self.run(BooleanOp::Union, a, b)
    }

    fn subtract(&self, a: &Mesh, b: &Mesh) -> SolidResult<Mesh> {
        self.run(BooleanOp::Subtract, a, b)
    }

    fn intersect(&self, a: &Mesh, b: &Mesh) -> SolidResult<Mesh> {
        self.run(BooleanOp::Intersect, a, b)
    }
}

/// Converts a mesh to BSP polygons, one per triangle.
///
/// Triangles are planar by construction, so every polygon's plane matches
/// its vertices exactly. Zero-area triangles are skipped.
pub fn to_polygons(mesh: &Mesh) -> Vec<CsgPolygon> {
    mesh.triangulated()
        .polygons()
        .into_iter()
        .filter_map(CsgPolygon::from_vertices)
        .collect()
}

/// Reassembles BSP polygons into a mesh.
pub fn from_polygons(polygons: Vec<CsgPolygon>) -> Mesh {
    repair::assemble(polygons.into_iter().map(CsgPolygon::into_vertices).collect())
}
