//! # Raycast Engine
//!
//! Boolean engine that splits each operand's faces against the other's BSP
//! tree and keeps fragments by where they lie.
//!
//! ## Pipeline
//!
//! 1. Build a BSP tree for each operand.
//! 2. Partition `a`'s triangles by `b`'s tree and vice versa, so every
//!    fragment lies wholly inside, outside, or on the other solid.
//! 3. Classify each fragment's centroid (see [`classify`]).
//! 4. Keep fragments per operation and reassemble.
//!
//! | Operation | Keep from `a`              | Keep from `b`      |
//! |-----------|----------------------------|--------------------|
//! | union     | outside, coplanar same     | outside            |
//! | intersect | inside, coplanar same      | inside             |
//! | subtract  | outside, coplanar opposite | inside, flipped    |

use tracing::debug;

use super::bsp::{from_polygons, to_polygons, BspNode, CsgPolygon};
use super::{trivial_result, BooleanOp, CsgEngine};
use crate::error::SolidResult;
use crate::mesh::Mesh;

pub mod classify;

use classify::{classify_fragments, triangles, Location};

/// Split-and-classify boolean engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct RaycastEngine;

impl RaycastEngine {
    /// Creates the engine.
    pub fn new() -> Self {
        Self
    }

    fn run(&self, op: BooleanOp, a: &Mesh, b: &Mesh) -> SolidResult<Mesh> {
        if let Some(mesh) = trivial_result(op, a, b) {
            return Ok(mesh);
        }
        let polys_a = to_polygons(a);
        let polys_b = to_polygons(b);
        let frags_a = BspNode::new(polys_b.clone()).partition(polys_a.clone());
        let frags_b = BspNode::new(polys_a).partition(polys_b);

        let loc_a = classify_fragments(&frags_a, &triangles(b));
        let loc_b = classify_fragments(&frags_b, &triangles(a));

        let keep_a = |loc: Location| match op {
            BooleanOp::Union => matches!(loc, Location::Outside | Location::CoplanarSame),
            BooleanOp::Intersect => matches!(loc, Location::Inside | Location::CoplanarSame),
            BooleanOp::Subtract => matches!(loc, Location::Outside | Location::CoplanarOpposite),
        };
        let keep_b = |loc: Location| match op {
            BooleanOp::Union => loc == Location::Outside,
            BooleanOp::Intersect | BooleanOp::Subtract => loc == Location::Inside,
        };

        let mut kept: Vec<CsgPolygon> = frags_a
            .into_iter()
            .zip(loc_a)
            .filter(|(_, loc)| keep_a(*loc))
            .map(|(poly, _)| poly)
            .collect();
        let from_a = kept.len();
        kept.extend(
            frags_b
                .into_iter()
                .zip(loc_b)
                .filter(|(_, loc)| keep_b(*loc))
                .map(|(mut poly, _)| {
                    if op == BooleanOp::Subtract {
                        poly.flip();
                    }
                    poly
                }),
        );
        debug!(
            %op,
            from_a,
            from_b = kept.len() - from_a,
            "Raycast fragments kept"
        );

        Ok(from_polygons(kept))
    }
}

impl CsgEngine for RaycastEngine {
    fn name(&self) -> &'static str {
        "raycast"
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
