//! Boolean composition of solids.
//!
//! The named functions take an explicit context. Operators on `&Solid` use
//! [`CsgContext::global`] and return `SolidResult<Solid>`:
//!
//! | Operator | Operation  |
//! |----------|------------|
//! | `&a + &b`  | union      |
//! | `&a - &b`  | subtract   |
//! | `&a * &b`  | intersect  |

use std::ops::{Add, Mul, Sub};

use super::Solid;
use crate::csg::{BooleanOp, CsgContext};
use crate::error::SolidResult;

/// Combines two solids. The result keeps `a`'s name and metadata.
pub fn combine(ctx: &CsgContext, op: BooleanOp, a: &Solid, b: &Solid) -> SolidResult<Solid> {
    let mesh = ctx.apply(op, a.mesh(), b.mesh())?;
    Ok(a.with_mesh(mesh))
}

/// `a ∪ b`
pub fn combine_union(ctx: &CsgContext, a: &Solid, b: &Solid) -> SolidResult<Solid> {
    combine(ctx, BooleanOp::Union, a, b)
}

/// `a \ b`
pub fn combine_subtract(ctx: &CsgContext, a: &Solid, b: &Solid) -> SolidResult<Solid> {
    combine(ctx, BooleanOp::Subtract, a, b)
}

/// `a ∩ b`
pub fn combine_intersect(ctx: &CsgContext, a: &Solid, b: &Solid) -> SolidResult<Solid> {
    combine(ctx, BooleanOp::Intersect, a, b)
}

fn combine_global(op: BooleanOp, a: &Solid, b: &Solid) -> SolidResult<Solid> {
    combine(CsgContext::global()?, op, a, b)
}

impl Add for &Solid {
    type Output = SolidResult<Solid>;

    fn add(self, rhs: Self) -> Self::Output {
        combine_global(BooleanOp::Union, self, rhs)
    }
}

impl Sub for &Solid {
    type Output = SolidResult<Solid>;

    fn sub(self, rhs: Self) -> Self::Output {
        combine_global(BooleanOp::Subtract, self, rhs)
    }
}

impl Mul for &Solid {
    type Output = SolidResult<Solid>;

    fn mul(self, rhs: Self) -> Self::Output {
        combine_global(BooleanOp::Intersect, self, rhs)
    }
}
