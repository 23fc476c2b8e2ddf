//! Point classification against a closed triangle mesh.
//!
//! Points on a coplanar triangle are reported by facing; every other point
//! is resolved by ray parity, taking the majority over three skewed
//! directions so a ray grazing an edge cannot flip the answer alone.

use config::constants::{approx_equal, EPSILON};
use glam::DVec3;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::csg::bsp::CsgPolygon;
use crate::mesh::Mesh;

const RAY_DIRECTIONS: [DVec3; 3] = [
    DVec3::new(1.0, 0.3713, 0.1579),
    DVec3::new(-0.2841, 1.0, 0.4433),
    DVec3::new(0.1117, -0.3391, 1.0),
];

const PARALLEL_EPSILON: f64 = 1e-14;
const MIN_HIT_DISTANCE: f64 = 1e-12;
const COPLANAR_COS: f64 = 1.0 - 1e-6;

/// Where a fragment lies relative to the other operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// Strictly inside the solid.
    Inside,
    /// Strictly outside the solid.
    Outside,
    /// On the boundary, facing the same way as the boundary.
    CoplanarSame,
    /// On the boundary, facing the opposite way.
    CoplanarOpposite,
}

/// A triangle of the classifying mesh with its unit plane.
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    a: DVec3,
    b: DVec3,
    c: DVec3,
    normal: DVec3,
    w: f64,
}

impl Triangle {
    /// Returns `None` for zero-area triangles.
    pub fn new(a: DVec3, b: DVec3, c: DVec3) -> Option<Self> {
        let normal = (b - a).cross(c - a).try_normalize()?;
        Some(Self {
            a,
            b,
            c,
            normal,
            w: normal.dot(a),
        })
    }

    /// Möller–Trumbore intersection, counting only hits in front of `origin`.
    fn hit_by(&self, origin: DVec3, dir: DVec3) -> bool {
        let e1 = self.b - self.a;
        let e2 = self.c - self.a;
        let h = dir.cross(e2);
        let det = e1.dot(h);
        if det.abs() < PARALLEL_EPSILON {
            return false;
        }
        let f = 1.0 / det;
        let s = origin - self.a;
        let u = f * s.dot(h);
        if !(0.0..=1.0).contains(&u) {
            return false;
        }
        let q = s.cross(e1);
        let v = f * dir.dot(q);
        if v < 0.0 || u + v > 1.0 {
            return false;
        }
        f * e2.dot(q) > MIN_HIT_DISTANCE
    }

    /// Whether `p`, assumed on the triangle's plane, lies within it.
    fn contains(&self, p: DVec3) -> bool {
        let edges = [(self.a, self.b), (self.b, self.c), (self.c, self.a)];
        edges.iter().all(|&(s, e)| {
            let side = (e - s).cross(p - s).dot(self.normal);
            side >= -EPSILON * (e - s).length()
        })
    }
}

/// Triangles of a mesh, skipping degenerate ones.
pub fn triangles(mesh: &Mesh) -> Vec<Triangle> {
    let mesh = mesh.triangulated();
    (0..mesh.face_count())
        .filter_map(|i| {
            let p = mesh.face_points(i);
            Triangle::new(p[0], p[1], p[2])
        })
        .collect()
}

/// Classifies a point with the given facing against a closed mesh.
pub fn classify_point(point: DVec3, normal: DVec3, solid: &[Triangle]) -> Location {
    for tri in solid {
        let cos = tri.normal.dot(normal);
        if cos.abs() > COPLANAR_COS
            && approx_equal(tri.normal.dot(point), tri.w)
            && tri.contains(point)
        {
            return if cos > 0.0 {
                Location::CoplanarSame
            } else {
                Location::CoplanarOpposite
            };
        }
    }

    let votes = RAY_DIRECTIONS
        .iter()
        .filter(|&&dir| solid.iter().filter(|t| t.hit_by(point, dir)).count() % 2 == 1)
        .count();
    if votes >= 2 {
        Location::Inside
    } else {
        Location::Outside
    }
}

/// Classifies fragments by their centroids.
pub fn classify_fragments(fragments: &[CsgPolygon], solid: &[Triangle]) -> Vec<Location> {
    let classify = |poly: &CsgPolygon| {
        classify_point(poly.centroid(), poly.plane().normal(), solid)
    };

    #[cfg(feature = "parallel")]
    {
        fragments.par_iter().map(classify).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        fragments.iter().map(classify).collect()
    }
}
