//! # Polygon for BSP Operations
//!
//! Convex polygon carrying its plane, with splitting support.

use config::constants::AREA_EPSILON;
use glam::DVec3;

use super::plane::{Classification, Plane};
use crate::geometry::{centroid, loop_area};

/// Convex polygon used by the BSP backends.
#[derive(Debug, Clone, PartialEq)]
pub struct CsgPolygon {
    vertices: Vec<DVec3>,
    plane: Plane,
}

/// Output buckets for [`CsgPolygon::split`].
#[derive(Debug, Default)]
pub struct SplitBuckets {
    /// Coplanar polygons facing the plane's direction.
    pub coplanar_front: Vec<CsgPolygon>,
    /// Coplanar polygons facing away.
    pub coplanar_back: Vec<CsgPolygon>,
    /// Polygons or fragments in front.
    pub front: Vec<CsgPolygon>,
    /// Polygons or fragments behind.
    pub back: Vec<CsgPolygon>,
}

impl CsgPolygon {
    /// Creates a polygon from a convex loop.
    ///
    /// Returns `None` for fewer than three vertices or a loop without area.
    pub fn from_vertices(vertices: Vec<DVec3>) -> Option<Self> {
        if vertices.len() < 3 {
            return None;
        }
        let plane = Plane::from_loop(&vertices)?;
        Some(Self { vertices, plane })
    }

    /// Vertices in winding order.
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Supporting plane.
    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// Consumes the polygon, returning its vertices.
    pub fn into_vertices(self) -> Vec<DVec3> {
        self.vertices
    }

    /// Area of the polygon.
    pub fn area(&self) -> f64 {
        loop_area(&self.vertices)
    }

    /// Vertex average; interior for convex polygons.
    pub fn centroid(&self) -> DVec3 {
        centroid(&self.vertices)
    }

    /// Reverses winding and plane in place.
    pub fn flip(&mut self) {
        self.vertices.reverse();
        self.plane.flip();
    }

    /// Classifies the polygon against a plane.
    pub fn classify(&self, plane: &Plane) -> Classification {
        let mut front = false;
        let mut back = false;
        for v in &self.vertices {
            match plane.classify_point(*v) {
                Classification::Front => front = true,
                Classification::Back => back = true,
                _ => {}
            }
        }
        match (front, back) {
            (true, true) => Classification::Spanning,
            (true, false) => Classification::Front,
            (false, true) => Classification::Back,
            (false, false) => Classification::Coplanar,
        }
    }

    /// Splits the polygon by `plane` into the matching buckets.
    ///
    /// Spanning polygons are cut along the plane; fragments with area below
    /// `AREA_EPSILON` are discarded.
    pub fn split(self, plane: &Plane, out: &mut SplitBuckets) {
        match self.classify(plane) {
            Classification::Coplanar => {
                if plane.normal().dot(self.plane.normal()) > 0.0 {
                    out.coplanar_front.push(self);
                } else {
                    out.coplanar_back.push(self);
                }
            }
            Classification::Front => out.front.push(self),
            Classification::Back => out.back.push(self),
            Classification::Spanning => {
                let n = self.vertices.len();
                let mut front_verts = Vec::with_capacity(n + 1);
                let mut back_verts = Vec::with_capacity(n + 1);
                for i in 0..n {
                    let vi = self.vertices[i];
                    let vj = self.vertices[(i + 1) % n];
                    let ti = plane.classify_point(vi);
                    let tj = plane.classify_point(vj);
                    if ti != Classification::Back {
                        front_verts.push(vi);
                    }
                    if ti != Classification::Front {
                        back_verts.push(vi);
                    }
                    let crosses = matches!(
                        (ti, tj),
                        (Classification::Front, Classification::Back)
                            | (Classification::Back, Classification::Front)
                    );
                    if crosses {
                        let di = plane.signed_distance(vi);
                        let dj = plane.signed_distance(vj);
                        let hit = vi.lerp(vj, di / (di - dj));
                        front_verts.push(hit);
                        back_verts.push(hit);
                    }
                }
                let pieces = [(front_verts, &mut out.front), (back_verts, &mut out.back)];
                for (verts, bucket) in pieces {
                    if verts.len() >= 3 && loop_area(&verts) >= AREA_EPSILON {
                        bucket.push(Self {
                            vertices: verts,
                            plane: self.plane,
                        });
                    }
                }
            }
        }
    }
}
