//! Turns boolean output fragments back into an indexed mesh.
//!
//! Fragments from the engines share edges only geometrically. This pass
//! welds them, removes slivers, splits edges at T-junctions so adjacent
//! fragments share vertices, and triangulates. Triangles that cancel out
//! after welding are removed last.
//!
//! Every distance test uses [`ASSEMBLY_EPSILON`]. Cut points that belong to
//! one edge are computed per fragment and drift a few `EPSILON` apart.

use std::collections::{HashMap, HashSet};

use config::constants::{AREA_EPSILON, ASSEMBLY_EPSILON};
use glam::DVec3;
use tracing::debug;

use crate::geometry::{newell_normal, triangulate::triangulate_loop};
use crate::mesh::{clean_loop, Face, Mesh, VertexWelder};

/// Assembles polygon fragments into a triangulated indexed mesh.
pub(crate) fn assemble(polygons: Vec<Vec<DVec3>>) -> Mesh {
    let fragments = polygons.len();
    let mut welder = VertexWelder::new(ASSEMBLY_EPSILON);
    let loops: Vec<Vec<usize>> = polygons
        .into_iter()
        .filter_map(|poly| clean_loop(poly.into_iter().map(|p| welder.insert(p)).collect()))
        .collect();
    let vertices = welder.into_vertices();

    let before = loops.len();
    let loops: Vec<Vec<usize>> = loops
        .into_iter()
        .filter(|l| !is_sliver(&vertices, l))
        .collect();
    let slivers = before - loops.len();

    let index = XIndex::new(&vertices);
    let mut inserted = 0;
    let loops: Vec<Vec<usize>> = loops
        .into_iter()
        .map(|l| {
            let split = split_t_junctions(&vertices, &index, &l);
            inserted += split.len() - l.len();
            split
        })
        .collect();

    let mut triangles = Vec::with_capacity(loops.len() * 2);
    for l in &loops {
        for [a, b, c] in triangulate(&vertices, l) {
            triangles.push([l[a], l[b], l[c]]);
        }
    }
    let before = triangles.len();
    let triangles = cancel_duplicates(triangles);
    let cancelled = before - triangles.len();

    let faces = triangles.into_iter().map(|t| Face::new(t.to_vec())).collect();
    let mesh = compact(vertices, faces);
    debug!(
        fragments,
        slivers,
        t_junctions = inserted,
        cancelled,
        triangles = mesh.face_count(),
        "Assembled boolean result"
    );
    mesh
}

/// A loop whose vertices all lie within tolerance of a point or a line.
fn is_sliver(vertices: &[DVec3], indices: &[usize]) -> bool {
    let points: Vec<DVec3> = indices.iter().map(|&i| vertices[i]).collect();
    let mut far = (points[0], points[0], 0.0);
    for (i, &p) in points.iter().enumerate() {
        for &q in &points[i + 1..] {
            let d = p.distance_squared(q);
            if d > far.2 {
                far = (p, q, d);
            }
        }
    }
    let (a, b, d2) = far;
    if d2 < ASSEMBLY_EPSILON * ASSEMBLY_EPSILON {
        return true;
    }
    let dir = (b - a) / d2.sqrt();
    points.iter().all(|&p| {
        let v = p - a;
        (v - dir * v.dot(dir)).length() < ASSEMBLY_EPSILON
    })
}

/// Vertex indices sorted by x for range queries.
struct XIndex {
    order: Vec<usize>,
    xs: Vec<f64>,
}

impl XIndex {
    fn new(vertices: &[DVec3]) -> Self {
        let mut order: Vec<usize> = (0..vertices.len()).collect();
        order.sort_by(|&a, &b| vertices[a].x.total_cmp(&vertices[b].x));
        let xs = order.iter().map(|&i| vertices[i].x).collect();
        Self { order, xs }
    }

    fn in_range(&self, lo: f64, hi: f64) -> &[usize] {
        let start = self.xs.partition_point(|&x| x < lo);
        let end = self.xs.partition_point(|&x| x <= hi);
        &self.order[start..end.max(start)]
    }
}

/// Inserts vertices that lie in the interior of the loop's edges.
fn split_t_junctions(vertices: &[DVec3], index: &XIndex, indices: &[usize]) -> Vec<usize> {
    let n = indices.len();
    let mut out = Vec::with_capacity(n);
    for k in 0..n {
        let (ia, ib) = (indices[k], indices[(k + 1) % n]);
        let (a, b) = (vertices[ia], vertices[ib]);
        out.push(ia);

        let edge = b - a;
        let len2 = edge.length_squared();
        if len2 < ASSEMBLY_EPSILON * ASSEMBLY_EPSILON {
            continue;
        }
        let (lo, hi) = (a.x.min(b.x), a.x.max(b.x));
        let mut hits: Vec<(f64, usize)> = index
            .in_range(lo - ASSEMBLY_EPSILON, hi + ASSEMBLY_EPSILON)
            .iter()
            .filter(|&&i| !indices.contains(&i))
            .filter_map(|&i| {
                let p = vertices[i];
                let t = (p - a).dot(edge) / len2;
                let on_edge = (0.0..=1.0).contains(&t)
                    && (a + edge * t).distance(p) < ASSEMBLY_EPSILON
                    && p.distance(a) > ASSEMBLY_EPSILON
                    && p.distance(b) > ASSEMBLY_EPSILON;
                on_edge.then_some((t, i))
            })
            .collect();
        hits.sort_by(|x, y| x.0.total_cmp(&y.0));
        out.extend(hits.into_iter().map(|(_, i)| i));
    }
    out
}

/// Fans from the first apex giving only well-shaped triangles, falling back
/// to ear clipping.
fn triangulate(vertices: &[DVec3], indices: &[usize]) -> Vec<[usize; 3]> {
    let n = indices.len();
    if n == 3 {
        return vec![[0, 1, 2]];
    }
    let points: Vec<DVec3> = indices.iter().map(|&i| vertices[i]).collect();
    let normal = newell_normal(&points);

    for apex in 0..n {
        let fan: Vec<[usize; 3]> = (1..n - 1)
            .map(|i| [apex, (apex + i) % n, (apex + i + 1) % n])
            .collect();
        let well_shaped = fan.iter().all(|&[a, b, c]| {
            let cross = (points[b] - points[a]).cross(points[c] - points[a]);
            cross.length() * 0.5 > AREA_EPSILON && cross.dot(normal) > 0.0
        });
        if well_shaped {
            return fan;
        }
    }
    triangulate_loop(&points)
}

/// Removes triangles that welding turned into duplicates.
///
/// A triangle met together with its reverse encloses nothing and both are
/// dropped. Repeated copies with one orientation are kept once. Triangles
/// with a repeated corner are dropped.
fn cancel_duplicates(triangles: Vec<[usize; 3]>) -> Vec<[usize; 3]> {
    fn key([a, b, c]: [usize; 3]) -> [usize; 3] {
        if a < b && a < c {
            [a, b, c]
        } else if b < c {
            [b, c, a]
        } else {
            [c, a, b]
        }
    }

    let triangles: Vec<[usize; 3]> = triangles
        .into_iter()
        .filter(|&[a, b, c]| a != b && b != c && c != a)
        .collect();
    let mut counts: HashMap<[usize; 3], usize> = HashMap::new();
    for &t in &triangles {
        *counts.entry(key(t)).or_default() += 1;
    }

    let mut emitted: HashSet<[usize; 3]> = HashSet::new();
    triangles
        .into_iter()
        .filter(|&[a, b, c]| {
            let k = key([a, b, c]);
            let same = counts.get(&k).copied().unwrap_or(0);
            let reversed = counts.get(&key([a, c, b])).copied().unwrap_or(0);
            same > reversed && emitted.insert(k)
        })
        .collect()
}

/// Drops unreferenced vertices and renumbers faces.
fn compact(vertices: Vec<DVec3>, faces: Vec<Face>) -> Mesh {
    let mut remap = vec![usize::MAX; vertices.len()];
    let mut kept = Vec::new();
    let faces = faces
        .into_iter()
        .map(|face| {
            let indices = face
                .indices()
                .iter()
                .map(|&i| {
                    if remap[i] == usize::MAX {
                        remap[i] = kept.len();
                        kept.push(vertices[i]);
                    }
                    remap[i]
                })
                .collect();
            Face::new(indices)
        })
        .collect();
    Mesh::from_parts(kept, faces)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad(a: [f64; 3], b: [f64; 3], c: [f64; 3], d: [f64; 3]) -> Vec<DVec3> {
        [a, b, c, d].into_iter().map(DVec3::from).collect()
    }

    #[test]
    fn test_sliver_detection() {
        let verts = vec![
            DVec3::ZERO,
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(0.5, 1e-7, 0.0),
            DVec3::new(0.5, 1.0, 0.0),
        ];
        assert!(is_sliver(&verts, &[0, 1, 2]));
        assert!(!is_sliver(&verts, &[0, 1, 3]));
    }

    #[test]
    fn test_t_junction_is_split() {
        // A unit square next to two half squares stacked along its right edge.
        let polys = vec![
            quad([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]),
            quad([1.0, 0.0, 0.0], [2.0, 0.0, 0.0], [2.0, 0.5, 0.0], [1.0, 0.5, 0.0]),
            quad([1.0, 0.5, 0.0], [2.0, 0.5, 0.0], [2.0, 1.0, 0.0], [1.0, 1.0, 0.0]),
        ];
        let mesh = assemble(polys);
        assert!(mesh.is_triangulated());
        assert_eq!(mesh.vertex_count(), 8);
        let boundary = crate::mesh::boundary_edges(&mesh);
        // Only the outer rim of the 2x1 rectangle stays open.
        assert_eq!(boundary.len(), 7);
    }

    #[test]
    fn test_drifted_cut_points_are_welded() {
        // The right square's cut edge sits 2.13e-5 from the left one, the
        // drift seen between independently split fragments.
        let d = 2.13e-5;
        let polys = vec![
            quad([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]),
            quad([1.0 + d, 0.0, 0.0], [2.0, 0.0, 0.0], [2.0, 1.0, 0.0], [1.0 + d, 1.0, 0.0]),
        ];
        let mesh = assemble(polys);
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(crate::mesh::boundary_edges(&mesh).len(), 6);
    }

    #[test]
    fn test_drifted_vertex_splits_edge() {
        // The right half squares meet 3e-5 off the unit square's right edge;
        // their shared corner must still split that edge.
        let polys = vec![
            quad([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]),
            quad([1.0, 0.0, 0.0], [2.0, 0.0, 0.0], [2.0, 0.5, 0.0], [1.00003, 0.5, 0.0]),
            quad([1.00003, 0.5, 0.0], [2.0, 0.5, 0.0], [2.0, 1.0, 0.0], [1.0, 1.0, 0.0]),
        ];
        let mesh = assemble(polys);
        assert_eq!(crate::mesh::boundary_edges(&mesh).len(), 7);
    }

    #[test]
    fn test_cancel_duplicates() {
        let tris = vec![[0, 1, 2], [1, 2, 0], [3, 4, 5], [3, 5, 4], [6, 7, 8], [6, 6, 7]];
        assert_eq!(cancel_duplicates(tris), vec![[0, 1, 2], [6, 7, 8]]);
    }

    #[test]
    fn test_fan_avoids_collinear_apex() {
        let verts = vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(2.0, 0.0, 0.0),
            DVec3::new(3.0, 0.0, 0.0),
            DVec3::new(3.0, 1.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
        ];
        let tris = triangulate(&verts, &[0, 1, 2, 3, 4, 5]);
        assert_eq!(tris.len(), 4);
        for [a, b, c] in tris {
            let area = (verts[b] - verts[a]).cross(verts[c] - verts[a]).z;
            assert!(area > 0.0);
        }
    }

    #[test]
    fn test_compact_drops_unused() {
        let verts = vec![DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Z];
        let mesh = compact(verts, vec![Face::new(vec![3, 1, 2])]);
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.faces()[0].indices(), &[0, 1, 2]);
    }
}
