//! # Triangulation
//!
//! Ear clipping for simple polygons.
//!
//! Ears are searched in ascending vertex order and the first valid one is
//! clipped, so ties always resolve to the lowest index and the output is
//! deterministic. Triangles keep the winding of the input loop. Loops with
//! collinear runs may produce zero-area triangles; they are kept so the
//! loop's boundary edges all survive.

use glam::{DVec2, DVec3};
use robust::{orient2d, Coord};

use super::{newell_normal, perpendicular};

/// Triangulates a 2D loop, returning index triples into `points`.
///
/// # Example
///
/// ```rust
/// use glam::DVec2;
/// use solid_mesh::geometry::triangulate::ear_clip;
///
/// let square = [
///     DVec2::new(0.0, 0.0),
///     DVec2::new(1.0, 0.0),
///     DVec2::new(1.0, 1.0),
///     DVec2::new(0.0, 1.0),
/// ];
/// assert_eq!(ear_clip(&square), vec![[3, 0, 1], [1, 2, 3]]);
/// ```
pub fn ear_clip(points: &[DVec2]) -> Vec<[usize; 3]> {
    let n = points.len();
    if n < 3 {
        return Vec::new();
    }
    if n == 3 {
        return vec![[0, 1, 2]];
    }

    let sign = if signed_area(points) < 0.0 { -1.0 } else { 1.0 };
    let mut remaining: Vec<usize> = (0..n).collect();
    let mut triangles = Vec::with_capacity(n - 2);

    while remaining.len() > 3 {
        let pos = find_ear(points, &remaining, sign, true)
            .or_else(|| find_ear(points, &remaining, sign, false))
            .unwrap_or(0);
        let m = remaining.len();
        let prev = remaining[(pos + m - 1) % m];
        let next = remaining[(pos + 1) % m];
        triangles.push([prev, remaining[pos], next]);
        remaining.remove(pos);
    }
    triangles.push([remaining[0], remaining[1], remaining[2]]);
    triangles
}

/// Triangulates a planar (or nearly planar) loop in space.
///
/// The loop is projected onto the plane of its Newell normal.
pub fn triangulate_loop(points: &[DVec3]) -> Vec<[usize; 3]> {
    if points.len() == 3 {
        return vec![[0, 1, 2]];
    }
    let normal = newell_normal(points);
    if normal.length_squared() == 0.0 {
        return fan(points.len());
    }
    let w = normal.normalize();
    let u = perpendicular(w);
    let v = w.cross(u);
    let projected: Vec<DVec2> = points
        .iter()
        .map(|p| DVec2::new(p.dot(u), p.dot(v)))
        .collect();
    ear_clip(&projected)
}

/// Fan from the first vertex.
pub fn fan(n: usize) -> Vec<[usize; 3]> {
    (1..n.saturating_sub(1)).map(|i| [0, i, i + 1]).collect()
}

fn find_ear(points: &[DVec2], remaining: &[usize], sign: f64, strict: bool) -> Option<usize> {
    let m = remaining.len();
    (0..m).find(|&pos| {
        let a = remaining[(pos + m - 1) % m];
        let b = remaining[pos];
        let c = remaining[(pos + 1) % m];
        let turn = orient(points[a], points[b], points[c]) * sign;
        let convex = if strict { turn > 0.0 } else { turn >= 0.0 };
        convex
            && remaining
                .iter()
                .filter(|&&i| i != a && i != b && i != c)
                .all(|&i| !inside_triangle(points, [a, b, c], points[i], sign))
    })
}

fn inside_triangle(points: &[DVec2], [a, b, c]: [usize; 3], p: DVec2, sign: f64) -> bool {
    let (pa, pb, pc) = (points[a], points[b], points[c]);
    if p == pa || p == pb || p == pc {
        return false;
    }
    orient(pa, pb, p) * sign >= 0.0
        && orient(pb, pc, p) * sign >= 0.0
        && orient(pc, pa, p) * sign >= 0.0
}

fn orient(a: DVec2, b: DVec2, c: DVec2) -> f64 {
    orient2d(
        Coord { x: a.x, y: a.y },
        Coord { x: b.x, y: b.y },
        Coord { x: c.x, y: c.y },
    )
}

fn signed_area(points: &[DVec2]) -> f64 {
    let n = points.len();
    (0..n).map(|i| points[i].perp_dot(points[(i + 1) % n])).sum::<f64>() * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area(points: &[DVec2], tri: [usize; 3]) -> f64 {
        (points[tri[1]] - points[tri[0]]).perp_dot(points[tri[2]] - points[tri[0]]) * 0.5
    }

    #[test]
    fn test_triangle_passthrough() {
        let tri = [DVec2::ZERO, DVec2::X, DVec2::Y];
        assert_eq!(ear_clip(&tri), vec![[0, 1, 2]]);
    }

    #[test]
    fn test_concave_polygon_covers_area() {
        // L-shape, area 3
        let l = [
            DVec2::new(0.0, 0.0),
            DVec2::new(2.0, 0.0),
            DVec2::new(2.0, 1.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(1.0, 2.0),
            DVec2::new(0.0, 2.0),
        ];
        let tris = ear_clip(&l);
        assert_eq!(tris.len(), 4);
        let total: f64 = tris.iter().map(|t| area(&l, *t)).sum();
        assert!((total - 3.0).abs() < 1e-12);
        assert!(tris.iter().all(|t| area(&l, *t) > 0.0));
    }

    #[test]
    fn test_clockwise_loop_keeps_winding() {
        let square = [
            DVec2::new(0.0, 0.0),
            DVec2::new(0.0, 1.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(1.0, 0.0),
        ];
        let tris = ear_clip(&square);
        assert_eq!(tris.len(), 2);
        assert!(tris.iter().all(|t| area(&square, *t) < 0.0));
    }

    #[test]
    fn test_collinear_points_keep_every_edge() {
        let pts = [
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(2.0, 0.0),
            DVec2::new(2.0, 2.0),
            DVec2::new(0.0, 2.0),
        ];
        let tris = ear_clip(&pts);
        assert_eq!(tris.len(), 3);
        let total: f64 = tris.iter().map(|t| area(&pts, *t)).sum();
        assert!((total - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_triangulate_loop_in_space() {
        let quad = [
            DVec3::new(0.0, 0.0, 1.0),
            DVec3::new(0.0, 1.0, 1.0),
            DVec3::new(0.0, 1.0, 2.0),
            DVec3::new(0.0, 0.0, 2.0),
        ];
        let tris = triangulate_loop(&quad);
        assert_eq!(tris, vec![[3, 0, 1], [1, 2, 3]]);
    }

    #[test]
    fn test_fan() {
        assert_eq!(fan(5), vec![[0, 1, 2], [0, 2, 3], [0, 3, 4]]);
        assert!(fan(2).is_empty());
    }
}
