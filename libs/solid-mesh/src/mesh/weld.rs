//! Tolerance-based vertex welding on a uniform grid.

use std::collections::HashMap;

use glam::DVec3;

type Cell = (i64, i64, i64);

/// Deduplicates positions closer than a tolerance.
///
/// Cells are as wide as the tolerance, so any match lies in one of the 27
/// cells around the query point.
pub(crate) struct VertexWelder {
    epsilon: f64,
    cells: HashMap<Cell, Vec<usize>>,
    vertices: Vec<DVec3>,
}

impl VertexWelder {
    pub(crate) fn new(epsilon: f64) -> Self {
        Self {
            epsilon,
            cells: HashMap::new(),
            vertices: Vec::new(),
        }
    }

    fn cell(&self, p: DVec3) -> Cell {
        let c = (p / self.epsilon).floor();
        (c.x as i64, c.y as i64, c.z as i64)
    }

    /// Returns the index of the nearest welded vertex within tolerance,
    /// inserting `p` if there is none.
    pub(crate) fn insert(&mut self, p: DVec3) -> usize {
        let (cx, cy, cz) = self.cell(p);
        let mut best: Option<(usize, f64)> = None;
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(bucket) = self.cells.get(&(cx + dx, cy + dy, cz + dz)) else {
                        continue;
                    };
                    for &i in bucket {
                        let d = self.vertices[i].distance_squared(p);
                        if d <= self.epsilon * self.epsilon && best.map_or(true, |(_, bd)| d < bd) {
                            best = Some((i, d));
                        }
                    }
                }
            }
        }
        if let Some((i, _)) = best {
            return i;
        }
        let index = self.vertices.len();
        self.vertices.push(p);
        self.cells.entry((cx, cy, cz)).or_default().push(index);
        index
    }

    pub(crate) fn into_vertices(self) -> Vec<DVec3> {
        self.vertices
    }
}

/// Removes cyclic consecutive duplicates from an index loop.
///
/// Returns `None` when fewer than three distinct indices remain.
pub(crate) fn clean_loop(indices: Vec<usize>) -> Option<Vec<usize>> {
    let mut out: Vec<usize> = Vec::with_capacity(indices.len());
    for i in indices {
        if out.last() != Some(&i) {
            out.push(i);
        }
    }
    while out.len() > 1 && out.first() == out.last() {
        out.pop();
    }
    let mut distinct = out.clone();
    distinct.sort_unstable();
    distinct.dedup();
    (distinct.len() >= 3).then_some(out)
}
