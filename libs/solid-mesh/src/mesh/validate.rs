//! # Mesh Validation
//!
//! Watertightness checks by edge-use counting.
//!
//! Each undirected edge records how many faces traverse it in each
//! direction. A closed, consistently oriented surface uses every edge once
//! each way. Edges are inspected in sorted order so the reported error is
//! deterministic.

use std::collections::HashMap;

use tracing::debug;

use super::Mesh;
use crate::error::ValidationError;

/// Per-edge traversal counts.
///
/// `forward` counts traversals from the lower to the higher vertex index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeUse {
    /// Traversals from the lower index to the higher one.
    pub forward: usize,
    /// Traversals from the higher index to the lower one.
    pub backward: usize,
}

impl EdgeUse {
    /// Total number of faces using the edge.
    pub fn total(&self) -> usize {
        self.forward + self.backward
    }
}

/// Counts edge uses of every face loop, keyed by `(min, max)` vertex index.
pub fn edge_uses(mesh: &Mesh) -> HashMap<(usize, usize), EdgeUse> {
    let mut edges: HashMap<(usize, usize), EdgeUse> = HashMap::new();
    for face in mesh.faces() {
        let idx = face.indices();
        for k in 0..idx.len() {
            let (a, b) = (idx[k], idx[(k + 1) % idx.len()]);
            let entry = edges.entry((a.min(b), a.max(b))).or_default();
            if a < b {
                entry.forward += 1;
            } else {
                entry.backward += 1;
            }
        }
    }
    edges
}

/// Edges used by exactly one face, sorted.
pub fn boundary_edges(mesh: &Mesh) -> Vec<(usize, usize)> {
    let mut out: Vec<(usize, usize)> = edge_uses(mesh)
        .into_iter()
        .filter(|(_, u)| u.total() == 1)
        .map(|(e, _)| e)
        .collect();
    out.sort_unstable();
    out
}

pub(super) fn validate(mesh: &Mesh, tolerance: f64) -> Result<(), ValidationError> {
    mesh.check_indices()?;
    for (face, f) in mesh.faces().iter().enumerate() {
        let idx = f.indices();
        let mut distinct = idx.to_vec();
        distinct.sort_unstable();
        distinct.dedup();
        let repeats = (0..idx.len()).any(|k| idx[k] == idx[(k + 1) % idx.len()]);
        if distinct.len() < 3 || repeats {
            return Err(ValidationError::DegenerateFace { face });
        }
    }

    let uses = edge_uses(mesh);
    let mut keys: Vec<&(usize, usize)> = uses.keys().collect();
    keys.sort_unstable();
    for &(a, b) in keys {
        let u = uses[&(a, b)];
        let err = match u.total() {
            1 => Some(ValidationError::BoundaryEdge { a, b }),
            2 if u.forward != 1 => Some(ValidationError::InconsistentOrientation { a, b }),
            2 => None,
            n => Some(ValidationError::NonManifoldEdge { a, b, count: n }),
        };
        if let Some(err) = err {
            debug!(%err, faces = mesh.face_count(), "mesh failed validation");
            return Err(err);
        }
    }

    let volume = mesh.volume();
    if volume < -tolerance {
        debug!(volume, "mesh is inside-out");
        return Err(ValidationError::InvertedVolume { volume });
    }
    Ok(())
}
