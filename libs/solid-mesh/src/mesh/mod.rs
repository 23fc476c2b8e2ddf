//! # Mesh Data Structure
//!
//! Indexed polygon mesh: a shared vertex table plus faces that are ordered
//! loops of vertex indices. Faces wind counter-clockwise when seen from
//! outside. Topology is explicit, so watertightness can be checked by
//! counting edge uses (see [`Mesh::validate`]).

use config::constants::{EPSILON, VERTEX_WELD_EPSILON};
use glam::{DMat4, DVec3};

use crate::error::ValidationError;
use crate::geometry::{newell_normal, triangulate::triangulate_loop};

pub mod validate;
pub(crate) mod weld;

#[cfg(test)]
mod tests;

pub use validate::{boundary_edges, EdgeUse};
pub(crate) use weld::{clean_loop, VertexWelder};

// =============================================================================
// FACE
// =============================================================================

/// A face of a [`Mesh`]: a loop of vertex indices, optionally tagged with
/// its outward normal.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    indices: Vec<usize>,
    normal: Option<DVec3>,
}

impl Face {
    /// Creates an untagged face.
    pub fn new(indices: Vec<usize>) -> Self {
        Self {
            indices,
            normal: None,
        }
    }

    /// Creates a face tagged with an outward normal.
    pub fn with_normal(indices: Vec<usize>, normal: DVec3) -> Self {
        Self {
            indices,
            normal: Some(normal),
        }
    }

    /// Vertex indices in loop order.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Tagged normal, if any.
    pub fn normal(&self) -> Option<DVec3> {
        self.normal
    }

    /// Number of vertices in the loop.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether the loop has no vertices.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The same face with opposite winding.
    pub fn reversed(&self) -> Self {
        let mut indices = self.indices.clone();
        indices.reverse();
        Self {
            indices,
            normal: self.normal.map(|n| -n),
        }
    }
}

// =============================================================================
// MESH
// =============================================================================

/// An indexed polygon mesh.
///
/// Faces added through [`Mesh::from_parts`] or [`Mesh::add_face`] are not
/// checked, and the measurement methods panic on a face index past the
/// vertex table. [`Mesh::check_indices`] rules that out; boolean
/// composition runs it on every operand.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use solid_mesh::Mesh;
///
/// let mut mesh = Mesh::new();
/// let a = mesh.add_vertex(DVec3::new(0.0, 0.0, 0.0));
/// let b = mesh.add_vertex(DVec3::new(1.0, 0.0, 0.0));
/// let c = mesh.add_vertex(DVec3::new(0.0, 1.0, 0.0));
/// mesh.add_face(vec![a, b, c]);
/// assert_eq!(mesh.face_count(), 1);
/// assert!(!mesh.is_watertight());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<DVec3>,
    faces: Vec<Face>,
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mesh from a vertex table and faces without checking them.
    pub fn from_parts(vertices: Vec<DVec3>, faces: Vec<Face>) -> Self {
        Self { vertices, faces }
    }

    /// Creates a mesh from a vertex table and index loops.
    pub fn from_loops(vertices: Vec<DVec3>, loops: Vec<Vec<usize>>) -> Self {
        Self {
            vertices,
            faces: loops.into_iter().map(Face::new).collect(),
        }
    }

    /// Builds an indexed mesh from a polygon soup.
    ///
    /// Vertices closer than the weld tolerance are merged. Loops left with
    /// fewer than three distinct vertices are dropped.
    pub fn from_polygons(polygons: &[Vec<DVec3>]) -> Self {
        let mut welder = VertexWelder::new(VERTEX_WELD_EPSILON);
        let loops = polygons
            .iter()
            .filter_map(|poly| {
                let indices = poly.iter().map(|p| welder.insert(*p)).collect();
                clean_loop(indices)
            })
            .collect();
        Self::from_loops(welder.into_vertices(), loops)
    }

    /// Appends a vertex and returns its index.
    pub fn add_vertex(&mut self, position: DVec3) -> usize {
        self.vertices.push(position);
        self.vertices.len() - 1
    }

    /// Appends a face given as an index loop.
    pub fn add_face(&mut self, indices: Vec<usize>) {
        self.faces.push(Face::new(indices));
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of faces.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Whether the mesh has no faces.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Vertex table.
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Faces.
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Positions of a face's vertices in loop order.
    ///
    /// # Panics
    ///
    /// When `face` or one of its vertex indices is out of range.
    pub fn face_points(&self, face: usize) -> Vec<DVec3> {
        self.faces[face]
            .indices
            .iter()
            .map(|&i| self.vertices[i])
            .collect()
    }

    /// Outward unit normal of a face, the tagged one when present.
    pub fn face_normal(&self, face: usize) -> DVec3 {
        match self.faces[face].normal {
            Some(n) => n,
            None => newell_normal(&self.face_points(face)).normalize_or_zero(),
        }
    }

    /// Faces as loops of positions.
    pub fn polygons(&self) -> Vec<Vec<DVec3>> {
        (0..self.faces.len()).map(|i| self.face_points(i)).collect()
    }

    /// Whether every face is a triangle.
    pub fn is_triangulated(&self) -> bool {
        self.faces.iter().all(|f| f.len() == 3)
    }

    /// Splits every face into triangles by ear clipping.
    ///
    /// Vertex indices are preserved; triangles inherit the face's tag.
    pub fn triangulated(&self) -> Self {
        let mut faces = Vec::with_capacity(self.faces.len() * 2);
        for (i, face) in self.faces.iter().enumerate() {
            if face.len() == 3 {
                faces.push(face.clone());
                continue;
            }
            for [a, b, c] in triangulate_loop(&self.face_points(i)) {
                faces.push(Face {
                    indices: vec![face.indices[a], face.indices[b], face.indices[c]],
                    normal: face.normal,
                });
            }
        }
        Self {
            vertices: self.vertices.clone(),
            faces,
        }
    }

    /// Signed enclosed volume, positive for outward-facing closed meshes.
    pub fn volume(&self) -> f64 {
        (0..self.faces.len())
            .map(|i| {
                let points = self.face_points(i);
                points
                    .first()
                    .map_or(0.0, |p| p.dot(newell_normal(&points)))
            })
            .sum::<f64>()
            / 6.0
    }

    /// Total face area.
    pub fn surface_area(&self) -> f64 {
        (0..self.faces.len())
            .map(|i| newell_normal(&self.face_points(i)).length() * 0.5)
            .sum()
    }

    /// Axis-aligned bounds of the referenced vertices, `None` when empty.
    pub fn bounding_box(&self) -> Option<(DVec3, DVec3)> {
        let mut used = self.faces.iter().flat_map(|f| f.indices.iter());
        let first = self.vertices[*used.next()?];
        let bounds = used.fold((first, first), |(min, max), &i| {
            let v = self.vertices[i];
            (min.min(v), max.max(v))
        });
        Some(bounds)
    }

    /// Applies an affine transform, keeping faces outward-facing.
    pub fn transformed(&self, matrix: &DMat4) -> Self {
        let mirrored = matrix.determinant() < 0.0;
        let vertices: Vec<DVec3> = self
            .vertices
            .iter()
            .map(|v| matrix.transform_point3(*v))
            .collect();
        let faces = self
            .faces
            .iter()
            .map(|f| {
                let mut indices = f.indices.clone();
                if mirrored {
                    indices.reverse();
                }
                let normal = f.normal.map(|_| {
                    let points: Vec<DVec3> = indices.iter().map(|&i| vertices[i]).collect();
                    newell_normal(&points).normalize_or_zero()
                });
                Face { indices, normal }
            })
            .collect();
        Self { vertices, faces }
    }

    /// Translates by `offset`.
    pub fn translated(&self, offset: DVec3) -> Self {
        self.transformed(&DMat4::from_translation(offset))
    }

    /// Scales about the origin.
    pub fn scaled(&self, factors: DVec3) -> Self {
        self.transformed(&DMat4::from_scale(factors))
    }

    /// Rotates by `angle` radians about `axis` through the origin.
    pub fn rotated(&self, axis: DVec3, angle: f64) -> Self {
        self.transformed(&DMat4::from_axis_angle(axis.normalize(), angle))
    }

    /// Reverses every face, turning the mesh inside out.
    pub fn inverted(&self) -> Self {
        Self {
            vertices: self.vertices.clone(),
            faces: self.faces.iter().map(Face::reversed).collect(),
        }
    }

    /// Concatenates two meshes without merging vertices.
    pub fn merged(&self, other: &Mesh) -> Self {
        let offset = self.vertices.len();
        let mut vertices = self.vertices.clone();
        vertices.extend_from_slice(&other.vertices);
        let mut faces = self.faces.clone();
        faces.extend(other.faces.iter().map(|f| Face {
            indices: f.indices.iter().map(|i| i + offset).collect(),
            normal: f.normal,
        }));
        Self { vertices, faces }
    }

    /// Checks that every face index refers to a vertex.
    pub fn check_indices(&self) -> Result<(), ValidationError> {
        let count = self.vertices.len();
        for (face, f) in self.faces.iter().enumerate() {
            if let Some(&index) = f.indices.iter().find(|&&i| i >= count) {
                return Err(ValidationError::IndexOutOfRange { face, index, count });
            }
        }
        Ok(())
    }

    /// Checks the watertightness invariant.
    ///
    /// Every edge must be shared by exactly two faces traversing it in
    /// opposite directions, and the enclosed volume must not be negative.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate::validate(self, EPSILON)
    }

    /// Boolean form of [`Mesh::validate`].
    pub fn is_watertight(&self) -> bool {
        self.validate().is_ok()
    }
}
