//! # Solids
//!
//! Named meshes with display metadata, and collections of them.
//!
//! Solids are immutable: transforms and boolean combinations return new
//! values. Metadata never affects geometry.

use glam::{DMat4, DVec3};

use crate::csg::CsgContext;
use crate::error::SolidResult;
use crate::mesh::Mesh;

mod compose;


pub use compose::{combine, combine_intersect, combine_subtract, combine_union};

/// How a solid should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DisplayMetadata {
    /// RGBA color, components in `[0, 1]`.
    pub color: Option<[f32; 4]>,
    /// Opacity in `[0, 1]`.
    pub opacity: Option<f32>,
    /// Draw edges only.
    pub wireframe: bool,
}

/// A mesh with an optional name and display metadata.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use solid_mesh::builders::cuboid;
/// use solid_mesh::Solid;
///
/// let part = Solid::new(cuboid(DVec3::ZERO, DVec3::ONE).unwrap())
///     .with_name("block")
///     .with_color([1.0, 0.0, 0.0, 1.0]);
/// let moved = part.translated(DVec3::X);
/// assert_eq!(moved.name(), Some("block"));
/// assert_eq!(moved.mesh().bounding_box().unwrap().0, DVec3::X);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Solid {
    name: Option<String>,
    mesh: Mesh,
    metadata: DisplayMetadata,
}

impl Solid {
    /// Wraps a mesh.
    pub fn new(mesh: Mesh) -> Self {
        Self {
            name: None,
            mesh,
            metadata: DisplayMetadata::default(),
        }
    }

    /// Sets the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replaces the display metadata.
    pub fn with_metadata(mut self, metadata: DisplayMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Sets the color.
    pub fn with_color(mut self, color: [f32; 4]) -> Self {
        self.metadata.color = Some(color);
        self
    }

    /// Sets the opacity.
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.metadata.opacity = Some(opacity);
        self
    }

    /// Sets wireframe drawing.
    pub fn with_wireframe(mut self, wireframe: bool) -> Self {
        self.metadata.wireframe = wireframe;
        self
    }

    /// Name, if set.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Underlying mesh.
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Display metadata.
    pub fn metadata(&self) -> &DisplayMetadata {
        &self.metadata
    }

    /// Unwraps the mesh.
    pub fn into_mesh(self) -> Mesh {
        self.mesh
    }

    /// Same name and metadata around a different mesh.
    pub(crate) fn with_mesh(&self, mesh: Mesh) -> Self {
        Self {
            name: self.name.clone(),
            mesh,
            metadata: self.metadata,
        }
    }

    /// Applies an affine transform.
    pub fn transformed(&self, matrix: &DMat4) -> Self {
        self.with_mesh(self.mesh.transformed(matrix))
    }

    /// Moves by `offset`.
    pub fn translated(&self, offset: DVec3) -> Self {
        self.with_mesh(self.mesh.translated(offset))
    }

    /// Scales about the origin.
    pub fn scaled(&self, factors: DVec3) -> Self {
        self.with_mesh(self.mesh.scaled(factors))
    }

    /// Rotates by `angle` radians around the line through `origin` along
    /// `axis`.
    pub fn rotated_around(&self, origin: DVec3, axis: DVec3, angle: f64) -> Self {
        self.transformed(&crate::geometry::rotation_about(origin, axis, angle))
    }
}

impl From<Mesh> for Solid {
    fn from(mesh: Mesh) -> Self {
        Self::new(mesh)
    }
}

/// An ordered group of solids kept distinct.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Collection {
    solids: Vec<Solid>,
}

impl Collection {
    /// An empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// A new collection with `solid` appended.
    pub fn push(&self, solid: Solid) -> Self {
        let mut solids = self.solids.clone();
        solids.push(solid);
        Self { solids }
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.solids.len()
    }

    /// Whether there are no members.
    pub fn is_empty(&self) -> bool {
        self.solids.is_empty()
    }

    /// Members in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Solid> {
        self.solids.iter()
    }

    /// Member at `index`.
    pub fn get(&self, index: usize) -> Option<&Solid> {
        self.solids.get(index)
    }

    /// Unions every member into one solid, left to right.
    ///
    /// The first member's name and metadata carry over. An empty collection
    /// merges to an empty solid.
    pub fn merged(&self, ctx: &CsgContext) -> SolidResult<Solid> {
        let mut members = self.solids.iter();
        let Some(first) = members.next() else {
            return Ok(Solid::default());
        };
        members.try_fold(first.clone(), |acc, next| combine_union(ctx, &acc, next))
    }
}

impl FromIterator<Solid> for Collection {
    fn from_iter<I: IntoIterator<Item = Solid>>(iter: I) -> Self {
        Self {
            solids: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Solid;
    type IntoIter = std::slice::Iter<'a, Solid>;

    fn into_iter(self) -> Self::IntoIter {
        self.solids.iter()
    }
}
