//! # BSP Tree
//!
//! Binary space partitioning tree in the style of csg.js.
//!
//! Each node stores its splitting plane explicitly, the polygons coplanar
//! with it, and front/back subtrees. A tree built from a closed mesh
//! represents the solid: space behind every leaf plane is inside.
//!
//! ## Stack Safety
//!
//! Traversals recurse through [`stacker::maybe_grow`], so degenerate inputs
//! that produce very deep trees extend the stack instead of overflowing.
//! Dropping is iterative for the same reason.

use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};

use super::plane::Plane;
use super::polygon::{CsgPolygon, SplitBuckets};

fn grow<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, f)
}

/// A node of the BSP tree.
#[derive(Debug, Default)]
pub struct BspNode {
    plane: Option<Plane>,
    polygons: Vec<CsgPolygon>,
    front: Option<Box<BspNode>>,
    back: Option<Box<BspNode>>,
}

impl BspNode {
    /// Builds a tree from polygons.
    pub fn new(polygons: Vec<CsgPolygon>) -> Self {
        let mut node = Self::default();
        node.build(polygons);
        node
    }

    /// Inserts polygons, extending the tree where they fall.
    pub fn build(&mut self, polygons: Vec<CsgPolygon>) {
        if polygons.is_empty() {
            return;
        }
        let plane = *self.plane.get_or_insert(*polygons[0].plane());
        let mut out = SplitBuckets::default();
        for poly in polygons {
            poly.split(&plane, &mut out);
        }
        self.polygons.append(&mut out.coplanar_front);
        self.polygons.append(&mut out.coplanar_back);
        grow(|| {
            if !out.front.is_empty() {
                self.front
                    .get_or_insert_with(Default::default)
                    .build(out.front);
            }
            if !out.back.is_empty() {
                self.back
                    .get_or_insert_with(Default::default)
                    .build(out.back);
            }
        });
    }

    /// Converts solid space to empty space and vice versa.
    pub fn invert(&mut self) {
        for poly in &mut self.polygons {
            poly.flip();
        }
        if let Some(plane) = &mut self.plane {
            plane.flip();
        }
        grow(|| {
            if let Some(front) = &mut self.front {
                front.invert();
            }
            if let Some(back) = &mut self.back {
                back.invert();
            }
        });
        std::mem::swap(&mut self.front, &mut self.back);
    }

    /// Removes the parts of `polygons` inside this tree's solid.
    pub fn clip_polygons(&self, polygons: Vec<CsgPolygon>) -> Vec<CsgPolygon> {
        let Some(plane) = self.plane else {
            return polygons;
        };
        let mut out = SplitBuckets::default();
        for poly in polygons {
            poly.split(&plane, &mut out);
        }
        let mut front = out.front;
        front.append(&mut out.coplanar_front);
        let mut back = out.back;
        back.append(&mut out.coplanar_back);

        grow(|| {
            let mut kept = match &self.front {
                Some(node) => node.clip_polygons(front),
                None => front,
            };
            if let Some(node) = &self.back {
                kept.extend(node.clip_polygons(back));
            }
            kept
        })
    }

    /// Removes the parts of this tree's polygons inside `other`.
    pub fn clip_to(&mut self, other: &BspNode) {
        self.polygons = other.clip_polygons(std::mem::take(&mut self.polygons));
        grow(|| {
            if let Some(front) = &mut self.front {
                front.clip_to(other);
            }
            if let Some(back) = &mut self.back {
                back.clip_to(other);
            }
        });
    }

    /// Splits `polygons` along the planes of the tree without discarding
    /// anything, so each fragment lies in a single cell.
    ///
    /// Fragments on a node's plane descend into both subtrees, which cuts
    /// them along the edges of the faces they touch.
    pub fn partition(&self, polygons: Vec<CsgPolygon>) -> Vec<CsgPolygon> {
        let Some(plane) = self.plane else {
            return polygons;
        };
        let mut out = SplitBuckets::default();
        for poly in polygons {
            poly.split(&plane, &mut out);
        }
        let mut coplanar = out.coplanar_front;
        coplanar.append(&mut out.coplanar_back);

        grow(|| {
            let (front, back) = (self.front.as_deref(), self.back.as_deref());
            let mut parts = partition_in(front, out.front);
            parts.extend(partition_in(back, out.back));
            parts.extend(partition_in(back, partition_in(front, coplanar)));
            parts
        })
    }

    /// Every polygon stored in the tree.
    pub fn all_polygons(&self) -> Vec<CsgPolygon> {
        let mut out = Vec::new();
        self.collect_into(&mut out);
        out
    }

    fn collect_into(&self, out: &mut Vec<CsgPolygon>) {
        out.extend(self.polygons.iter().cloned());
        grow(|| {
            if let Some(front) = &self.front {
                front.collect_into(out);
            }
            if let Some(back) = &self.back {
                back.collect_into(out);
            }
        });
    }

    /// Number of polygons stored in the tree.
    pub fn polygon_count(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<&BspNode> = vec![self];
        while let Some(node) = stack.pop() {
            count += node.polygons.len();
            stack.extend(node.front.as_deref());
            stack.extend(node.back.as_deref());
        }
        count
    }
}

fn partition_in(node: Option<&BspNode>, polygons: Vec<CsgPolygon>) -> Vec<CsgPolygon> {
    match node {
        Some(node) if !polygons.is_empty() => node.partition(polygons),
        _ => polygons,
    }
}

impl Drop for BspNode {
    fn drop(&mut self) {
        let mut stack: Vec<Box<BspNode>> = Vec::new();
        stack.extend(self.front.take());
        stack.extend(self.back.take());
        while let Some(mut node) = stack.pop() {
            stack.extend(node.front.take());
            stack.extend(node.back.take());
        }
    }
}
