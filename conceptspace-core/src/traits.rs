//! Core traits for conceptspace

use crate::{bounds::Aabb, mesh::*, point::*, transform::Transform3D, triangle::Triangle};

/// Objects with an axis-aligned extent
pub trait Bounded {
    /// Get the bounding box of the object
    fn bounding_box(&self) -> Aabb;

    /// Get the center point of the object
    fn center(&self) -> Point3f {
        self.bounding_box().center()
    }
}

/// Trait for objects that can be transformed
pub trait Transformable {
    /// Apply a transformation to the object
    fn transform(&mut self, transform: &Transform3D);
}

impl Bounded for TriangleMesh {
    fn bounding_box(&self) -> Aabb {
        Aabb::from_points(&self.vertices)
    }
}

impl Bounded for [Triangle] {
    fn bounding_box(&self) -> Aabb {
        Aabb::from_triangles(self)
    }
}
