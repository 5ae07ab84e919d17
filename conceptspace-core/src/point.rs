//! Point and vector aliases

use nalgebra::{Point3, Vector3};

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// A 3D vector with floating point components
pub type Vector3f = Vector3<f32>;

/// Build a point from a `[x, y, z]` array
#[inline]
pub fn point_from_array(p: [f32; 3]) -> Point3f {
    Point3f::new(p[0], p[1], p[2])
}
