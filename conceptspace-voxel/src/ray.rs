//! Ray/triangle intersection (Möller–Trumbore)

use conceptspace_core::{Point3f, Triangle, Vector3f};

/// Tolerance for parallel rays and hits at the ray origin
pub const EPSILON: f32 = 1e-7;

/// A half-line starting at `origin`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Point3f,
    pub dir: Vector3f,
}

impl Ray {
    pub fn new(origin: Point3f, dir: Vector3f) -> Self {
        Self { origin, dir }
    }

    /// Point at parameter `t` along the ray
    pub fn point_at(&self, t: f32) -> Point3f {
        self.origin + self.dir * t
    }
}

/// Distance parameter `t` of the hit between `ray` and `tri`, if any.
///
/// Hits closer than [`EPSILON`] to the origin are ignored, and so are rays
/// whose direction lies in the triangle's plane. Edges and corners count as
/// hits (barycentric `u`, `v` are tested inclusively).
#[inline]
pub fn ray_triangle_distance(ray: &Ray, tri: &Triangle) -> Option<f32> {
    let (edge1, edge2) = tri.edges();

    let h = ray.dir.cross(&edge2);
    let det = edge1.dot(&h);

    if det > -EPSILON && det < EPSILON {
        return None;
    }

    let inv_det = 1.0 / det;
    let s = ray.origin - tri.v0;

    let u = inv_det * s.dot(&h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(&edge1);
    let v = inv_det * ray.dir.dot(&q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = inv_det * edge2.dot(&q);
    if t > EPSILON {
        Some(t)
    } else {
        None
    }
}

/// Whether `ray` hits `tri` in front of its origin
#[inline]
pub fn ray_intersects_triangle(ray: &Ray, tri: &Triangle) -> bool {
    ray_triangle_distance(ray, tri).is_some()
}
