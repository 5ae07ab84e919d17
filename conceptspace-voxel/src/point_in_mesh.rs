//! Point-in-mesh classification by ray casting
//!
//! A ray is cast from the query point along +X and every crossed triangle is
//! counted; an odd count means the point is inside. The mesh should be
//! closed. A ray grazing a shared edge or vertex may be counted once per
//! adjacent triangle, which can misclassify points lying exactly in line
//! with mesh edges.

use crate::ray::{ray_intersects_triangle, Ray};
use conceptspace_core::{Aabb, Point3f, Result, Triangle, TriangleMesh, Vector3f};

/// Inclusive AABB containment, the cheap rejection test
#[inline]
pub fn is_point_in_bounding_box(point: &Point3f, bbox: &Aabb) -> bool {
    bbox.contains_point(point)
}

/// Classify `point` against a closed triangle soup.
///
/// When `bbox` is given, points outside it are rejected without casting.
pub fn is_point_in_mesh(point: &Point3f, triangles: &[Triangle], bbox: Option<&Aabb>) -> bool {
    if let Some(bbox) = bbox {
        if !is_point_in_bounding_box(point, bbox) {
            return false;
        }
    }

    let ray = Ray::new(*point, Vector3f::x());
    let crossings = triangles
        .iter()
        .filter(|tri| ray_intersects_triangle(&ray, tri))
        .count();

    crossings % 2 == 1
}

/// Triangles of a closed mesh together with their precomputed bounds
#[derive(Debug, Clone, PartialEq)]
pub struct MeshVolume {
    triangles: Vec<Triangle>,
    bbox: Aabb,
}

impl MeshVolume {
    pub fn new(triangles: Vec<Triangle>) -> Self {
        let bbox = Aabb::from_triangles(&triangles);
        Self { triangles, bbox }
    }

    pub fn from_mesh(mesh: &TriangleMesh) -> Result<Self> {
        Ok(Self::new(mesh.triangles()?))
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn bbox(&self) -> &Aabb {
        &self.bbox
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Parity test with bounding-box rejection
    pub fn contains(&self, point: &Point3f) -> bool {
        is_point_in_mesh(point, &self.triangles, Some(&self.bbox))
    }
}
