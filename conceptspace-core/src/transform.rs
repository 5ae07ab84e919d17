//! 3D transformation utilities and mesh scaling

use crate::error::{Error, Result};
use crate::mesh::TriangleMesh;
use crate::traits::{Bounded, Transformable};
use nalgebra::{Matrix3, Matrix4, Point3, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// A 3D affine transformation stored as a homogeneous matrix
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform3D {
    pub matrix: Matrix4<f32>,
}

impl Transform3D {
    /// Create an identity transformation
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Create a translation transformation
    pub fn translation(translation: Vector3<f32>) -> Self {
        Self {
            matrix: Matrix4::new_translation(&translation),
        }
    }

    /// Create a rotation transformation from a quaternion
    pub fn rotation(rotation: UnitQuaternion<f32>) -> Self {
        Self {
            matrix: rotation.to_homogeneous(),
        }
    }

    /// Create a scaling transformation
    pub fn scaling(scale: Vector3<f32>) -> Self {
        Self {
            matrix: Matrix4::new_nonuniform_scaling(&scale),
        }
    }

    /// Create a uniform scaling transformation
    pub fn uniform_scaling(scale: f32) -> Self {
        Self {
            matrix: Matrix4::new_scaling(scale),
        }
    }

    /// Apply the transformation to a point
    pub fn transform_point(&self, point: &Point3<f32>) -> Point3<f32> {
        let homogeneous = self.matrix * point.to_homogeneous();
        Point3::from_homogeneous(homogeneous).unwrap_or(*point)
    }

    /// Apply the linear part of the transformation to a vector
    pub fn transform_vector(&self, vector: &Vector3<f32>) -> Vector3<f32> {
        self.matrix.fixed_view::<3, 3>(0, 0) * vector
    }

    /// Matrix that maps normals: inverse transpose of the linear part
    pub fn normal_matrix(&self) -> Option<Matrix3<f32>> {
        let linear: Matrix3<f32> = self.matrix.fixed_view::<3, 3>(0, 0).into_owned();
        linear.try_inverse().map(|inv| inv.transpose())
    }

    /// Compose this transformation with another (`other` is applied first)
    pub fn compose(self, other: Self) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Get the inverse transformation
    pub fn inverse(self) -> Option<Self> {
        self.matrix.try_inverse().map(|inv_matrix| Self {
            matrix: inv_matrix,
        })
    }
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for Transform3D {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.compose(rhs)
    }
}

impl From<Matrix4<f32>> for Transform3D {
    fn from(matrix: Matrix4<f32>) -> Self {
        Self { matrix }
    }
}

impl Transformable for TriangleMesh {
    fn transform(&mut self, transform: &Transform3D) {
        for v in &mut self.vertices {
            *v = transform.transform_point(v);
        }

        if let Some(normals) = &mut self.normals {
            // Singular transforms flatten the mesh; normals are left as-is
            if let Some(nm) = transform.normal_matrix() {
                for n in normals.iter_mut() {
                    *n = (nm * *n).try_normalize(f32::EPSILON).unwrap_or(*n);
                }
            }
        }
    }
}

/// Return a copy of `mesh` with every vertex multiplied by `factor`.
///
/// Faces and normals are carried over unchanged.
pub fn scale_mesh(mesh: &TriangleMesh, factor: f32) -> TriangleMesh {
    TriangleMesh {
        vertices: mesh.vertices.iter().map(|v| v * factor).collect(),
        faces: mesh.faces.clone(),
        normals: mesh.normals.clone(),
    }
}

/// Uniformly scale `mesh` so that its longest bounding-box edge equals
/// `target_size`. Returns the scaled mesh and the factor that was applied.
pub fn scale_to_target_size(mesh: &TriangleMesh, target_size: f32) -> Result<(TriangleMesh, f32)> {
    if !(target_size.is_finite() && target_size > 0.0) {
        return Err(Error::InvalidData(format!(
            "Target size must be positive, got {}",
            target_size
        )));
    }
    if mesh.vertices.is_empty() {
        return Err(Error::InvalidData("Cannot scale an empty mesh".to_string()));
    }

    let current = mesh.bounding_box().max_extent();
    if !(current.is_finite() && current > 0.0) {
        return Err(Error::InvalidData(format!(
            "Mesh has degenerate extent {}, cannot scale to target size",
            current
        )));
    }

    let factor = target_size / current;
    Ok((scale_mesh(mesh, factor), factor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::*;
    use approx::assert_relative_eq;

    fn tetrahedron() -> TriangleMesh {
        TriangleMesh::from_vertices_and_faces(
            vec![
                Point3f::new(0.0, 0.0, 0.0),
                Point3f::new(0.2, 0.0, 0.0),
                Point3f::new(0.0, 0.1, 0.0),
                Point3f::new(0.0, 0.0, 0.05),
            ],
            vec![[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]],
        )
    }

    #[test]
    fn test_transform_point() {
        let t = Transform3D::translation(Vector3f::new(1.0, 2.0, 3.0))
            * Transform3D::uniform_scaling(2.0);
        let p = t.transform_point(&Point3f::new(1.0, 1.0, 1.0));
        assert_relative_eq!(p, Point3f::new(3.0, 4.0, 5.0));

        let inv = t.inverse().unwrap();
        assert_relative_eq!(inv.transform_point(&p), Point3f::new(1.0, 1.0, 1.0), epsilon = 1e-6);
    }

    #[test]
    fn test_transform_vector_ignores_translation() {
        let t = Transform3D::translation(Vector3f::new(5.0, 5.0, 5.0));
        assert_relative_eq!(t.transform_vector(&Vector3f::x()), Vector3f::x());
    }

    #[test]
    fn test_scale_mesh() {
        let mesh = tetrahedron();
        let scaled = scale_mesh(&mesh, 10.0);
        assert_eq!(scaled.faces, mesh.faces);
        assert_relative_eq!(scaled.vertices[1], Point3f::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_scale_to_target_size() {
        let (scaled, factor) = scale_to_target_size(&tetrahedron(), 7.5).unwrap();
        assert_relative_eq!(factor, 37.5, epsilon = 1e-4);
        assert_relative_eq!(scaled.bounding_box().max_extent(), 7.5, epsilon = 1e-5);
    }

    #[test]
    fn test_scale_to_target_size_rejects_degenerate() {
        let point = TriangleMesh::from_vertices_and_faces(vec![Point3f::new(1.0, 1.0, 1.0)], vec![]);
        assert!(scale_to_target_size(&point, 1.0).is_err());
        assert!(scale_to_target_size(&TriangleMesh::new(), 1.0).is_err());
        assert!(scale_to_target_size(&tetrahedron(), 0.0).is_err());
        assert!(scale_to_target_size(&tetrahedron(), f32::NAN).is_err());
    }

    #[test]
    fn test_mesh_transform_renormalizes_normals() {
        let mut mesh = tetrahedron();
        mesh.compute_vertex_normals();
        mesh.transform(&Transform3D::scaling(Vector3f::new(3.0, 1.0, 1.0)));

        for n in mesh.normals.as_ref().unwrap() {
            assert_relative_eq!(n.norm(), 1.0, epsilon = 1e-5);
        }
        assert_relative_eq!(mesh.vertices[1], Point3f::new(0.6, 0.0, 0.0), epsilon = 1e-6);
    }
}
