//! Triangles and triangle extraction from vertex/index buffers

use crate::bounds::Aabb;
use crate::error::{Error, Result};
use crate::mesh::TriangleMesh;
use crate::point::*;
use serde::{Deserialize, Serialize};

/// A single triangle in world space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub v0: Point3f,
    pub v1: Point3f,
    pub v2: Point3f,
}

impl Triangle {
    pub fn new(v0: Point3f, v1: Point3f, v2: Point3f) -> Self {
        Self { v0, v1, v2 }
    }

    /// The two edges sharing `v0`
    #[inline]
    pub fn edges(&self) -> (Vector3f, Vector3f) {
        (self.v1 - self.v0, self.v2 - self.v0)
    }

    /// Unit normal, or `None` for a degenerate triangle
    pub fn normal(&self) -> Option<Vector3f> {
        let (e1, e2) = self.edges();
        e1.cross(&e2).try_normalize(f32::EPSILON)
    }

    pub fn area(&self) -> f32 {
        let (e1, e2) = self.edges();
        0.5 * e1.cross(&e2).norm()
    }

    pub fn vertices(&self) -> [Point3f; 3] {
        [self.v0, self.v1, self.v2]
    }
}

impl Aabb {
    /// Bounding box of a triangle soup; an empty list gives the zero box
    pub fn from_triangles(triangles: &[Triangle]) -> Self {
        let corners: Vec<Point3f> = triangles.iter().flat_map(|t| t.vertices()).collect();
        Aabb::from_points(&corners)
    }
}

/// Flat vertex/index buffers as handed to a GPU: xyz triples plus an
/// optional index buffer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshBuffers {
    pub positions: Vec<f32>,
    pub indices: Option<Vec<u32>>,
}

impl MeshBuffers {
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    fn position(&self, index: usize) -> Result<Point3f> {
        let base = index * 3;
        match self.positions.get(base..base + 3) {
            Some(p) => Ok(Point3f::new(p[0], p[1], p[2])),
            None => Err(Error::InvalidData(format!(
                "Vertex index {} out of range for {} vertices",
                index,
                self.vertex_count()
            ))),
        }
    }
}

/// Walk a mesh's buffers into a flat list of triangles.
///
/// Indexed buffers are consumed three indices at a time; non-indexed buffers
/// three vertices at a time.
pub fn extract_triangles(buffers: &MeshBuffers) -> Result<Vec<Triangle>> {
    if buffers.positions.len() % 3 != 0 {
        return Err(Error::InvalidData(format!(
            "Position buffer length {} is not a multiple of 3",
            buffers.positions.len()
        )));
    }

    match &buffers.indices {
        Some(indices) => extract_indexed(buffers, indices),
        None => extract_non_indexed(buffers),
    }
}

fn extract_indexed(buffers: &MeshBuffers, indices: &[u32]) -> Result<Vec<Triangle>> {
    if indices.len() % 3 != 0 {
        return Err(Error::InvalidData(format!(
            "Index buffer length {} is not a multiple of 3",
            indices.len()
        )));
    }

    indices
        .chunks_exact(3)
        .map(|tri| {
            Ok(Triangle::new(
                buffers.position(tri[0] as usize)?,
                buffers.position(tri[1] as usize)?,
                buffers.position(tri[2] as usize)?,
            ))
        })
        .collect()
}

fn extract_non_indexed(buffers: &MeshBuffers) -> Result<Vec<Triangle>> {
    let count = buffers.vertex_count();
    if count % 3 != 0 {
        return Err(Error::InvalidData(format!(
            "Non-indexed buffer has {} vertices, not a whole number of triangles",
            count
        )));
    }

    Ok(buffers
        .positions
        .chunks_exact(9)
        .map(|p| {
            Triangle::new(
                Point3f::new(p[0], p[1], p[2]),
                Point3f::new(p[3], p[4], p[5]),
                Point3f::new(p[6], p[7], p[8]),
            )
        })
        .collect())
}

/// Concatenate the triangles of several sub-meshes, in order
pub fn extract_triangles_from_meshes(meshes: &[TriangleMesh]) -> Result<Vec<Triangle>> {
    let mut triangles = Vec::new();
    for mesh in meshes {
        triangles.extend(mesh.triangles()?);
    }
    Ok(triangles)
}

impl TriangleMesh {
    /// Resolve every face into a world-space triangle
    pub fn triangles(&self) -> Result<Vec<Triangle>> {
        self.validate()?;
        Ok(self
            .faces
            .iter()
            .map(|f| Triangle::new(self.vertices[f[0]], self.vertices[f[1]], self.vertices[f[2]]))
            .collect())
    }

    /// Flatten into GPU-style buffers
    pub fn to_buffers(&self) -> MeshBuffers {
        let positions = self.vertices.iter().flat_map(|v| [v.x, v.y, v.z]).collect();
        let indices = self
            .faces
            .iter()
            .flat_map(|f| f.iter().map(|&i| i as u32))
            .collect();
        MeshBuffers {
            positions,
            indices: Some(indices),
        }
    }

    /// Build a mesh from GPU-style buffers.
    ///
    /// Non-indexed buffers become one face per vertex triple.
    pub fn from_buffers(buffers: &MeshBuffers) -> Result<Self> {
        if buffers.positions.len() % 3 != 0 {
            return Err(Error::InvalidData(format!(
                "Position buffer length {} is not a multiple of 3",
                buffers.positions.len()
            )));
        }

        let vertices: Vec<Point3f> = buffers
            .positions
            .chunks_exact(3)
            .map(|p| Point3f::new(p[0], p[1], p[2]))
            .collect();

        let faces: Vec<[usize; 3]> = match &buffers.indices {
            Some(indices) => {
                if indices.len() % 3 != 0 {
                    return Err(Error::InvalidData(format!(
                        "Index buffer length {} is not a multiple of 3",
                        indices.len()
                    )));
                }
                indices
                    .chunks_exact(3)
                    .map(|t| [t[0] as usize, t[1] as usize, t[2] as usize])
                    .collect()
            }
            None => {
                if vertices.len() % 3 != 0 {
                    return Err(Error::InvalidData(format!(
                        "Non-indexed buffer has {} vertices, not a whole number of triangles",
                        vertices.len()
                    )));
                }
                (0..vertices.len() / 3).map(|i| [3 * i, 3 * i + 1, 3 * i + 2]).collect()
            }
        };

        let mesh = TriangleMesh::from_vertices_and_faces(vertices, faces);
        mesh.validate()?;
        Ok(mesh)
    }
}
