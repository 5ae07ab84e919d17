//! Mesh persistence through the path-based API

use crate::{read_mesh, write_mesh, ObjReader, MeshReader};
use conceptspace_core::{generate_apple_shape, AppleParams, Error, Point3f, TriangleMesh};
use std::fs;

fn quad() -> TriangleMesh {
    TriangleMesh::from_vertices_and_faces(
        vec![
            Point3f::new(0.0, 0.0, 0.0),
            Point3f::new(1.0, 0.0, 0.0),
            Point3f::new(1.0, 1.0, 0.0),
            Point3f::new(0.0, 1.0, 0.0),
        ],
        vec![[0, 1, 2], [0, 2, 3]],
    )
}

#[test]
fn test_obj_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("quad.obj");

    write_mesh(&quad(), &path).unwrap();
    let loaded = read_mesh(&path).unwrap();

    assert_eq!(loaded.vertices, quad().vertices);
    assert_eq!(loaded.faces, quad().faces);
    assert!(loaded.normals.is_none());
}

#[test]
fn test_generated_apple_survives_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("apple.OBJ");
    let apple = generate_apple_shape(&AppleParams::default()).unwrap();

    write_mesh(&apple, &path).unwrap();
    let loaded = ObjReader::read_mesh(&path).unwrap();

    // The duplicated seam column is still referenced, so nothing is dropped
    assert_eq!(loaded.vertex_count(), apple.vertex_count());
    assert_eq!(loaded.face_count(), apple.face_count());
    assert_eq!(loaded.normals.as_ref().map(Vec::len), Some(apple.vertex_count()));
}

#[test]
fn test_unsupported_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mesh.stl");
    fs::write(&path, "solid x").unwrap();

    assert!(matches!(read_mesh(&path), Err(Error::UnsupportedFormat(_))));
    assert!(matches!(write_mesh(&quad(), &path), Err(Error::UnsupportedFormat(_))));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.obj");
    assert!(matches!(read_mesh(&path), Err(Error::NotFound(_))));
}
