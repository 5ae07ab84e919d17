//! Loading a word's color regions as classifiable volumes

use crate::point_in_mesh::MeshVolume;
use conceptspace_core::{Error, Result, TriangleMesh};
use conceptspace_io::{load_obj, ColorRegion, Dictionary};
use std::path::Path;
use tracing::{info, warn};

/// A color region mesh ready for point-in-mesh queries
#[derive(Debug, Clone)]
pub struct LoadedMesh {
    pub mesh_path: String,
    pub mesh: TriangleMesh,
    pub volume: MeshVolume,
}

impl LoadedMesh {
    /// Build from an already parsed mesh. Fails when the mesh has no faces.
    pub fn from_mesh(mesh_path: impl Into<String>, mesh: TriangleMesh) -> Result<Self> {
        let mesh_path = mesh_path.into();
        if mesh.faces.is_empty() {
            return Err(Error::InvalidData(format!(
                "No mesh geometry found in {}",
                mesh_path
            )));
        }
        let volume = MeshVolume::from_mesh(&mesh)?;
        Ok(Self {
            mesh_path,
            mesh,
            volume,
        })
    }

    /// Read an OBJ file from disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mesh = load_obj(path)?;
        Self::from_mesh(path.display().to_string(), mesh)
    }
}

/// Load one region, resolving its mesh path through the dictionary
pub fn load_region(dictionary: &Dictionary, region: &ColorRegion) -> Result<LoadedMesh> {
    let path = dictionary.resolve(&region.mesh_path);
    let mesh = load_obj(&path).map_err(|e| {
        warn!(mesh = %region.mesh_path, error = %e, "failed to load color region");
        e
    })?;
    let loaded = LoadedMesh::from_mesh(region.mesh_path.clone(), mesh)?;

    let bbox = loaded.volume.bbox();
    info!(
        mesh = %loaded.mesh_path,
        triangles = loaded.volume.triangles().len(),
        min = ?bbox.min.coords.as_slice(),
        max = ?bbox.max.coords.as_slice(),
        "loaded color region"
    );
    Ok(loaded)
}

/// Load every region, stopping at the first failure
pub fn load_regions(dictionary: &Dictionary, regions: &[ColorRegion]) -> Result<Vec<LoadedMesh>> {
    regions.iter().map(|r| load_region(dictionary, r)).collect()
}

/// The classification volumes of a set of loaded regions
pub fn volumes(loaded: &[LoadedMesh]) -> Vec<MeshVolume> {
    loaded.iter().map(|l| l.volume.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const TETRA: &str = "v 100 100 100\nv 200 100 100\nv 100 200 100\nv 100 100 200\nf 1 3 2\nf 1 2 4\nf 1 4 3\nf 2 3 4\n";

    #[test]
    fn test_load_regions_through_dictionary() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("models")).unwrap();
        fs::write(dir.path().join("models/red.obj"), TETRA).unwrap();

        let dict = Dictionary::open(dir.path()).unwrap();
        let regions = vec![ColorRegion { mesh_path: "/models/red.obj".to_string() }];
        let loaded = load_regions(&dict, &regions).unwrap();

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].mesh_path, "/models/red.obj");
        assert_eq!(loaded[0].volume.triangles().len(), 4);
        assert!(loaded[0].volume.contains(&conceptspace_core::Point3f::new(120.0, 120.0, 120.0)));
    }

    #[test]
    fn test_region_without_faces_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("points.obj"), "v 0 0 0\nv 1 1 1\n").unwrap();

        let dict = Dictionary::open(dir.path()).unwrap();
        let region = ColorRegion { mesh_path: "points.obj".to_string() };
        match load_region(&dict, &region) {
            Err(Error::InvalidData(msg)) => assert_eq!(msg, "No mesh geometry found in points.obj"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_missing_region_file() {
        let dir = tempfile::tempdir().unwrap();
        let dict = Dictionary::open(dir.path()).unwrap();
        let regions = vec![ColorRegion { mesh_path: "nope.obj".to_string() }];
        assert!(matches!(load_regions(&dict, &regions), Err(Error::NotFound(_))));
    }
}
