//! I/O operations for conceptspace
//!
//! This crate reads and writes OBJ meshes and loads dictionary entries that
//! describe a word's shape, taste and color regions.

pub mod obj;
pub mod dictionary;
pub mod error;

#[cfg(test)]
mod tests;

pub use error::*;
pub use obj::{load_obj, parse_obj, write_obj, ObjReader, ObjWriter};
pub use dictionary::{ColorEntry, ColorRegion, Dictionary, DictionaryItem, ShapeEntry, parse_entry};

use conceptspace_core::{Result, TriangleMesh};

/// Trait for reading meshes from files
pub trait MeshReader {
    fn read_mesh<P: AsRef<std::path::Path>>(path: P) -> Result<TriangleMesh>;
}

/// Trait for writing meshes to files
pub trait MeshWriter {
    fn write_mesh<P: AsRef<std::path::Path>>(mesh: &TriangleMesh, path: P) -> Result<()>;
}

fn extension(path: &std::path::Path) -> Option<String> {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase())
}

/// Auto-detect format and read mesh
pub fn read_mesh<P: AsRef<std::path::Path>>(path: P) -> Result<TriangleMesh> {
    let path = path.as_ref();
    match extension(path).as_deref() {
        Some("obj") => obj::ObjReader::read_mesh(path),
        _ => Err(conceptspace_core::Error::UnsupportedFormat(
            format!("Unsupported mesh format: {:?}", path.extension())
        )),
    }
}

/// Auto-detect format and write mesh
pub fn write_mesh<P: AsRef<std::path::Path>>(mesh: &TriangleMesh, path: P) -> Result<()> {
    let path = path.as_ref();
    match extension(path).as_deref() {
        Some("obj") => obj::ObjWriter::write_mesh(mesh, path),
        _ => Err(conceptspace_core::Error::UnsupportedFormat(
            format!("Unsupported mesh format: {:?}", path.extension())
        )),
    }
}
