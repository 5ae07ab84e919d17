//! OBJ format support
//!
//! Reads the geometric subset of Wavefront OBJ (`v`, `vn`, `f`) into a
//! [`TriangleMesh`]. Polygons are fan-triangulated from their first corner
//! and positions are de-duplicated so every emitted vertex is referenced by
//! at least one face.

use crate::error::IoError;
use crate::{MeshReader, MeshWriter};
use conceptspace_core::{Point3f, Result, TriangleMesh, Vector3f};
use std::collections::HashMap;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

pub struct ObjReader;
pub struct ObjWriter;

/// One corner of a face as written in the file, already made 0-based
#[derive(Debug, Clone, Copy)]
struct FaceVertex {
    position: usize,
    normal: Option<usize>,
}

#[derive(Debug)]
struct RawFace {
    line: usize,
    corners: Vec<FaceVertex>,
}

fn parse_error(line: usize, message: impl Into<String>) -> IoError {
    IoError::ParseError {
        line,
        message: message.into(),
    }
}

fn parse_vec3<'a, I>(mut parts: I, line: usize, kind: &str) -> std::result::Result<[f32; 3], IoError>
where
    I: Iterator<Item = &'a str>,
{
    let mut out = [0.0f32; 3];
    for slot in out.iter_mut() {
        let token = parts
            .next()
            .ok_or_else(|| parse_error(line, format!("{} needs three coordinates", kind)))?;
        *slot = token
            .parse::<f32>()
            .map_err(|_| parse_error(line, format!("invalid number '{}' in {}", token, kind)))?;
    }
    Ok(out)
}

/// Turn a 1-based (or negative, relative) OBJ index into a 0-based one.
///
/// Negative indices count back from the elements defined so far.
fn resolve_index(token: &str, defined: usize, line: usize) -> std::result::Result<usize, IoError> {
    let raw: i64 = token
        .parse()
        .map_err(|_| parse_error(line, format!("invalid index '{}'", token)))?;

    match raw {
        0 => Err(parse_error(line, "OBJ indices are 1-based, found 0")),
        i if i > 0 => Ok((i - 1) as usize),
        i => {
            let back = i.unsigned_abs() as usize;
            if back > defined {
                Err(parse_error(line, format!("relative index {} reaches before the first element", i)))
            } else {
                Ok(defined - back)
            }
        }
    }
}

fn parse_face_vertex(
    token: &str,
    positions: usize,
    normals: usize,
    line: usize,
) -> std::result::Result<FaceVertex, IoError> {
    let mut fields = token.split('/');

    let position = match fields.next() {
        Some(p) if !p.is_empty() => resolve_index(p, positions, line)?,
        _ => return Err(parse_error(line, format!("face corner '{}' has no position", token))),
    };

    // Texture coordinate index is not used
    let _ = fields.next();

    let normal = match fields.next() {
        Some(n) if !n.is_empty() => Some(resolve_index(n, normals, line)?),
        _ => None,
    };

    Ok(FaceVertex { position, normal })
}

/// Parse OBJ text into a triangle mesh
pub fn parse_obj(text: &str) -> Result<TriangleMesh> {
    let mut positions: Vec<Point3f> = Vec::new();
    let mut normals: Vec<Vector3f> = Vec::new();
    let mut faces: Vec<RawFace> = Vec::new();

    for (i, raw_line) in text.lines().enumerate() {
        let line = i + 1;
        let trimmed = raw_line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut parts = trimmed.split_whitespace();
        match parts.next() {
            Some("v") => {
                let [x, y, z] = parse_vec3(parts, line, "vertex")?;
                positions.push(Point3f::new(x, y, z));
            }
            Some("vn") => {
                let [x, y, z] = parse_vec3(parts, line, "normal")?;
                normals.push(Vector3f::new(x, y, z));
            }
            Some("f") => {
                let corners = parts
                    .map(|token| parse_face_vertex(token, positions.len(), normals.len(), line))
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                if corners.len() < 3 {
                    return Err(parse_error(line, format!("face has {} vertices, need at least 3", corners.len())).into());
                }
                faces.push(RawFace { line, corners });
            }
            _ => {}
        }
    }

    let mesh = build_mesh(&positions, &normals, &faces)?;
    debug!(
        positions = positions.len(),
        normals = normals.len(),
        faces = faces.len(),
        vertices = mesh.vertex_count(),
        triangles = mesh.face_count(),
        "parsed OBJ"
    );
    Ok(mesh)
}

fn build_mesh(positions: &[Point3f], normals: &[Vector3f], faces: &[RawFace]) -> Result<TriangleMesh> {
    let mut remap: HashMap<usize, usize> = HashMap::new();
    let mut mesh = TriangleMesh::new();
    let mut vertex_normals: Vec<Option<Vector3f>> = Vec::new();

    for face in faces {
        for corner in &face.corners {
            if corner.position >= positions.len() {
                return Err(parse_error(
                    face.line,
                    format!("vertex index {} out of range ({} vertices)", corner.position + 1, positions.len()),
                )
                .into());
            }
            if let Some(n) = corner.normal {
                if n >= normals.len() {
                    return Err(parse_error(
                        face.line,
                        format!("normal index {} out of range ({} normals)", n + 1, normals.len()),
                    )
                    .into());
                }
            }
        }

        let mut emit = |corner: &FaceVertex| -> usize {
            let explicit = corner.normal.map(|n| normals[n]);
            match remap.get(&corner.position) {
                Some(&idx) => {
                    if vertex_normals[idx].is_none() {
                        vertex_normals[idx] = explicit;
                    }
                    idx
                }
                None => {
                    let idx = mesh.add_vertex(positions[corner.position]);
                    // Without an explicit normal index, fall back to the
                    // normal listed at the same position index
                    vertex_normals.push(explicit.or_else(|| normals.get(corner.position).copied()));
                    remap.insert(corner.position, idx);
                    idx
                }
            }
        };

        // Corners are visited in fan order, so first-use numbering matches
        let corners: Vec<usize> = face.corners.iter().map(&mut emit).collect();
        for pair in corners[1..].windows(2) {
            mesh.add_face([corners[0], pair[0], pair[1]]);
        }
    }

    if !vertex_normals.is_empty() && vertex_normals.iter().all(Option::is_some) {
        mesh.normals = Some(vertex_normals.into_iter().flatten().collect());
    }

    Ok(mesh)
}

/// Read and parse an OBJ file
pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<TriangleMesh> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.display().to_string(),
        }
        .into());
    }
    let text = fs::read_to_string(path)?;
    parse_obj(&text)
}

/// Write a mesh as OBJ text
pub fn write_obj<W: Write>(mesh: &TriangleMesh, mut out: W) -> Result<()> {
    mesh.validate()?;

    let write = |out: &mut W| -> std::io::Result<()> {
        writeln!(out, "# conceptspace")?;
        for v in &mesh.vertices {
            writeln!(out, "v {} {} {}", v.x, v.y, v.z)?;
        }
        if let Some(normals) = &mesh.normals {
            for n in normals {
                writeln!(out, "vn {} {} {}", n.x, n.y, n.z)?;
            }
        }
        for f in &mesh.faces {
            let (a, b, c) = (f[0] + 1, f[1] + 1, f[2] + 1);
            if mesh.normals.is_some() {
                writeln!(out, "f {a}//{a} {b}//{b} {c}//{c}")?;
            } else {
                writeln!(out, "f {a} {b} {c}")?;
            }
        }
        out.flush()
    };

    write(&mut out).map_err(|e| {
        IoError::WriteError {
            message: e.to_string(),
        }
        .into()
    })
}

impl MeshReader for ObjReader {
    fn read_mesh<P: AsRef<Path>>(path: P) -> Result<TriangleMesh> {
        load_obj(path)
    }
}

impl MeshWriter for ObjWriter {
    fn write_mesh<P: AsRef<Path>>(mesh: &TriangleMesh, path: P) -> Result<()> {
        let file = fs::File::create(path.as_ref())?;
        write_obj(mesh, BufWriter::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use conceptspace_core::Error;

    const CUBE_QUADS: &str = "\
# unit cube
o cube
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
v 0 0 1
v 1 0 1
v 1 1 1
v 0 1 1
vt 0 0
s off
f 1 4 3 2
f 5 6 7 8
f 1 2 6 5
f 2 3 7 6
f 3 4 8 7
f 4 1 5 8
";

    #[test]
    fn test_quads_are_fan_triangulated() {
        let mesh = parse_obj(CUBE_QUADS).unwrap();
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.face_count(), 12);
        assert!(mesh.normals.is_none());
        // First quad 1 4 3 2 -> (1,4,3) (1,3,2), renumbered in first-use order
        assert_eq!(mesh.faces[0], [0, 1, 2]);
        assert_eq!(mesh.faces[1], [0, 2, 3]);
        assert_eq!(mesh.vertices[1], Point3f::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_unreferenced_vertices_are_dropped() {
        let text = "v 9 9 9\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 2 3 4\n";
        let mesh = parse_obj(text).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.vertices[0], Point3f::origin());
    }

    #[test]
    fn test_slash_forms_and_normals() {
        let text = "\
v 0 0 0
v 1 0 0
v 0 1 0
vt 0 0
vn 0 0 1
vn 0 0 -1
f 1/1/2 2/1/2 3//2
";
        let mesh = parse_obj(text).unwrap();
        let normals = mesh.normals.expect("normals");
        assert_eq!(normals.len(), 3);
        for n in normals {
            assert_relative_eq!(n, Vector3f::new(0.0, 0.0, -1.0));
        }
    }

    #[test]
    fn test_position_indexed_normal_fallback() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 1 0 0\nvn 0 1 0\nvn 0 0 1\nf 1 2 3\n";
        let mesh = parse_obj(text).unwrap();
        let normals = mesh.normals.expect("normals");
        assert_relative_eq!(normals[1], Vector3f::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_partial_normals_are_dropped() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nf 1//1 2 3\n";
        let mesh = parse_obj(text).unwrap();
        assert!(mesh.normals.is_none());
    }

    #[test]
    fn test_negative_indices() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf -3 -2 -1\n";
        let mesh = parse_obj(text).unwrap();
        assert_eq!(mesh.faces, vec![[0, 1, 2]]);
    }

    #[test]
    fn test_parse_errors_carry_line() {
        let bad_number = "v 0 0 0\nv 1 zero 0\n";
        match parse_obj(bad_number) {
            Err(Error::InvalidData(msg)) => assert!(msg.contains("line 2"), "{}", msg),
            other => panic!("unexpected {:?}", other),
        }

        assert!(parse_obj("v 0 0\n").is_err());
        assert!(parse_obj("v 0 0 0\nv 1 0 0\nf 1 2\n").is_err());
        assert!(parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 0 1 2\n").is_err());
        assert!(parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 7\n").is_err());
        assert!(parse_obj("v 0 0 0\nf -2 -1 1\n").is_err());
    }

    #[test]
    fn test_empty_input() {
        let mesh = parse_obj("# nothing\n\n").unwrap();
        assert!(mesh.is_empty());
    }

    #[test]
    fn test_write_then_parse() {
        let mut mesh = parse_obj(CUBE_QUADS).unwrap();
        mesh.compute_vertex_normals();

        let mut buf = Vec::new();
        write_obj(&mesh, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("f 1//1 2//2 3//3"));

        let reparsed = parse_obj(&text).unwrap();
        assert_eq!(reparsed.faces, mesh.faces);
        assert_eq!(reparsed.vertices, mesh.vertices);
        assert!(reparsed.normals.is_some());
    }
}
