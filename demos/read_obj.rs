//! Example demonstrating OBJ reading and writing
//!
//! Parses an OBJ with quads, shared normals and negative indices, then
//! writes it back out and reads the result again.

use conceptspace_io::{parse_obj, read_mesh, write_mesh};

const SAMPLE: &str = "\
# unit cube, quads, no normals
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
v 0 0 1
v 1 0 1
v 1 1 1
v 0 1 1
f 1 4 3 2
f 5 6 7 8
f 1 2 6 5
f 2 3 7 6
f 3 4 8 7
f -4 -8 -5 -1
";

fn main() -> anyhow::Result<()> {
    println!("=== OBJ Reader Example ===\n");

    let mut mesh = parse_obj(SAMPLE)?;
    println!(
        "Parsed cube: {} vertices, {} triangles, normals: {}",
        mesh.vertex_count(),
        mesh.face_count(),
        mesh.normals.is_some()
    );

    mesh.compute_vertex_normals();

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("cube.obj");
    write_mesh(&mesh, &path)?;
    println!("Wrote {}", path.display());

    let reread = read_mesh(&path)?;
    println!(
        "Read back: {} vertices, {} triangles, normals: {}",
        reread.vertex_count(),
        reread.face_count(),
        reread.normals.is_some()
    );

    for (i, v) in reread.vertices.iter().take(3).enumerate() {
        println!("  Vertex {}: ({:.2}, {:.2}, {:.2})", i, v.x, v.y, v.z);
    }

    Ok(())
}
