//! Voxelizing a word's color regions
//!
//! Builds a throwaway dictionary with one word whose color region is an
//! octahedron around mid-grey, then fills a color-space volume texture from it.

use std::fs;

use conceptspace_core::{Transformable, Transform3D, Vector3f};
use conceptspace_io::{parse_obj, write_mesh, Dictionary};
use conceptspace_voxel::{
    generate_color_space_texture, load_regions, volumes, TextureConfig, COLOR_SPACE_CENTER,
};

const OCTAHEDRON: &str = "\
v 1 0 0
v -1 0 0
v 0 1 0
v 0 -1 0
v 0 0 1
v 0 0 -1
f 1 3 5
f 3 2 5
f 2 4 5
f 4 1 5
f 3 1 6
f 2 3 6
f 4 2 6
f 1 4 6
";

fn main() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let models = dir.path().join("models");
    fs::create_dir_all(&models)?;

    let mut region = parse_obj(OCTAHEDRON)?;
    region.transform(
        &(Transform3D::translation(Vector3f::new(
            COLOR_SPACE_CENTER + 3.0,
            COLOR_SPACE_CENTER - 2.0,
            COLOR_SPACE_CENTER + 1.0,
        )) * Transform3D::uniform_scaling(80.0)),
    );
    write_mesh(&region, models.join("grey.obj"))?;

    fs::write(
        dir.path().join("stone.json"),
        r#"{
            "name": "stone",
            "shape": { "modelPath": "/models/grey.obj", "targetSize": 20.0, "unit": "cm" },
            "taste": { "sweet": 0.0, "sour": 0.0, "salty": 0.1, "bitter": 0.2, "umami": 0.0 },
            "color": { "colorRegions": [ { "meshPath": "/models/grey.obj" } ] }
        }"#,
    )?;

    let dictionary = Dictionary::open(dir.path())?;
    let item = dictionary.load("stone")?;
    let loaded = load_regions(&dictionary, &item.color.color_regions)?;

    let config = TextureConfig::default().with_size(32);
    let texture = generate_color_space_texture(&volumes(&loaded), &config)?;

    let inside = texture.occupancy();
    println!(
        "{}: {} region(s), {} of {} texels inside",
        item.name,
        loaded.len(),
        inside,
        texture.size.pow(3)
    );

    if let Some(center) = texture.texel(16, 16, 16) {
        println!("texel (16, 16, 16) = {:?}", center);
    }

    Ok(())
}
