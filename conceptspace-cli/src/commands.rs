//! Subcommand implementations. Results go to stdout, diagnostics to the log.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{bail, Context};
use conceptspace_core::{
    generate_apple_shape, rgb_to_hex, scale_to_target_size, AppleParams, Bounded, Point3f, RgbBox,
    TASTE_NAMES,
};
use conceptspace_io::{read_mesh, write_mesh, Dictionary};
use conceptspace_voxel::{
    gamut_boundary_points, gamut_samples, generate_region_texture, load_regions, volumes,
    GamutSampling, LoadedMesh, MeshVolume, TextureConfig,
};
use tracing::info;

use crate::config::Config;

fn open_dictionary(config: &Config) -> anyhow::Result<Dictionary> {
    let dir = &config.dictionary.dir;
    let dictionary = Dictionary::open(dir)
        .with_context(|| format!("opening dictionary {}", dir.display()))?;
    Ok(match &config.dictionary.asset_root {
        Some(root) => dictionary.with_asset_root(root),
        None => dictionary,
    })
}

pub fn apple(params: &AppleParams, output: &Path) -> anyhow::Result<()> {
    let mesh = generate_apple_shape(params)?;
    write_mesh(&mesh, output).with_context(|| format!("writing {}", output.display()))?;

    let size = mesh.bounding_box().size();
    println!(
        "apple: {} vertices, {} faces, extent {:.3} x {:.3} x {:.3}",
        mesh.vertex_count(),
        mesh.face_count(),
        size.x,
        size.y,
        size.z
    );
    Ok(())
}

pub fn inspect(path: &Path) -> anyhow::Result<()> {
    let mesh = read_mesh(path).with_context(|| format!("reading {}", path.display()))?;
    mesh.validate()?;

    let bbox = mesh.bounding_box();
    let size = bbox.size();
    let area: f32 = mesh.triangles()?.iter().map(|t| t.area()).sum();

    println!("{}", path.display());
    println!("  vertices: {}", mesh.vertex_count());
    println!("  faces:    {}", mesh.face_count());
    println!("  normals:  {}", if mesh.normals.is_some() { "yes" } else { "no" });
    println!("  min:      ({:.4}, {:.4}, {:.4})", bbox.min.x, bbox.min.y, bbox.min.z);
    println!("  max:      ({:.4}, {:.4}, {:.4})", bbox.max.x, bbox.max.y, bbox.max.z);
    println!("  size:     ({:.4}, {:.4}, {:.4})", size.x, size.y, size.z);
    println!("  area:     {:.4}", area);
    Ok(())
}

pub fn shape(config: &Config, word: &str, output: Option<&Path>) -> anyhow::Result<()> {
    let dictionary = open_dictionary(config)?;
    let item = dictionary.load(word)?;

    let model = dictionary.resolve(&item.shape.model_path);
    let mesh = read_mesh(&model).with_context(|| format!("reading model {}", model.display()))?;
    let original = mesh.bounding_box().max_extent();
    let (scaled, factor) = scale_to_target_size(&mesh, item.shape.target_size)?;

    let unit = if item.shape.unit.trim().is_empty() {
        config.shape.default_unit.as_str()
    } else {
        item.shape.unit.as_str()
    };
    info!(word, model = %item.shape.model_path, factor, "scaled model");

    println!(
        "{}: {} faces, largest extent {:.4} -> {} {} (x{:.4})",
        item.name,
        scaled.face_count(),
        original,
        item.shape.target_size,
        unit,
        factor
    );

    if let Some(output) = output {
        write_mesh(&scaled, output).with_context(|| format!("writing {}", output.display()))?;
    }
    Ok(())
}

pub fn voxelize(
    config: &Config,
    texture_config: &TextureConfig,
    word: Option<&str>,
    meshes: &[std::path::PathBuf],
    output: &Path,
) -> anyhow::Result<()> {
    let descriptor_path = output.with_extension("json");
    if descriptor_path == output {
        bail!("output {} would be overwritten by its descriptor", output.display());
    }

    let mut loaded: Vec<LoadedMesh> = Vec::new();
    let mut rgb_box: Option<RgbBox> = None;

    if let Some(word) = word {
        let dictionary = open_dictionary(config)?;
        let item = dictionary.load(word)?;
        if item.color.color_regions.is_empty() && item.color.color_region.is_none() {
            info!(word, "word has no color regions");
        }
        loaded.extend(load_regions(&dictionary, &item.color.color_regions)?);
        rgb_box = item.color.color_region;
    }
    for path in meshes {
        loaded.push(LoadedMesh::load(path).with_context(|| format!("loading {}", path.display()))?);
    }

    let texture = generate_region_texture(&volumes(&loaded), rgb_box.as_ref(), texture_config)?;

    texture.write_raw(output)?;
    texture.write_descriptor(&descriptor_path)?;

    let total = texture.size.pow(3);
    let inside = texture.occupancy();
    println!(
        "{}^3 volume from {} region(s){}: {} of {} texels inside ({:.2}%)",
        texture.size,
        loaded.len(),
        if rgb_box.is_some() { " and an RGB box" } else { "" },
        inside,
        total,
        100.0 * inside as f64 / total as f64
    );
    println!("wrote {} and {}", output.display(), descriptor_path.display());
    Ok(())
}

pub fn gamut(sampling: &GamutSampling, all: bool, output: Option<&Path>) -> anyhow::Result<()> {
    let rows: Vec<String> = if all {
        let samples = gamut_samples(sampling)?;
        println!("{} in-gamut samples at step {}", samples.len(), sampling.step);
        samples
            .iter()
            .map(|(p, rgb)| format!("{},{},{},{}", p.x, p.y, p.z, rgb_to_hex(*rgb)))
            .collect()
    } else {
        let points = gamut_boundary_points(sampling)?;
        println!("{} gamut boundary points at step {}", points.len(), sampling.step);
        points.iter().map(|p| format!("{},{},{}", p.x, p.y, p.z)).collect()
    };

    if let Some(output) = output {
        let file = File::create(output).with_context(|| format!("creating {}", output.display()))?;
        let mut out = BufWriter::new(file);
        writeln!(out, "{}", if all { "a,l,b,hex" } else { "a,l,b" })?;
        for row in &rows {
            writeln!(out, "{}", row)?;
        }
        out.flush()?;
    }
    Ok(())
}

pub fn taste(config: &Config, word: &str, radius: f32) -> anyhow::Result<()> {
    let dictionary = open_dictionary(config)?;
    let item = dictionary.load(word)?;
    let polygon = item.taste.radar_polygon(radius);

    println!("{}", item.name);
    for ((name, value), vertex) in TASTE_NAMES.iter().zip(item.taste.values()).zip(polygon) {
        println!(
            "  {:<7}{:>6.2}   ({:.3}, {:.3}, {:.3})",
            name, value, vertex.x, vertex.y, vertex.z
        );
    }
    Ok(())
}

/// Prints and returns whether `point` is inside the mesh
pub fn hit(path: &Path, point: [f32; 3]) -> anyhow::Result<bool> {
    let mesh = read_mesh(path).with_context(|| format!("reading {}", path.display()))?;
    let volume = MeshVolume::from_mesh(&mesh)?;
    let p = Point3f::new(point[0], point[1], point[2]);

    let inside = volume.contains(&p);
    let verdict = if inside { "inside" } else { "outside" };
    println!("({}, {}, {}) is {}", p.x, p.y, p.z, verdict);
    Ok(inside)
}

pub fn words(config: &Config) -> anyhow::Result<()> {
    let dictionary = open_dictionary(config)?;
    for word in dictionary.words()? {
        println!("{}", word);
    }
    Ok(())
}
