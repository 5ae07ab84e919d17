//! RGBA volume textures of the color space
//!
//! Texel `(x, y, z)` stores its own world position as RGB and an alpha that
//! says whether that color lies inside one of the word's color regions. The
//! byte layout is what a 3D texture upload expects: four bytes per texel,
//! x fastest, then y, then z.

use crate::grid::{
    voxel_index, voxel_to_unit_coord, voxel_to_world_position, world_coord_to_rgb, TEXTURE_SIZE,
};
use crate::point_in_mesh::MeshVolume;
use conceptspace_core::{Error, Point3f, Result, RgbBox, UnitRgb};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

pub const OPAQUE_ALPHA: u8 = 255;
pub const TRANSPARENT_ALPHA: u8 = 26;

const CHANNELS: usize = 4;

/// Settings for texture generation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureConfig {
    /// Voxels per axis
    pub size: usize,
    /// Alpha of texels inside a color region (or of every texel when there are no regions)
    pub opaque_alpha: u8,
    /// Alpha of texels outside every region
    pub transparent_alpha: u8,
    /// Fill z-slices on the rayon pool
    pub parallel: bool,
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self {
            size: TEXTURE_SIZE,
            opaque_alpha: OPAQUE_ALPHA,
            transparent_alpha: TRANSPARENT_ALPHA,
            parallel: true,
        }
    }
}

impl TextureConfig {
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.size < 2 {
            return Err(Error::InvalidData(format!(
                "Texture size must be at least 2, got {}",
                self.size
            )));
        }
        if self.opaque_alpha == self.transparent_alpha {
            return Err(Error::InvalidData(format!(
                "Opaque and transparent alpha must differ, both are {}",
                self.opaque_alpha
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextureFormat {
    Rgba8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    Nearest,
    Linear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WrapMode {
    ClampToEdge,
    Repeat,
}

/// Sampling state a renderer should use for the volume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureDescriptor {
    pub width: usize,
    pub height: usize,
    pub depth: usize,
    pub format: TextureFormat,
    pub min_filter: FilterMode,
    pub mag_filter: FilterMode,
    pub wrap: [WrapMode; 3],
}

impl TextureDescriptor {
    /// Cubic RGBA8 volume, nearest sampling, clamped on every axis
    pub fn color_volume(size: usize) -> Self {
        Self {
            width: size,
            height: size,
            depth: size,
            format: TextureFormat::Rgba8,
            min_filter: FilterMode::Nearest,
            mag_filter: FilterMode::Nearest,
            wrap: [WrapMode::ClampToEdge; 3],
        }
    }
}

/// A cubic RGBA8 volume
#[derive(Debug, Clone, PartialEq)]
pub struct Texture3D {
    pub size: usize,
    pub data: Vec<u8>,
    pub descriptor: TextureDescriptor,
    /// Alpha marking texels inside a region
    pub opaque_alpha: u8,
}

impl Texture3D {
    /// RGBA of the texel at `(x, y, z)`
    pub fn texel(&self, x: usize, y: usize, z: usize) -> Option<[u8; 4]> {
        if x >= self.size || y >= self.size || z >= self.size {
            return None;
        }
        let i = voxel_index(x, y, z, self.size) * CHANNELS;
        Some([self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]])
    }

    /// Raw bytes of one z-slice
    pub fn slice(&self, z: usize) -> Option<&[u8]> {
        let len = self.size * self.size * CHANNELS;
        self.data.get(z * len..(z + 1) * len)
    }

    /// Number of texels whose alpha equals `alpha`
    pub fn count_alpha(&self, alpha: u8) -> usize {
        self.data.chunks_exact(CHANNELS).filter(|t| t[3] == alpha).count()
    }

    /// Number of texels inside a region
    pub fn occupancy(&self) -> usize {
        self.count_alpha(self.opaque_alpha)
    }

    /// Write the texel bytes as-is
    pub fn write_raw<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path.as_ref(), &self.data)?;
        info!(path = %path.as_ref().display(), bytes = self.data.len(), "wrote volume texture");
        Ok(())
    }

    /// Write the descriptor as a JSON sidecar
    pub fn write_descriptor<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.descriptor)
            .map_err(|e| Error::InvalidData(format!("Failed to encode texture descriptor: {}", e)))?;
        fs::write(path.as_ref(), json)?;
        Ok(())
    }
}

/// Fill one z-slice; `alpha` decides each texel's alpha from its world
/// position and its normalized grid position
fn fill_slice<F>(slice: &mut [u8], z: usize, size: usize, alpha: &F)
where
    F: Fn(&Point3f, &UnitRgb) -> u8 + Sync,
{
    let unit_z = voxel_to_unit_coord(z, size);
    for y in 0..size {
        let unit_y = voxel_to_unit_coord(y, size);
        for x in 0..size {
            let unit = UnitRgb::new(voxel_to_unit_coord(x, size), unit_y, unit_z);
            let world = voxel_to_world_position(x, y, z, size);
            let [r, g, b] = world_coord_to_rgb(&world);
            let i = (y * size + x) * CHANNELS;
            slice[i] = r;
            slice[i + 1] = g;
            slice[i + 2] = b;
            slice[i + 3] = alpha(&world, &unit);
        }
    }
}

fn fill_volume<F>(config: &TextureConfig, alpha: F) -> Result<Texture3D>
where
    F: Fn(&Point3f, &UnitRgb) -> u8 + Sync,
{
    config.validate()?;

    let size = config.size;
    let slice_len = size * size * CHANNELS;
    let mut data = vec![0u8; size * slice_len];

    let start = Instant::now();
    if config.parallel {
        data.par_chunks_mut(slice_len)
            .enumerate()
            .for_each(|(z, slice)| fill_slice(slice, z, size, &alpha));
    } else {
        data.chunks_mut(slice_len)
            .enumerate()
            .for_each(|(z, slice)| fill_slice(slice, z, size, &alpha));
    }
    debug!(
        size,
        parallel = config.parallel,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "filled volume texture"
    );

    Ok(Texture3D {
        size,
        data,
        descriptor: TextureDescriptor::color_volume(size),
        opaque_alpha: config.opaque_alpha,
    })
}

/// Build the color-space texture for a set of color regions.
///
/// With no regions every texel is opaque. Otherwise a texel is opaque when
/// its world position is inside any region and transparent elsewhere.
///
/// Containment uses plain ray parity along +X, so a texel whose ray crosses
/// a shared edge or vertex of a region counts that crossing twice and lands
/// on the wrong side. Axis-aligned regions whose faces are split along a
/// diagonal that passes through texel centres lose that whole diagonal; keep
/// region vertices off the texel lattice.
pub fn generate_color_space_texture(meshes: &[MeshVolume], config: &TextureConfig) -> Result<Texture3D> {
    generate_region_texture(meshes, None, config)
}

/// Build the color-space texture for a normalized RGB box.
///
/// Texels whose normalized grid position lies in the box (bounds inclusive)
/// are opaque, the rest transparent. Without a box every texel is opaque.
pub fn generate_box_texture(region: Option<&RgbBox>, config: &TextureConfig) -> Result<Texture3D> {
    generate_region_texture(&[], region, config)
}

/// Union of mesh regions and an optional RGB box. A texel is opaque when it
/// is inside the box or any mesh; with neither, every texel is opaque.
pub fn generate_region_texture(
    meshes: &[MeshVolume],
    rgb_box: Option<&RgbBox>,
    config: &TextureConfig,
) -> Result<Texture3D> {
    let opaque = config.opaque_alpha;
    let transparent = config.transparent_alpha;
    let unrestricted = meshes.is_empty() && rgb_box.is_none();

    let texture = fill_volume(config, |world, unit| {
        let in_box = rgb_box.is_some_and(|b| b.contains(unit));
        if unrestricted || in_box || meshes.iter().any(|m| m.contains(world)) {
            opaque
        } else {
            transparent
        }
    })?;

    if !unrestricted {
        info!(
            regions = meshes.len(),
            rgb_box = rgb_box.is_some(),
            inside = texture.occupancy(),
            total = config.size.pow(3),
            "classified color volume"
        );
    }
    Ok(texture)
}

/// The plain color cube with one alpha for every texel
pub fn generate_uniform_texture(alpha: u8, config: &TextureConfig) -> Result<Texture3D> {
    fill_volume(config, |_, _| alpha)
}
