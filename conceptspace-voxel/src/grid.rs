//! Color-space coordinates of the voxel grid
//!
//! World space for the color volume is the RGB cube itself: each axis runs
//! from 0 to 255 and a point's coordinates are its red, green and blue
//! values. The texture grid samples that cube independently of its size,
//! with voxel 0 at 0 and voxel `size - 1` at 255.

use conceptspace_core::Point3f;

pub const COLOR_SPACE_MIN: f32 = 0.0;
pub const COLOR_SPACE_MAX: f32 = 255.0;
pub const COLOR_SPACE_SIZE: f32 = COLOR_SPACE_MAX - COLOR_SPACE_MIN;
pub const COLOR_SPACE_CENTER: f32 = COLOR_SPACE_SIZE / 2.0;

/// Default texture resolution along each axis
pub const TEXTURE_SIZE: usize = 64;

/// Normalized position (0..=1) of voxel `index` on an axis of `size` voxels.
///
/// An axis of fewer than two voxels has no extent; every index maps to 0.
#[inline]
pub fn voxel_to_unit_coord(index: usize, size: usize) -> f32 {
    if size < 2 {
        return 0.0;
    }
    index as f32 / (size - 1) as f32
}

/// World coordinate (0..=255) of voxel `index` on an axis of `size` voxels
#[inline]
pub fn voxel_to_world_coord(index: usize, size: usize) -> f32 {
    voxel_to_unit_coord(index, size) * COLOR_SPACE_MAX
}

#[inline]
pub fn voxel_to_world_position(x: usize, y: usize, z: usize, size: usize) -> Point3f {
    Point3f::new(
        voxel_to_world_coord(x, size),
        voxel_to_world_coord(y, size),
        voxel_to_world_coord(z, size),
    )
}

/// Normalized texture coordinate (0..=1) of a world coordinate
#[inline]
pub fn world_to_texture_coord(world: f32) -> f32 {
    world / COLOR_SPACE_MAX
}

/// World coordinates are the color; fractions are truncated
#[inline]
pub fn world_coord_to_rgb(p: &Point3f) -> [u8; 3] {
    [p.x as u8, p.y as u8, p.z as u8]
}

/// Linear texel index, x fastest
#[inline]
pub fn voxel_index(x: usize, y: usize, z: usize, size: usize) -> usize {
    z * size * size + y * size + x
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_degenerate_axis_maps_to_origin() {
        assert_eq!(voxel_to_unit_coord(0, 0), 0.0);
        assert_eq!(voxel_to_unit_coord(3, 1), 0.0);
        assert_eq!(voxel_to_world_coord(0, 1), 0.0);
        assert_eq!(voxel_to_world_coord(5, 0), 0.0);
        assert_eq!(voxel_to_unit_coord(2, 5), 0.5);
        assert_eq!(voxel_to_unit_coord(4, 5), 1.0);
    }

    #[test]
    fn test_constants() {
        assert_eq!(COLOR_SPACE_SIZE, 255.0);
        assert_eq!(COLOR_SPACE_CENTER, 127.5);
    }

    #[test]
    fn test_endpoints_map_to_cube_corners() {
        assert_eq!(voxel_to_world_coord(0, 64), 0.0);
        assert_relative_eq!(voxel_to_world_coord(63, 64), 255.0);
        assert_relative_eq!(voxel_to_world_coord(21, 64), 85.0);
    }

    #[test]
    fn test_rgb_truncates() {
        let p = voxel_to_world_position(1, 62, 63, 64);
        // 255/63 = 4.047..., 62*255/63 = 250.95...
        assert_eq!(world_coord_to_rgb(&p), [4, 250, 255]);
    }

    #[test]
    fn test_texture_coord() {
        assert_relative_eq!(world_to_texture_coord(COLOR_SPACE_CENTER), 0.5);
    }

    #[test]
    fn test_voxel_index() {
        assert_eq!(voxel_index(0, 0, 0, 4), 0);
        assert_eq!(voxel_index(3, 0, 0, 4), 3);
        assert_eq!(voxel_index(0, 1, 0, 4), 4);
        assert_eq!(voxel_index(1, 2, 3, 4), 57);
    }
}
