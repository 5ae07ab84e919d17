//! Parametric shape generation

use crate::error::{Error, Result};
use crate::mesh::TriangleMesh;
use crate::point::*;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Parameters of the procedural apple
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppleParams {
    /// Diameter in centimeters
    pub diameter: f32,
    /// Segments around the circumference
    pub segments: usize,
    /// Rings from top to bottom
    pub rings: usize,
}

impl Default for AppleParams {
    fn default() -> Self {
        Self {
            diameter: 7.5,
            segments: 32,
            rings: 24,
        }
    }
}

/// Radial distance of the apple surface at polar angle `v` (0 at the stem)
fn apple_profile(radius: f32, v: f32) -> f32 {
    let mut r = radius * (0.9 + 0.3 * v.sin() - 0.2 * (2.0 * v).cos());

    // Stem dimple
    if v < PI / 6.0 {
        r *= 0.7 + 0.3 * (v / (PI / 6.0));
    }

    if v > 5.0 * PI / 6.0 {
        r *= 0.95;
    }

    r
}

/// Generate an apple-shaped mesh from spherical coordinates, Y up.
///
/// The grid has `(rings + 1) * (segments + 1)` vertices; the seam column is
/// duplicated so every quad is addressed the same way.
pub fn generate_apple_shape(params: &AppleParams) -> Result<TriangleMesh> {
    if !(params.diameter.is_finite() && params.diameter > 0.0) {
        return Err(Error::InvalidData(format!(
            "Apple diameter must be positive, got {}",
            params.diameter
        )));
    }
    if params.segments < 3 || params.rings < 2 {
        return Err(Error::InvalidData(format!(
            "Apple needs at least 3 segments and 2 rings, got {} and {}",
            params.segments, params.rings
        )));
    }

    let radius = params.diameter / 2.0;
    let segments = params.segments;
    let rings = params.rings;

    let mut mesh = TriangleMesh::new();
    mesh.vertices.reserve((rings + 1) * (segments + 1));
    mesh.faces.reserve(rings * segments * 2);

    for ring in 0..=rings {
        let v = (ring as f32 / rings as f32) * PI;
        let r = apple_profile(radius, v);

        for seg in 0..=segments {
            let u = (seg as f32 / segments as f32) * 2.0 * PI;
            mesh.add_vertex(Point3f::new(
                r * v.sin() * u.cos(),
                r * v.cos(),
                r * v.sin() * u.sin(),
            ));
        }
    }

    for ring in 0..rings {
        for seg in 0..segments {
            let a = ring * (segments + 1) + seg;
            let b = a + segments + 1;
            let c = a + 1;
            let d = b + 1;

            mesh.add_face([a, b, c]);
            mesh.add_face([c, b, d]);
        }
    }

    mesh.compute_vertex_normals();
    Ok(mesh)
}

/// Two-point polyline between `start` and `end`
pub fn line_segment(start: Point3f, end: Point3f) -> [Point3f; 2] {
    [start, end]
}

/// Grid lines of the shape space in the XY plane.
///
/// Produces `divisions + 1` vertical lines followed by `divisions + 1`
/// horizontal lines, interleaved per division step.
pub fn axis_grid(extent: [f32; 2], divisions: usize) -> Vec<[Point3f; 2]> {
    let [x_max, y_max] = extent;
    let divisions = divisions.max(1);
    let mut lines = Vec::with_capacity(2 * (divisions + 1));

    for i in 0..=divisions {
        let t = i as f32 / divisions as f32;
        let x = t * x_max;
        let y = t * y_max;
        lines.push(line_segment(Point3f::new(x, 0.0, 0.0), Point3f::new(x, y_max, 0.0)));
        lines.push(line_segment(Point3f::new(0.0, y, 0.0), Point3f::new(x_max, y, 0.0)));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Bounded;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_apple_topology() {
        let mesh = generate_apple_shape(&AppleParams::default()).unwrap();

        assert_eq!(mesh.vertex_count(), 25 * 33);
        assert_eq!(mesh.face_count(), 24 * 32 * 2);
        assert!(mesh.validate().is_ok());
        assert_eq!(mesh.normals.as_ref().map(Vec::len), Some(mesh.vertex_count()));
        assert_eq!(mesh.faces[0], [0, 33, 1]);
        assert_eq!(mesh.faces[1], [1, 33, 34]);
    }

    #[test]
    fn test_apple_poles_follow_profile() {
        let params = AppleParams::default();
        let mesh = generate_apple_shape(&params).unwrap();
        let radius = params.diameter / 2.0;

        // Stem pole: v = 0, profile = radius * 0.7 * (0.9 - 0.2)
        let top = mesh.vertices[0];
        assert_relative_eq!(top.y, radius * 0.7 * 0.7, epsilon = 1e-5);
        assert_relative_eq!(top.x, 0.0, epsilon = 1e-6);

        // Bottom pole: v = PI, profile = radius * 0.95 * (0.9 - 0.2)
        let bottom = mesh.vertices[mesh.vertex_count() - 1];
        assert_relative_eq!(bottom.y, -radius * 0.95 * 0.7, epsilon = 1e-4);
    }

    #[test]
    fn test_apple_is_roughly_diameter_wide() {
        let mesh = generate_apple_shape(&AppleParams::default()).unwrap();
        let size = mesh.bounding_box().size();
        assert!(size.x > 6.0 && size.x < 11.0, "width {}", size.x);
        assert_relative_eq!(size.x, size.z, epsilon = 0.1);
    }

    #[test]
    fn test_apple_rejects_bad_params() {
        let mut params = AppleParams::default();
        params.segments = 2;
        assert!(generate_apple_shape(&params).is_err());

        let params = AppleParams { diameter: -1.0, ..AppleParams::default() };
        assert!(generate_apple_shape(&params).is_err());
    }

    #[test]
    fn test_axis_grid() {
        let lines = axis_grid([10.0, 10.0], 10);
        assert_eq!(lines.len(), 22);
        assert_eq!(lines[2], [Point3f::new(1.0, 0.0, 0.0), Point3f::new(1.0, 10.0, 0.0)]);
        assert_eq!(lines[3], [Point3f::new(0.0, 1.0, 0.0), Point3f::new(10.0, 1.0, 0.0)]);
    }
}
