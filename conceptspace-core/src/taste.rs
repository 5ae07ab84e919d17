//! Five-axis taste profiles and their radar-chart geometry

use crate::mesh::TriangleMesh;
use crate::point::*;
use serde::{Deserialize, Serialize};

/// Axis names, in radar order
pub const TASTE_NAMES: [&str; 5] = ["sweet", "sour", "salty", "bitter", "umami"];

/// Lift of the filled polygon above the grid plane, avoids z-fighting
const POLYGON_LIFT: f32 = 0.01;

/// Intensity of each basic taste, nominally in 0..=1
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TasteProfile {
    pub sweet: f32,
    pub sour: f32,
    pub salty: f32,
    pub bitter: f32,
    pub umami: f32,
}

/// Position on the radar plane (XZ) for axis `index` at `distance` from the
/// center. Axis 0 points to -Z, subsequent axes step 72 degrees.
pub fn radar_position(index: usize, distance: f32) -> Point3f {
    let angle = (index as f32 * 72.0 - 90.0).to_radians();
    Point3f::new(angle.cos() * distance, 0.0, angle.sin() * distance)
}

impl TasteProfile {
    pub fn values(&self) -> [f32; 5] {
        [self.sweet, self.sour, self.salty, self.bitter, self.umami]
    }

    /// Value by axis name
    pub fn get(&self, name: &str) -> Option<f32> {
        TASTE_NAMES
            .iter()
            .position(|&n| n == name)
            .map(|i| self.values()[i])
    }

    pub fn is_finite(&self) -> bool {
        self.values().iter().all(|v| v.is_finite())
    }

    /// The five polygon corners, each at `radius * value` along its axis
    pub fn radar_polygon(&self, radius: f32) -> [Point3f; 5] {
        let values = self.values();
        std::array::from_fn(|i| {
            let mut p = radar_position(i, radius * values[i]);
            p.y = POLYGON_LIFT;
            p
        })
    }

    /// Filled polygon as a fan of five triangles around the center
    pub fn radar_mesh(&self, radius: f32) -> TriangleMesh {
        let mut mesh = TriangleMesh::new();
        let center = mesh.add_vertex(Point3f::new(0.0, POLYGON_LIFT, 0.0));
        let corners: Vec<usize> = self
            .radar_polygon(radius)
            .iter()
            .map(|p| mesh.add_vertex(*p))
            .collect();

        for i in 0..corners.len() {
            let next = (i + 1) % corners.len();
            mesh.add_face([center, corners[i], corners[next]]);
        }

        mesh.compute_vertex_normals();
        mesh
    }
}

/// Concentric closed pentagons for the radar grid. Each outline repeats its
/// first corner at the end.
pub fn radar_grid(radius: f32, levels: usize) -> Vec<[Point3f; 6]> {
    (1..=levels)
        .map(|level| {
            let level_radius = level as f32 / levels as f32 * radius;
            std::array::from_fn(|i| radar_position(i % 5, level_radius))
        })
        .collect()
}

/// Radial axes from the center out to `radius`
pub fn radar_axes(radius: f32) -> [[Point3f; 2]; 5] {
    std::array::from_fn(|i| [Point3f::origin(), radar_position(i, radius)])
}
