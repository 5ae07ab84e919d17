//! Core data structures and traits for conceptspace
//!
//! This crate provides the geometry shared by the shape, taste and color
//! spaces: points, bounding boxes, triangle meshes, triangle extraction,
//! transforms, parametric shapes, color conversion and taste profiles.

pub mod point;
pub mod bounds;
pub mod mesh;
pub mod triangle;
pub mod traits;
pub mod transform;
pub mod shapes;
pub mod color;
pub mod taste;
pub mod error;

pub use point::*;
pub use bounds::*;
pub use mesh::*;
pub use triangle::*;
pub use traits::*;
pub use transform::*;
pub use shapes::*;
pub use color::*;
pub use taste::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3, Matrix4};

// Type aliases for easier imports
pub type Point = Point3f;
pub type Mesh = TriangleMesh;
