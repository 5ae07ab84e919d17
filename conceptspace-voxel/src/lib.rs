//! Point-in-mesh voxelization for conceptspace
//!
//! This crate classifies points against closed triangle meshes by ray
//! casting and fills RGBA volume textures whose texel coordinates are their
//! own RGB color. Texels inside any color region are opaque, the rest are
//! faint, so a shader sampling the volume shows which colors a word can take.

pub mod ray;
pub mod point_in_mesh;
pub mod grid;
pub mod texture;
pub mod gamut;
pub mod region;

pub use ray::*;
pub use point_in_mesh::*;
pub use grid::*;
pub use texture::*;
pub use gamut::*;
pub use region::*;
