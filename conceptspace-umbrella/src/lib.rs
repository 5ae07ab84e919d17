//! # conceptspace
//!
//! Conceptual spaces for words: how a thing is shaped, how it tastes and
//! which colors it can take.
//!
//! This is the umbrella crate that re-exports the individual crates. Depend on
//! those directly for tighter control over what gets pulled in.
//!
//! ## Features
//!
//! - **Core**: meshes, triangles, bounds, transforms, the apple shape, LAB color
//!   and taste profiles
//! - **I/O**: OBJ reading and writing, the word dictionary
//! - **Voxel**: ray casting, point-in-mesh tests, color-space volume textures and
//!   the gamut lattice and boundary
//!
//! ## Quick Start
//!
//! ```rust
//! use conceptspace::prelude::*;
//!
//! let apple = generate_apple_shape(&AppleParams::default()).unwrap();
//! let volume = MeshVolume::from_mesh(&apple).unwrap();
//! assert!(volume.contains(&Point3f::new(0.1, 0.2, 0.3)));
//! assert!(!volume.contains(&Point3f::new(6.0, 0.2, 0.3)));
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: enables `io` and `voxel`
//! - `io`: file formats and the dictionary
//! - `voxel`: point-in-mesh and volume textures (implies `io`)
//! - `all`: everything

pub use conceptspace_core::*;

#[cfg(feature = "io")]
pub use conceptspace_io as io;

#[cfg(feature = "voxel")]
pub use conceptspace_voxel as voxel;

/// Convenient imports for common use cases
pub mod prelude {
    pub use conceptspace_core::*;

    #[cfg(feature = "io")]
    pub use conceptspace_io::{read_mesh, write_mesh, Dictionary, DictionaryItem};

    #[cfg(feature = "voxel")]
    pub use conceptspace_voxel::{
        gamut_boundary_points, gamut_samples, generate_box_texture, generate_color_space_texture,
        generate_region_texture, is_point_in_mesh, GamutSampling, LoadedMesh, MeshVolume, Texture3D,
        TextureConfig,
    };
}
