//! Basic usage example for conceptspace
//!
//! This example demonstrates:
//! - Generating the apple mesh
//! - Scaling it to a real-world size
//! - Point-in-mesh queries
//! - Converting LAB colors and reading a taste radar

use conceptspace_core::{
    generate_apple_shape, lab_to_rgb, rgb_to_hex, scale_to_target_size, AppleParams, Bounded, Lab,
    Point3f, TasteProfile, TASTE_NAMES,
};
use conceptspace_voxel::MeshVolume;

fn main() -> anyhow::Result<()> {
    println!("conceptspace Example");
    println!("====================");

    let apple = generate_apple_shape(&AppleParams::default())?;
    let size = apple.bounding_box().size();
    println!(
        "Apple: {} vertices, {} faces, extent {:.2} x {:.2} x {:.2}",
        apple.vertex_count(),
        apple.face_count(),
        size.x,
        size.y,
        size.z
    );

    let (scaled, factor) = scale_to_target_size(&apple, 10.0)?;
    println!(
        "Scaled by {:.3} to a largest extent of {:.2}",
        factor,
        scaled.bounding_box().max_extent()
    );

    let volume = MeshVolume::from_mesh(&apple)?;
    for p in [
        Point3f::new(0.1, 0.2, 0.3),
        Point3f::new(1.0, 0.5, -1.1),
        Point3f::new(6.0, 0.2, 0.3),
    ] {
        println!(
            "  ({:>4.1}, {:>4.1}, {:>4.1}) inside: {}",
            p.x,
            p.y,
            p.z,
            volume.contains(&p)
        );
    }

    println!("\nColors:");
    for lab in [Lab::new(50.0, 0.0, 0.0), Lab::new(60.0, 20.0, 20.0), Lab::new(50.0, 120.0, -120.0)] {
        match lab_to_rgb(lab) {
            Some(rgb) => println!("  L*a*b* ({}, {}, {}) -> {}", lab.l, lab.a, lab.b, rgb_to_hex(rgb)),
            None => println!("  L*a*b* ({}, {}, {}) is out of gamut", lab.l, lab.a, lab.b),
        }
    }

    println!("\nTaste radar:");
    let taste = TasteProfile {
        sweet: 0.8,
        sour: 0.3,
        salty: 0.0,
        bitter: 0.1,
        umami: 0.0,
    };
    for (name, vertex) in TASTE_NAMES.iter().zip(taste.radar_polygon(1.0)) {
        println!("  {:<7}({:.3}, {:.3}, {:.3})", name, vertex.x, vertex.y, vertex.z);
    }

    println!("\nExample completed successfully!");
    Ok(())
}
