use conceptspace_core::{generate_apple_shape, AppleParams, Transform3D, Transformable, Vector3f};
use conceptspace_voxel::{generate_color_space_texture, MeshVolume, TextureConfig};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn apple_region() -> MeshVolume {
    let mut apple = generate_apple_shape(&AppleParams::default()).expect("apple");
    apple.transform(
        &(Transform3D::translation(Vector3f::new(127.5, 127.5, 127.5)) * Transform3D::uniform_scaling(15.0)),
    );
    MeshVolume::from_mesh(&apple).expect("volume")
}

fn bench_texture_fill(c: &mut Criterion) {
    let regions = vec![apple_region()];
    let mut group = c.benchmark_group("color_space_texture");
    group.sample_size(10);

    for parallel in [false, true] {
        let config = TextureConfig::default().with_size(32).with_parallel(parallel);
        let name = if parallel { "parallel_32" } else { "sequential_32" };
        group.bench_function(name, |b| {
            b.iter(|| generate_color_space_texture(black_box(&regions), &config).expect("texture"))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_texture_fill);
criterion_main!(benches);
