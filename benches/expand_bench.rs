//! CPU-side sprite expansion benchmarks.

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::{Mat4, Vec2, Vec3};
use pointsprite::{
    sprite::{expand_instance, expand_instances, pixel_bounds, SpriteConfig},
    PointCloud,
};

fn config() -> SpriteConfig {
    let proj = Mat4::perspective_rh(45f32.to_radians(), 4.0 / 3.0, 0.01, 100.0);
    let view = Mat4::look_at_rh(Vec3::splat(0.5), Vec3::ZERO, Vec3::Z);
    SpriteConfig::new(proj * view, Vec2::new(1024.0, 768.0), 1.5)
}

fn single_sprite_benchmark(c: &mut Criterion) {
    let config = config();
    let _ = c.bench_function("expand_single_sprite", |b| {
        b.iter(|| black_box(expand_instance(black_box(Vec3::ONE), &config)));
    });
}

fn cloud_expansion_benchmark(c: &mut Criterion) {
    let config = config();
    let mut group = c.benchmark_group("expand_cloud");

    for count in [1_000, 10_000, 100_000] {
        let cloud = PointCloud::random_cube(count, 42);
        let _ = group.bench_function(format!("{count}_points"), |b| {
            b.iter(|| black_box(expand_instances(&cloud.points, &config)));
        });
    }
    group.finish();
}

fn pixel_bounds_benchmark(c: &mut Criterion) {
    let config = config();
    let corners = expand_instances(&PointCloud::random_cube(10_000, 7).points, &config);
    let _ = c.bench_function("pixel_bounds_10k", |b| {
        b.iter(|| black_box(pixel_bounds(black_box(&corners), config.resolution)));
    });
}

criterion_group!(
    benches,
    single_sprite_benchmark,
    cloud_expansion_benchmark,
    pixel_bounds_benchmark
);
criterion_main!(benches);
