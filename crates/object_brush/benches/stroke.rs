mod common;

use std::hint::black_box;

use common::{down_ray_at, PlaneScene};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec3;
use object_brush::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

const RADII: [f32; 4] = [1.0, 5.0, 10.0, 25.0];
const TRACKED: [usize; 3] = [100, 1_000, 10_000];

fn brush(density: f32, radius: f32) -> BrushDefinition<()> {
    let mut brush = BrushDefinition::new(Some(()));
    brush.set_density(density).expect("valid density");
    brush.set_radius(radius).expect("valid radius");
    brush.set_rotation(RandomRotationAxes::ALL);
    brush.set_align_to_surface(true);
    brush
}

fn place_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("stroke/place");

    for &radius in &RADII {
        let b = brush(1.0, radius);
        group.throughput(common::elements_throughput(b.attempts_per_stroke()));

        let mut rng = StdRng::seed_from_u64(0xB2u64 ^ (radius as u64));
        group.bench_with_input(BenchmarkId::from_parameter(radius), &radius, |bench, _| {
            bench.iter(|| {
                let mut scene = PlaneScene::default();
                let mut engine = StrokeEngine::new();
                let result = engine.place(&mut scene, &down_ray_at(Vec3::ZERO), &b, &mut rng);
                black_box(result.placements.len());
            });
        });
    }

    group.finish();
}

fn erase_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("stroke/erase");
    let b = brush(1.0, 5.0);

    for &tracked in &TRACKED {
        group.throughput(common::elements_throughput(tracked));

        let mut scene = PlaneScene::default();
        let mut engine = StrokeEngine::new();
        let mut rng = StdRng::seed_from_u64(0xE5A5E ^ tracked as u64);
        let spread = brush(1.0, 200.0);
        while engine.len() < tracked {
            engine.place(&mut scene, &down_ray_at(Vec3::splat(-100.0)), &spread, &mut rng);
        }

        // Far from every instance: measures the scan without destroying anything.
        let miss_ray = down_ray_at(Vec3::new(10_000.0, 0.0, 10_000.0));
        group.bench_with_input(BenchmarkId::from_parameter(tracked), &tracked, |bench, _| {
            bench.iter(|| {
                let result = engine.erase(&mut scene, &miss_ray, &b);
                black_box(result.removed.len());
            });
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = place_benches, erase_benches
}
criterion_main!(benches);
