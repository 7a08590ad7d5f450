//! Benchmarks for the per-frame simulation and recording loop.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use plexus::{Frame, ParticleSystem, SystemConfig, Vec2};

const SURFACE: Vec2 = Vec2::new(1280.0, 720.0);

fn bench_frame_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame_tick");

    for &count in &[50usize, 100, 200] {
        group.bench_with_input(BenchmarkId::new("connected", count), &count, |b, &count| {
            let config = SystemConfig {
                particle_count: count,
                ..SystemConfig::default()
            };
            let mut system = ParticleSystem::new(SURFACE, config);
            system.set_pointer(Some(Vec2::new(640.0, 360.0)));
            let mut frame = Frame::new();

            b.iter(|| {
                system.frame_tick(&mut frame);
                black_box(frame.commands().len())
            });
        });
    }

    group.bench_function("unconnected_200", |b| {
        let config = SystemConfig {
            particle_count: 200,
            show_connections: false,
            ..SystemConfig::default()
        };
        let mut system = ParticleSystem::new(SURFACE, config);
        let mut frame = Frame::new();

        b.iter(|| {
            system.frame_tick(&mut frame);
            black_box(frame.commands().len())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_frame_tick);
criterion_main!(benches);
