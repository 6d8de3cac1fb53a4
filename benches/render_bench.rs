// Render Benchmarks
// Performance benchmarks for the vector rasterizer and the persistence compositor

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use vecx_rs::display::{rasterize, RenderConfig, ScaleState, Surface, VectorDisplay};
use vecx_rs::machine::{DemoMachine, Machine, Vector, BIOS_SIZE};

/// Vectors of one demo frame
fn demo_frame() -> Vec<Vector> {
    let mut machine = DemoMachine::new(&[0; BIOS_SIZE], &[]);
    machine.run_cycles(30_000);
    machine.vectors().to_vec()
}

/// Benchmark drawing a frame of vectors into the primary surface
fn bench_rasterizer(c: &mut Criterion) {
    let mut group = c.benchmark_group("rasterizer");
    let vectors = demo_frame();

    for (name, width, height) in [("default_window", 495, 615), ("large_window", 990, 1230)] {
        let scale = ScaleState::compute(width, height);
        let mut target = Surface::new(scale.logical_width, scale.logical_height);

        group.bench_function(name, |b| {
            b.iter(|| {
                rasterize(&mut target, black_box(&vectors), &scale);
            });
        });
    }

    // Many short dots, the worst case for per-vector overhead
    group.bench_function("dots", |b| {
        let scale = ScaleState::compute(495, 615);
        let mut target = Surface::new(scale.logical_width, scale.logical_height);
        let dots: Vec<Vector> = (0..2000)
            .map(|i| Vector::dot((i * 16) % 33000, (i * 20) % 41000, 100))
            .collect();

        b.iter(|| {
            rasterize(&mut target, black_box(&dots), &scale);
        });
    });

    group.finish();
}

/// Benchmark the full per-tick render: clear, rasterize, afterglow and composite
fn bench_compositor(c: &mut Criterion) {
    let mut group = c.benchmark_group("compositor");
    group.sample_size(20); // Full frames are slow at large sizes
    let vectors = demo_frame();

    let configs = [
        ("soft", RenderConfig::default()),
        (
            "sharp",
            RenderConfig {
                sharp: true,
                ..RenderConfig::default()
            },
        ),
    ];

    for (name, config) in configs {
        group.bench_function(name, |b| {
            let mut display = VectorDisplay::new(495, 615);
            b.iter(|| {
                black_box(display.render(black_box(&vectors), &config));
            });
        });
    }

    group.bench_function("soft_with_overlay", |b| {
        let mut display = VectorDisplay::new(495, 615);
        let mut overlay = Surface::new(250, 310);
        overlay.clear([40, 80, 160, 96]);
        display.set_overlay(Some(overlay));
        let config = RenderConfig::default();

        b.iter(|| {
            black_box(display.render(black_box(&vectors), &config));
        });
    });

    group.finish();
}

criterion_group!(benches, bench_rasterizer, bench_compositor);
criterion_main!(benches);
