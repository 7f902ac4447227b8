//! Benchmarks for the decal pipeline.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{Rgba, RgbaImage};

use decal::{
    apply_colour_key, composite, to_export_space, ColourKey, PlacementState, Point, RasterImage,
    Size,
};

/// Logo with a flat black background and a white disc.
fn disc_logo(side: u32) -> RasterImage {
    let r = side as f32 / 2.0;
    RasterImage::from_rgba(RgbaImage::from_fn(side, side, |x, y| {
        let dx = x as f32 - r;
        let dy = y as f32 - r;
        if dx * dx + dy * dy < r * r * 0.6 {
            Rgba([255, 255, 255, 255])
        } else {
            Rgba([0, 0, 0, 255])
        }
    }))
}

// -- Keying benchmarks --

fn bench_keying(c: &mut Criterion) {
    let mut group = c.benchmark_group("keying");

    let small = disc_logo(64);
    let large = disc_logo(1024);

    group.bench_function("key_64", |b| {
        b.iter(|| apply_colour_key(black_box(&small), ColourKey::BLACK))
    });

    group.bench_function("key_1024", |b| {
        b.iter(|| apply_colour_key(black_box(&large), ColourKey::BLACK))
    });

    group.finish();
}

// -- Compositing benchmarks --

fn bench_compositing(c: &mut Criterion) {
    let mut group = c.benchmark_group("compositing");

    let base = RasterImage::filled(1920, 1080, [40, 40, 60, 255]);
    let logo = apply_colour_key(&disc_logo(256), ColourKey::BLACK);
    let placement = PlacementState::new(Point::new(420.0, 60.0), 100.0, 1.0);
    let preview = Size::new(672.0, 378.0);

    let rect = to_export_space(&placement, preview, Size::from(base.dimensions())).unwrap();

    group.bench_function("map_placement", |b| {
        b.iter(|| to_export_space(black_box(&placement), preview, Size::new(1920.0, 1080.0)))
    });

    group.bench_function("composite_1080p", |b| {
        b.iter(|| composite(black_box(&base), black_box(&logo), &rect))
    });

    group.finish();
}

criterion_group!(benches, bench_keying, bench_compositing);
criterion_main!(benches);
