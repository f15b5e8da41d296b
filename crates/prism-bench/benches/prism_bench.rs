//! Benchmarks for prism operations.
//!
//! Run with: `cargo bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

use prism_core::{BlendMode, Color, ColorSpace, Raster};
use prism_ops::composite::blend_rasters;
use prism_ops::convolve::Convolution;
use prism_ops::median::Median;
use prism_ops::point::Noise;
use prism_ops::{apply, parallel};

fn ramp(size: usize) -> Raster {
    Raster::from_fn(size, size, |x, y| {
        Color::rgb(x as f64 / size as f64, y as f64 / size as f64, 0.5)
    })
    .unwrap()
}

/// Benchmark RGB round trips through every space.
fn bench_convert(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert");

    let colors: Vec<Color> = (0..10_000u32).map(|i| Color::from_rgb24(i * 1677)).collect();
    group.throughput(Throughput::Elements(colors.len() as u64));

    for space in ColorSpace::ALL {
        group.bench_with_input(BenchmarkId::new("roundtrip", space), &colors, |b, v| {
            b.iter(|| {
                v.iter()
                    .map(|c| black_box(c).convert(space).to_rgb24())
                    .fold(0u32, u32::wrapping_add)
            })
        });
    }

    group.finish();
}

/// Benchmark per-color blending.
fn bench_blend(c: &mut Criterion) {
    let mut group = c.benchmark_group("blend");

    let a: Vec<Color> = (0..10_000u32).map(|i| Color::from_rgb24(i * 911)).collect();
    let b: Vec<Color> = (0..10_000u32).map(|i| Color::from_rgb24(i * 2203)).collect();
    group.throughput(Throughput::Elements(a.len() as u64));

    for mode in [BlendMode::Normal, BlendMode::Multiply, BlendMode::ColorDodge, BlendMode::SoftLight] {
        group.bench_function(mode.name(), |bench| {
            bench.iter(|| {
                a.iter()
                    .zip(&b)
                    .map(|(x, y)| black_box(x).blend(y, mode))
                    .count()
            })
        });
    }

    let hsv = a[17].convert(ColorSpace::Hsv);
    group.bench_function("cross_space", |bench| {
        bench.iter(|| b.iter().map(|y| hsv.blend(black_box(y), BlendMode::Screen)).count())
    });

    group.finish();
}

/// Benchmark raster filters.
fn bench_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");
    group.sample_size(20);

    for size in [64usize, 256] {
        let src = ramp(size);
        group.throughput(Throughput::Elements((size * size) as u64));

        let mean = Convolution::mean(5).unwrap();
        group.bench_with_input(BenchmarkId::new("mean_5x5", size), &src, |b, r| {
            b.iter(|| apply(r, &mean).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("mean_5x5_parallel", size), &src, |b, r| {
            b.iter(|| parallel::apply(r, &mean).unwrap())
        });

        let motion = Convolution::motion_blur(0.6, 9).unwrap();
        group.bench_with_input(BenchmarkId::new("motion_9", size), &src, |b, r| {
            b.iter(|| parallel::apply(r, &motion).unwrap())
        });

        let median = Median::new(3).unwrap();
        group.bench_with_input(BenchmarkId::new("median_3x3", size), &src, |b, r| {
            b.iter(|| apply(r, &median).unwrap())
        });

        let noise = Noise::new(0.05, 1);
        group.bench_with_input(BenchmarkId::new("noise", size), &src, |b, r| {
            b.iter(|| apply(r, &noise).unwrap())
        });
    }

    group.finish();
}

/// Benchmark raster compositing.
fn bench_composite(c: &mut Criterion) {
    let mut group = c.benchmark_group("composite");

    let a = ramp(256).with_alpha(0.7);
    let b = ramp(256).convert(ColorSpace::Hsl).with_alpha(0.5);
    group.throughput(Throughput::Elements(256 * 256));

    group.bench_function("overlay_256", |bench| {
        bench.iter(|| blend_rasters(black_box(&a), &b, BlendMode::Overlay.into()).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_convert, bench_blend, bench_filters, bench_composite);
criterion_main!(benches);
