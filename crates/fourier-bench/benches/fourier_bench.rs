//! Benchmarks for fourier filters.
//!
//! Run with: `cargo bench`

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

use fourier_core::{ColorSpace, Image};
use fourier_io::Format;
use fourier_ops::edge::{canny_edge_detect, EdgeParams};
use fourier_ops::filter::{box_blur, convolve, gaussian_blur, gaussian_blur_naive};
use fourier_ops::Kernel;

fn test_image(size: u32, color_space: ColorSpace) -> Image {
    let mut image = Image::new(size, size, color_space);
    for (c, (_, plane)) in image.channels_mut().enumerate() {
        for (i, v) in plane.iter_mut().enumerate() {
            *v = ((i * 31 + c * 17) % 256) as f32;
        }
    }
    image
}

/// Benchmark raw convolution with kernels of growing radius.
fn bench_convolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("convolve");
    let image = test_image(256, ColorSpace::Rgb);
    group.throughput(Throughput::Elements(256 * 256 * 3));

    for radius in [1usize, 2, 4] {
        let kernel = Kernel::gaussian(1.4, radius);
        group.bench_with_input(BenchmarkId::new("gaussian_2d", radius), &kernel, |b, k| {
            b.iter(|| {
                let mut img = image.clone();
                convolve(&mut img, black_box(k));
                img
            })
        });
    }

    group.bench_function("sobel_x", |b| {
        let kernel = Kernel::sobel_x();
        b.iter(|| {
            let mut img = image.clone();
            convolve(&mut img, black_box(&kernel));
            img
        })
    });

    group.finish();
}

/// Compare the separable and full-kernel gaussian blurs.
fn bench_blur(c: &mut Criterion) {
    let mut group = c.benchmark_group("blur");

    for size in [128u32, 512] {
        let image = test_image(size, ColorSpace::Rgb);
        group.throughput(Throughput::Elements((size * size) as u64));

        group.bench_with_input(BenchmarkId::new("gaussian", size), &image, |b, src| {
            b.iter(|| {
                let mut img = src.clone();
                gaussian_blur(&mut img, black_box(2.0), 6).unwrap();
                img
            })
        });

        group.bench_with_input(BenchmarkId::new("gaussian_naive", size), &image, |b, src| {
            b.iter(|| {
                let mut img = src.clone();
                gaussian_blur_naive(&mut img, black_box(2.0), 6).unwrap();
                img
            })
        });

        group.bench_with_input(BenchmarkId::new("box", size), &image, |b, src| {
            b.iter(|| {
                let mut img = src.clone();
                box_blur(&mut img, black_box(3)).unwrap();
                img
            })
        });
    }

    group.finish();
}

/// Benchmark the full edge detection pipeline.
fn bench_canny(c: &mut Criterion) {
    let mut group = c.benchmark_group("canny");
    let params = EdgeParams::default();

    for size in [128u32, 512] {
        let image = test_image(size, ColorSpace::Rgb);
        group.throughput(Throughput::Elements((size * size) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &image, |b, src| {
            b.iter(|| {
                let mut img = src.clone();
                canny_edge_detect(&mut img, black_box(&params)).unwrap();
                img
            })
        });
    }

    group.finish();
}

/// Benchmark color conversion and PNG encoding.
fn bench_convert_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert");
    let image = test_image(512, ColorSpace::Rgb);
    group.throughput(Throughput::Elements(512 * 512));

    group.bench_function("to_ycbcr", |b| {
        b.iter(|| {
            let mut img = image.clone();
            img.to_ycbcr();
            img
        })
    });

    group.bench_function("to_gray", |b| {
        b.iter(|| {
            let mut img = image.clone();
            img.to_gray();
            img
        })
    });

    group.bench_function("png_encode", |b| {
        b.iter(|| fourier_io::write_to_memory(Format::Png, black_box(&image), 90).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_convolve, bench_blur, bench_canny, bench_convert_encode);
criterion_main!(benches);
