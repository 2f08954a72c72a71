//! Benchmarks for the conversion pipeline stages.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gifbox_common::SourceImage;
use renderer::composite::composite_onto;
use renderer::fit::fit_to_box;
use renderer::gif::encode_gif;
use renderer::{Canvas, Pipeline};
use test_utils::fixtures::svg;
use test_utils::{gradient_image, red_disc_image, red_disc_png};

fn bench_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("fit_to_box");
    for (w, h) in [(200, 80), (800, 320), (2048, 2048)] {
        let source = red_disc_image(w, h);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", w, h)),
            &source,
            |b, source| b.iter(|| fit_to_box(black_box(source.clone()), 400, 160).unwrap()),
        );
    }
    group.finish();
}

fn bench_composite(c: &mut Criterion) {
    let fitted = red_disc_image(400, 160);
    c.bench_function("composite_onto", |b| {
        b.iter(|| composite_onto(black_box(&fitted), &Canvas::STANDARD).unwrap())
    });
}

fn bench_encode(c: &mut Criterion) {
    let raster = gradient_image(400, 160);
    c.bench_function("encode_gif", |b| b.iter(|| encode_gif(black_box(&raster)).unwrap()));
}

fn bench_pipeline(c: &mut Criterion) {
    let pipeline = Pipeline::default();
    let png = SourceImage::new(red_disc_png(1200, 800), None).unwrap();
    let svg = SourceImage::new(svg::WIDE_LOGO.as_bytes().to_vec(), None).unwrap();

    let mut group = c.benchmark_group("pipeline_run");
    group.bench_function("png_1200x800", |b| b.iter(|| pipeline.run(black_box(&png)).unwrap()));
    group.bench_function("svg_wide_logo", |b| b.iter(|| pipeline.run(black_box(&svg)).unwrap()));
    group.finish();
}

criterion_group!(benches, bench_fit, bench_composite, bench_encode, bench_pipeline);
criterion_main!(benches);
