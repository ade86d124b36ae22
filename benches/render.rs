#[macro_use]
extern crate criterion;

use criterion::Criterion;
use num::Complex;

use mandeltiles::escape::intensity;
use mandeltiles::render::render_tile;
use mandeltiles::{TileConfig, TileCoord, TileLayout};

fn evaluator(c: &mut Criterion) {
    c.bench_function("intensity interior", |b| {
        b.iter(|| intensity(Complex::new(-0.1, 0.1), 256))
    });
    c.bench_function("intensity edge", |b| {
        b.iter(|| intensity(Complex::new(-0.75, 0.1), 256))
    });
}

fn tiles(c: &mut Criterion) {
    let config = TileConfig::default().with_image_size(64);
    let layout = TileLayout::new("map", config.clone());
    let whole = layout.bounds(TileCoord::new(0, 0, 0).unwrap());
    c.bench_function("render 64px level 0", move |b| {
        b.iter(|| render_tile(&config, whole))
    });
}

criterion_group!(benches, evaluator, tiles);
criterion_main!(benches);
