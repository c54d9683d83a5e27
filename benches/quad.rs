use std::hint::black_box;
use std::sync::Arc;

use brush_geometry::{
    GeometryProvider, Interval, PointD, Quad, RandomState, RectD, Sample,
    ScatteredGeometryProviderModel, SquareProviderModel, Tapering,
};
use criterion::{criterion_group, criterion_main, Criterion};
use rand::prelude::StdRng;
use rand::{Rng, SeedableRng};

const SEED: [u8; 32] = [0; 32];
const QUADS: usize = 256;

fn random_quads() -> Vec<Quad> {
    let mut rng = StdRng::from_seed(SEED);
    (0..QUADS)
        .map(|_| {
            let mut corner = || PointD::new(rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0));
            Quad::new(corner(), corner(), corner(), corner())
        })
        .collect()
}

fn quad(c: &mut Criterion) {
    let mut g = c.benchmark_group("quad");
    let quads = random_quads();
    let corners: Vec<_> = quads.iter().map(Quad::corners).collect();

    g.bench_function("classify", |b| {
        b.iter(|| {
            for c in &corners {
                black_box(Quad::from_corners(*c).quad_type());
            }
        })
    });

    g.bench_function("transform", |b| {
        b.iter(|| {
            for q in &quads {
                black_box(q.transform());
            }
        })
    });

    g.bench_function("contains_point", |b| {
        let p = PointD::new(50.0, 50.0);
        b.iter(|| {
            for q in &quads {
                black_box(q.contains_point(p));
            }
        })
    });

    g.bench_function("nearest_points", |b| {
        b.iter(|| {
            for pair in quads.windows(2) {
                black_box(pair[0].nearest_points(&pair[1]));
            }
        })
    });

    g.bench_function("is_transformable", |b| {
        let target = Quad::from_rect(RectD::new(0.0, 0.0, 10.0, 10.0));
        b.iter(|| {
            for q in &quads {
                black_box(q.is_transformable_to_quad_with_deviation(&target, 1.0));
            }
        })
    });
}

fn scattered(c: &mut Criterion) {
    let mut g = c.benchmark_group("scattered");
    let model = ScatteredGeometryProviderModel::<()>::builder(Arc::new(
        SquareProviderModel::new(8.0).expect("valid edge length"),
    ))
    .random_state(RandomState::from_seed(7))
    .count(Interval::closed(1, 4))
    .distance(Interval::closed(0.0, 12.0))
    .angle(Interval::closed(0.0, std::f64::consts::TAU))
    .scale(Interval::closed(0.5, 1.5))
    .tapering(Tapering::new(40.0, 40.0, 2.0, 0.1).expect("valid tapering"))
    .build()
    .expect("valid model");

    let samples: Vec<Sample> = (0..QUADS)
        .map(|i| {
            let s = i as f64;
            Sample::at(s, PointD::new(s, (s * 0.1).sin() * 20.0))
        })
        .collect();

    g.bench_function("stroke", |b| {
        b.iter(|| {
            let mut provider = model.scattered_provider();
            black_box(provider.values_from_samples(&samples, true));
        })
    });
}

criterion_group!(benches, quad, scattered);
criterion_main!(benches);
