use std::hint::black_box;

use aupa::prelude::*;
use benches::{generate_geometry, TEST_SIZES};

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

fn focus(c: &mut Criterion) {
    let mut group = c.benchmark_group("aupa/gain/focus");

    TEST_SIZES.iter().for_each(|&size| {
        group.bench_with_input(
            BenchmarkId::new("Gain::Focus", size),
            &generate_geometry(size, TransMode::Legacy),
            |b, geometry| {
                b.iter(|| {
                    Focus::new(Vector3::new(black_box(90.), black_box(70.), black_box(150.)))
                        .calc(geometry, GainFilter::All)
                })
            },
        );
    });
    group.finish();
}

fn bessel(c: &mut Criterion) {
    let mut group = c.benchmark_group("aupa/gain/bessel");

    TEST_SIZES.iter().for_each(|&size| {
        group.bench_with_input(
            BenchmarkId::new("Gain::Bessel", size),
            &generate_geometry(size, TransMode::Legacy),
            |b, geometry| {
                b.iter(|| {
                    Bessel::new(
                        Vector3::new(black_box(90.), black_box(70.), black_box(0.)),
                        Vector3::z(),
                        black_box(0.1),
                    )
                    .calc(geometry, GainFilter::All)
                })
            },
        );
    });
    group.finish();
}

fn group_by_device(c: &mut Criterion) {
    let mut group = c.benchmark_group("aupa/gain/group");

    TEST_SIZES.iter().for_each(|&size| {
        group.bench_with_input(
            BenchmarkId::new("Gain::Group", size),
            &generate_geometry(size, TransMode::Legacy),
            |b, geometry| {
                b.iter(|| {
                    Group::new(|dev, _| Some(dev.idx() % 2))
                        .set(0, Null::new())
                        .set(1, Focus::new(Vector3::new(90., 70., 150.)))
                        .calc(geometry, GainFilter::All)
                })
            },
        );
    });
    group.finish();
}

criterion_group!(benches, focus, bessel, group_by_device);
criterion_main!(benches);
