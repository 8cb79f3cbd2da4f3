use std::hint::black_box;

use aupa::prelude::*;
use benches::TEST_SIZES;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

fn open(size: usize, mode: fn(ControllerBuilder) -> ControllerBuilder) -> Controller<Nop> {
    let builder = (0..size).fold(Controller::builder(), |builder, i| {
        builder.add_device(AUTD3::new(Vector3::new(
            i as f64 * AUTD3::DEVICE_WIDTH,
            0.,
            0.,
        )))
    });
    match mode(builder).open_with(Nop::builder()) {
        Ok(aupa) => aupa,
        Err(e) => panic!("{}", e),
    }
}

fn send_focus(c: &mut Criterion) {
    let mut group = c.benchmark_group("aupa/send/focus");

    [
        ("Legacy", ControllerBuilder::legacy as fn(ControllerBuilder) -> ControllerBuilder),
        ("Advanced", ControllerBuilder::advanced),
        ("AdvancedPhase", ControllerBuilder::advanced_phase),
    ]
    .into_iter()
    .for_each(|(name, mode)| {
        TEST_SIZES.iter().for_each(|&size| {
            let mut aupa = open(size, mode);
            group.bench_function(BenchmarkId::new(name, size), |b| {
                b.iter(|| {
                    aupa.send(Focus::new(Vector3::new(
                        black_box(90.),
                        black_box(70.),
                        black_box(150.),
                    )))
                })
            });
        });
    });
    group.finish();
}

fn send_focus_stm(c: &mut Criterion) {
    let mut group = c.benchmark_group("aupa/send/focus-stm");

    TEST_SIZES.iter().for_each(|&size| {
        let mut aupa = open(size, ControllerBuilder::legacy);
        group.bench_function(BenchmarkId::new("FocusSTM", size), |b| {
            b.iter(|| {
                let stm = FocusSTM::from_freq(1.0).add_foci_from_iter(
                    (0..black_box(1000)).map(|i| Vector3::new(90., 70., 150. + i as f64 * 0.01)),
                );
                aupa.send(stm)
            })
        });
    });
    group.finish();
}

criterion_group!(benches, send_focus, send_focus_stm);
criterion_main!(benches);
