//! Benchmarks to measure the overhead of recording and reading measurements.

#![allow(
    missing_docs,
    reason = "No need for API documentation in benchmark code"
)]

use std::hint::black_box;
use std::time::Duration;

use criterion::{Criterion, criterion_group, criterion_main};
use measurements::{Capacity, FunctionCall, Session};

criterion_group!(benches, entrypoint);
criterion_main!(benches);

fn entrypoint(c: &mut Criterion) {
    let mut group = c.benchmark_group("measurements_record");

    group.bench_function("baseline_empty", |b| {
        b.iter(|| {
            black_box(());
        });
    });

    {
        let session = Session::new();
        session.set_capacity::<u64>("bounded", Capacity::Bounded(1024));
        let registry = session.registry::<u64>();

        group.bench_function("registry_record_bounded", |b| {
            b.iter(|| registry.record("bounded", black_box(42)));
        });

        group.bench_function("session_record_bounded", |b| {
            b.iter(|| session.record("bounded", black_box(42_u64)));
        });
    }

    {
        let session = Session::builder()
            .default_capacity(Capacity::Bounded(1024))
            .build();
        session.mark_thread_split::<FunctionCall>("split");
        let registry = session.registry::<FunctionCall>();

        group.bench_function("registry_record_per_thread", |b| {
            b.iter(|| registry.record("split", FunctionCall));
        });
    }

    {
        let session = Session::builder()
            .default_capacity(Capacity::Bounded(1024))
            .build();
        let timings = session.registry::<Duration>();

        group.bench_function("elapsed_span_empty", |b| {
            b.iter(|| {
                let _span = timings.measure_elapsed("empty");
                black_box(());
            });
        });
    }

    group.finish();

    let mut group = c.benchmark_group("measurements_fetch");

    {
        let session = Session::new();
        session.set_capacity::<u64>("bounded", Capacity::Bounded(1024));
        let registry = session.registry::<u64>();

        for value in 0..2048 {
            registry.record("bounded", value);
        }

        group.bench_function("fetch_1024", |b| {
            b.iter(|| black_box(registry.fetch("bounded")));
        });
    }

    group.finish();
}
