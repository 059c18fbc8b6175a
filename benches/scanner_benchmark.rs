use std::{sync::LazyLock, time::Duration};

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use toka::{
    c_rules::{CRules, CTokenKind},
    ScanContext, ScanContextBuilder,
};

const SCANNER_INPUT: &str = include_str!("../tests/data/hello.c");

// Large enough for the stream source to release consumed chunks.
static LARGE_INPUT: LazyLock<String> = LazyLock::new(|| SCANNER_INPUT.repeat(200));

fn c_context() -> ScanContext<CTokenKind> {
    ScanContextBuilder::new()
        .add_rule_set(CRules::default())
        .build()
        .unwrap()
}

fn builder_benchmark(c: &mut Criterion) {
    c.bench_function("builder_benchmark", |b| {
        b.iter(|| {
            black_box(c_context());
        });
    });
}

fn scanner_benchmark(c: &mut Criterion) {
    let mut context = c_context();
    c.bench_function("scanner_benchmark", |b| {
        b.iter(|| {
            context.clear_tokens();
            context.scan_str(&LARGE_INPUT).unwrap();
            black_box(context.tokens().len());
        });
    });
}

fn stream_scanner_benchmark(c: &mut Criterion) {
    let mut context = c_context();
    c.bench_function("stream_scanner_benchmark", |b| {
        b.iter(|| {
            context.clear_tokens();
            context.scan_reader(LARGE_INPUT.as_bytes()).unwrap();
            black_box(context.tokens().len());
        });
    });
}

criterion_group! {
    name = benchesscanner;
    config = Criterion::default().measurement_time(Duration::from_secs(10));
    targets = scanner_benchmark, stream_scanner_benchmark
}

criterion_group! {
    name = benchesbuilder;
    config = Criterion::default();
    targets = builder_benchmark
}

criterion_main!(benchesscanner, benchesbuilder);
