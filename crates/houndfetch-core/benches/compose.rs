//! Criterion benchmarks for houndfetch-core
//!
//! Run with: cargo bench -p houndfetch-core

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use houndfetch_core::{Compositor, Field, LogoCatalog, Palette, StaticFacts, TerminalWriter};

fn bench_logo_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("logo");
    group.throughput(Throughput::Elements(1));

    let catalog = LogoCatalog::builtin();
    for name in catalog.names() {
        let Some(document) = catalog.get(name) else {
            continue;
        };
        group.bench_function(format!("parse_{name}"), |b| {
            b.iter(|| black_box(document).parse());
        });
    }

    group.finish();
}

fn bench_expand(c: &mut Criterion) {
    let palette = Palette::new().with_accent(houndfetch_core::ColorId::Indexed(4));
    let line = "${caccent}Memory${creset}: 6144 / 32768 Mb (18%)";

    c.bench_function("palette_expand_line", |b| {
        b.iter(|| palette.expand(black_box(line)));
    });
}

fn bench_compose(c: &mut Criterion) {
    let facts = StaticFacts::demo();
    let compositor = Compositor::new(&facts);
    let writer = TerminalWriter::new();

    let mut group = c.benchmark_group("compose");

    group.bench_function("all_fields", |b| {
        b.iter(|| compositor.compose(black_box(&Field::ALL)));
    });

    group.bench_function("all_fields_rendered", |b| {
        b.iter(|| {
            compositor
                .compose(black_box(&Field::ALL))
                .map(|frame| writer.render(&frame))
        });
    });

    group.finish();
}

criterion_group!(benches, bench_logo_parse, bench_expand, bench_compose);
criterion_main!(benches);
