//! Benchmarks for searching large documents.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use glance::document::Document;
use glance::search::{find_hits, highlight_spans};

fn large_document() -> Document {
    let text = (0..50_000)
        .map(|i| format!("{i:>6} INFO request handled in {}ms by worker-{}", i % 97, i % 8))
        .collect::<Vec<_>>()
        .join("\n");
    Document::load(text)
}

fn bench_find_hits_ascii(c: &mut Criterion) {
    let doc = large_document();
    c.bench_function("find_hits_ascii", |b| {
        b.iter(|| find_hits(black_box(&doc), black_box("WORKER-3")))
    });
}

fn bench_find_hits_unicode(c: &mut Criterion) {
    let doc = large_document();
    c.bench_function("find_hits_unicode", |b| {
        b.iter(|| find_hits(black_box(&doc), black_box("wörker")))
    });
}

fn bench_highlight_spans(c: &mut Criterion) {
    let line = "foo bar FOO baz foo ".repeat(20);
    c.bench_function("highlight_spans", |b| {
        b.iter(|| highlight_spans(black_box(&line), black_box("foo")))
    });
}

criterion_group!(
    benches,
    bench_find_hits_ascii,
    bench_find_hits_unicode,
    bench_highlight_spans
);
criterion_main!(benches);
