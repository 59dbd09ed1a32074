// Baseline lookup benchmarks

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use pkgsize::analysis::resolve_previous;
use std::hint::black_box;

mod common;

use common::{commit_name, generate_store, lookup_path, LinearHistory};

fn bench_resolve_sparse_history(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_previous");
    for stride in [1, 10, 100, 1000] {
        let store = generate_store(5_000, stride);
        let head = commit_name(4_999);
        let path = lookup_path();

        group.bench_with_input(BenchmarkId::new("stride", stride), &store, |b, store| {
            b.iter(|| black_box(resolve_previous(store, &head, &path, &LinearHistory).ok()));
        });
    }
    group.finish();
}

fn bench_record(c: &mut Criterion) {
    let store = generate_store(5_000, 10);
    let path = lookup_path();

    c.bench_function("record_new_commit", |b| {
        b.iter(|| {
            let mut clone = store.clone();
            clone.record(&commit_name(10_000), &path, 42, 0);
            black_box(clone)
        });
    });
}

criterion_group!(benches, bench_resolve_sparse_history, bench_record);
criterion_main!(benches);
