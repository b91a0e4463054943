//! Store Performance Benchmarks
//!
//! Measures the cost of the store operations themselves:
//! - create: validation, id generation and insertion under the write lock
//! - complete/uncomplete: lookup and status toggle
//! - queries: point lookups and filtered scans over a populated store
//!
//! Run with: `cargo bench`

#![allow(missing_docs)] // Benchmarks don't need extensive docs
#![allow(clippy::expect_used)] // Benchmarks can use expect for setup

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use todo_store_runtime::{StoreConfig, TodoEnvironment, TodoStore};

fn quiet_store() -> TodoStore {
    TodoStore::with_config(
        TodoEnvironment::production(),
        StoreConfig::default().with_metrics(false),
    )
}

fn populated_store(size: usize) -> TodoStore {
    let store = quiet_store();
    for i in 0..size {
        let todo = store
            .create(&format!("Todo {i}"), Some("benchmark"))
            .expect("valid todo");
        if i % 2 == 0 {
            store.complete(todo.id()).expect("pending todo");
        }
    }
    store
}

/// Benchmark creating todos
fn benchmark_create(c: &mut Criterion) {
    let mut group = c.benchmark_group("create");
    group.throughput(Throughput::Elements(1));

    group.bench_function("with_description", |b| {
        let store = quiet_store();
        b.iter(|| {
            let _todo = store.create(black_box("Buy milk"), black_box(Some("2 litres")));
        });
    });

    group.bench_function("with_metrics", |b| {
        let store = TodoStore::new(TodoEnvironment::production());
        b.iter(|| {
            let _todo = store.create(black_box("Buy milk"), None);
        });
    });

    group.finish();
}

/// Benchmark toggling completion on one todo
fn benchmark_toggle(c: &mut Criterion) {
    let mut group = c.benchmark_group("toggle");
    group.throughput(Throughput::Elements(2));

    group.bench_function("complete_uncomplete", |b| {
        let store = quiet_store();
        let todo = store.create("Toggle me", None).expect("valid todo");
        b.iter(|| {
            let _ = store.complete(black_box(todo.id()));
            let _ = store.uncomplete(black_box(todo.id()));
        });
    });

    group.finish();
}

/// Benchmark queries as the store grows
fn benchmark_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("queries");

    for size in [100_usize, 1_000, 10_000] {
        let store = populated_store(size);
        let probe = store.find_all()[size / 2].id().clone();

        group.bench_with_input(BenchmarkId::new("find_by_id", size), &size, |b, _| {
            b.iter(|| store.find_by_id(black_box(&probe)));
        });

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("find_by_completed", size), &size, |b, _| {
            b.iter(|| store.find_by_completed(black_box(true)));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_create, benchmark_toggle, benchmark_queries);
criterion_main!(benches);
