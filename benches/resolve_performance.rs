//! Performance benchmarks for typed-env.
//!
//! Measures:
//! - Flat resolution with warm and cold schema caches
//! - Nested resolution across several levels
//! - Array splitting with escapes
//! - Concurrent resolution against one shared resolver

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use std::collections::HashMap;
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;
use typed_env::cast::split;
use typed_env::prelude::*;

fn flat_decl() -> Arc<TypeDecl> {
    TypeDecl::builder("BenchConfig")
        .field(FieldDescriptor::new("value").candidate(TypeCandidate::integer()))
        .field(FieldDescriptor::new("name").candidate(TypeCandidate::string()))
        .field(FieldDescriptor::new("flag").candidate(TypeCandidate::boolean()))
        .field(FieldDescriptor::new("items").candidate(TypeCandidate::string().array()))
        .field(
            FieldDescriptor::new("mixed")
                .candidate(TypeCandidate::integer())
                .candidate(TypeCandidate::boolean())
                .candidate(TypeCandidate::string()),
        )
        .build()
}

fn nested_decl(depth: usize) -> Arc<TypeDecl> {
    let mut decl = TypeDecl::builder("Level0")
        .field(FieldDescriptor::new("value").candidate(TypeCandidate::integer()))
        .build();
    for level in 1..=depth {
        decl = TypeDecl::builder(format!("Level{}", level))
            .field(FieldDescriptor::new("value").candidate(TypeCandidate::integer()))
            .field(FieldDescriptor::new("inner").candidate(TypeCandidate::nested(decl)))
            .build();
    }
    decl
}

fn flat_raw() -> HashMap<String, String> {
    [
        ("VALUE", "42"),
        ("NAME", "benchmark"),
        ("FLAG", "yes"),
        ("ITEMS", "a,b,c"),
        ("MIXED", "hello"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

fn nested_raw(depth: usize) -> HashMap<String, String> {
    (0..=depth)
        .map(|inner| {
            let mut key = vec!["INNER"; inner].join("_");
            if !key.is_empty() {
                key.push('_');
            }
            (format!("{}VALUE", key), inner.to_string())
        })
        .collect()
}

/// Benchmark flat resolution with and without a warm schema cache
fn benchmark_flat(c: &mut Criterion) {
    let decl = flat_decl();
    let raw = flat_raw();
    let resolver = Resolver::new();

    let mut group = c.benchmark_group("flat");
    group.bench_function("warm_cache", |b| {
        b.iter(|| black_box(resolver.resolve(&decl, &raw).unwrap()));
    });
    group.bench_function("cold_cache", |b| {
        b.iter(|| {
            resolver.clear_cache();
            black_box(resolver.resolve(&decl, &raw).unwrap())
        });
    });
    group.finish();
}

/// Benchmark nested resolution with growing depth
fn benchmark_nested(c: &mut Criterion) {
    let mut group = c.benchmark_group("nested");
    let resolver = Resolver::new();

    for depth in [1, 4, 8] {
        let decl = nested_decl(depth);
        let raw = nested_raw(depth);
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, _| {
            b.iter(|| black_box(resolver.resolve(&decl, &raw).unwrap()));
        });
    }
    group.finish();
}

/// Benchmark the array splitter
fn benchmark_split(c: &mut Criterion) {
    let plain = vec!["element"; 64].join(",");
    let escaped = vec![r"ele\,ment\\"; 64].join(",");

    let mut group = c.benchmark_group("split");
    group.throughput(Throughput::Elements(64));
    group.bench_function("plain", |b| b.iter(|| black_box(split(&plain))));
    group.bench_function("escaped", |b| b.iter(|| black_box(split(&escaped))));
    group.finish();
}

/// Benchmark concurrent resolution against one shared resolver
fn benchmark_concurrent(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_resolve");
    group.measurement_time(Duration::from_secs(5));

    for num_threads in [1, 4, 8] {
        group.throughput(Throughput::Elements(num_threads as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_threads", num_threads)),
            &num_threads,
            |b, &num_threads| {
                let resolver = Arc::new(Resolver::new());
                let decl = flat_decl();
                let raw = Arc::new(flat_raw());

                b.iter_custom(|iters| {
                    let barrier = Arc::new(Barrier::new(num_threads + 1));
                    let mut handles = vec![];

                    for _ in 0..num_threads {
                        let resolver = Arc::clone(&resolver);
                        let decl = Arc::clone(&decl);
                        let raw = Arc::clone(&raw);
                        let barrier = Arc::clone(&barrier);

                        handles.push(thread::spawn(move || {
                            // Wait for all threads to be ready
                            barrier.wait();

                            let start = std::time::Instant::now();
                            for _ in 0..iters {
                                black_box(resolver.resolve(&decl, &raw).unwrap());
                            }
                            start.elapsed()
                        }));
                    }

                    // Start all threads
                    barrier.wait();

                    let total_duration: Duration =
                        handles.into_iter().map(|h| h.join().unwrap()).sum();

                    // Return average duration across threads
                    total_duration / num_threads as u32
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_flat,
    benchmark_nested,
    benchmark_split,
    benchmark_concurrent
);
criterion_main!(benches);
