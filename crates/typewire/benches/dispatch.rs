// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::uninlined_format_args)] // Bench code readability over pedantic
#![allow(clippy::cast_possible_wrap)] // Random test data conversions
#![allow(clippy::semicolon_if_nothing_returned)] // Benchmark code formatting

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::collections::BTreeMap;
use typewire::impl_record;
use typewire::invoke::{decode_result, encode_call, CallEnvelope, FunctionRegistry};
use typewire::native::{describe, DynamicValue, Marshal};

#[derive(Debug, Clone, PartialEq)]
struct Person {
    name: String,
    age: isize,
}

impl_record!(Person { name: String, age: isize });

fn sum(a: isize, b: isize) -> isize {
    a + b
}

fn count_ages(people: Vec<Person>) -> BTreeMap<isize, isize> {
    let mut counts = BTreeMap::new();
    for p in people {
        *counts.entry(p.age).or_insert(0) += 1;
    }
    counts
}

fn random_people(n: usize) -> Vec<Person> {
    (0..n)
        .map(|i| Person {
            name: format!("person-{}", i),
            age: fastrand::isize(18..80),
        })
        .collect()
}

// ============================================================================
// Descriptor Benchmarks
// ============================================================================

/// Benchmark: describe + canonical key of a record function signature
fn bench_canonical_key(c: &mut Criterion) {
    c.bench_function("canonical_key_record_fn", |b| {
        b.iter(|| describe::<fn(Vec<Person>) -> BTreeMap<isize, isize>>().canonical_key())
    });
}

/// Benchmark: descriptor -> native type reconstruction
fn bench_reconstruct(c: &mut Criterion) {
    let desc = describe::<fn(Vec<Person>) -> BTreeMap<isize, isize>>();
    c.bench_function("reconstruct_record_fn", |b| {
        b.iter(|| black_box(&desc).to_native().unwrap())
    });
}

// ============================================================================
// Call Benchmarks: direct vs. dynamic
// ============================================================================

/// Baseline: direct Rust call
fn bench_direct_sum(c: &mut Criterion) {
    c.bench_function("direct_sum", |b| {
        b.iter(|| {
            let a = fastrand::isize(..1000);
            sum(black_box(a), black_box(2))
        })
    });
}

/// Full encode -> dispatch -> decode round trip
fn bench_dynamic_sum(c: &mut Criterion) {
    let registry = FunctionRegistry::new();
    registry.register(sum);

    c.bench_function("dynamic_sum", |b| {
        b.iter(|| {
            let a = fastrand::isize(..1000);
            let request = encode_call::<fn(isize, isize) -> isize>(&[
                DynamicValue::Int(a as i64),
                DynamicValue::Int(2),
            ])
            .unwrap();
            let response = registry.dispatch(black_box(&request)).unwrap();
            decode_result::<isize>(&response).unwrap()
        })
    });
}

/// Dispatch only, on a pre-encoded record sequence
fn bench_dispatch_records(c: &mut Criterion) {
    let registry = FunctionRegistry::new();
    registry.register(count_ages);

    let mut group = c.benchmark_group("dispatch_records");
    for n in [16usize, 256] {
        let people = random_people(n);
        let request = CallEnvelope::of::<fn(Vec<Person>) -> BTreeMap<isize, isize>>()
            .unwrap()
            .arg(&people)
            .encode()
            .unwrap();

        group.bench_function(format!("direct_{}", n), |b| {
            b.iter_batched(
                || people.clone(),
                |people| count_ages(black_box(people)),
                BatchSize::SmallInput,
            )
        });
        group.bench_function(format!("dynamic_{}", n), |b| {
            b.iter(|| registry.dispatch(black_box(&request)).unwrap())
        });
        group.bench_function(format!("marshal_{}", n), |b| {
            b.iter(|| black_box(&people).to_value())
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_canonical_key,
    bench_reconstruct,
    bench_direct_sum,
    bench_dynamic_sum,
    bench_dispatch_records,
);
criterion_main!(benches);
