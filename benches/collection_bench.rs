//! Collection operation benchmarks.
//!
//! Compares the closure forms against the dynamic forms, which pay for
//! argument packing on every call.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use dynwalk::collection::{filter, filter_with, is_empty, map, map_with, reduce, reduce_with};
use dynwalk::value::{MapRef, Value, argument};
use std::hint::black_box;

const SIZES: [i32; 3] = [100, 1000, 10000];

fn number(value: &Value) -> f64 {
    value.as_number().unwrap_or(0.0)
}

fn generate_array(size: i32) -> Value {
    Value::array((0..size).map(Value::from))
}

fn benchmark_map(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("map");
    let double = Value::function(|arguments| Value::from(number(&argument(arguments, 0)) * 2.0));

    for size in SIZES {
        let array = generate_array(size);
        group.bench_with_input(BenchmarkId::new("map_with", size), &array, |bencher, array| {
            bencher.iter(|| {
                black_box(map_with(black_box(array), |value, _, _| {
                    Value::from(number(value) * 2.0)
                }))
            });
        });
        group.bench_with_input(BenchmarkId::new("map", size), &array, |bencher, array| {
            bencher.iter(|| black_box(map(black_box(array), &double)));
        });
    }

    group.finish();
}

fn benchmark_filter(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("filter");
    let even = Value::function(|arguments| {
        Value::from(number(&argument(arguments, 0)) % 2.0 == 0.0)
    });

    for size in SIZES {
        let array = generate_array(size);
        group.bench_with_input(BenchmarkId::new("filter_with", size), &array, |bencher, array| {
            bencher.iter(|| {
                black_box(filter_with(black_box(array), |value, _, _| {
                    number(value) % 2.0 == 0.0
                }))
            });
        });
        group.bench_with_input(BenchmarkId::new("filter", size), &array, |bencher, array| {
            bencher.iter(|| black_box(filter(black_box(array), &even)));
        });
    }

    group.finish();
}

fn benchmark_reduce(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("reduce");
    let sum = Value::function(|arguments| {
        Value::from(number(&argument(arguments, 0)) + number(&argument(arguments, 1)))
    });

    for size in SIZES {
        let array = generate_array(size);
        let map_value = Value::from(
            (0..size)
                .map(|index| (Value::from(index), Value::from(index)))
                .collect::<MapRef>(),
        );

        group.bench_with_input(BenchmarkId::new("reduce_with", size), &array, |bencher, array| {
            bencher.iter(|| {
                black_box(reduce_with(
                    black_box(array),
                    |accumulator, value, _, _| Value::from(number(&accumulator) + number(value)),
                    Some(Value::from(0)),
                ))
            });
        });
        group.bench_with_input(BenchmarkId::new("reduce", size), &array, |bencher, array| {
            bencher.iter(|| black_box(reduce(black_box(array), &sum, Some(Value::from(0)))));
        });
        group.bench_with_input(BenchmarkId::new("reduce_map", size), &map_value, |bencher, map_value| {
            bencher.iter(|| black_box(reduce(black_box(map_value), &sum, Some(Value::from(0)))));
        });
    }

    group.finish();
}

fn benchmark_is_empty(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("is_empty");

    for size in SIZES {
        let object = Value::object((0..size).map(|index| (index.to_string(), Value::from(index))));
        group.bench_with_input(BenchmarkId::new("object", size), &object, |bencher, object| {
            bencher.iter(|| black_box(is_empty(black_box(object))));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_map,
    benchmark_filter,
    benchmark_reduce,
    benchmark_is_empty
);

criterion_main!(benches);
