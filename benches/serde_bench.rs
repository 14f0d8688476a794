//! Serde benchmarks for dynamic values.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use dynwalk::value::Value;
use std::hint::black_box;

const SIZES: [i32; 3] = [100, 1000, 10000];

fn generate_records(size: i32) -> Value {
    Value::array((0..size).map(|index| {
        Value::object([
            ("id", Value::from(index)),
            ("name", Value::from(format!("record{index}"))),
            ("active", Value::from(index % 2 == 0)),
        ])
    }))
}

fn benchmark_serialize(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("serde_serialize");

    for size in SIZES {
        let records = generate_records(size);
        group.bench_with_input(BenchmarkId::new("to_string", size), &records, |bencher, records| {
            bencher.iter(|| black_box(serde_json::to_string(black_box(records))));
        });
    }

    group.finish();
}

fn benchmark_deserialize(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("serde_deserialize");

    for size in SIZES {
        let json = serde_json::to_string(&generate_records(size)).unwrap_or_default();
        group.bench_with_input(BenchmarkId::new("from_str", size), &json, |bencher, json| {
            bencher.iter(|| black_box(serde_json::from_str::<Value>(black_box(json))));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_serialize, benchmark_deserialize);

criterion_main!(benches);
