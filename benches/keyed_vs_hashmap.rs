use std::collections::HashMap;

use contachiavi::counters::KeyedCounter;
use contachiavi::equivalence::AsciiCaseInsensitive;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const NUM_KEYS: u64 = 1_000;
const ITERATIONS: u64 = 100_000;

fn bench_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("counter_add");

    group.bench_function(
        BenchmarkId::new("KeyedCounter", format!("{}keys x {}iter", NUM_KEYS, ITERATIONS)),
        |b| {
            b.iter(|| {
                let mut counter: KeyedCounter<u64> = KeyedCounter::new();
                for i in 0..ITERATIONS {
                    counter.add(i % NUM_KEYS).unwrap();
                }
                black_box(counter.len())
            })
        },
    );

    group.bench_function(
        BenchmarkId::new("HashMap entry", format!("{}keys x {}iter", NUM_KEYS, ITERATIONS)),
        |b| {
            b.iter(|| {
                let mut counter: HashMap<u64, i32> = HashMap::new();
                for i in 0..ITERATIONS {
                    *counter.entry(i % NUM_KEYS).or_insert(0) += 1;
                }
                black_box(counter.len())
            })
        },
    );

    group.finish();
}

fn bench_add_subtract(c: &mut Criterion) {
    let mut group = c.benchmark_group("counter_churn");

    group.bench_function(
        BenchmarkId::new("KeyedCounter", format!("{}keys x {}iter", NUM_KEYS, ITERATIONS)),
        |b| {
            b.iter(|| {
                let mut counter: KeyedCounter<u64> = KeyedCounter::new();
                for i in 0..ITERATIONS {
                    let key = i % NUM_KEYS;
                    counter.add_by(key, 2).unwrap();
                    counter.subtract(&key).unwrap();
                    if i % 7 == 0 {
                        counter.subtract_by(&key, 3).unwrap();
                    }
                }
                black_box(counter.len())
            })
        },
    );

    group.finish();
}

fn bench_case_insensitive(c: &mut Criterion) {
    let words: Vec<String> = (0..NUM_KEYS)
        .map(|i| if i % 2 == 0 { format!("Word{i}") } else { format!("WORD{i}") })
        .collect();

    c.bench_function("case_insensitive_add", |b| {
        b.iter(|| {
            let mut counter: KeyedCounter<&str, i32, AsciiCaseInsensitive> =
                KeyedCounter::with_equivalence(None);
            for word in &words {
                counter.add(word.as_str()).unwrap();
            }
            black_box(counter.len())
        })
    });
}

criterion_group!(benches, bench_add, bench_add_subtract, bench_case_insensitive);
criterion_main!(benches);
