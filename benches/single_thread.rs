use std::collections::HashMap;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

const SIZE: usize = 10_000;

#[derive(Clone, Copy)]
struct RandomKeys {
    state: usize,
}

impl RandomKeys {
    fn new() -> Self {
        RandomKeys { state: 0 }
    }
}

impl Iterator for RandomKeys {
    type Item = String;
    fn next(&mut self) -> Option<String> {
        // Add 1 then multiply by some 32 bit prime.
        self.state = self.state.wrapping_add(1).wrapping_mul(3_787_392_781);
        Some(self.state.to_string())
    }
}

fn read(c: &mut Criterion) {
    let mut group = c.benchmark_group("read");
    let keys: Vec<String> = RandomKeys::new().take(SIZE).collect();

    group.bench_function("dubhash", |b| {
        let mut m = dubhash::HashTable::new();
        for key in &keys {
            m.insert(key.as_str(), key.as_str());
        }

        b.iter(|| {
            for key in &keys {
                black_box(assert_eq!(m.get(key), Some(key.as_str())));
            }
        });
    });

    group.bench_function("std", |b| {
        let mut m = HashMap::<String, String>::default();
        for key in &keys {
            m.insert(key.clone(), key.clone());
        }

        b.iter(|| {
            for key in &keys {
                black_box(assert_eq!(m.get(key), Some(key)));
            }
        });
    });

    group.finish();
}

fn insert_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_remove");
    let keys: Vec<String> = RandomKeys::new().take(SIZE).collect();

    group.bench_function("dubhash", |b| {
        b.iter(|| {
            let mut m = dubhash::HashTable::new();
            for key in &keys {
                m.insert(key.as_str(), "");
            }
            for key in &keys {
                black_box(m.remove(key));
            }
        });
    });

    group.bench_function("std", |b| {
        b.iter(|| {
            let mut m = HashMap::<String, String>::default();
            for key in &keys {
                m.insert(key.clone(), String::new());
            }
            for key in &keys {
                black_box(m.remove(key));
            }
        });
    });

    group.finish();
}

criterion_group!(benches, read, insert_remove);
criterion_main!(benches);
