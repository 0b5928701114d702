use criterion::{criterion_group, criterion_main, Bencher, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rb_ordered_map::OrderedMap;
use std::collections::BTreeMap;
use std::hint::black_box;

struct KeyGenerator {
    rng: StdRng,
    limit: u32,
}
impl KeyGenerator {
    fn new() -> Self {
        const LIMIT: u32 = 1_000_000;
        Self {
            rng: StdRng::from_seed([0; 32]),
            limit: LIMIT,
        }
    }

    fn next(&mut self) -> u32 {
        self.rng.gen_range(0..self.limit)
    }
}

fn gen_keys(count: usize) -> Vec<u32> {
    let mut gen = KeyGenerator::new();
    std::iter::repeat_with(|| gen.next()).take(count).collect()
}

// insert helper fn
fn ordered_map_insert(count: usize, bench: &mut Bencher) {
    let keys = gen_keys(count);
    bench.iter(|| {
        let mut map = OrderedMap::new();
        for k in keys.clone() {
            black_box(map.insert(k, ()));
        }
    });
}

// insert and remove helper fn
fn ordered_map_insert_remove(count: usize, bench: &mut Bencher) {
    let keys = gen_keys(count);
    bench.iter(|| {
        let mut map = OrderedMap::new();
        for k in keys.clone() {
            black_box(map.insert(k, ()));
        }
        for k in &keys {
            black_box(map.remove(k));
        }
    });
}

// same workload on the std map, for reference
fn btree_map_insert_remove(count: usize, bench: &mut Bencher) {
    let keys = gen_keys(count);
    bench.iter(|| {
        let mut map = BTreeMap::new();
        for k in keys.clone() {
            black_box(map.insert(k, ()));
        }
        for k in &keys {
            black_box(map.remove(k));
        }
    });
}

fn bench_ordered_map_insert(c: &mut Criterion) {
    c.bench_function("bench_ordered_map_insert_100", |b| {
        ordered_map_insert(100, b)
    });
    c.bench_function("bench_ordered_map_insert_1000", |b| {
        ordered_map_insert(1000, b)
    });
    c.bench_function("bench_ordered_map_insert_10,000", |b| {
        ordered_map_insert(10_000, b)
    });
    c.bench_function("bench_ordered_map_insert_100,000", |b| {
        ordered_map_insert(100_000, b)
    });
}

fn bench_ordered_map_insert_remove(c: &mut Criterion) {
    c.bench_function("bench_ordered_map_insert_remove_100", |b| {
        ordered_map_insert_remove(100, b)
    });
    c.bench_function("bench_ordered_map_insert_remove_1000", |b| {
        ordered_map_insert_remove(1000, b)
    });
    c.bench_function("bench_ordered_map_insert_remove_10,000", |b| {
        ordered_map_insert_remove(10_000, b)
    });
    c.bench_function("bench_btree_map_insert_remove_10,000", |b| {
        btree_map_insert_remove(10_000, b)
    });
}

// full in-order traversal through iter()
fn ordered_map_iter(count: usize, bench: &mut Bencher) {
    let mut map = OrderedMap::new();
    for k in gen_keys(count) {
        map.insert(k, ());
    }
    bench.iter(|| {
        black_box(map.iter().count());
    });
}

// full in-order traversal through a cursor
fn ordered_map_cursor(count: usize, bench: &mut Bencher) {
    let mut map = OrderedMap::new();
    for k in gen_keys(count) {
        map.insert(k, ());
    }
    bench.iter(|| {
        let mut cursor = map.cursor();
        while cursor.has_next() {
            cursor.move_next();
            black_box(cursor.key().ok());
        }
    });
}

// point lookups of every stored key
fn ordered_map_get(count: usize, bench: &mut Bencher) {
    let keys = gen_keys(count);
    let mut map = OrderedMap::new();
    for k in keys.clone() {
        map.insert(k, k);
    }
    bench.iter(|| {
        for k in &keys {
            black_box(map.get(k));
        }
    });
}

fn bench_ordered_map_iter(c: &mut Criterion) {
    c.bench_function("bench_ordered_map_iter_1000", |b| ordered_map_iter(1000, b));
    c.bench_function("bench_ordered_map_iter_10,000", |b| {
        ordered_map_iter(10_000, b)
    });
}

fn bench_ordered_map_cursor(c: &mut Criterion) {
    c.bench_function("bench_ordered_map_cursor_1000", |b| {
        ordered_map_cursor(1000, b)
    });
    c.bench_function("bench_ordered_map_cursor_10,000", |b| {
        ordered_map_cursor(10_000, b)
    });
}

fn bench_ordered_map_get(c: &mut Criterion) {
    c.bench_function("bench_ordered_map_get_1000", |b| ordered_map_get(1000, b));
    c.bench_function("bench_ordered_map_get_10,000", |b| {
        ordered_map_get(10_000, b)
    });
}

fn criterion_config() -> Criterion {
    Criterion::default().configure_from_args().without_plots()
}

criterion_group! {
    name = benches_basic_op;
    config = criterion_config();
    targets = bench_ordered_map_insert, bench_ordered_map_insert_remove, bench_ordered_map_get,
}

criterion_group! {
    name = benches_iter;
    config = criterion_config();
    targets = bench_ordered_map_iter, bench_ordered_map_cursor
}

criterion_main!(benches_basic_op, benches_iter);
