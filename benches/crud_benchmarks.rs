use std::collections::BTreeMap;
use std::hint::black_box;

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use tally_tree::TallyTree;

const N: usize = 10_000;

// ─── Helper functions to generate key sequences ─────────────────────────────

fn ordered_keys(n: usize) -> Vec<i32> {
    (0..n as i32).collect()
}

fn random_keys(n: usize) -> Vec<i32> {
    // Use a simple LCG for deterministic pseudo-random sequence
    let mut keys = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        keys.push((x >> 33) as i32);
    }
    keys
}

fn tally_of(keys: &[i32]) -> TallyTree {
    keys.iter().map(|&k| (k, 1)).collect()
}

fn btree_of(keys: &[i32]) -> BTreeMap<i32, i32> {
    keys.iter().map(|&k| (k, 1)).collect()
}

// ─── Mutations ──────────────────────────────────────────────────────────────

fn bench_insert(c: &mut Criterion, name: &str, keys: &[i32]) {
    let mut group = c.benchmark_group(name);

    group.bench_function(BenchmarkId::new("TallyTree", N), |b| {
        b.iter(|| tally_of(keys));
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| btree_of(keys));
    });

    group.finish();
}

fn bench_insert_ordered(c: &mut Criterion) {
    bench_insert(c, "insert_ordered", &ordered_keys(N));
}

fn bench_insert_random(c: &mut Criterion) {
    bench_insert(c, "insert_random", &random_keys(N));
}

fn bench_increase_reduce_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let mut group = c.benchmark_group("increase_reduce_random");

    group.bench_function(BenchmarkId::new("TallyTree", N), |b| {
        b.iter_batched(
            || tally_of(&keys),
            |mut tally| {
                for &k in &keys {
                    tally.increase(k, 3);
                    tally.reduce(k.wrapping_add(1), 2);
                }
                tally
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter_batched(
            || btree_of(&keys),
            |mut map| {
                for &k in &keys {
                    *map.entry(k).or_insert(0) += 3;
                    let key = k.wrapping_add(1);
                    if let Some(counter) = map.get_mut(&key) {
                        if *counter - 2 < 1 {
                            map.remove(&key);
                        } else {
                            *counter -= 2;
                        }
                    }
                }
                map
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

fn bench_remove_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let mut group = c.benchmark_group("remove_random");

    group.bench_function(BenchmarkId::new("TallyTree", N), |b| {
        b.iter_batched(
            || tally_of(&keys),
            |mut tally| {
                for &k in &keys {
                    tally.remove(k);
                }
                tally
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter_batched(
            || btree_of(&keys),
            |mut map| {
                for &k in &keys {
                    map.remove(&k);
                }
                map
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

// ─── Queries ────────────────────────────────────────────────────────────────

fn bench_count_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let tally = tally_of(&keys);
    let map = btree_of(&keys);
    let mut group = c.benchmark_group("count_random");

    group.bench_function(BenchmarkId::new("TallyTree", N), |b| {
        b.iter(|| {
            for &k in &keys {
                black_box(tally.count(k));
            }
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            for &k in &keys {
                black_box(map.get(&k).copied().unwrap_or(0));
            }
        });
    });

    group.finish();
}

fn bench_neighbours_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let tally = tally_of(&keys);
    let map = btree_of(&keys);
    let mut group = c.benchmark_group("next_previous_random");

    group.bench_function(BenchmarkId::new("TallyTree", N), |b| {
        b.iter(|| {
            for &k in &keys {
                black_box(tally.next(k));
                black_box(tally.previous(k));
            }
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            for &k in &keys {
                black_box(map.range(k.saturating_add(1)..).next());
                black_box(map.range(..k).next_back());
            }
        });
    });

    group.finish();
}

fn bench_inrange_narrow(c: &mut Criterion) {
    let keys = ordered_keys(N);
    let tally = tally_of(&keys);
    let map = btree_of(&keys);
    let mut group = c.benchmark_group("inrange_narrow");

    group.bench_function(BenchmarkId::new("TallyTree", N), |b| {
        b.iter(|| {
            for low in (0..N as i32).step_by(100) {
                black_box(tally.range_counters(low, low + 16));
            }
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            for low in (0..N as i32).step_by(100) {
                black_box(map.range(low..=low + 16).map(|(_, &c)| c).collect::<Vec<_>>());
            }
        });
    });

    group.finish();
}

// ─── Criterion Groups ───────────────────────────────────────────────────────

criterion_group!(
    mutation_benches,
    bench_insert_ordered,
    bench_insert_random,
    bench_increase_reduce_random,
    bench_remove_random,
);

criterion_group!(query_benches, bench_count_random, bench_neighbours_random, bench_inrange_narrow,);

criterion_main!(mutation_benches, query_benches);
