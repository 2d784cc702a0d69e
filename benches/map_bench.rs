use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use prime_hashmap::{HashSeed, LinearProbingMap, Map, MapConfig, SeparateChainingMap};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn config() -> MapConfig {
    MapConfig::new(16, 0.7).seed(HashSeed::Seeded(0x5eed))
}

fn linear() -> LinearProbingMap<String, u64> {
    LinearProbingMap::with_config(config()).unwrap()
}

fn chained() -> SeparateChainingMap<String, u64> {
    SeparateChainingMap::with_config(config()).unwrap()
}

fn filled<M: Map<String, u64>>(mut m: M, seed: u64, n: usize) -> (M, Vec<String>) {
    let keys: Vec<String> = lcg(seed).take(n).map(key).collect();
    for (i, k) in keys.iter().enumerate() {
        m.put(k.clone(), i as u64);
    }
    (m, keys)
}

// 10k query keys drawn from `keys` with a second LCG.
fn sample(keys: &[String], count: usize) -> Vec<String> {
    let n = keys.len();
    let mut s = 0x9e3779b97f4a7c15u64;
    (0..count)
        .map(|_| {
            s = s.wrapping_mul(2862933555777941757).wrapping_add(3037000493);
            keys[(s as usize) % n].clone()
        })
        .collect()
}

fn bench_put_fresh_100k(c: &mut Criterion) {
    c.bench_function("linear::put_fresh_100k", |b| {
        b.iter_batched(
            linear,
            |mut m| {
                for (i, x) in lcg(1).take(100_000).enumerate() {
                    m.put(key(x), i as u64);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
    c.bench_function("chained::put_fresh_100k", |b| {
        b.iter_batched(
            chained,
            |mut m| {
                for (i, x) in lcg(1).take(100_000).enumerate() {
                    m.put(key(x), i as u64);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_get_hit_10k(c: &mut Criterion) {
    let (lp, keys) = filled(linear(), 7, 100_000);
    let queries = sample(&keys, 10_000);
    c.bench_function("linear::get_hit_10k_on_100k", |b| {
        b.iter(|| {
            for k in &queries {
                black_box(lp.get(k.as_str()));
            }
        })
    });

    let (sc, keys) = filled(chained(), 7, 100_000);
    let queries = sample(&keys, 10_000);
    c.bench_function("chained::get_hit_10k_on_100k", |b| {
        b.iter(|| {
            for k in &queries {
                black_box(sc.get(k.as_str()));
            }
        })
    });
}

fn bench_get_miss_10k(c: &mut Criterion) {
    let (lp, _) = filled(linear(), 11, 100_000);
    let (sc, _) = filled(chained(), 11, 100_000);
    let misses: Vec<String> = lcg(0xdead_beef).take(10_000).map(key).collect();
    c.bench_function("linear::get_miss_10k_on_100k", |b| {
        b.iter(|| {
            for k in &misses {
                black_box(lp.get(k.as_str()));
            }
        })
    });
    c.bench_function("chained::get_miss_10k_on_100k", |b| {
        b.iter(|| {
            for k in &misses {
                black_box(sc.get(k.as_str()));
            }
        })
    });
}

fn bench_remove_random_10k(c: &mut Criterion) {
    c.bench_function("linear::remove_random_10k_of_110k", |b| {
        b.iter_batched(
            || {
                let (m, keys) = filled(linear(), 5, 110_000);
                (m, sample(&keys, 10_000))
            },
            |(mut m, victims)| {
                for k in &victims {
                    black_box(m.remove(k.as_str()));
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
    c.bench_function("chained::remove_random_10k_of_110k", |b| {
        b.iter_batched(
            || {
                let (m, keys) = filled(chained(), 5, 110_000);
                (m, sample(&keys, 10_000))
            },
            |(mut m, victims)| {
                for k in &victims {
                    black_box(m.remove(k.as_str()));
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

// Steady put/remove churn: the linear-probing table has to purge tombstones
// without growing.
fn bench_churn_100k(c: &mut Criterion) {
    c.bench_function("linear::churn_100k_window_1k", |b| {
        b.iter_batched(
            || lcg(17).take(100_000).map(key).collect::<Vec<_>>(),
            |keys| {
                let mut m = linear();
                for (i, k) in keys.iter().enumerate() {
                    m.put(k.clone(), i as u64);
                    if i >= 1_000 {
                        m.remove(keys[i - 1_000].as_str());
                    }
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(12)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1))
}

criterion_group! {
    name = benches_put;
    config = bench_config();
    targets = bench_put_fresh_100k, bench_churn_100k
}
criterion_group! {
    name = benches_ops;
    config = bench_config();
    targets = bench_get_hit_10k,
              bench_get_miss_10k,
              bench_remove_random_10k
}
criterion_main!(benches_put, benches_ops);
