use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use twoq::config::{OptimalCacheConfig, TwoQCacheConfig};
use twoq::loader::FnLoader;
use twoq::optimal::next_uses;
use twoq::{OptimalCache, TwoQCache};

type U64Loader = FnLoader<fn(&u64) -> u64>;

fn load(key: &u64) -> u64 {
    key.wrapping_mul(31)
}

// Helper functions to create caches with the init pattern
fn make_two_q(cap: usize) -> TwoQCache<u64, u64, U64Loader> {
    let config = TwoQCacheConfig { capacity: cap };
    TwoQCache::init(config, FnLoader(load as fn(&u64) -> u64), None).unwrap()
}

fn make_optimal(cap: usize, trace: Vec<u64>) -> OptimalCache<u64> {
    let config = OptimalCacheConfig { capacity: cap };
    OptimalCache::init(config, trace, None).unwrap()
}

/// Skewed trace: every third request goes to a small hot set.
fn skewed_trace(len: usize, hot: u64, cold: u64) -> Vec<u64> {
    let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
    (0..len)
        .map(|i| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            if i % 3 == 0 {
                state % hot
            } else {
                hot + state % cold
            }
        })
        .collect()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    const CACHE_SIZE: usize = 1000;
    let mut group = c.benchmark_group("Cache Operations");

    // 2Q benchmarks
    {
        let mut cache = make_two_q(CACHE_SIZE);
        // Twice each so the keys end up in Am.
        for i in 0..(CACHE_SIZE / 2) as u64 {
            cache.access(i);
            cache.access(i);
        }

        group.bench_function("2Q hot hit", |b| {
            b.iter(|| {
                for i in 0..100u64 {
                    black_box(cache.access(i % (CACHE_SIZE / 2) as u64));
                }
            });
        });

        let mut next = CACHE_SIZE as u64;
        group.bench_function("2Q cold miss", |b| {
            b.iter(|| {
                for _ in 0..100 {
                    next += 1;
                    black_box(cache.access(next));
                }
            });
        });
    }

    // Whole-trace replay
    {
        let trace = skewed_trace(10_000, 200, 5_000);

        group.bench_function("2Q replay 10k", |b| {
            b.iter(|| {
                let mut cache = make_two_q(CACHE_SIZE);
                for &key in &trace {
                    cache.access(key);
                }
                black_box(cache.hits())
            });
        });

        group.bench_function("next-use table 10k", |b| {
            b.iter(|| black_box(next_uses(&trace)));
        });
    }

    group.finish();

    // The optimal victim search is linear in capacity, so track how it scales.
    let mut group = c.benchmark_group("Optimal replay");
    let trace = skewed_trace(10_000, 200, 5_000);
    for cap in [16usize, 128, 1024] {
        group.bench_with_input(BenchmarkId::from_parameter(cap), &cap, |b, &cap| {
            let mut cache = make_optimal(cap, trace.clone());
            b.iter(|| black_box(cache.run()));
        });
    }
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
