use chain_hashmap::ChainHashMap;
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> i32 {
    (n >> 32) as i32
}

fn bench_insert(c: &mut Criterion) {
    for buckets in [256u32, 16_384] {
        c.bench_function(&format!("chain_hashmap_insert_10k_b{buckets}"), |b| {
            b.iter_batched(
                || ChainHashMap::<u64>::with_buckets(buckets),
                |mut m| {
                    for (i, x) in lcg(1).take(10_000).enumerate() {
                        *m.get_or_insert(key(x)) = i as u64;
                    }
                    black_box(m)
                },
                BatchSize::SmallInput,
            )
        });
    }
}

fn bench_get_hit(c: &mut Criterion) {
    c.bench_function("chain_hashmap_get_hit", |b| {
        let mut m = ChainHashMap::with_buckets(16_384);
        let keys: Vec<_> = lcg(7).take(20_000).map(key).collect();
        for (i, &k) in keys.iter().enumerate() {
            *m.get_or_insert(k) = i as u64;
        }
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = *it.next().unwrap();
            black_box(m.get(k));
        })
    });
}

fn bench_get_miss(c: &mut Criterion) {
    c.bench_function("chain_hashmap_get_miss", |b| {
        let mut m = ChainHashMap::with_buckets(16_384);
        for (i, x) in lcg(11).take(10_000).enumerate() {
            *m.get_or_insert(key(x)) = i as u64;
        }
        let mut miss = lcg(0xdead_beef);
        b.iter(|| {
            // keys unlikely in map
            black_box(m.get(key(miss.next().unwrap())));
        })
    });
}

fn bench_erase_reinsert(c: &mut Criterion) {
    c.bench_function("chain_hashmap_erase_reinsert", |b| {
        let mut m = ChainHashMap::<u64>::with_buckets(1024);
        let keys: Vec<_> = lcg(3).take(8_000).map(key).collect();
        for &k in &keys {
            m.get_or_insert(k);
        }
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = *it.next().unwrap();
            black_box(m.erase(k));
            *m.get_or_insert(k) = 1;
        })
    });
}

fn bench_clone(c: &mut Criterion) {
    c.bench_function("chain_hashmap_clone_10k", |b| {
        let mut m = ChainHashMap::with_buckets(4096);
        for (i, x) in lcg(5).take(10_000).enumerate() {
            *m.get_or_insert(key(x)) = i as u64;
        }
        b.iter(|| black_box(m.clone()))
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(8))
        .warm_up_time(Duration::from_secs(2))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_insert, bench_get_hit, bench_get_miss, bench_erase_reinsert, bench_clone
}
criterion_main!(benches);
