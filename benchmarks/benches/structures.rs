use ballot_index::{KeyedStore, PrefixIndex, RangeSumStructure};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::Rng;
use std::hint::black_box;
use std::time::Duration;

fn random_keys(count: usize) -> Vec<String> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| {
            (0..8)
                .map(|_| (b'a' + rng.gen_range(0..26)) as char)
                .collect()
        })
        .collect()
}

/// Lookup cost as the fixed-capacity table fills past its bucket count
fn bench_keyed_store(c: &mut Criterion) {
    let mut group = c.benchmark_group("keyed_store");
    group.warm_up_time(Duration::from_millis(100));

    let keys = random_keys(2_000);
    for capacity in [100usize, 500, 2_000] {
        let mut store = KeyedStore::new(capacity).unwrap();
        for (i, key) in keys.iter().enumerate() {
            store.insert(key.clone(), i);
        }

        group.bench_with_input(BenchmarkId::new("get", capacity), &store, |b, store| {
            let mut i = 0;
            b.iter(|| {
                i = (i + 1) % keys.len();
                black_box(store.get(keys[i].as_str()))
            })
        });
    }

    group.bench_function("insert_2000", |b| {
        b.iter(|| {
            let mut store = KeyedStore::new(500).unwrap();
            for (i, key) in keys.iter().enumerate() {
                store.insert(key.as_str(), i);
            }
            black_box(store.stats())
        })
    });

    group.finish();
}

fn bench_prefix_index(c: &mut Criterion) {
    let mut group = c.benchmark_group("prefix_index");
    group.warm_up_time(Duration::from_millis(100));

    let keys = random_keys(5_000);
    let mut index = PrefixIndex::new();
    for (i, key) in keys.iter().enumerate() {
        index.insert(key, i);
    }

    group.bench_function("search", |b| {
        let mut i = 0;
        b.iter(|| {
            i = (i + 1) % keys.len();
            black_box(index.search(&keys[i]))
        })
    });

    for prefix in ["a", "ab", "abc"] {
        group.bench_with_input(BenchmarkId::new("starts_with", prefix), prefix, |b, prefix| {
            b.iter(|| black_box(index.starts_with(prefix).len()))
        });
    }

    group.finish();
}

fn bench_range_sum(c: &mut Criterion) {
    let mut group = c.benchmark_group("range_sum");
    group.warm_up_time(Duration::from_millis(100));

    let values: Vec<i64> = (0..100_000).collect();
    let mut tree = RangeSumStructure::new(&values);

    group.bench_function("build_100k", |b| {
        b.iter(|| black_box(RangeSumStructure::new(black_box(&values))))
    });

    group.bench_function("query", |b| {
        b.iter(|| black_box(tree.query(black_box(1_234), black_box(98_765)).unwrap()))
    });

    group.bench_function("update", |b| {
        let mut i = 0usize;
        b.iter(|| {
            i = (i + 7_919) % values.len();
            tree.update(i, black_box(42)).unwrap();
        })
    });

    group.finish();
}

criterion_group!(benches, bench_keyed_store, bench_prefix_index, bench_range_sum);
criterion_main!(benches);
