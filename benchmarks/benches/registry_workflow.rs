use ballot_index::config::StoreConfig;
use ballot_index::registry::ElectionRegistry;
use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::time::Duration;

const NAMES: [&str; 8] = [
    "Ada", "Alan", "Barbara", "Claude", "Donald", "Edsger", "Grace", "John",
];

fn seeded_registry(voters: usize) -> (ElectionRegistry, Vec<String>, Vec<String>) {
    let mut registry = ElectionRegistry::new(&StoreConfig::default()).unwrap();

    let candidates: Vec<String> = NAMES
        .iter()
        .map(|name| {
            registry
                .register_candidate(name, "Independent")
                .unwrap()
                .candidate_id
        })
        .collect();

    let voter_ids: Vec<String> = (0..voters)
        .map(|i| {
            registry
                .register_voter("Bench Voter", 30, &format!("voter{}@example.com", i))
                .unwrap()
                .voter_id
        })
        .collect();

    (registry, candidates, voter_ids)
}

/// End-to-end registry operations over the default table sizes
fn bench_registry(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry");
    group.warm_up_time(Duration::from_millis(100));

    group.bench_function("cast_200_votes", |b| {
        b.iter_batched(
            || seeded_registry(200),
            |(mut registry, candidates, voter_ids)| {
                for (i, voter_id) in voter_ids.iter().enumerate() {
                    registry
                        .cast_vote(voter_id, &candidates[i % candidates.len()])
                        .unwrap();
                }
                black_box(registry.winner().map(|c| c.votes))
            },
            BatchSize::LargeInput,
        )
    });

    let (registry, _, _) = seeded_registry(200);

    group.bench_function("search_candidates", |b| {
        b.iter(|| black_box(registry.search_candidates(black_box("a")).len()))
    });

    group.bench_function("snapshot", |b| b.iter(|| black_box(registry.snapshot())));

    group.bench_function("system_stats", |b| {
        b.iter(|| black_box(registry.system_stats()))
    });

    group.finish();
}

criterion_group!(benches, bench_registry);
criterion_main!(benches);
