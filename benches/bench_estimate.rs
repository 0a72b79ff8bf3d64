use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use spellfix::{TrainingPair, estimate};
use std::hint::black_box;

const WORDS: &[&str] = &[
    "spelling", "correction", "sentence", "receive", "separate", "definitely",
    "necessary", "occurrence", "government", "beginning", "believe", "address",
];

/// Builds pairs by swapping or doubling letters so every word gets a few typos.
fn generate_pairs(rounds: usize) -> Vec<TrainingPair> {
    let mut pairs = Vec::new();
    for round in 0..rounds {
        for word in WORDS {
            let mut chars: Vec<char> = word.chars().collect();
            let i = round % (chars.len() - 1);
            chars.swap(i, i + 1);
            pairs.push(TrainingPair::new(*word, chars.iter().collect::<String>()));
            pairs.push(TrainingPair::new(*word, *word));
        }
    }
    pairs
}

fn bench_estimate(c: &mut Criterion) {
    let pairs = generate_pairs(200);

    let mut group = c.benchmark_group("estimate");
    group.throughput(Throughput::Elements(pairs.len() as u64));
    group.bench_function("estimate_pairs", |b| {
        b.iter(|| estimate(black_box(&pairs)).unwrap())
    });
    group.finish();
}

criterion_group!(benches, bench_estimate);
criterion_main!(benches);
