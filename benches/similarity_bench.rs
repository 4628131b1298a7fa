use criterion::{criterion_group, criterion_main, Criterion};
use dicelist::optimizer::{Climber, Optimizer, SearchOptions, Silent};
use dicelist::similarity::{Metric, SimilarityMatrix};
use std::hint::black_box;
use std::sync::Arc;

fn bench_words(n: usize) -> Vec<String> {
    let onsets = ['b', 'd', 'k', 'm', 's', 't', 'r', 'l'];
    let vowels = ['a', 'e', 'i', 'o', 'u'];
    (0..n)
        .map(|mut i| {
            let mut word = String::new();
            for _ in 0..3 {
                let d = i % 40;
                i /= 40;
                word.push(onsets[d / 5]);
                word.push(vowels[d % 5]);
            }
            word
        })
        .collect()
}

fn criterion_benchmark(c: &mut Criterion) {
    let owned = bench_words(2000);
    let words: Vec<&str> = owned.iter().map(String::as_str).collect();

    c.bench_function("matrix (2k words, damerau_levenshtein)", |b| {
        b.iter(|| SimilarityMatrix::from_words(black_box(&words), Metric::DamerauLevenshtein, 10.0))
    });

    let matrix = Arc::new(SimilarityMatrix::from_words(
        &words,
        Metric::DamerauLevenshtein,
        10.0,
    ));

    let climber = Climber::new(matrix.clone(), 1296, 1e-12, Some(1));
    c.bench_function("swap_delta", |b| {
        b.iter(|| climber.swap_delta(black_box(17), black_box(1500)))
    });

    let options = SearchOptions {
        stale_thresh: usize::MAX,
        max_attempts: Some(20_000),
        ..Default::default()
    };
    let optimizer = Optimizer::new(matrix, 1296, options);
    c.bench_function("search (20k attempts, K=1296)", |b| {
        b.iter(|| optimizer.run(black_box(Some(7)), Silent))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
