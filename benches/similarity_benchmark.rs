//! Benchmarks for similarity scoring.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use mpn_match::{PatternClassifier, SimilarityEngine, TypeClassifier};
use std::hint::black_box;

const PAIRS: &[(&str, &str, &str)] = &[
    ("resistor", "CRCW060310K0FKEA", "RC0603FR-0710KL"),
    ("capacitor", "GRM188R71H104KA93D", "CL10B104KB8NNNC"),
    ("opamp", "LM358DR", "LM2904DR"),
    ("mosfet", "IRF540N", "IRFZ44N"),
    ("memory", "W25Q128JVSIQ", "W25Q64JVSSIQ"),
    ("fallback", "XYZ-1234-AB", "XYZ-1235-AB"),
];

fn candidates(n: usize) -> Vec<String> {
    let families = ["CRCW0603", "RC0603FR-07", "ERJ-3EKF"];
    (0..n)
        .map(|i| format!("{}{}K{}FKEA", families[i % families.len()], 1 + i % 97, i % 10))
        .collect()
}

fn bench_pairs(c: &mut Criterion) {
    let engine = SimilarityEngine::new();
    let mut group = c.benchmark_group("pair_similarity");
    for &(name, a, b) in PAIRS {
        group.bench_with_input(BenchmarkId::new("explain", name), &(a, b), |bench, &(a, b)| {
            bench.iter(|| engine.explain(black_box(a), black_box(b)));
        });
    }
    group.finish();
}

fn bench_classify(c: &mut Criterion) {
    let classifier = PatternClassifier::new();
    c.bench_function("classify_mixed", |b| {
        b.iter(|| {
            for &(_, a, m) in PAIRS {
                black_box(classifier.classify(a));
                black_box(classifier.classify(m));
            }
        });
    });
}

fn bench_ranking(c: &mut Criterion) {
    let engine = SimilarityEngine::new();
    let mut group = c.benchmark_group("rank_candidates");
    for size in &[100, 1000] {
        let pool = candidates(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &pool, |b, pool| {
            b.iter(|| engine.rank_candidates(black_box("CRCW060310K0FKEA"), pool));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_pairs, bench_classify, bench_ranking);
criterion_main!(benches);
