// Benchmarks for index build and ranking
use bioquery::{Dataset, Predictor, QueryParams, RankingConfig, Record, TfidfConfig, TfidfVectorizer};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;

const WORDS: &[&str] = &[
    "liver", "heart", "bone", "muscle", "gene", "expression", "microgravity", "radiation",
    "spaceflight", "mice", "rats", "astronauts", "oxidative", "stress", "immune", "response",
    "cells", "tissue", "metabolism", "orbit", "plants", "roots", "protein", "signaling",
];

fn generate_abstract(rng: &mut impl Rng, len: usize) -> String {
    (0..len)
        .map(|_| WORDS[rng.random_range(0..WORDS.len())])
        .collect::<Vec<_>>()
        .join(" ")
}

fn generate_dataset(size: usize) -> Dataset {
    let mut rng = rand::rng();
    let records = (0..size)
        .map(|row| Record {
            row,
            organism: Some("Mus musculus".to_string()),
            gravity_condition: Some("Microgravity".to_string()),
            experimental_type: Some("Spaceflight".to_string()),
            abstract_text: generate_abstract(&mut rng, 120),
            title: None,
            link: None,
        })
        .collect();
    Dataset::from_records(records)
}

fn benchmark_index_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_build");

    for size in [100, 1000, 5000].iter() {
        let dataset = generate_dataset(*size);
        group.bench_with_input(BenchmarkId::new("tfidf", size), &dataset, |b, dataset| {
            b.iter(|| {
                TfidfVectorizer::fit_transform(black_box(&dataset.abstracts()), &TfidfConfig::default())
                    .unwrap()
            });
        });
    }

    group.finish();
}

fn benchmark_predict(c: &mut Criterion) {
    let mut group = c.benchmark_group("predict");

    let dataset = generate_dataset(5000);
    let (vectorizer, matrix) =
        TfidfVectorizer::fit_transform(&dataset.abstracts(), &TfidfConfig::default()).unwrap();
    let predictor = Predictor::new(&dataset, &vectorizer, &matrix, RankingConfig::default()).unwrap();

    let query = "mouse liver microgravity oxidative stress";
    let params = QueryParams::extract(query);
    group.bench_function("rank_5000", |b| {
        b.iter(|| predictor.predict(black_box(query), &params));
    });

    group.finish();
}

criterion_group!(benches, benchmark_index_build, benchmark_predict);
criterion_main!(benches);
