//! Benchmarks for matching, index builds and full searches.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use dinefind_search::{CatalogRecord, FieldIndex, FieldWeights, Matcher, Pattern, SearchEngine};
use std::hint::black_box;

const NAMES: &[&str] = &["Sultan", "Zen", "Olive", "Cedar", "Harbor", "Garden", "Tannour", "Bella"];
const KINDS: &[&str] = &["Grill", "Kitchen", "House", "Bistro", "Bar", "Cafe"];
const CATEGORIES: &[&str] = &["Lebanese", "Japanese", "Italian", "Cafe", "Seafood", "Mexican"];

fn create_catalog(count: usize) -> Vec<CatalogRecord> {
    (0..count)
        .map(|i| {
            let name = format!("{} {} {}", NAMES[i % NAMES.len()], KINDS[i % KINDS.len()], i);
            CatalogRecord::new(format!("venue-{}", i), name, CATEGORIES[i % CATEGORIES.len()])
                .with_tags(["family", "outdoor seating"])
                .with_description("Seasonal menu with local produce and a long wine list")
                .with_address("Main Street, Beirut")
                .with_rating((i % 50) as f64 / 10.0, (i * 7 % 300) as u32)
        })
        .collect()
}

fn bench_matcher(c: &mut Criterion) {
    let matcher = Matcher::default();
    let pattern = Pattern::new("lebanse");
    let long = "seasonal menu with local produce and a long wine list from the lebanese mountains";

    let mut group = c.benchmark_group("matcher");
    group.bench_function("short_field", |b| {
        b.iter(|| matcher.score(black_box(&pattern), black_box("lebanese")))
    });
    group.bench_function("long_field", |b| {
        b.iter(|| matcher.score(black_box(&pattern), black_box(long)))
    });
    group.finish();
}

fn bench_index_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_build");
    let weights = FieldWeights::default();

    for size in [100, 1000, 5000].iter() {
        let catalog = create_catalog(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| FieldIndex::build(black_box(&catalog), &weights))
        });
    }
    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");

    for size in [100, 1000, 5000].iter() {
        let catalog = create_catalog(*size);
        let engine = SearchEngine::with_defaults();
        engine.build_index(&catalog);

        group.bench_with_input(BenchmarkId::new("typo", size), size, |b, _| {
            b.iter(|| engine.search(black_box("lebanse food"), &catalog, None, 50))
        });
        group.bench_with_input(BenchmarkId::new("name", size), size, |b, _| {
            b.iter(|| engine.search(black_box("sultan grill"), &catalog, None, 50))
        });
    }
    group.finish();
}

fn bench_suggest(c: &mut Criterion) {
    let catalog = create_catalog(1000);
    let engine = SearchEngine::with_defaults();

    c.bench_function("suggest_1000", |b| b.iter(|| engine.suggest(black_box("ital"), &catalog)));
}

criterion_group!(benches, bench_matcher, bench_index_build, bench_search, bench_suggest);
criterion_main!(benches);
