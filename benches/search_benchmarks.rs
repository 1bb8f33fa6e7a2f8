//! Performance benchmarks for the directory search index.
//!
//! Measures:
//! - Index build time for different dataset sizes
//! - Query time per matching phase (exact, prefix, substring) and browse mode
//! - Search through the refresh-coordinating tools with a warm index

use async_trait::async_trait;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;
use tokio::runtime::Runtime;
use vc_dashboard_search::error::DirectoryResult;
use vc_dashboard_search::repositories::{CompanyRepository, FirmRepository};
use vc_dashboard_search::{Company, DirectorySearchTools, Firm, Metrics, SearchIndex};

const CITIES: &[(&str, &str)] = &[
    ("Boston", "MA"),
    ("San Francisco", "CA"),
    ("New York", "NY"),
    ("Austin", "TX"),
    ("Seattle", "WA"),
];

const WORDS: &[&str] = &[
    "Acme", "Northwind", "Blue", "Harbor", "Summit", "Quantum", "Granite", "Lattice", "Orbit",
    "Pioneer",
];

fn synthetic_firms(count: usize) -> Vec<Firm> {
    (0..count)
        .map(|i| {
            let (city, state) = CITIES[i % CITIES.len()];
            Firm::new(format!(
                "{} {} Ventures {}",
                WORDS[i % WORDS.len()],
                WORDS[(i / WORDS.len()) % WORDS.len()],
                i
            ))
            .with_id(i.to_string())
            .with_location(city, state)
        })
        .collect()
}

fn synthetic_companies(count: usize) -> Vec<Company> {
    (0..count)
        .map(|i| {
            let (city, state) = CITIES[(i + 2) % CITIES.len()];
            Company::new(format!("{}{} Labs", WORDS[i % WORDS.len()], i))
                .with_domain(format!("company{}.example.com", i))
                .with_location(city, state)
        })
        .collect()
}

fn built_index(size: usize) -> SearchIndex {
    let mut index = SearchIndex::new();
    index.build(&synthetic_firms(size), &synthetic_companies(size));
    index
}

/// Benchmark index build for different dataset sizes.
fn bench_index_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_build");

    for size in [100, 1_000, 5_000] {
        let firms = synthetic_firms(size);
        let companies = synthetic_companies(size);

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let mut index = SearchIndex::new();
                index.build(black_box(&firms), black_box(&companies));
                index
            });
        });
    }

    group.finish();
}

/// Benchmark queries that resolve in each matching phase.
fn bench_query_phases(c: &mut Criterion) {
    let index = built_index(5_000);
    let mut group = c.benchmark_group("query_phase");

    for (label, query) in [
        ("exact", "boston"),
        ("prefix", "quan"),
        ("substring", "wind"),
        ("no_match", "zzzz"),
        ("browse", ""),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(label), &query, |b, query| {
            b.iter(|| index.search(black_box(query), 20));
        });
    }

    group.finish();
}

/// Benchmark how the result limit affects query time.
fn bench_query_limits(c: &mut Criterion) {
    let index = built_index(5_000);
    let mut group = c.benchmark_group("query_limit");

    for limit in [10, 20, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(limit), &limit, |b, &limit| {
            b.iter(|| index.search(black_box("ac"), limit));
        });
    }

    group.finish();
}

struct StaticFirms(Vec<Firm>);

#[async_trait]
impl FirmRepository for StaticFirms {
    async fn list(&self, limit: usize, offset: usize) -> DirectoryResult<Vec<Firm>> {
        Ok(self.0.iter().skip(offset).take(limit).cloned().collect())
    }

    fn source_name(&self) -> String {
        "bench:firms".to_string()
    }
}

struct StaticCompanies(Vec<Company>);

#[async_trait]
impl CompanyRepository for StaticCompanies {
    async fn list(&self, limit: usize, offset: usize) -> DirectoryResult<Vec<Company>> {
        Ok(self.0.iter().skip(offset).take(limit).cloned().collect())
    }

    fn source_name(&self) -> String {
        "bench:companies".to_string()
    }
}

/// Benchmark searching through the tools once the index is warm.
fn bench_tools_warm_search(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let tools = DirectorySearchTools::new(
        vec![Arc::new(StaticFirms(synthetic_firms(1_000))) as Arc<dyn FirmRepository>],
        vec![Arc::new(StaticCompanies(synthetic_companies(1_000))) as Arc<dyn CompanyRepository>],
        3_600,
        Metrics::new(),
    );
    rt.block_on(tools.refresh(true)).unwrap();

    c.bench_function("tools_warm_search", |b| {
        b.to_async(&rt)
            .iter(|| async { tools.search(black_box("summit"), 20).await });
    });
}

criterion_group!(
    benches,
    bench_index_build,
    bench_query_phases,
    bench_query_limits,
    bench_tools_warm_search
);
criterion_main!(benches);
