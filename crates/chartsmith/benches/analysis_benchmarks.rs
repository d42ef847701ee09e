//! Full analysis pipeline performance benchmarks.
//!
//! Measures end-to-end analysis performance including parsing, profiling,
//! scoring and chart recommendation.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use chartsmith::{Dataset, Engine, Parser};
use std::io::Write;
use tempfile::NamedTempFile;

/// Generate a sales ledger with categories, dates, measures and some gaps.
fn generate_sales_data(rows: usize) -> String {
    let mut data = String::new();
    data.push_str("order_id,order_date,region,category,amount,units,shipped\n");

    let regions = ["North", "South", "East", "West"];
    let categories = ["Hardware", "Software", "Services"];

    for row in 0..rows {
        data.push_str(&format!("{},", row + 1));
        data.push_str(&format!("2024-{:02}-{:02},", (row % 12) + 1, (row % 28) + 1));
        data.push_str(regions[row % regions.len()]);
        data.push(',');
        data.push_str(categories[row % categories.len()]);
        data.push(',');
        // amount with occasional outliers and gaps
        if row % 37 == 0 {
            data.push(',');
        } else if row % 53 == 0 {
            data.push_str("99999.0,");
        } else {
            data.push_str(&format!("{:.2},", 20.0 + (row % 90) as f64 * 1.5));
        }
        data.push_str(&format!("{},", 1 + row % 9));
        data.push_str(if row % 2 == 0 { "true\n" } else { "false\n" });
    }

    data
}

fn parse(data: &str) -> Dataset {
    let mut temp = NamedTempFile::with_suffix(".csv").unwrap();
    temp.write_all(data.as_bytes()).unwrap();
    Parser::new().parse_file(temp.path()).unwrap().0
}

/// Benchmark the full pipeline from file to result.
fn bench_full_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_analysis");

    for rows in [10, 100, 1000].iter() {
        let data = generate_sales_data(*rows);

        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("sales_rows", rows), &data, |b, data| {
            b.iter_with_setup(
                || {
                    let mut temp = NamedTempFile::with_suffix(".csv").unwrap();
                    temp.write_all(data.as_bytes()).unwrap();
                    temp
                },
                |temp| {
                    let (dataset, _) = Parser::new().parse_file(temp.path()).unwrap();
                    black_box(Engine::new().analyze(&dataset))
                },
            )
        });
    }

    group.finish();
}

/// Benchmark analysis alone on an already loaded snapshot.
fn bench_engine_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine_scaling");
    group.sample_size(10);

    for rows in [10_000, 50_000].iter() {
        let dataset = parse(&generate_sales_data(*rows));
        let engine = Engine::new();

        group.throughput(Throughput::Elements(*rows as u64));
        group.bench_with_input(BenchmarkId::new("analyze", rows), &dataset, |b, dataset| {
            b.iter(|| black_box(engine.analyze(dataset)))
        });
    }

    group.finish();
}

/// Benchmark the synthetic path for snapshots without rows.
fn bench_synthetic_fallback(c: &mut Criterion) {
    let dataset = Dataset::new(
        "orders",
        vec!["order_date".to_string(), "category".to_string(), "amount".to_string()],
    )
    .with_row_count(1000);
    let engine = Engine::new();

    c.bench_function("synthetic_fallback", |b| {
        b.iter(|| black_box(engine.analyze(&dataset)))
    });
}

criterion_group!(
    benches,
    bench_full_analysis,
    bench_engine_scaling,
    bench_synthetic_fallback
);
criterion_main!(benches);
