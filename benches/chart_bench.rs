//! Benchmarks for dataset parsing and configuration building
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use gradeview::chart::{ChartConfiguration, ChartDataset, ChartVariant};
use gradeview::photo::encode_data_url;

fn chart_body(count: usize) -> String {
    let labels: Vec<String> = (0..count).map(|i| format!("M{}", i)).collect();
    let data: Vec<f64> = (0..count).map(|i| (i % 100) as f64 + 0.5).collect();
    serde_json::json!({ "labels": labels, "data": data }).to_string()
}

fn bench_chart(c: &mut Criterion) {
    let mut group = c.benchmark_group("chart");

    for size in [6, 180, 5000] {
        let body = chart_body(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("parse_{}", size), |b| {
            b.iter(|| ChartDataset::from_json(black_box(&body)).unwrap())
        });

        let dataset = ChartDataset::from_json(&body).unwrap();
        group.bench_function(format!("build_{}", size), |b| {
            b.iter(|| ChartConfiguration::build(black_box(&dataset), ChartVariant::Percentage))
        });
    }

    group.finish();
}

fn bench_data_url(c: &mut Criterion) {
    let mut group = c.benchmark_group("data_url");
    let photo = vec![0xABu8; 512 * 1024];

    group.throughput(Throughput::Bytes(photo.len() as u64));
    group.bench_function("encode_512k", |b| {
        b.iter(|| encode_data_url("image/jpeg", black_box(&photo)))
    });

    group.finish();
}

criterion_group!(benches, bench_chart, bench_data_url);
criterion_main!(benches);
