//! Benchmarks for the aggregation fold
//!
//! A year of daily notes is roughly 365 files of 20-40 lines each, so the
//! largest case here covers several years of notes in one scan.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use daytally_core::{aggregate, MidnightPolicy, TaskLineParser};

const CATEGORIES: [&str; 5] = ["work", "health", "study", "home", "admin"];

/// Generate a mix of task lines and prose, one task line in three
fn generate_lines(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| match i % 3 {
            0 => format!(
                "- [{}] {:02}:00 - {:02}:30 Task number {} #{}",
                if i % 2 == 0 { "x" } else { " " },
                i % 23,
                i % 23,
                i,
                CATEGORIES[i % CATEGORIES.len()]
            ),
            1 => format!("\t- follow-up note {}", i),
            _ => String::new(),
        })
        .collect()
}

fn parse_line_benchmark(c: &mut Criterion) {
    c.bench_function("parse_line/task", |b| {
        b.iter(|| TaskLineParser::parse_line(black_box("- [x] 09:00 - 10:30 Write report #work")))
    });
    c.bench_function("parse_line/prose", |b| {
        b.iter(|| TaskLineParser::parse_line(black_box("Meeting notes about the roadmap")))
    });
}

fn aggregate_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");

    for count in [100, 10_000, 100_000] {
        let lines = generate_lines(count);
        group.bench_with_input(BenchmarkId::new("lines", count), &lines, |b, lines| {
            b.iter(|| black_box(aggregate(lines)));
        });
    }

    group.finish();
}

fn merge_benchmark(c: &mut Criterion) {
    let lines = generate_lines(10_000);
    let chunks: Vec<_> = lines
        .chunks(30)
        .map(|chunk| daytally_core::aggregate_with(chunk, MidnightPolicy::Wrap))
        .collect();

    c.bench_function("merge/per_file_summaries", |b| {
        b.iter(|| {
            let mut total = daytally_core::TaskSummary::new();
            for chunk in &chunks {
                total.merge(chunk);
            }
            black_box(total)
        })
    });
}

criterion_group!(benches, parse_line_benchmark, aggregate_benchmark, merge_benchmark);
criterion_main!(benches);
