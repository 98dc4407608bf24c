//! Criterion benchmarks for TickerLab hot paths.
//!
//! Benchmarks:
//! 1. Indicator engine over tables of increasing length
//! 2. Feature engineering + OLS training

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tickerlab_core::domain::{PriceRecord, PriceTable};
use tickerlab_core::indicators::compute_indicators;
use tickerlab_core::model::{LinearTrainer, ModelTrainer};

// ── Helpers ──────────────────────────────────────────────────────────

fn make_table(n: usize) -> PriceTable {
    let base_date = chrono::NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
    let records = (0..n)
        .map(|i| {
            let close = 100.0 + (i as f64 * 0.1).sin() * 10.0;
            PriceRecord {
                date: base_date + chrono::Duration::days(i as i64),
                open: close - 0.3,
                high: close + 1.5,
                low: close - 1.5,
                close,
                adj_close: close,
                volume: 1_000_000 + (i as u64 % 500_000),
            }
        })
        .collect();
    PriceTable::new("BENCH", records)
}

// ── 1. Indicator engine ──────────────────────────────────────────────

fn bench_indicators(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_indicators");
    for n in [252usize, 2_520, 25_200] {
        let table = make_table(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &table, |b, table| {
            b.iter(|| compute_indicators(black_box(table)))
        });
    }
    group.finish();
}

// ── 2. Model training ────────────────────────────────────────────────

fn bench_training(c: &mut Criterion) {
    let table = make_table(2_520);
    let trainer = LinearTrainer::default();
    c.bench_function("linear_trainer_10y", |b| {
        b.iter(|| trainer.train(black_box(&table)))
    });
}

criterion_group!(benches, bench_indicators, bench_training);
criterion_main!(benches);
