//! Return and volatility indicators.
//!
//! `engine::compute_indicators` is the entry point; `stats` and `rolling` hold
//! the series arithmetic it is built from.

pub mod engine;
pub mod rolling;
pub mod stats;

pub use engine::{
    compute_indicators, AugmentedPriceTable, AugmentedRecord, IndicatorSummary, LONG_MA_WINDOW,
    SHORT_MA_WINDOW, VOLATILITY_WINDOW,
};
pub use stats::TRADING_DAYS_PER_YEAR;

/// Create a price table from adjusted closes for testing.
///
/// One record per consecutive day starting 2024-01-01; OHLC equal the close.
#[cfg(test)]
pub fn make_table(adj_closes: &[f64]) -> crate::domain::PriceTable {
    use crate::domain::{PriceRecord, PriceTable};
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let records = adj_closes
        .iter()
        .enumerate()
        .map(|(i, &price)| PriceRecord {
            date: base_date + chrono::Duration::days(i as i64),
            open: price,
            high: price,
            low: price,
            close: price,
            adj_close: price,
            volume: 1000,
        })
        .collect();
    PriceTable::new("TEST", records)
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
