//! Feature engineering for the next-day return model.
//!
//! Row `i` uses only prices and volumes at or before `i`; the target is the
//! return from `i` to `i + 1`. Rows without a full lookback or without a
//! successor are dropped.

use crate::domain::PriceTable;
use crate::indicators::stats::{mean, sample_std};
use chrono::NaiveDate;

/// Rows of history needed before the first feature row.
pub const FEATURE_LOOKBACK: usize = 10;

pub const FEATURE_NAMES: [&str; 6] = [
    "return_1d",
    "return_5d",
    "ma5_ratio",
    "ma10_ratio",
    "rolling_volatility10",
    "log_volume",
];

/// Model inputs and target for one trading date.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    pub date: NaiveDate,
    pub features: [f64; 6],
    pub target: f64,
}

/// Build feature rows from a price table (sorted by date first).
pub fn feature_engineer(table: &PriceTable) -> Vec<FeatureRow> {
    let records = table.sorted_records();
    let prices: Vec<f64> = records.iter().map(|r| r.adj_close).collect();
    let n = prices.len();
    if n <= FEATURE_LOOKBACK + 1 {
        return Vec::new();
    }

    let pct = |from: f64, to: f64| to / from - 1.0;

    let mut rows = Vec::with_capacity(n - FEATURE_LOOKBACK - 1);
    for i in FEATURE_LOOKBACK..(n - 1) {
        let p = prices[i];
        let daily: Vec<f64> = ((i - 9)..=i).map(|j| pct(prices[j - 1], prices[j])).collect();

        let (Some(ma5), Some(ma10), Some(vol10)) = (
            mean(&prices[(i - 4)..=i]),
            mean(&prices[(i - 9)..=i]),
            sample_std(&daily),
        ) else {
            continue;
        };

        let features = [
            pct(prices[i - 1], p),
            pct(prices[i - 5], p),
            p / ma5 - 1.0,
            p / ma10 - 1.0,
            vol10,
            (records[i].volume as f64).ln_1p(),
        ];
        let target = pct(p, prices[i + 1]);

        if features.iter().all(|f| f.is_finite()) && target.is_finite() {
            rows.push(FeatureRow {
                date: records[i].date,
                features,
                target,
            });
        }
    }
    rows
}
