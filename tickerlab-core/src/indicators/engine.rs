//! Indicator engine: price table in, summary statistics and augmented table out.
//!
//! The two leading-window policies differ: moving averages are backfilled with
//! their first defined value, rolling volatility is zero-filled.

use super::rolling::{backfill, fill_none, rolling_mean, rolling_sample_std};
use super::stats::{mean, sample_std, sharpe_ratio, simple_returns};
use crate::domain::{PriceRecord, PriceTable};
use serde::{Deserialize, Serialize};

pub const SHORT_MA_WINDOW: usize = 5;
pub const LONG_MA_WINDOW: usize = 10;
pub const VOLATILITY_WINDOW: usize = 10;

/// Whole-table statistics. `None` marks a statistic that is undefined for the
/// input (empty table, or a single row for the sample deviation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSummary {
    pub mean_return: Option<f64>,
    pub volatility: Option<f64>,
    pub sharpe_ratio: Option<f64>,
    pub last_price: Option<f64>,
    pub data_points: usize,
}

/// A price record with its derived columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AugmentedRecord {
    pub record: PriceRecord,
    pub returns: f64,
    pub ma5: Option<f64>,
    pub ma10: Option<f64>,
    pub rolling_volatility10: f64,
}

/// Price table sorted by date with derived columns aligned by index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AugmentedPriceTable {
    pub symbol: String,
    pub rows: Vec<AugmentedRecord>,
}

impl AugmentedPriceTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn returns(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.returns).collect()
    }

    pub fn ma5(&self) -> Vec<Option<f64>> {
        self.rows.iter().map(|r| r.ma5).collect()
    }

    pub fn ma10(&self) -> Vec<Option<f64>> {
        self.rows.iter().map(|r| r.ma10).collect()
    }

    pub fn rolling_volatility10(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.rolling_volatility10).collect()
    }
}

/// Compute the summary and augmented table for `table`.
///
/// Pure: the input is not modified. Records are sorted by date first, so the
/// result does not depend on input order.
pub fn compute_indicators(table: &PriceTable) -> (IndicatorSummary, AugmentedPriceTable) {
    let records = table.sorted_records();
    let prices: Vec<f64> = records.iter().map(|r| r.adj_close).collect();

    let returns = simple_returns(&prices);
    let mean_return = mean(&returns);
    let volatility = sample_std(&returns);

    let summary = IndicatorSummary {
        mean_return,
        volatility,
        sharpe_ratio: sharpe_ratio(mean_return, volatility),
        last_price: prices.last().copied(),
        data_points: records.len(),
    };

    let ma5 = backfill(&rolling_mean(&prices, SHORT_MA_WINDOW));
    let ma10 = backfill(&rolling_mean(&prices, LONG_MA_WINDOW));
    let rolling_vol = fill_none(&rolling_sample_std(&returns, VOLATILITY_WINDOW), 0.0);

    let rows = records
        .into_iter()
        .enumerate()
        .map(|(i, record)| AugmentedRecord {
            record,
            returns: returns[i],
            ma5: ma5[i],
            ma10: ma10[i],
            rolling_volatility10: rolling_vol[i],
        })
        .collect();

    (
        summary,
        AugmentedPriceTable {
            symbol: table.symbol.clone(),
            rows,
        },
    )
}
