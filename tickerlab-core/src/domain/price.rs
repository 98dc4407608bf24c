//! Price records, the fundamental market data unit.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Daily OHLCV record for a single ticker.
///
/// `adj_close` is split/dividend adjusted; every return and moving average is
/// computed from it rather than from `close`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub adj_close: f64,
    pub volume: u64,
}

impl PriceRecord {
    /// Returns true if `adj_close` is not a usable number (void record).
    ///
    /// Other price fields may be NaN when the provider left them blank; only
    /// `adj_close` feeds the indicators and the model.
    pub fn is_void(&self) -> bool {
        !self.adj_close.is_finite()
    }
}

/// Time-ordered sequence of price records for one ticker.
///
/// Tables produced by a `DataProvider` are strictly increasing in date with no
/// duplicates. Hand-built tables may violate that; consumers that depend on
/// ordering call [`PriceTable::sorted_records`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceTable {
    pub symbol: String,
    pub records: Vec<PriceRecord>,
}

impl PriceTable {
    pub fn new(symbol: impl Into<String>, records: Vec<PriceRecord>) -> Self {
        Self {
            symbol: symbol.into(),
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Copy of the records sorted by date ascending. Stable for equal dates.
    pub fn sorted_records(&self) -> Vec<PriceRecord> {
        let mut records = self.records.clone();
        records.sort_by_key(|r| r.date);
        records
    }

    /// Adjusted close column in table order.
    pub fn adj_closes(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.adj_close).collect()
    }

    /// True if dates are strictly increasing.
    pub fn is_strictly_ordered(&self) -> bool {
        self.records.windows(2).all(|w| w[0].date < w[1].date)
    }
}
