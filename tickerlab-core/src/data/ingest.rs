//! Ingestion: turn provider rows into a canonical `PriceTable`.
//!
//! Canonical means: void records removed, sorted by date ascending, one
//! record per date. When a date repeats, the later row wins.

use crate::domain::{PriceRecord, PriceTable};

/// Outcome of ingesting raw provider rows.
#[derive(Debug, Clone)]
pub struct IngestResult {
    pub table: PriceTable,
    pub void_dropped: usize,
    pub duplicates_dropped: usize,
}

impl IngestResult {
    pub fn dropped(&self) -> usize {
        self.void_dropped + self.duplicates_dropped
    }
}

pub fn ingest(symbol: &str, records: Vec<PriceRecord>) -> IngestResult {
    let total = records.len();
    let mut rows: Vec<PriceRecord> = records.into_iter().filter(|r| !r.is_void()).collect();
    let void_dropped = total - rows.len();

    // Stable sort keeps provider order among equal dates so "last wins" is well defined.
    rows.sort_by_key(|r| r.date);

    let mut canonical: Vec<PriceRecord> = Vec::with_capacity(rows.len());
    for row in rows {
        match canonical.last_mut() {
            Some(prev) if prev.date == row.date => *prev = row,
            _ => canonical.push(row),
        }
    }
    let duplicates_dropped = total - void_dropped - canonical.len();

    IngestResult {
        table: PriceTable::new(symbol, canonical),
        void_dropped,
        duplicates_dropped,
    }
}
