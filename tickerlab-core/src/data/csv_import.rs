//! CSV import provider.
//!
//! Reads price history from local CSV files with the header
//! `Date,Open,High,Low,Close,Adj Close,Volume` (the layout Yahoo's download
//! button and most vendors produce). Extra columns are ignored, so a data file
//! written by the pipeline can be fed back in.
//!
//! The path is either a directory holding `{SYMBOL}.csv` files or a single
//! file used for whatever symbol is requested. Period and interval are not
//! applied: the file is taken as-is.

use super::ingest::ingest;
use super::provider::{DataError, DataProvider, DataSource, FetchResult};
use crate::domain::{Interval, Period, PriceRecord};
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Open")]
    open: Option<f64>,
    #[serde(rename = "High")]
    high: Option<f64>,
    #[serde(rename = "Low")]
    low: Option<f64>,
    #[serde(rename = "Close")]
    close: Option<f64>,
    #[serde(rename = "Adj Close")]
    adj_close: Option<f64>,
    #[serde(rename = "Volume")]
    volume: Option<u64>,
}

impl CsvRow {
    fn into_record(self, line: usize) -> Result<PriceRecord, DataError> {
        let date = parse_date(&self.date).ok_or_else(|| {
            DataError::CsvImport(format!("line {line}: invalid date '{}'", self.date))
        })?;
        let close = self.close.unwrap_or(f64::NAN);
        Ok(PriceRecord {
            date,
            open: self.open.unwrap_or(f64::NAN),
            high: self.high.unwrap_or(f64::NAN),
            low: self.low.unwrap_or(f64::NAN),
            close,
            adj_close: self.adj_close.unwrap_or(close),
            volume: self.volume.unwrap_or(0),
        })
    }
}

/// Accepts `YYYY-MM-DD`, optionally followed by a time component
/// (`2024-01-02 00:00:00-05:00`), as written by common exporters.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let day = raw.trim().get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

/// Offline provider backed by CSV files.
#[derive(Debug, Clone)]
pub struct CsvProvider {
    path: PathBuf,
}

impl CsvProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn file_for(&self, symbol: &str) -> PathBuf {
        if self.path.is_dir() {
            self.path.join(format!("{symbol}.csv"))
        } else {
            self.path.clone()
        }
    }

    /// Read every row of a price CSV into records (unsorted, unvalidated).
    pub fn read_records(path: &Path) -> Result<Vec<PriceRecord>, DataError> {
        let mut reader = csv::Reader::from_path(path)
            .map_err(|e| DataError::CsvImport(format!("{}: {e}", path.display())))?;

        let mut records = Vec::new();
        for (i, row) in reader.deserialize::<CsvRow>().enumerate() {
            // Header is line 1
            let line = i + 2;
            let row = row.map_err(|e| {
                DataError::CsvImport(format!("{} line {line}: {e}", path.display()))
            })?;
            records.push(row.into_record(line)?);
        }
        Ok(records)
    }
}

impl DataProvider for CsvProvider {
    fn name(&self) -> &str {
        "csv_import"
    }

    fn fetch(
        &self,
        symbol: &str,
        _period: Period,
        _interval: Interval,
    ) -> Result<FetchResult, DataError> {
        let file = self.file_for(symbol);
        if !file.exists() {
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }

        let records = Self::read_records(&file)?;
        let ingested = ingest(symbol, records);

        info!(
            symbol,
            file = %file.display(),
            records = ingested.table.len(),
            dropped = ingested.dropped(),
            "csv import complete"
        );

        Ok(FetchResult {
            dropped: ingested.dropped(),
            table: ingested.table,
            source: DataSource::CsvImport,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Date,Open,High,Low,Close,Adj Close,Volume
2024-01-03,184.22,185.88,183.43,184.25,183.35,58414500
2024-01-02,187.15,188.44,183.89,185.64,184.73,82488700
2024-01-04,182.15,183.09,180.88,181.91,,71983600
";

    fn write_sample(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, SAMPLE).unwrap();
        path
    }

    #[test]
    fn reads_directory_by_symbol() {
        let dir = tempfile::tempdir().unwrap();
        write_sample(dir.path(), "AAPL.csv");

        let provider = CsvProvider::new(dir.path());
        let result = provider
            .fetch("AAPL", Period::default(), Interval::default())
            .unwrap();

        assert_eq!(result.source, DataSource::CsvImport);
        assert_eq!(result.table.len(), 3);
        assert!(result.table.is_strictly_ordered());
        assert_eq!(result.table.records[0].adj_close, 184.73);
        // Missing Adj Close falls back to Close
        assert_eq!(result.table.records[2].adj_close, 181.91);
    }

    #[test]
    fn single_file_serves_any_symbol() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_sample(dir.path(), "prices.csv");

        let provider = CsvProvider::new(file);
        let result = provider
            .fetch("ANY", Period::default(), Interval::default())
            .unwrap();
        assert_eq!(result.table.symbol, "ANY");
        assert_eq!(result.table.len(), 3);
    }

    #[test]
    fn missing_file_is_symbol_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let provider = CsvProvider::new(dir.path());
        let err = provider
            .fetch("NOPE", Period::default(), Interval::default())
            .unwrap_err();
        assert!(matches!(err, DataError::SymbolNotFound { .. }));
    }

    #[test]
    fn bad_date_reports_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("BAD.csv");
        std::fs::write(
            &path,
            "Date,Open,High,Low,Close,Adj Close,Volume\nyesterday,1,1,1,1,1,1\n",
        )
        .unwrap();

        let err = CsvProvider::read_records(&path).unwrap_err();
        assert!(err.to_string().contains("line 2"), "{err}");
    }

    #[test]
    fn parse_date_accepts_timestamps() {
        assert_eq!(
            parse_date("2024-01-02 00:00:00-05:00"),
            NaiveDate::from_ymd_opt(2024, 1, 2)
        );
        assert_eq!(parse_date("01/02/2024"), None);
    }
}
