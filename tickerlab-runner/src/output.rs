//! Output writer: processed data and summary CSVs for one run.
//!
//! Both files share a UTC timestamp so a run's artifacts sort together:
//! `{ticker}_data_{YYYYMMDD_HHMMSS}.csv` and `{ticker}_summary_{YYYYMMDD_HHMMSS}.csv`.
//! Undefined values (`None`) are written as empty fields.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tickerlab_core::indicators::{AugmentedPriceTable, IndicatorSummary};

pub const DATA_HEADER: [&str; 11] = [
    "Date",
    "Open",
    "High",
    "Low",
    "Close",
    "Adj Close",
    "Volume",
    "Returns",
    "MA5",
    "MA10",
    "Volatility",
];

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to flush {path}: {source}")]
    Flush {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Paths of the two files written by [`save_outputs`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub data_path: PathBuf,
    pub summary_path: PathBuf,
}

#[derive(Serialize)]
struct DataRow {
    date: NaiveDate,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    adj_close: f64,
    volume: u64,
    returns: f64,
    ma5: Option<f64>,
    ma10: Option<f64>,
    volatility: f64,
}

pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

/// Ticker as a single path component: `BRK/B` becomes `BRK_B`.
fn file_stem(ticker: &str) -> String {
    ticker.replace(|c: char| c == '/' || c == '\\', "_")
}

pub fn data_file_name(ticker: &str, timestamp: DateTime<Utc>) -> String {
    format!("{}_data_{}.csv", file_stem(ticker), format_timestamp(timestamp))
}

pub fn summary_file_name(ticker: &str, timestamp: DateTime<Utc>) -> String {
    format!(
        "{}_summary_{}.csv",
        file_stem(ticker),
        format_timestamp(timestamp)
    )
}

/// Create `dir` and its parents if missing.
pub fn ensure_dir(dir: &Path) -> Result<(), OutputError> {
    std::fs::create_dir_all(dir).map_err(|source| OutputError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}

/// Write the augmented table and the one-row summary into `output_dir`.
pub fn save_outputs(
    output_dir: &Path,
    ticker: &str,
    timestamp: DateTime<Utc>,
    summary: &IndicatorSummary,
    augmented: &AugmentedPriceTable,
) -> Result<OutputPaths, OutputError> {
    ensure_dir(output_dir)?;

    let data_path = output_dir.join(data_file_name(ticker, timestamp));
    write_data(&data_path, augmented)?;

    let summary_path = output_dir.join(summary_file_name(ticker, timestamp));
    write_summary(&summary_path, summary)?;

    Ok(OutputPaths {
        data_path,
        summary_path,
    })
}

fn write_data(path: &Path, augmented: &AugmentedPriceTable) -> Result<(), OutputError> {
    let csv_err = |source| OutputError::Csv {
        path: path.to_path_buf(),
        source,
    };

    // Header written by hand so an empty table still gets one
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(csv_err)?;
    writer.write_record(DATA_HEADER).map_err(csv_err)?;

    for row in &augmented.rows {
        let r = &row.record;
        writer
            .serialize(DataRow {
                date: r.date,
                open: r.open,
                high: r.high,
                low: r.low,
                close: r.close,
                adj_close: r.adj_close,
                volume: r.volume,
                returns: row.returns,
                ma5: row.ma5,
                ma10: row.ma10,
                volatility: row.rolling_volatility10,
            })
            .map_err(csv_err)?;
    }

    writer.flush().map_err(|source| OutputError::Flush {
        path: path.to_path_buf(),
        source,
    })
}

fn write_summary(path: &Path, summary: &IndicatorSummary) -> Result<(), OutputError> {
    let csv_err = |source| OutputError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::Writer::from_path(path).map_err(csv_err)?;
    writer.serialize(summary).map_err(csv_err)?;
    writer.flush().map_err(|source| OutputError::Flush {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tickerlab_core::domain::{PriceRecord, PriceTable};
    use tickerlab_core::indicators::compute_indicators;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap()
    }

    fn table(prices: &[f64]) -> PriceTable {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let records = prices
            .iter()
            .enumerate()
            .map(|(i, &p)| PriceRecord {
                date: start + chrono::Duration::days(i as i64),
                open: p,
                high: p + 1.0,
                low: p - 1.0,
                close: p,
                adj_close: p,
                volume: 500,
            })
            .collect();
        PriceTable::new("MSFT", records)
    }

    #[test]
    fn file_names_use_ticker_and_utc_timestamp() {
        assert_eq!(data_file_name("MSFT", ts()), "MSFT_data_20240305_140709.csv");
        assert_eq!(
            summary_file_name("MSFT", ts()),
            "MSFT_summary_20240305_140709.csv"
        );
    }

    #[test]
    fn path_separators_in_ticker_are_replaced() {
        assert_eq!(data_file_name("BRK/B", ts()), "BRK_B_data_20240305_140709.csv");
        assert_eq!(
            summary_file_name("A\\B", ts()),
            "A_B_summary_20240305_140709.csv"
        );
    }

    #[test]
    fn slash_ticker_writes_into_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let (summary, augmented) = compute_indicators(&table(&[10.0, 11.0]));

        let paths = save_outputs(dir.path(), "BRK/B", ts(), &summary, &augmented).unwrap();
        assert_eq!(paths.data_path.parent(), Some(dir.path()));
        assert!(paths.data_path.is_file());
        assert!(paths.summary_path.is_file());
    }

    #[test]
    fn writes_data_and_summary_files() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested/output");
        let prices = [10.0, 11.0, 12.0, 11.0, 13.0, 14.0];
        let (summary, augmented) = compute_indicators(&table(&prices));

        let paths = save_outputs(&out, "MSFT", ts(), &summary, &augmented).unwrap();
        assert_eq!(paths.data_path, out.join("MSFT_data_20240305_140709.csv"));

        let data = std::fs::read_to_string(&paths.data_path).unwrap();
        let mut lines = data.lines();
        assert_eq!(lines.next().unwrap(), DATA_HEADER.join(","));
        let first = lines.next().unwrap();
        assert!(first.starts_with("2024-01-01,10.0,11.0,9.0,10.0,10.0,500,0.0,"), "{first}");
        // MA10 undefined for six rows
        assert!(first.ends_with(",,0.0"), "{first}");
        assert_eq!(data.lines().count(), 7);

        let summary_csv = std::fs::read_to_string(&paths.summary_path).unwrap();
        let summary_lines: Vec<&str> = summary_csv.lines().collect();
        assert_eq!(summary_lines.len(), 2);
        assert_eq!(
            summary_lines[0],
            "mean_return,volatility,sharpe_ratio,last_price,data_points"
        );
        assert!(summary_lines[1].ends_with(",14.0,6"), "{}", summary_lines[1]);
    }

    #[test]
    fn undefined_summary_fields_are_empty() {
        let dir = tempfile::tempdir().unwrap();
        let (summary, augmented) = compute_indicators(&table(&[42.0]));

        let paths = save_outputs(dir.path(), "ONE", ts(), &summary, &augmented).unwrap();
        let summary_csv = std::fs::read_to_string(&paths.summary_path).unwrap();
        assert_eq!(summary_csv.lines().nth(1).unwrap(), "0.0,,,42.0,1");
    }

    #[test]
    fn empty_table_still_has_header() {
        let dir = tempfile::tempdir().unwrap();
        let (summary, augmented) = compute_indicators(&table(&[]));

        let paths = save_outputs(dir.path(), "NONE", ts(), &summary, &augmented).unwrap();
        let data = std::fs::read_to_string(&paths.data_path).unwrap();
        assert_eq!(data.trim_end(), DATA_HEADER.join(","));
    }
}
