//! Data acquisition: providers and ingestion

pub mod csv_import;
pub mod ingest;
pub mod provider;
pub mod yahoo;

pub use csv_import::CsvProvider;
pub use ingest::{ingest, IngestResult};
pub use provider::{DataError, DataProvider, DataSource, FetchResult};
pub use yahoo::YahooProvider;
