//! TickerLab Core: domain types, data providers, indicator engine, model trainer.
//!
//! - Price records and tables, fetch period/interval
//! - Data providers (Yahoo Finance chart API, CSV import) and ingestion
//! - Indicator engine: returns, mean/volatility, Sharpe ratio, moving averages,
//!   rolling volatility
//! - Feature engineering and a linear next-day return model

pub mod data;
pub mod domain;
pub mod indicators;
pub mod model;
