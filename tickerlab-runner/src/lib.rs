//! TickerLab Runner: pipeline orchestration, configuration, CSV output.
//!
//! This crate builds on `tickerlab-core` to provide:
//! - TOML configuration with defaults for every field
//! - The fetch → indicators → train → write → save model pipeline driver
//! - Timestamped data and summary CSV files

pub mod config;
pub mod output;
pub mod pipeline;

pub use config::{ConfigError, LoggingSection, PathsSection, PipelineConfig, RunSection};
pub use output::{save_outputs, OutputError, OutputPaths};
pub use pipeline::{ensure_dirs, run_pipeline, run_pipeline_at, PipelineOutcome};
