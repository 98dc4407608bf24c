//! TickerLab CLI: fetch a ticker's history, compute indicators, train the
//! next-day return model, and write timestamped CSV outputs.
//!
//! Exit codes: `0` on success, `1` when no data could be fetched or on any
//! fatal error.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tickerlab_core::data::{CsvProvider, DataProvider, YahooProvider};
use tickerlab_core::domain::{Interval, Period};
use tickerlab_core::model::LinearTrainer;
use tickerlab_runner::{run_pipeline, LoggingSection, PipelineConfig, PipelineOutcome};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "tickerlab",
    about = "TickerLab: stock indicators and next-day return model"
)]
struct Cli {
    /// Path to a TOML config file. Flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Ticker symbol (e.g., AAPL, MSFT, SPY).
    #[arg(long)]
    ticker: Option<String>,

    /// Lookback range: 1d, 5d, 1mo, 3mo, 6mo, 1y, 2y, 5y, 10y, ytd, max.
    #[arg(long)]
    period: Option<Period>,

    /// Bar interval: 1d, 5d, 1wk, 1mo, 3mo.
    #[arg(long)]
    interval: Option<Interval>,

    /// Directory for the data and summary CSVs.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Where to save the trained model (JSON).
    #[arg(long)]
    model_path: Option<PathBuf>,

    /// Read prices from a CSV file, or a directory of `{TICKER}.csv`, instead of Yahoo.
    #[arg(long)]
    csv: Option<PathBuf>,
}

impl Cli {
    fn load_config(&self) -> Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_file(path)?,
            None => PipelineConfig::default(),
        };

        if let Some(ticker) = &self.ticker {
            config.pipeline.ticker = ticker.clone();
        }
        if let Some(period) = self.period {
            config.pipeline.period = period;
        }
        if let Some(interval) = self.interval {
            config.pipeline.interval = interval;
        }
        if let Some(dir) = &self.output_dir {
            config.paths.output_dir = dir.clone();
        }
        if let Some(path) = &self.model_path {
            config.paths.model_path = path.clone();
        }

        config.validate()?;
        Ok(config)
    }

    fn provider(&self) -> Result<Box<dyn DataProvider>> {
        match &self.csv {
            Some(path) => Ok(Box::new(CsvProvider::new(path))),
            None => Ok(Box::new(
                YahooProvider::new().context("failed to build HTTP client")?,
            )),
        }
    }
}

/// `RUST_LOG` wins over the configured level when set.
fn init_tracing(logging: &LoggingSection) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    match logging.format.as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .init();
        }
        _ => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.load_config()?;
    init_tracing(&config.logging);
    tracing::debug!(?config, "configuration loaded");

    let provider = cli.provider()?;
    let trainer = LinearTrainer::default();

    match run_pipeline(&config, provider.as_ref(), &trainer)? {
        PipelineOutcome::Completed {
            data_path,
            summary_path,
            model_path,
            score,
            ..
        } => {
            println!("Model score (R²): {score:.4}");
            println!("Data:    {}", data_path.display());
            println!("Summary: {}", summary_path.display());
            println!("Model:   {}", model_path.display());
            Ok(())
        }
        PipelineOutcome::NoData { reason } => {
            eprintln!("No data fetched for {}: {reason}", config.pipeline.ticker);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::parse_from([
            "tickerlab",
            "--ticker",
            "MSFT",
            "--period",
            "6mo",
            "--interval",
            "1wk",
            "--output-dir",
            "out",
        ]);
        let config = cli.load_config().unwrap();
        assert_eq!(config.pipeline.ticker, "MSFT");
        assert_eq!(config.pipeline.period, Period::Month6);
        assert_eq!(config.pipeline.interval, Interval::Week1);
        assert_eq!(config.paths.output_dir, PathBuf::from("out"));
        assert_eq!(
            config.paths.model_path,
            PathBuf::from("models/price_model.json")
        );
    }

    #[test]
    fn invalid_period_is_rejected() {
        assert!(Cli::try_parse_from(["tickerlab", "--period", "3w"]).is_err());
    }

    #[test]
    fn csv_flag_selects_csv_provider() {
        let cli = Cli::parse_from(["tickerlab", "--csv", "prices.csv"]);
        assert_eq!(cli.provider().unwrap().name(), "csv_import");
    }
}
