//! Pipeline driver: fetch, compute indicators, train, write outputs, save model.
//!
//! A failed or empty fetch is the one recoverable outcome and yields
//! [`PipelineOutcome::NoData`] with nothing written. Every other failure
//! propagates.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tracing::{error, info};

use tickerlab_core::data::DataProvider;
use tickerlab_core::indicators::{compute_indicators, IndicatorSummary};
use tickerlab_core::model::ModelTrainer;

use crate::config::PipelineConfig;
use crate::output::{ensure_dir, save_outputs};

/// Result of one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome {
    /// Fetch failed or returned no rows.
    NoData { reason: String },
    Completed {
        data_path: PathBuf,
        summary_path: PathBuf,
        model_path: PathBuf,
        score: f64,
        summary: IndicatorSummary,
    },
}

impl PipelineOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, PipelineOutcome::Completed { .. })
    }
}

/// Create the output directory and the model file's parent directory.
pub fn ensure_dirs(config: &PipelineConfig) -> Result<()> {
    ensure_dir(&config.paths.output_dir).context("failed to prepare output directory")?;
    if let Some(parent) = model_dir(&config.paths.model_path) {
        ensure_dir(parent).context("failed to prepare model directory")?;
    }
    Ok(())
}

fn model_dir(model_path: &Path) -> Option<&Path> {
    model_path.parent().filter(|p| !p.as_os_str().is_empty())
}

/// Run the pipeline once, stamping output files with the current UTC time.
pub fn run_pipeline(
    config: &PipelineConfig,
    provider: &dyn DataProvider,
    trainer: &dyn ModelTrainer,
) -> Result<PipelineOutcome> {
    run_pipeline_at(config, provider, trainer, Utc::now())
}

/// [`run_pipeline`] with an explicit output timestamp.
pub fn run_pipeline_at(
    config: &PipelineConfig,
    provider: &dyn DataProvider,
    trainer: &dyn ModelTrainer,
    timestamp: DateTime<Utc>,
) -> Result<PipelineOutcome> {
    ensure_dirs(config)?;

    let run = &config.pipeline;
    info!(
        ticker = %run.ticker,
        period = %run.period,
        interval = %run.interval,
        provider = provider.name(),
        "fetching data"
    );

    let fetched = match provider.fetch(&run.ticker, run.period, run.interval) {
        Ok(fetched) => fetched,
        Err(e) => {
            error!(ticker = %run.ticker, error = %e, "no data fetched");
            return Ok(PipelineOutcome::NoData {
                reason: e.to_string(),
            });
        }
    };
    if fetched.table.is_empty() {
        error!(ticker = %run.ticker, "no data fetched: provider returned zero rows");
        return Ok(PipelineOutcome::NoData {
            reason: "provider returned zero rows".into(),
        });
    }
    info!(
        rows = fetched.table.len(),
        dropped = fetched.dropped,
        source = ?fetched.source,
        "data fetched"
    );

    let (summary, augmented) = compute_indicators(&fetched.table);
    info!(
        data_points = summary.data_points,
        mean_return = ?summary.mean_return,
        volatility = ?summary.volatility,
        sharpe_ratio = ?summary.sharpe_ratio,
        "indicators computed"
    );

    info!(trainer = trainer.name(), "training model");
    let report = trainer
        .train(&fetched.table)
        .with_context(|| format!("model training failed for {}", run.ticker))?;
    info!(
        score = report.score,
        train_rows = report.train_rows,
        test_rows = report.test_rows,
        "model score"
    );

    let paths = save_outputs(
        &config.paths.output_dir,
        &run.ticker,
        timestamp,
        &summary,
        &augmented,
    )
    .context("failed to write pipeline outputs")?;
    info!(path = %paths.data_path.display(), "processed data saved");
    info!(path = %paths.summary_path.display(), "summary saved");

    // Model is written only after both CSVs succeed
    let model_path = config.paths.model_path.clone();
    report
        .model
        .save(&model_path)
        .with_context(|| format!("failed to save model to {}", model_path.display()))?;
    info!(path = %model_path.display(), "model saved");

    Ok(PipelineOutcome::Completed {
        data_path: paths.data_path,
        summary_path: paths.summary_path,
        model_path,
        score: report.score,
        summary,
    })
}
