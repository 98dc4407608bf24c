//! Placeholder predictive model: next-day return regression.
//!
//! The pipeline only consumes the score; the fitted model is persisted so a
//! run leaves a reproducible artifact.

pub mod features;
pub mod linear;

pub use features::{feature_engineer, FeatureRow, FEATURE_LOOKBACK, FEATURE_NAMES};
pub use linear::{fit_ols, r_squared, LinearModel, LinearTrainer};

use crate::domain::PriceTable;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrainError {
    #[error("insufficient data: need {required} rows, got {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("normal equations are singular")]
    SingularMatrix,

    #[error("computation error: {0}")]
    Computation(String),

    #[error("failed to persist model: {0}")]
    Persist(String),
}

/// Outcome of a training run.
#[derive(Debug, Clone)]
pub struct TrainReport {
    /// Out-of-sample R² on the held-out rows.
    pub score: f64,
    pub train_rows: usize,
    pub test_rows: usize,
    pub model: LinearModel,
}

/// Fits a model on a raw price table.
pub trait ModelTrainer {
    fn name(&self) -> &str;

    fn train(&self, table: &PriceTable) -> Result<TrainReport, TrainError>;
}
