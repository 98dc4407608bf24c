//! Ordinary least squares on standardized features.
//!
//! Solves the normal equations `(X'X + λI) β = X'y` by Cholesky decomposition.
//! Features are z-scored with training statistics first; a zero-variance
//! column becomes all zeros and the ridge term keeps `X'X` positive definite.

use super::features::{feature_engineer, FeatureRow, FEATURE_NAMES};
use super::{ModelTrainer, TrainError, TrainReport};
use crate::domain::PriceTable;
use crate::indicators::stats::mean;
use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// Fitted linear model, serializable for reuse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub feature_names: Vec<String>,
    pub intercept: f64,
    pub coefficients: Vec<f64>,
    pub feature_means: Vec<f64>,
    pub feature_stds: Vec<f64>,
}

impl LinearModel {
    /// A model that ignores its inputs and always predicts `intercept`.
    pub fn constant(feature_names: &[&str], intercept: f64) -> Self {
        let n = feature_names.len();
        Self {
            feature_names: feature_names.iter().map(|s| s.to_string()).collect(),
            intercept,
            coefficients: vec![0.0; n],
            feature_means: vec![0.0; n],
            feature_stds: vec![0.0; n],
        }
    }

    /// Predict the target for one raw (unstandardized) feature vector.
    pub fn predict(&self, features: &[f64]) -> f64 {
        self.coefficients
            .iter()
            .zip(features)
            .zip(self.feature_means.iter().zip(&self.feature_stds))
            .map(|((c, x), (m, s))| c * standardize(*x, *m, *s))
            .sum::<f64>()
            + self.intercept
    }

    pub fn save(&self, path: &Path) -> Result<(), TrainError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| TrainError::Persist(e.to_string()))?;
        std::fs::write(path, json)
            .map_err(|e| TrainError::Persist(format!("{}: {e}", path.display())))
    }

    pub fn load(path: &Path) -> Result<Self, TrainError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| TrainError::Persist(format!("{}: {e}", path.display())))?;
        serde_json::from_str(&json).map_err(|e| TrainError::Persist(e.to_string()))
    }
}

fn standardize(x: f64, mean: f64, std: f64) -> f64 {
    if std > 0.0 {
        (x - mean) / std
    } else {
        0.0
    }
}

/// Fit OLS with intercept on raw features `x` (rows × features) and target `y`.
pub fn fit_ols(
    x: &[Vec<f64>],
    y: &[f64],
    feature_names: &[&str],
    ridge: f64,
) -> Result<LinearModel, TrainError> {
    if x.len() != y.len() {
        return Err(TrainError::DimensionMismatch {
            expected: x.len(),
            got: y.len(),
        });
    }
    let rows = x.len();
    let cols = feature_names.len();
    if let Some(bad) = x.iter().find(|r| r.len() != cols) {
        return Err(TrainError::DimensionMismatch {
            expected: cols,
            got: bad.len(),
        });
    }
    if rows <= cols {
        return Err(TrainError::InsufficientData {
            required: cols + 1,
            available: rows,
        });
    }

    let raw = Array2::from_shape_vec((rows, cols), x.iter().flatten().copied().collect())
        .map_err(|e| TrainError::Computation(e.to_string()))?;

    let means = raw
        .mean_axis(Axis(0))
        .ok_or_else(|| TrainError::Computation("empty design matrix".into()))?;
    let stds = raw.std_axis(Axis(0), 0.0);

    // Design matrix: leading column of ones, then standardized features
    let mut design = Array2::<f64>::ones((rows, cols + 1));
    for ((r, c), v) in raw.indexed_iter() {
        design[[r, c + 1]] = standardize(*v, means[c], stds[c]);
    }

    let target = Array1::from(y.to_vec());
    let mut xtx = design.t().dot(&design);
    let xty = design.t().dot(&target);
    for i in 0..=cols {
        xtx[[i, i]] += ridge;
    }

    let beta = cholesky_solve(&xtx, &xty)?;

    Ok(LinearModel {
        feature_names: feature_names.iter().map(|s| s.to_string()).collect(),
        intercept: beta[0],
        coefficients: beta.iter().skip(1).copied().collect(),
        feature_means: means.to_vec(),
        feature_stds: stds.to_vec(),
    })
}

/// Solve `A x = b` for symmetric positive definite `A`.
fn cholesky_solve(a: &Array2<f64>, b: &Array1<f64>) -> Result<Array1<f64>, TrainError> {
    let n = a.nrows();
    let mut l = Array2::<f64>::zeros((n, n));

    // A = L * L^T
    for i in 0..n {
        for j in 0..=i {
            let mut sum = 0.0;
            for k in 0..j {
                sum += l[[i, k]] * l[[j, k]];
            }

            if i == j {
                let diag = a[[i, i]] - sum;
                if diag <= 0.0 || !diag.is_finite() {
                    return Err(TrainError::SingularMatrix);
                }
                l[[i, j]] = diag.sqrt();
            } else {
                l[[i, j]] = (a[[i, j]] - sum) / l[[j, j]];
            }
        }
    }

    // L z = b
    let mut z = Array1::<f64>::zeros(n);
    for i in 0..n {
        let mut sum = 0.0;
        for j in 0..i {
            sum += l[[i, j]] * z[j];
        }
        z[i] = (b[i] - sum) / l[[i, i]];
    }

    // L^T x = z
    let mut x = Array1::<f64>::zeros(n);
    for i in (0..n).rev() {
        let mut sum = 0.0;
        for j in (i + 1)..n {
            sum += l[[j, i]] * x[j];
        }
        x[i] = (z[i] - sum) / l[[i, i]];
    }

    Ok(x)
}

/// Coefficient of determination. 0 when the actual values have no variance.
pub fn r_squared(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.is_empty() {
        return 0.0;
    }
    let mean = actual.iter().sum::<f64>() / actual.len() as f64;
    let ss_tot: f64 = actual.iter().map(|a| (a - mean).powi(2)).sum();
    if ss_tot == 0.0 {
        return 0.0;
    }
    let ss_res: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum();
    1.0 - ss_res / ss_tot
}

/// Linear next-day-return model scored on a chronological hold-out.
#[derive(Debug, Clone)]
pub struct LinearTrainer {
    /// Fraction of feature rows (the most recent ones) held out for scoring.
    pub test_fraction: f64,
    /// Minimum usable feature rows before a regression is fitted. Shorter
    /// histories get a constant model scored 0.
    pub min_rows: usize,
    pub ridge: f64,
}

impl Default for LinearTrainer {
    fn default() -> Self {
        Self {
            test_fraction: 0.2,
            // Smallest count whose 80% training share still exceeds the feature count
            min_rows: FEATURE_NAMES.len() + 3,
            ridge: 1e-8,
        }
    }
}

impl LinearTrainer {
    /// Split point between training and test rows. At least one test row.
    fn split_index(&self, rows: usize) -> usize {
        let test = ((rows as f64 * self.test_fraction).round() as usize).max(1);
        rows.saturating_sub(test)
    }

    fn train_rows(&self, rows: &[FeatureRow]) -> Result<TrainReport, TrainError> {
        let split = self.split_index(rows.len());
        if rows.len() < self.min_rows || split <= FEATURE_NAMES.len() {
            return Ok(self.fallback(rows));
        }
        let (train, test) = rows.split_at(split);

        let x: Vec<Vec<f64>> = train.iter().map(|r| r.features.to_vec()).collect();
        let y: Vec<f64> = train.iter().map(|r| r.target).collect();
        let model = fit_ols(&x, &y, &FEATURE_NAMES, self.ridge)?;

        let actual: Vec<f64> = test.iter().map(|r| r.target).collect();
        let predicted: Vec<f64> = test.iter().map(|r| model.predict(&r.features)).collect();

        Ok(TrainReport {
            score: r_squared(&actual, &predicted),
            train_rows: train.len(),
            test_rows: test.len(),
            model,
        })
    }
}

impl LinearTrainer {
    /// Mean-target model for histories too short to regress on.
    fn fallback(&self, rows: &[FeatureRow]) -> TrainReport {
        warn!(
            feature_rows = rows.len(),
            min_rows = self.min_rows,
            "too few rows for regression; using mean-target model with score 0"
        );
        let targets: Vec<f64> = rows.iter().map(|r| r.target).collect();
        let intercept = mean(&targets).unwrap_or(0.0);
        TrainReport {
            score: 0.0,
            train_rows: rows.len(),
            test_rows: 0,
            model: LinearModel::constant(&FEATURE_NAMES, intercept),
        }
    }
}

impl ModelTrainer for LinearTrainer {
    fn name(&self) -> &str {
        "linear_ols"
    }

    fn train(&self, table: &PriceTable) -> Result<TrainReport, TrainError> {
        self.train_rows(&feature_engineer(table))
    }
}
