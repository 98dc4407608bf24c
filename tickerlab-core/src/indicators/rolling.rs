//! Rolling-window series and gap filling.
//!
//! Window functions return one entry per input value; the first `window - 1`
//! entries are `None` because the window is not yet full.

use super::stats::sample_std;

/// Trailing simple moving average.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    assert!(window >= 1, "rolling window must be >= 1");
    let n = values.len();
    let mut result = vec![None; n];
    if n < window {
        return result;
    }

    let mut sum: f64 = values[..window].iter().sum();
    result[window - 1] = Some(sum / window as f64);
    for i in window..n {
        sum += values[i] - values[i - window];
        result[i] = Some(sum / window as f64);
    }
    result
}

/// Trailing sample standard deviation.
///
/// Each window is recomputed in two passes rather than rolled, so a constant
/// window yields exactly 0.
pub fn rolling_sample_std(values: &[f64], window: usize) -> Vec<Option<f64>> {
    assert!(window >= 2, "rolling sample std window must be >= 2");
    let n = values.len();
    let mut result = vec![None; n];
    for i in (window - 1)..n {
        result[i] = sample_std(&values[(i + 1 - window)..=i]);
    }
    result
}

/// Fill each `None` with the next defined value after it.
///
/// Leading gaps take the earliest defined value. Trailing gaps (nothing
/// defined after them) stay `None`.
pub fn backfill(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut result = values.to_vec();
    let mut next = None;
    for slot in result.iter_mut().rev() {
        match slot {
            Some(v) => next = Some(*v),
            None => *slot = next,
        }
    }
    result
}

/// Replace every `None` with `fill`.
pub fn fill_none(values: &[Option<f64>], fill: f64) -> Vec<f64> {
    values.iter().map(|v| v.unwrap_or(fill)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn rolling_mean_5_basic() {
        let result = rolling_mean(&[10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0], 5);
        assert_eq!(result.len(), 7);
        assert!(result[..4].iter().all(Option::is_none));
        // mean(10,11,12,13,14) = 12
        assert_approx(result[4].unwrap(), 12.0, DEFAULT_EPSILON);
        assert_approx(result[5].unwrap(), 13.0, DEFAULT_EPSILON);
        assert_approx(result[6].unwrap(), 14.0, DEFAULT_EPSILON);
    }

    #[test]
    fn rolling_mean_too_few_values() {
        assert!(rolling_mean(&[1.0, 2.0], 5).iter().all(Option::is_none));
    }

    #[test]
    fn rolling_std_constant_window_is_zero() {
        let result = rolling_sample_std(&[3.0; 6], 3);
        assert_eq!(result[1], None);
        assert_eq!(result[2], Some(0.0));
        assert_eq!(result[5], Some(0.0));
    }

    #[test]
    fn rolling_std_matches_sample_std() {
        let values = [1.0, 2.0, 4.0, 8.0];
        let result = rolling_sample_std(&values, 3);
        let first = sample_std(&[1.0, 2.0, 4.0]).unwrap();
        let second = sample_std(&[2.0, 4.0, 8.0]).unwrap();
        assert_approx(result[2].unwrap(), first, DEFAULT_EPSILON);
        assert_approx(result[3].unwrap(), second, DEFAULT_EPSILON);
    }

    #[test]
    fn backfill_leading_and_interior() {
        let filled = backfill(&[None, None, Some(3.0), None, Some(5.0), None]);
        assert_eq!(
            filled,
            vec![Some(3.0), Some(3.0), Some(3.0), Some(5.0), Some(5.0), None]
        );
    }

    #[test]
    fn backfill_all_none_stays_none() {
        assert_eq!(backfill(&[None, None]), vec![None, None]);
    }

    #[test]
    fn fill_none_uses_constant() {
        assert_eq!(fill_none(&[None, Some(2.0)], 0.0), vec![0.0, 2.0]);
    }
}
