//! Whole-series statistics over return sequences.
//!
//! Every function returns `None` where the statistic is undefined (empty input,
//! a single observation for a sample deviation) instead of producing NaN.

/// Annualization factor for daily data.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Simple period-over-period returns of a price series.
///
/// `returns[0]` is 0 (no prior observation); `returns[i] = (p[i] - p[i-1]) / p[i-1]`.
pub fn simple_returns(prices: &[f64]) -> Vec<f64> {
    let mut returns = Vec::with_capacity(prices.len());
    if prices.is_empty() {
        return returns;
    }
    returns.push(0.0);
    returns.extend(prices.windows(2).map(|w| (w[1] - w[0]) / w[0]));
    returns
}

/// Arithmetic mean. `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (divide by n - 1). `None` for fewer than two values.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    Some((ss / (values.len() - 1) as f64).sqrt())
}

/// Annualized Sharpe ratio with no risk-free adjustment.
///
/// `mean / volatility * sqrt(252)`, exactly 0 when volatility is 0, `None` when
/// either input is undefined.
pub fn sharpe_ratio(mean_return: Option<f64>, volatility: Option<f64>) -> Option<f64> {
    let (m, v) = (mean_return?, volatility?);
    if v == 0.0 {
        return Some(0.0);
    }
    Some(m / v * TRADING_DAYS_PER_YEAR.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn returns_first_is_zero() {
        let r = simple_returns(&[100.0, 101.0, 99.99]);
        assert_eq!(r.len(), 3);
        assert_eq!(r[0], 0.0);
        assert_approx(r[1], 0.01, DEFAULT_EPSILON);
        assert_approx(r[2], -0.01, DEFAULT_EPSILON);
    }

    #[test]
    fn returns_of_empty_and_single() {
        assert!(simple_returns(&[]).is_empty());
        assert_eq!(simple_returns(&[42.0]), vec![0.0]);
    }

    #[test]
    fn sample_std_divides_by_n_minus_one() {
        // mean = 5, squared deviations sum = 32, n-1 = 7
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let expected = (32.0_f64 / 7.0).sqrt();
        assert_approx(sample_std(&values).unwrap(), expected, DEFAULT_EPSILON);
    }

    #[test]
    fn undefined_statistics_are_none() {
        assert_eq!(mean(&[]), None);
        assert_eq!(sample_std(&[]), None);
        assert_eq!(sample_std(&[1.0]), None);
        assert_eq!(sharpe_ratio(None, Some(1.0)), None);
        assert_eq!(sharpe_ratio(Some(0.0), None), None);
    }

    #[test]
    fn sharpe_zero_volatility_is_exactly_zero() {
        assert_eq!(sharpe_ratio(Some(0.003), Some(0.0)), Some(0.0));
    }

    #[test]
    fn sharpe_annualizes() {
        let s = sharpe_ratio(Some(0.001), Some(0.01)).unwrap();
        assert_approx(s, 0.1 * 252.0_f64.sqrt(), DEFAULT_EPSILON);
    }
}
