//! Risk/return metrics over a chronological price sequence.
//!
//! All ratios are annualized with [`TRADING_DAYS_PER_YEAR`]. Variance is the
//! population variance of simple returns. Degenerate inputs (zero variance, no
//! negative returns) yield `0.0` rather than an error.

use thiserror::Error;

use crate::Metrics;

pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Variance at or below `mean² * VARIANCE_FLOOR` is rounding noise and counts as zero.
const VARIANCE_FLOOR: f64 = 1e-12;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MetricsError {
    #[error("metrics need at least 2 prices, got {len}")]
    InsufficientData { len: usize },

    #[error("price at index {index} must be finite and positive, got {value}")]
    InvalidPrice { index: usize, value: f64 },

    #[error("{metric} is not finite")]
    NonFiniteResult { metric: &'static str },
}

/// Computes Sharpe, Sortino, max drawdown and CAGR from prices ordered oldest first.
pub fn calculate_metrics(prices: &[f64]) -> Result<Metrics, MetricsError> {
    if prices.len() < 2 {
        return Err(MetricsError::InsufficientData { len: prices.len() });
    }
    if let Some((index, &value)) = prices
        .iter()
        .enumerate()
        .find(|(_, price)| !price.is_finite() || **price <= 0.0)
    {
        return Err(MetricsError::InvalidPrice { index, value });
    }

    let returns: Vec<f64> = prices
        .windows(2)
        .map(|pair| pair[1] / pair[0] - 1.0)
        .collect();
    let n = returns.len() as f64;

    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;
    let stddev = if variance > mean * mean * VARIANCE_FLOOR {
        variance.sqrt()
    } else {
        0.0
    };

    let (downside_sq_sum, downside_count) = returns
        .iter()
        .filter(|r| **r < 0.0)
        .fold((0.0, 0_usize), |(sum, count), r| (sum + r * r, count + 1));
    let downside_dev = if downside_count > 0 {
        (downside_sq_sum / downside_count as f64).sqrt()
    } else {
        0.0
    };

    let annualization = TRADING_DAYS_PER_YEAR.sqrt();
    let sharpe = if stddev > 0.0 {
        (mean / stddev) * annualization
    } else {
        0.0
    };
    let sortino = if downside_dev > 0.0 {
        (mean / downside_dev) * annualization
    } else {
        0.0
    };

    let metrics = Metrics {
        sharpe,
        sortino,
        max_drawdown: max_drawdown(prices),
        cagr: cagr(prices),
    };

    ensure_finite("sharpe", metrics.sharpe)?;
    ensure_finite("sortino", metrics.sortino)?;
    ensure_finite("maxDrawdown", metrics.max_drawdown)?;
    ensure_finite("cagr", metrics.cagr)?;
    Ok(metrics)
}

fn max_drawdown(prices: &[f64]) -> f64 {
    let mut peak = prices[0];
    let mut worst = 0.0_f64;
    for &price in &prices[1..] {
        if price > peak {
            peak = price;
        }
        let drawdown = (price - peak) / peak;
        if drawdown < worst {
            worst = drawdown;
        }
    }
    worst
}

fn cagr(prices: &[f64]) -> f64 {
    let count = prices.len() as f64;
    let years = count / TRADING_DAYS_PER_YEAR;
    if years <= 0.0 {
        return 0.0;
    }
    let first = prices[0];
    let last = prices[prices.len() - 1];
    (last / first).powf(1.0 / years) - 1.0
}

fn ensure_finite(metric: &'static str, value: f64) -> Result<(), MetricsError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(MetricsError::NonFiniteResult { metric })
    }
}
