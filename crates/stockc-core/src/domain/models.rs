use serde::{Deserialize, Serialize};

use crate::{Symbol, TradingDate, ValidationError};

/// Daily close for one trading date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: TradingDate,
    pub price: f64,
}

impl PricePoint {
    pub fn new(date: TradingDate, price: f64) -> Result<Self, ValidationError> {
        validate_positive("price", price)?;
        Ok(Self { date, price })
    }
}

/// Risk/return metrics derived from a price series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub sharpe: f64,
    pub sortino: f64,
    /// Most negative peak-to-current decline, as a fraction. Never positive.
    pub max_drawdown: f64,
    pub cagr: f64,
}

/// Normalized price history for a symbol.
///
/// `series` is kept in the order the provider adapter produced it, which is
/// most-recent first. Consumers that need chronological order reverse it
/// themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub symbol: Symbol,
    pub series: Vec<PricePoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Metrics>,
}

impl PriceSeries {
    pub fn new(symbol: Symbol, series: Vec<PricePoint>) -> Self {
        Self {
            symbol,
            series,
            metrics: None,
        }
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Prices oldest first.
    pub fn chronological_prices(&self) -> Vec<f64> {
        self.series.iter().rev().map(|point| point.price).collect()
    }
}

/// Latest price and its move against the previous close.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub symbol: Symbol,
    pub price: f64,
    pub change: f64,
    /// Percentage units: `1.23` means 1.23%.
    pub change_percent: f64,
}

impl Quote {
    pub fn new(
        symbol: Symbol,
        price: f64,
        change: f64,
        change_percent: f64,
    ) -> Result<Self, ValidationError> {
        validate_positive("price", price)?;
        validate_finite("change", change)?;
        validate_finite("change_percent", change_percent)?;

        Ok(Self {
            symbol,
            price,
            change,
            change_percent,
        })
    }
}

fn validate_finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    Ok(())
}

fn validate_positive(field: &'static str, value: f64) -> Result<(), ValidationError> {
    validate_finite(field, value)?;
    if value <= 0.0 {
        return Err(ValidationError::NonPositiveValue { field });
    }
    Ok(())
}
