//! Attaches computed metrics to a normalized history.

use crate::metrics::{calculate_metrics, MetricsError};
use crate::PriceSeries;

/// Returns `series` with metrics attached, keeping the point order untouched.
///
/// Series shorter than two points are returned as-is with no metrics. A
/// metrics failure fails the whole augmentation.
pub fn augment_history(series: PriceSeries) -> Result<PriceSeries, MetricsError> {
    if series.len() < 2 {
        return Ok(series);
    }

    let metrics = calculate_metrics(&series.chronological_prices())?;
    Ok(PriceSeries {
        metrics: Some(metrics),
        ..series
    })
}
