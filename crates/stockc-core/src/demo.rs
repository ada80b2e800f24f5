//! Bundled history served when neither the cache nor the provider can answer.

use time::macros::date;
use time::Date;

use crate::{PricePoint, PriceSeries, Symbol, TradingDate};

pub const DEMO_SYMBOL: &str = "AAPL";

/// Most-recent first, like adapter output.
const DEMO_CLOSES: [(Date, f64); 5] = [
    (date!(2026 - 02 - 02), 259.40),
    (date!(2026 - 01 - 30), 260.05),
    (date!(2026 - 01 - 29), 256.44),
    (date!(2026 - 01 - 28), 258.27),
    (date!(2026 - 01 - 27), 252.10),
];

/// Demo series for AAPL. It keeps its own symbol whatever was requested.
pub fn demo_series() -> PriceSeries {
    let series = DEMO_CLOSES
        .iter()
        .map(|&(date, price)| PricePoint {
            date: TradingDate::from_date(date),
            price,
        })
        .collect();
    PriceSeries::new(Symbol::from_static(DEMO_SYMBOL), series)
}
