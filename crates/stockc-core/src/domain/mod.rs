//! # Domain Models
//!
//! Canonical types for stockc market data. Construction validates invariants;
//! every type round-trips through serde in the JSON shape returned to clients.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`PricePoint`] | Daily close `{date, price}` with `price > 0` |
//! | [`PriceSeries`] | Symbol + points (most-recent first) + optional metrics |
//! | [`Metrics`] | Sharpe, Sortino, max drawdown, CAGR |
//! | [`Quote`] | Latest price with change vs. previous close |
//! | [`Symbol`] | Validated ticker |
//! | [`TradingDate`] | `YYYY-MM-DD` calendar date |

mod date;
mod models;
mod symbol;

pub use date::TradingDate;
pub use models::{Metrics, PricePoint, PriceSeries, Quote};
pub use symbol::Symbol;
