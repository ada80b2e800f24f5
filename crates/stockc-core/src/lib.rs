//! # stockc Core
//!
//! Quote and price-history pipeline for the stockc market data service.
//!
//! ## Overview
//!
//! - **Provider adapter** for Alpha Vantage daily history and global quotes
//! - **History cache** with fixed capacity, absolute TTL and an injected clock
//! - **Metrics engine** for Sharpe, Sortino, max drawdown and CAGR
//! - **Market data service** resolving history through cache, live, stale cache
//!   and bundled demo data, in that order
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Provider adapters (Alpha Vantage) |
//! | [`augment`] | Attaches metrics to a history |
//! | [`cache`] | TTL history cache |
//! | [`clock`] | Injectable wall clock |
//! | [`config`] | Service configuration and environment loading |
//! | [`data_source`] | Source trait and classified source errors |
//! | [`demo`] | Bundled demo history |
//! | [`domain`] | Domain models (PricePoint, PriceSeries, Metrics, Quote) |
//! | [`error`] | Validation, service and API error types |
//! | [`http_client`] | HTTP client abstraction |
//! | [`metrics`] | Risk/return metrics |
//! | [`service`] | Fallback chain and quote derivation |
//! | [`source`] | History source tags |
//! | [`throttling`] | Client-side request budget |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stockc_core::{MarketDataService, ServiceConfig, Symbol};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let service = MarketDataService::from_config(&ServiceConfig::from_env());
//!     let symbol = Symbol::parse("AAPL")?;
//!
//!     let history = service.get_history(&symbol, None).await?;
//!     println!("{} points from {}", history.series.len(), history.source);
//!
//!     let quote = service.get_quote(&symbol).await?;
//!     println!("AAPL {:.2} ({:+.2}%)", quote.price, quote.change_percent);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  CLI / Router   │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ Market Data     │────▶│ History Cache    │
//! │ Service         │     └──────────────────┘
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ Data Source     │────▶│ HTTP Client      │
//! │ (Adapter Trait) │     │ (reqwest)        │
//! └─────────────────┘     └──────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! Source failures are classified and absorbed by the fallback chain. Callers
//! that bypass the chain see them directly:
//!
//! ```rust
//! use stockc_core::{SourceError, SourceErrorKind};
//!
//! fn handle_error(error: SourceError) {
//!     match error.kind() {
//!         SourceErrorKind::UpstreamTemporary => {
//!             // Throttled or refused; try again later
//!         }
//!         SourceErrorKind::MissingCredential => {
//!             // Configure STOCKC_ALPHA_VANTAGE_KEY
//!         }
//!         _ => {}
//!     }
//! }
//! ```
//!
//! ## Security
//!
//! - The API key is read from the environment and never logged
//! - Transport errors are stripped of request URLs

pub mod adapters;
pub mod augment;
pub mod cache;
pub mod clock;
pub mod config;
pub mod data_source;
pub mod demo;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod metrics;
pub mod service;
pub mod source;
pub mod throttling;

// Adapter implementations
pub use adapters::AlphaVantageAdapter;

// Metrics and augmentation
pub use augment::augment_history;
pub use metrics::{calculate_metrics, MetricsError, TRADING_DAYS_PER_YEAR};

// Caching
pub use cache::{CachedHistory, HistoryCache};
pub use clock::{Clock, ManualClock, SystemClock};

// Configuration
pub use config::ServiceConfig;

// Data source trait and types
pub use data_source::{MarketDataSource, SourceError, SourceErrorKind, SourceFuture};

// Demo data
pub use demo::demo_series;

// Domain models
pub use domain::{Metrics, PricePoint, PriceSeries, Quote, Symbol, TradingDate};

// Error types
pub use error::{ApiError, ErrorBody, ServiceError, ValidationError};

// HTTP client types
pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};

// Service
pub use service::{derive_quote, HistoryResult, MarketDataService};

// Source tags
pub use source::HistorySource;

// Throttling
pub use throttling::RequestBudget;
