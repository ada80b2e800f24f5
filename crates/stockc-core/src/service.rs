//! History resolution and quote derivation.
//!
//! [`MarketDataService::get_history`] walks a fixed chain and stops at the
//! first tier that produces a series:
//!
//! 1. fresh cache entry (`cache`)
//! 2. live provider fetch, stored in the cache on success (`live`)
//! 3. expired cache entry after a failed fetch (`cache`, flagged stale)
//! 4. bundled demo series (`demo`)
//!
//! Provider errors never reach the caller of `get_history`; they only advance
//! the chain. Metrics are attached to whatever tier answered.

use std::sync::Arc;

use serde::Serialize;
use time::OffsetDateTime;

use crate::adapters::AlphaVantageAdapter;
use crate::augment::augment_history;
use crate::cache::HistoryCache;
use crate::clock::SystemClock;
use crate::config::ServiceConfig;
use crate::data_source::{MarketDataSource, SourceError};
use crate::demo::demo_series;
use crate::error::ServiceError;
use crate::http_client::ReqwestHttpClient;
use crate::source::HistorySource;
use crate::{PriceSeries, Quote, Symbol};

/// History plus where it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryResult {
    pub source: HistorySource,
    /// Cache entry time for cache results; resolution time otherwise.
    #[serde(rename = "fetchedAt", with = "time::serde::timestamp")]
    pub fetched_at: OffsetDateTime,
    #[serde(flatten)]
    pub series: PriceSeries,
    /// Served from an expired cache entry after a failed live fetch.
    #[serde(skip)]
    pub stale: bool,
}

struct Resolved {
    series: PriceSeries,
    source: HistorySource,
    fetched_at: OffsetDateTime,
    stale: bool,
}

/// Market data facade shared by handle across request workers.
#[derive(Clone)]
pub struct MarketDataService {
    source: Arc<dyn MarketDataSource>,
    cache: HistoryCache,
    demo: Arc<PriceSeries>,
}

impl MarketDataService {
    pub fn new(source: Arc<dyn MarketDataSource>, cache: HistoryCache) -> Self {
        Self {
            source,
            cache,
            demo: Arc::new(demo_series()),
        }
    }

    /// Alpha Vantage over reqwest with a system-clock cache, all sized from `config`.
    pub fn from_config(config: &ServiceConfig) -> Self {
        let adapter = AlphaVantageAdapter::new(Arc::new(ReqwestHttpClient::new()), config);
        let cache = HistoryCache::new(
            config.cache_capacity,
            config.cache_ttl,
            Arc::new(SystemClock),
        );
        Self::new(Arc::new(adapter), cache)
    }

    pub fn cache(&self) -> &HistoryCache {
        &self.cache
    }

    /// Resolves history for `symbol` through the fallback chain and attaches metrics.
    ///
    /// `days` is accepted for forward compatibility and currently has no effect.
    pub async fn get_history(
        &self,
        symbol: &Symbol,
        days: Option<u32>,
    ) -> Result<HistoryResult, ServiceError> {
        if let Some(days) = days {
            tracing::debug!(%symbol, days, "days is reserved; serving full cached window");
        }

        let resolved = self.resolve(symbol).await;
        let series = augment_history(resolved.series).map_err(|source| {
            ServiceError::Augmentation {
                symbol: symbol.clone(),
                source,
            }
        })?;

        Ok(HistoryResult {
            source: resolved.source,
            fetched_at: resolved.fetched_at,
            series,
            stale: resolved.stale,
        })
    }

    /// Quote derived from the two most recent points of [`get_history`](Self::get_history).
    pub async fn get_quote(&self, symbol: &Symbol) -> Result<Quote, ServiceError> {
        let history = self.get_history(symbol, None).await?;
        derive_quote(symbol, &history.series)
    }

    /// The provider's own quote, with its classified errors passed through.
    pub async fn fetch_live_quote(&self, symbol: &Symbol) -> Result<Quote, SourceError> {
        self.source.fetch_quote(symbol).await
    }

    async fn resolve(&self, symbol: &Symbol) -> Resolved {
        if let Some(hit) = self.cache.get(symbol).await {
            tracing::debug!(%symbol, "history served from cache");
            return Resolved {
                series: hit.series,
                source: HistorySource::Cache,
                fetched_at: hit.fetched_at,
                stale: false,
            };
        }

        let error = match self.source.fetch_daily_history(symbol).await {
            Ok(series) => {
                let fetched_at = self.cache.set(symbol.clone(), series.clone()).await;
                tracing::debug!(%symbol, points = series.len(), "history fetched live");
                return Resolved {
                    series,
                    source: HistorySource::Live,
                    fetched_at,
                    stale: false,
                };
            }
            Err(error) => error,
        };

        if let Some(stale) = self.cache.get_stale(symbol).await {
            tracing::warn!(
                %symbol,
                provider = self.source.name(),
                error = %error,
                "live fetch failed; serving expired cache entry"
            );
            return Resolved {
                series: stale.series,
                source: HistorySource::Cache,
                fetched_at: stale.fetched_at,
                stale: true,
            };
        }

        tracing::warn!(
            %symbol,
            provider = self.source.name(),
            error = %error,
            "live fetch failed with nothing cached; serving demo history"
        );
        Resolved {
            series: PriceSeries::clone(&self.demo),
            source: HistorySource::Demo,
            fetched_at: self.cache.now(),
            stale: false,
        }
    }
}

impl std::fmt::Debug for MarketDataService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarketDataService")
            .field("source", &self.source.name())
            .field("cache", &self.cache)
            .finish()
    }
}

/// Latest price and change against the previous point of a most-recent-first series.
pub fn derive_quote(symbol: &Symbol, series: &PriceSeries) -> Result<Quote, ServiceError> {
    let [latest, previous, ..] = series.series.as_slice() else {
        return Err(ServiceError::InsufficientHistory {
            symbol: symbol.clone(),
            len: series.len(),
        });
    };

    if previous.price == 0.0 {
        return Err(ServiceError::ZeroPreviousPrice {
            symbol: symbol.clone(),
        });
    }

    let change = latest.price - previous.price;
    Ok(Quote {
        symbol: symbol.clone(),
        price: latest.price,
        change,
        change_percent: change / previous.price * 100.0,
    })
}
