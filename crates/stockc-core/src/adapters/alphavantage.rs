use std::sync::Arc;

use serde_json::{Map, Value};

use crate::config::ServiceConfig;
use crate::data_source::{MarketDataSource, SourceError, SourceFuture};
use crate::http_client::{HttpClient, HttpRequest};
use crate::throttling::RequestBudget;
use crate::{PricePoint, PriceSeries, Quote, Symbol, TradingDate};

const GLOBAL_QUOTE: &str = "GLOBAL_QUOTE";
const TIME_SERIES_DAILY: &str = "TIME_SERIES_DAILY";

/// Top-level fields Alpha Vantage uses instead of data when it refuses a call.
const SIGNAL_FIELDS: [&str; 3] = ["Note", "Error Message", "Information"];

/// Alpha Vantage adapter for `GLOBAL_QUOTE` and `TIME_SERIES_DAILY`.
///
/// Each call makes at most one HTTP request. The credential is checked first,
/// then the request budget; neither failure touches the network.
#[derive(Clone)]
pub struct AlphaVantageAdapter {
    http_client: Arc<dyn HttpClient>,
    api_key: Option<String>,
    base_url: String,
    timeout_ms: u64,
    history_limit: usize,
    budget: RequestBudget,
}

impl AlphaVantageAdapter {
    pub fn new(http_client: Arc<dyn HttpClient>, config: &ServiceConfig) -> Self {
        Self {
            http_client,
            api_key: config.api_key().map(str::to_owned),
            base_url: config.base_url.clone(),
            timeout_ms: config.timeout_ms,
            history_limit: config.history_limit.max(1),
            budget: RequestBudget::new(config.quota_window, config.quota_limit),
        }
    }

    pub fn with_budget(mut self, budget: RequestBudget) -> Self {
        self.budget = budget;
        self
    }

    pub const fn history_limit(&self) -> usize {
        self.history_limit
    }

    async fn fetch_quote_impl(&self, symbol: &Symbol) -> Result<Quote, SourceError> {
        let root = self.call(GLOBAL_QUOTE, symbol).await?;

        let quote = root
            .get("Global Quote")
            .and_then(Value::as_object)
            .ok_or_else(|| SourceError::malformed_payload("response has no 'Global Quote' object"))?;

        let raw_price = required_str(quote, "05. price")?;
        let raw_change = required_str(quote, "09. change")?;
        let raw_percent = required_str(quote, "10. change percent")?;

        let price = parse_number("05. price", raw_price)?;
        let change = parse_number("09. change", raw_change)?;
        let change_percent = parse_percent("10. change percent", raw_percent)?;

        Quote::new(symbol.clone(), price, change, change_percent)
            .map_err(|_| SourceError::numeric_conversion("05. price", raw_price))
    }

    async fn fetch_daily_history_impl(&self, symbol: &Symbol) -> Result<PriceSeries, SourceError> {
        let root = self.call(TIME_SERIES_DAILY, symbol).await?;

        let days = root
            .get("Time Series (Daily)")
            .and_then(Value::as_object)
            .ok_or_else(|| {
                SourceError::malformed_payload("response has no 'Time Series (Daily)' object")
            })?;

        let mut closes = Vec::with_capacity(days.len());
        for (date, bar) in days {
            let Some(close) = bar.get("4. close").and_then(Value::as_str) else {
                continue;
            };
            let date = TradingDate::parse(date)
                .map_err(|error| SourceError::malformed_payload(error.to_string()))?;
            closes.push((date, close));
        }

        closes.sort_unstable_by(|left, right| right.0.cmp(&left.0));
        closes.truncate(self.history_limit);

        let series = closes
            .into_iter()
            .map(|(date, close)| {
                let price = parse_number("4. close", close)?;
                PricePoint::new(date, price)
                    .map_err(|_| SourceError::numeric_conversion("4. close", close))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PriceSeries::new(symbol.clone(), series))
    }

    /// Performs one authenticated call and returns the decoded top-level object.
    async fn call(
        &self,
        function: &'static str,
        symbol: &Symbol,
    ) -> Result<Map<String, Value>, SourceError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(SourceError::missing_credential)?;

        if let Err(delay) = self.budget.acquire() {
            tracing::warn!(
                function,
                symbol = %symbol,
                retry_in_secs = delay.as_secs_f64(),
                quota_limit = self.budget.quota_limit(),
                quota_window_secs = self.budget.quota_window().as_secs(),
                "alphavantage request budget exhausted"
            );
            return Err(SourceError::upstream_temporary(format!(
                "alphavantage request budget exhausted; retry in {:.2}s",
                delay.as_secs_f64()
            )));
        }

        tracing::info!(function, symbol = %symbol, "alphavantage api call");

        let url = format!(
            "{}?function={function}&symbol={}&apikey={}",
            self.base_url,
            urlencoding::encode(symbol.as_str()),
            urlencoding::encode(api_key)
        );
        let request = HttpRequest::get(url).with_timeout_ms(self.timeout_ms);

        let response = self.http_client.execute(request).await.map_err(|error| {
            SourceError::transport(format!("alphavantage transport error: {}", error.message()))
        })?;

        if !response.is_success() {
            return Err(SourceError::transport(format!(
                "alphavantage returned status {}",
                response.status
            )));
        }

        let root = match serde_json::from_str::<Value>(&response.body) {
            Ok(Value::Object(root)) => root,
            Ok(_) => {
                return Err(SourceError::malformed_payload(
                    "alphavantage response is not a JSON object",
                ))
            }
            Err(error) => {
                return Err(SourceError::malformed_payload(format!(
                    "failed to parse alphavantage response: {error}"
                )))
            }
        };

        if let Some(message) = upstream_signal(&root) {
            tracing::warn!(
                function,
                symbol = %symbol,
                upstream_message = message,
                "alphavantage upstream signal"
            );
            return Err(SourceError::upstream_temporary(message.to_owned()));
        }

        Ok(root)
    }
}

impl MarketDataSource for AlphaVantageAdapter {
    fn name(&self) -> &'static str {
        "alphavantage"
    }

    fn fetch_quote<'a>(&'a self, symbol: &'a Symbol) -> SourceFuture<'a, Quote> {
        Box::pin(self.fetch_quote_impl(symbol))
    }

    fn fetch_daily_history<'a>(&'a self, symbol: &'a Symbol) -> SourceFuture<'a, PriceSeries> {
        Box::pin(self.fetch_daily_history_impl(symbol))
    }
}

impl std::fmt::Debug for AlphaVantageAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlphaVantageAdapter")
            .field("has_api_key", &self.api_key.is_some())
            .field("base_url", &self.base_url)
            .field("timeout_ms", &self.timeout_ms)
            .field("history_limit", &self.history_limit)
            .field("budget", &self.budget)
            .finish()
    }
}

/// First signal field present, in priority order `Note`, `Error Message`, `Information`.
fn upstream_signal(root: &Map<String, Value>) -> Option<&str> {
    SIGNAL_FIELDS.iter().find_map(|field| {
        root.get(*field)
            .map(|value| value.as_str().unwrap_or("(no message)"))
    })
}

fn required_str<'a>(object: &'a Map<String, Value>, field: &str) -> Result<&'a str, SourceError> {
    object
        .get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| SourceError::malformed_payload(format!("missing string field '{field}'")))
}

fn parse_number(field: &str, raw: &str) -> Result<f64, SourceError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| SourceError::numeric_conversion(field, raw))
}

/// `"1.2345%"` -> `1.2345`, still in percentage units.
fn parse_percent(field: &str, raw: &str) -> Result<f64, SourceError> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_suffix('%').unwrap_or(trimmed);
    parse_number(field, digits).map_err(|_| SourceError::numeric_conversion(field, raw))
}
