mod history;
mod quote;

use std::future::Future;
use std::time::Duration;

use serde::Serialize;
use serde_json::{json, Value};
use stockc_core::{ApiError, MarketDataService, ServiceConfig, Symbol};
use tokio::task::JoinSet;

use crate::cli::{Cli, Command};
use crate::error::CliError;

/// Result for one requested symbol.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success(Value),
    Failure { error: String, status: u16 },
}

impl Outcome {
    fn from_result<T: Serialize>(
        symbol: &str,
        result: Result<T, ApiError>,
    ) -> Result<Self, CliError> {
        match result {
            Ok(data) => Ok(Self::Success(serde_json::to_value(data)?)),
            Err(error) => {
                let status = error.status_code();
                tracing::warn!(symbol, status, %error, "request failed");
                Ok(Self::Failure {
                    error: error.body().error,
                    status,
                })
            }
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }

    pub fn to_value(&self) -> Value {
        match self {
            Self::Success(data) => data.clone(),
            Self::Failure { error, status } => json!({ "error": error, "status": status }),
        }
    }
}

pub async fn run(cli: &Cli) -> Result<Vec<Outcome>, CliError> {
    let config = service_config(cli);
    tracing::debug!(?config, "service configured");
    run_with_service(cli, MarketDataService::from_config(&config)).await
}

pub async fn run_with_service(
    cli: &Cli,
    service: MarketDataService,
) -> Result<Vec<Outcome>, CliError> {
    match &cli.command {
        Command::Quote(args) => quote::run(args, &service).await,
        Command::History(args) => history::run(args, &service).await,
    }
}

fn service_config(cli: &Cli) -> ServiceConfig {
    ServiceConfig::from_env()
        .with_cache_ttl(Duration::from_secs(cli.cache_ttl_secs))
        .with_cache_capacity(cli.cache_capacity)
        .with_timeout_ms(cli.timeout_ms)
        .with_history_limit(cli.history_limit)
}

/// Runs `task` for every symbol concurrently on one shared service.
///
/// Outcomes come back in input order. Symbols that fail validation never
/// reach the service.
async fn for_each_symbol<F, Fut>(
    symbols: &[String],
    service: &MarketDataService,
    task: F,
) -> Result<Vec<Outcome>, CliError>
where
    F: Fn(MarketDataService, Symbol) -> Fut,
    Fut: Future<Output = Result<Outcome, CliError>> + Send + 'static,
{
    let mut slots: Vec<Option<Outcome>> = vec![None; symbols.len()];
    let mut tasks = JoinSet::new();

    for (index, raw) in symbols.iter().enumerate() {
        match Symbol::parse(raw) {
            Ok(symbol) => {
                let pending = task(service.clone(), symbol);
                tasks.spawn(async move { (index, pending.await) });
            }
            Err(error) => {
                slots[index] = Some(Outcome::from_result::<()>(raw, Err(error.into()))?);
            }
        }
    }

    while let Some(joined) = tasks.join_next().await {
        let (index, outcome) = joined?;
        slots[index] = Some(outcome?);
    }

    Ok(slots.into_iter().flatten().collect())
}
