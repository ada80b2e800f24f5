use stockc_core::{ApiError, MarketDataService};

use crate::cli::HistoryArgs;
use crate::error::CliError;

use super::{for_each_symbol, Outcome};

pub async fn run(
    args: &HistoryArgs,
    service: &MarketDataService,
) -> Result<Vec<Outcome>, CliError> {
    let days = args.days;
    for_each_symbol(&args.symbols, service, move |service, symbol| async move {
        let result = service.get_history(&symbol, days).await;
        if let Ok(history) = &result {
            if history.stale {
                tracing::warn!(%symbol, "served expired cache entry");
            }
            tracing::info!(
                %symbol,
                source = %history.source,
                points = history.series.len(),
                "history resolved"
            );
        }
        Outcome::from_result(symbol.as_str(), result.map_err(ApiError::from))
    })
    .await
}
