use stockc_core::{ApiError, MarketDataService};

use crate::cli::QuoteArgs;
use crate::error::CliError;

use super::{for_each_symbol, Outcome};

pub async fn run(args: &QuoteArgs, service: &MarketDataService) -> Result<Vec<Outcome>, CliError> {
    let live = args.live;
    for_each_symbol(&args.symbols, service, move |service, symbol| async move {
        let result = if live {
            service.fetch_live_quote(&symbol).await.map_err(ApiError::from)
        } else {
            service.get_quote(&symbol).await.map_err(ApiError::from)
        };
        Outcome::from_result(symbol.as_str(), result)
    })
    .await
}
