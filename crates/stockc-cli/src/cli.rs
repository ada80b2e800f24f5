//! CLI argument definitions for stockc.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `quote` | Quote derived from the latest two daily closes |
//! | `history` | Daily closes with risk/return metrics |
//!
//! # Global Options
//!
//! | Option | Env | Default | Description |
//! |--------|-----|---------|-------------|
//! | `--format` | | `json` | Output format (json, ndjson) |
//! | `--pretty` | | `false` | Pretty-print JSON output |
//! | `--cache-ttl-secs` | `STOCKC_CACHE_TTL_SECS` | `86400` | History cache TTL |
//! | `--cache-capacity` | `STOCKC_CACHE_CAPACITY` | `16` | History cache slots |
//! | `--timeout-ms` | `STOCKC_TIMEOUT_MS` | `10000` | Upstream request timeout |
//! | `--history-limit` | `STOCKC_HISTORY_LIMIT` | `100` | Daily points kept per fetch |
//!
//! The API key is read from `STOCKC_ALPHA_VANTAGE_KEY` (or
//! `ALPHA_VANTAGE_API_KEY`) and has no flag.
//!
//! # Examples
//!
//! ```bash
//! stockc quote AAPL MSFT
//! stockc quote IBM --live --pretty
//! stockc history AAPL --format ndjson
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "stockc",
    author,
    version,
    about = "Stock quotes and daily history with cache and demo fallback"
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Seconds a cached history stays fresh.
    #[arg(long, global = true, env = "STOCKC_CACHE_TTL_SECS", default_value_t = 86_400)]
    pub cache_ttl_secs: u64,

    /// Number of symbols the history cache holds.
    #[arg(long, global = true, env = "STOCKC_CACHE_CAPACITY", default_value_t = 16)]
    pub cache_capacity: usize,

    /// Upstream request timeout in milliseconds.
    #[arg(long, global = true, env = "STOCKC_TIMEOUT_MS", default_value_t = 10_000)]
    pub timeout_ms: u64,

    /// Most recent daily points kept from each provider fetch.
    #[arg(long, global = true, env = "STOCKC_HISTORY_LIMIT", default_value_t = 100)]
    pub history_limit: usize,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One JSON document; an array when more than one symbol was requested.
    Json,
    /// Newline-delimited JSON, one object per symbol.
    Ndjson,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Quote for one or more symbols.
    Quote(QuoteArgs),
    /// Daily history with metrics for one or more symbols.
    History(HistoryArgs),
}

#[derive(Debug, Args)]
pub struct QuoteArgs {
    #[arg(required = true)]
    pub symbols: Vec<String>,

    /// Ask the provider for its own quote instead of deriving one from history.
    #[arg(long, default_value_t = false)]
    pub live: bool,
}

#[derive(Debug, Args)]
pub struct HistoryArgs {
    #[arg(required = true)]
    pub symbols: Vec<String>,

    /// Requested window in days. Accepted but not applied yet.
    #[arg(long)]
    pub days: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn quote_accepts_multiple_symbols_and_live_flag() {
        let cli = Cli::try_parse_from(["stockc", "quote", "AAPL", "MSFT", "--live"])
            .expect("valid arguments");
        match cli.command {
            Command::Quote(args) => {
                assert_eq!(args.symbols, vec!["AAPL", "MSFT"]);
                assert!(args.live);
            }
            Command::History(_) => panic!("expected quote command"),
        }
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn history_accepts_days_and_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "stockc",
            "history",
            "AAPL",
            "--days",
            "30",
            "--format",
            "ndjson",
            "--cache-capacity",
            "4",
        ])
        .expect("valid arguments");

        assert_eq!(cli.format, OutputFormat::Ndjson);
        assert_eq!(cli.cache_capacity, 4);
        match cli.command {
            Command::History(args) => assert_eq!(args.days, Some(30)),
            Command::Quote(_) => panic!("expected history command"),
        }
    }

    #[test]
    fn a_symbol_is_required() {
        assert!(Cli::try_parse_from(["stockc", "quote"]).is_err());
    }
}
