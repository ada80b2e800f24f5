use std::io::Write;

use serde_json::Value;

use crate::cli::OutputFormat;
use crate::commands::Outcome;
use crate::error::CliError;

/// Writes outcomes as one JSON document or as NDJSON lines.
///
/// A single outcome in `json` mode is written bare, the same object a routing
/// layer would return for one symbol.
pub fn render<W: Write>(
    out: &mut W,
    outcomes: &[Outcome],
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let document = match outcomes {
                [single] => single.to_value(),
                many => Value::Array(many.iter().map(Outcome::to_value).collect()),
            };
            let payload = if pretty {
                serde_json::to_string_pretty(&document)?
            } else {
                serde_json::to_string(&document)?
            };
            writeln!(out, "{payload}")?;
        }
        OutputFormat::Ndjson => {
            for outcome in outcomes {
                writeln!(out, "{}", serde_json::to_string(&outcome.to_value())?)?;
            }
        }
    }

    out.flush()?;
    Ok(())
}
