//! Market data source contract and its classified error type.
//!
//! A [`MarketDataSource`] performs exactly one upstream attempt per call. Retry
//! and fallback decisions belong to [`MarketDataService`](crate::MarketDataService),
//! which treats every [`SourceError`] as a signal to advance its fallback chain.
//!
//! # Error kinds
//!
//! | Kind | Code | Status | Meaning |
//! |------|------|--------|---------|
//! | `Transport` | `source.transport` | 502 | Connect/timeout/read failure or non-2xx status |
//! | `MissingCredential` | `source.missing_credential` | 500 | No API key configured |
//! | `MalformedPayload` | `source.malformed_payload` | 502 | Unparseable JSON or missing fields |
//! | `UpstreamTemporary` | `source.upstream_temporary` | 429 | Throttle, invalid-request or info signal |
//! | `NumericConversion` | `source.numeric_conversion` | 502 | Numeric field failed to parse |

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use crate::{PriceSeries, Quote, Symbol};

/// Adapter-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    Transport,
    MissingCredential,
    MalformedPayload,
    UpstreamTemporary,
    NumericConversion,
}

/// Structured source error consumed by the service fallback chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
}

impl SourceError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Transport,
            message: message.into(),
        }
    }

    pub fn missing_credential() -> Self {
        Self {
            kind: SourceErrorKind::MissingCredential,
            message: String::from("market data API key is not configured"),
        }
    }

    pub fn malformed_payload(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::MalformedPayload,
            message: message.into(),
        }
    }

    pub fn upstream_temporary(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::UpstreamTemporary,
            message: message.into(),
        }
    }

    pub fn numeric_conversion(field: &str, value: &str) -> Self {
        Self {
            kind: SourceErrorKind::NumericConversion,
            message: format!("field '{field}' is not a usable number: '{value}'"),
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::Transport => "source.transport",
            SourceErrorKind::MissingCredential => "source.missing_credential",
            SourceErrorKind::MalformedPayload => "source.malformed_payload",
            SourceErrorKind::UpstreamTemporary => "source.upstream_temporary",
            SourceErrorKind::NumericConversion => "source.numeric_conversion",
        }
    }

    /// HTTP status a routing layer should answer with when this error reaches a client.
    pub const fn status_code(&self) -> u16 {
        match self.kind {
            SourceErrorKind::MissingCredential => 500,
            SourceErrorKind::UpstreamTemporary => 429,
            SourceErrorKind::Transport
            | SourceErrorKind::MalformedPayload
            | SourceErrorKind::NumericConversion => 502,
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

pub type SourceFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, SourceError>> + Send + 'a>>;

/// Upstream market data provider.
///
/// Implementations must be `Send + Sync`; one instance is shared by every
/// worker of the service.
pub trait MarketDataSource: Send + Sync {
    /// Short provider name used in logs.
    fn name(&self) -> &'static str;

    /// Fetches the provider's own latest quote.
    fn fetch_quote<'a>(&'a self, symbol: &'a Symbol) -> SourceFuture<'a, Quote>;

    /// Fetches daily closes, most-recent first, capped to the adapter's limit.
    fn fetch_daily_history<'a>(&'a self, symbol: &'a Symbol) -> SourceFuture<'a, PriceSeries>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_stable_code() {
        let error = SourceError::transport("connection failed");
        assert_eq!(error.to_string(), "connection failed (source.transport)");
    }

    #[test]
    fn numeric_conversion_names_field_and_value() {
        let error = SourceError::numeric_conversion("05. price", "n/a");
        assert_eq!(error.kind(), SourceErrorKind::NumericConversion);
        assert!(error.message().contains("05. price"));
        assert!(error.message().contains("n/a"));
    }

    #[test]
    fn upstream_temporary_is_distinct_from_transport() {
        let throttled = SourceError::upstream_temporary("Note");
        let transport = SourceError::transport("timeout");
        assert_ne!(throttled.kind(), transport.kind());
        assert_eq!(throttled.status_code(), 429);
        assert_eq!(transport.status_code(), 502);
    }
}
