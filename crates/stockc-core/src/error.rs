use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data_source::SourceError;
use crate::metrics::MetricsError;
use crate::Symbol;

/// Validation and contract errors exposed by `stockc-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol parameter required")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol must start with an ASCII letter: '{ch}'")]
    SymbolInvalidStart { ch: char },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("trading date must be YYYY-MM-DD: '{value}'")]
    InvalidDate { value: String },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be greater than zero")]
    NonPositiveValue { field: &'static str },
}

/// Failures surfaced by the market data service once its fallback chain is exhausted.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ServiceError {
    #[error("history augmentation failed for {symbol}: {source}")]
    Augmentation {
        symbol: Symbol,
        #[source]
        source: MetricsError,
    },

    #[error("quote for {symbol} needs at least two price points, found {len}")]
    InsufficientHistory { symbol: Symbol, len: usize },

    #[error("previous price for {symbol} is zero; change percent is undefined")]
    ZeroPreviousPrice { symbol: Symbol },
}

/// Error shape handed to the routing layer, which renders it as an [`ErrorBody`]
/// under [`ApiError::status_code`].
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl ApiError {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::Source(error) => error.status_code(),
            Self::Service(_) => 500,
        }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            error: self.to_string(),
        }
    }
}

/// JSON error object, `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
