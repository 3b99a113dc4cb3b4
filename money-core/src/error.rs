//! Error types for money and registry operations.

use std::fmt;

use money_currencies::CurrencyError;

/// Errors surfaced by the registry, the formatter and `Money`.
#[derive(Debug, thiserror::Error)]
pub enum MoneyError {
    /// The currency (or currency reference) is invalid.
    #[error(transparent)]
    Currency(#[from] CurrencyError),

    #[error("Currency does not exist: {0}")]
    CurrencyDoesNotExist(String),

    #[error("Cannot extract currency from {formatted:?}: {reason}")]
    CannotExtractCurrency {
        formatted: String,
        reason: ExtractionFailure,
    },

    #[error("The formatted string {0:?} could not be resolved to a valid number")]
    Parse(String),

    #[error("Invalid money JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl MoneyError {
    pub(crate) fn invalid_currency(message: impl Into<String>) -> Self {
        MoneyError::Currency(CurrencyError::InvalidCurrency(message.into()))
    }

    /// True for the `InvalidCurrency` kind, wherever it was raised.
    pub fn is_invalid_currency(&self) -> bool {
        matches!(self, MoneyError::Currency(CurrencyError::InvalidCurrency(_)))
    }
}

/// Why a currency could not be picked out of a formatted string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionFailure {
    NoMatch,
    Ambiguous(Vec<String>),
}

impl fmt::Display for ExtractionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionFailure::NoMatch => write!(
                f,
                "none of the currencies use a prefix and suffix matching the string"
            ),
            ExtractionFailure::Ambiguous(codes) => write!(
                f,
                "multiple currencies ({}) share this prefix and suffix, specify the currency explicitly",
                codes.join(", ")
            ),
        }
    }
}
