//! Error types for currency descriptors.

/// Errors raised while building or decoding a [`crate::Currency`].
#[derive(Debug, thiserror::Error)]
pub enum CurrencyError {
    #[error("Invalid currency: {0}")]
    InvalidCurrency(String),

    #[error("Invalid currency JSON: {0}")]
    Json(#[from] serde_json::Error),
}
