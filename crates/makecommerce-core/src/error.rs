//! Error types for the MakeCommerce core.

/// Core error type for credentials and configuration.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Invalid shop identifier.
    #[error("invalid shop ID: {0:?} (must be a non-empty string without whitespace)")]
    InvalidShopId(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Convenience result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
