//! Core error types for Trellis.

use thiserror::Error;

/// Result type alias using `TrellisError`.
pub type TrellisResult<T> = std::result::Result<T, TrellisError>;

/// Core error type for Trellis operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TrellisError {
    /// The query envelope violates a structural contract (e.g. empty select list).
    #[error("InvalidQuery: {0}")]
    InvalidQuery(String),

    /// Table schema could not be interpreted.
    #[error("SchemaError: {0}")]
    SchemaError(String),

    /// Rewrite configuration is inconsistent.
    #[error("ConfigError: {0}")]
    ConfigError(String),

    /// JSON serialization error.
    #[error("SerdeJsonError: {0}")]
    SerdeJsonError(#[from] serde_json::Error),
}

impl TrellisError {
    /// Create a new `InvalidQuery` error.
    pub fn invalid_query<S: Into<String>>(msg: S) -> Self {
        Self::InvalidQuery(msg.into())
    }

    /// Create a new `SchemaError`.
    pub fn schema_error<S: Into<String>>(msg: S) -> Self {
        Self::SchemaError(msg.into())
    }

    /// Create a new `ConfigError`.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::ConfigError(msg.into())
    }
}

/// Ensure a condition holds, returning an `InvalidQuery` error if not.
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $msg:expr) => {
        if !$cond {
            return Err($crate::TrellisError::InvalidQuery($msg.to_string()));
        }
    };
    ($cond:expr, $variant:ident: $($msg:tt)*) => {
        if !$cond {
            return Err($crate::TrellisError::$variant(format!($($msg)*)));
        }
    };
}
