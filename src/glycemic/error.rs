//! Calculator error types

use thiserror::Error;

/// Errors raised by the glycemic calculator
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GlError {
    #[error("Invalid serving size {0}: must be a finite number of grams greater than 0")]
    InvalidServingSize(f64),

    #[error("Invalid value {0}: must be a finite, non-negative number")]
    InvalidValue(f64),

    #[error("Unknown food '{0}'")]
    UnknownFood(String),
}

/// Result type for calculator operations
pub type GlResult<T> = Result<T, GlError>;
