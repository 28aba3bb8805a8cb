//! Framework error type.
//!
//! Only configuration problems live here: a time source running out of values
//! is reported as `None`, never as an error.

use thiserror::Error;

/// Errors raised while constructing core types.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("step size must be strictly positive, got {0}")]
    NonPositiveStep(String),

    #[error("sample size {requested} exceeds population of {available}")]
    SampleTooLarge { requested: usize, available: usize },

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `abm-core`.
pub type CoreResult<T> = Result<T, CoreError>;
