//! Recommender error types

use shared::SharedError;
use thiserror::Error;

/// Result type for recommender operations
pub type RecommenderResult<T> = Result<T, RecommenderError>;

/// Recommender error types
#[derive(Error, Debug)]
pub enum RecommenderError {
    #[error("Model output could not be parsed: {message}")]
    ParseError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Shared component error: {0}")]
    Shared(#[from] SharedError),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl RecommenderError {
    pub fn parse(message: impl Into<String>) -> Self {
        RecommenderError::ParseError { message: message.into() }
    }

    pub fn config(message: impl Into<String>) -> Self {
        RecommenderError::ConfigError { message: message.into() }
    }
}
