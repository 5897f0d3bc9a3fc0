//! Error types and handling for the CEP weather service

use thiserror::Error;

/// Main error type for the CEP weather service
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CepWeatherError {
    /// Malformed user input
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// An upstream service answered but had nothing for the query
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// Transport failure, unexpected status or undecodable upstream body
    #[error("Upstream error: {message}")]
    Upstream { message: String },

    /// An upstream value could not be converted into our types
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CepWeatherError {
    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new not-found error
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a new upstream error
    pub fn upstream<S: Into<String>>(message: S) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    /// Create a new parse error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether the upstream answered that the key does not exist
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<reqwest::Error> for CepWeatherError {
    fn from(err: reqwest::Error) -> Self {
        // the URL may carry the weather credential
        Self::upstream(err.without_url().to_string())
    }
}
