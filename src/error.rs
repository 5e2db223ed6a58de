//! Configuration error types for the THG Hosting API client.
//!
//! All configuration constructors return `Result<T, ConfigError>` so invalid
//! values are rejected at construction time instead of on the first request.
//!
//! # Example
//!
//! ```rust
//! use thg_hosting::{ApiToken, ConfigError};
//!
//! let result = ApiToken::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyApiToken)));
//! ```

use thiserror::Error;

/// Errors that can occur while building the client configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// API token cannot be empty.
    #[error("API token cannot be empty. Please provide a valid X-Api-Token.")]
    EmptyApiToken,

    /// Base URL is invalid.
    #[error("Invalid base URL '{url}'. Expected an http or https URL (e.g., 'https://api.example.com/rest-api/').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// Timeout is negative.
    #[error("Timeout can't be lower than zero (got {timeout}).")]
    InvalidTimeout {
        /// The rejected timeout, in seconds.
        timeout: i64,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}
