/*!
 * Error types for the qa-translator application.
 *
 * This module contains custom error types for the different layers of the
 * pipeline, using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when talking to a translation provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// The text cannot be sent to the provider as-is
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Errors that can occur while reading or writing dataset files
#[derive(Error, Debug)]
pub enum DatasetError {
    /// A required column is absent from the header
    #[error("Missing required column '{0}'")]
    MissingColumn(&'static str),

    /// The file has no header row at all
    #[error("Dataset has no header row")]
    MissingHeader,

    /// Error from the CSV reader or writer
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error from the file system
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
