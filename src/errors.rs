/*!
 * Error types for the quotevault library.
 *
 * The transcript core itself is total over well-formed input; these types
 * cover the boundaries around it: payload decoding, highlight bookkeeping
 * and the caption provider.
 */

use thiserror::Error;

/// Errors that can occur when talking to a caption provider
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

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// The provider answered but has no captions for the item
    #[error("No transcript available: {0}")]
    NoTranscript(String),

    /// The provider cannot be used with the current configuration
    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

/// Errors raised at the edges of the transcript core
#[derive(Error, Debug, PartialEq)]
pub enum TranscriptError {
    /// A required list was null or missing
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A highlight could not be created or found
    #[error("Invalid highlight: {0}")]
    InvalidHighlight(String),

    /// A payload could not be decoded
    #[error("Malformed payload: {0}")]
    Payload(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from the transcript core boundaries
    #[error("Transcript error: {0}")]
    Transcript(#[from] TranscriptError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

impl From<serde_json::Error> for TranscriptError {
    fn from(error: serde_json::Error) -> Self {
        Self::Payload(error.to_string())
    }
}
