//! Error types for serprank

use thiserror::Error;

/// Result type alias for serprank operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

/// Upstream search API errors, reported per combination
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("The search API rejected the API key (HTTP {0})")]
    Unauthorized(u16),

    #[error("Search API rate limit or quota exceeded")]
    RateLimit,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to the search API".to_string())
        } else {
            // Strip the URL so the api_key query parameter never ends up in a message
            ApiError::Network(err.without_url().to_string())
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Cache storage errors
///
/// Only raised by operations the user triggers directly (clear, status).
/// Lookups never fail: an unreadable entry is a miss.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Could not determine a cache directory for this platform")]
    NoCacheDir,

    #[error("Cache I/O error: {0}")]
    Io(String),
}

/// Problems with what the user asked for
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("ValueSERP API key missing. Pass --api-key, set SERPRANK_API_KEY, or run `serprank init`.")]
    MissingApiKey,

    #[error("No keyword + location combination entered.")]
    NoCombinations,

    #[error("Too many combinations: {given} given, at most {max} are allowed.")]
    TooManyCombinations { given: usize, max: usize },

    #[error("Failed to read input file {path}: {reason}")]
    InputFile { path: String, reason: String },
}
