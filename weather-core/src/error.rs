use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures of a single weather lookup.
///
/// Every stage of the pipeline reports through this type; the orchestrator
/// passes it through untouched so the caller sees exactly one error.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The caller supplied something unusable (blank city, out-of-range coordinates).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Geocoding succeeded but matched nothing.
    #[error("city not found: {query}")]
    CityNotFound { query: String },

    /// Network failure, timeout or non-success status from a provider.
    #[error("{provider} unavailable: {reason}")]
    UpstreamUnavailable { provider: &'static str, reason: String },

    /// The provider answered successfully but the payload is not what we expect.
    #[error("malformed response from {provider}: {reason}")]
    MalformedResponse { provider: &'static str, reason: String },
}

/// Coarse classification surfaced to the invoking host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidInput,
    NotFound,
    Transient,
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Transient => "transient",
            ErrorKind::Internal => "internal",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl WeatherError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        WeatherError::InvalidInput(msg.into())
    }

    pub fn upstream(provider: &'static str, reason: impl Into<String>) -> Self {
        WeatherError::UpstreamUnavailable { provider, reason: reason.into() }
    }

    pub fn malformed(provider: &'static str, reason: impl Into<String>) -> Self {
        WeatherError::MalformedResponse { provider, reason: reason.into() }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            WeatherError::InvalidInput(_) => ErrorKind::InvalidInput,
            WeatherError::CityNotFound { .. } => ErrorKind::NotFound,
            WeatherError::UpstreamUnavailable { .. } => ErrorKind::Transient,
            WeatherError::MalformedResponse { .. } => ErrorKind::Internal,
        }
    }

    /// Whether a caller may reasonably try the same request again.
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::Transient
    }
}
