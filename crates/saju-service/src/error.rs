//! Error types for scoring strategies and their configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Failures talking to the remote scoring service.
///
/// None of these reach the caller of `CompatibilityScorer::score`; they are
/// logged and replaced by the neutral fallback result.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// HTTP/network error, including client-side timeouts.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Service answered with a non-2xx status.
    #[error("service returned HTTP {status}")]
    Status { status: u16 },

    /// Service answered `success: false`.
    #[error("service rejected the request: {}", .message.as_deref().unwrap_or("no message"))]
    Rejected { message: Option<String> },

    /// Payload did not have the expected shape.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// Caller cancelled before the service answered.
    #[error("request cancelled")]
    Cancelled,

    /// Client could not be constructed.
    #[error("configuration error: {0}")]
    Config(String),
}

impl UpstreamError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed(message.into())
    }

    /// Whether another attempt could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            Self::Status { status } => *status >= 500 || *status == 429,
            Self::Rejected { .. } => false,
            Self::Malformed(_) => false,
            Self::Cancelled => false,
            Self::Config(_) => false,
        }
    }

    /// Short error code for logging.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Http(e) if e.is_timeout() => "timeout",
            Self::Http(e) if e.is_connect() => "connect_error",
            Self::Http(_) => "http_error",
            Self::Status { .. } => "bad_status",
            Self::Rejected { .. } => "rejected",
            Self::Malformed(_) => "malformed_response",
            Self::Cancelled => "cancelled",
            Self::Config(_) => "config_error",
        }
    }
}

/// Failures loading [`ServiceConfig`](crate::ServiceConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("unknown scoring strategy {0:?} (expected \"local\" or \"remote\")")]
    UnknownStrategy(String),
}
