//! Fetch result and error taxonomy.

use serde_json::Value;

/// Successful upstream exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched {
    /// Parsed JSON body, or `Value::String` holding the raw text.
    pub data: Value,
    pub status: u16,
}

/// Outcome of [`crate::infrastructure::http::FetchClient::fetch_json`].
///
/// Exactly one side is populated; the error side always carries a stable
/// machine-readable [`FetchError::code`].
pub type FetchResult = Result<Fetched, FetchError>;

/// Errors produced by the outbound fetch client after retries are exhausted.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchError {
    #[error("upstream did not answer within {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("network error: {message}")]
    Network { message: String },

    #[error("upstream responded with HTTP {status}: {message}")]
    Http {
        status: u16,
        message: String,
        details: Value,
        /// Upstream `Retry-After`, in seconds, when it sent one.
        retry_after: Option<u64>,
    },
}

impl FetchError {
    /// Machine-readable error code.
    ///
    /// - `TIMEOUT`, `NETWORK_ERROR` for transport failures
    /// - `UPSTREAM_BAD_REQUEST` for 400
    /// - `RATE_LIMITED` when the upstream itself answered 429
    /// - `UPSTREAM_5XX` for any 5xx
    /// - `HTTP_<status>` otherwise
    pub fn code(&self) -> String {
        match self {
            Self::Timeout { .. } => "TIMEOUT".to_string(),
            Self::Network { .. } => "NETWORK_ERROR".to_string(),
            Self::Http { status, .. } => match *status {
                400 => "UPSTREAM_BAD_REQUEST".to_string(),
                429 => "RATE_LIMITED".to_string(),
                500..=599 => "UPSTREAM_5XX".to_string(),
                other => format!("HTTP_{other}"),
            },
        }
    }

    /// Status associated with the failure: 408 for timeouts, 503 for
    /// connection failures, the upstream status otherwise.
    pub fn status(&self) -> u16 {
        match self {
            Self::Timeout { .. } => 408,
            Self::Network { .. } => 503,
            Self::Http { status, .. } => *status,
        }
    }

    /// Parsed upstream body for HTTP failures.
    pub fn details(&self) -> Option<&Value> {
        match self {
            Self::Http { details, .. } if !details.is_null() => Some(details),
            _ => None,
        }
    }

    /// Delay the upstream asked for before the next call.
    pub fn retry_after(&self) -> Option<u64> {
        match self {
            Self::Http { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }
}
