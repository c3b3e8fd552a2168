use std::time::Duration;

use thiserror::Error;

use crate::domain::filters::ParseFilterError;

/// Failure of a single gateway call. Every variant names the logical call.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("{call}: request failed: {source}")]
    Transport {
        call: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{call}: timed out after {}ms", timeout.as_millis())]
    Timeout {
        call: &'static str,
        timeout: Duration,
    },
    #[error("{call}: unauthorized (HTTP {status}); check the configured access token")]
    Unauthorized { call: &'static str, status: u16 },
    #[error("{call}: not found")]
    NotFound { call: &'static str },
    #[error("{call}: unexpected HTTP {status}: {body}")]
    Status {
        call: &'static str,
        status: u16,
        body: String,
    },
    #[error("{call}: malformed response body: {source}")]
    Decode {
        call: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Outcome of a failed operation.
///
/// `Usage` is raised before any network call. `Cancelled` means the user
/// declined a confirmation. `Upstream` wraps the gateway failure unchanged.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Cancelled(String),
    #[error(transparent)]
    Upstream(#[from] GatewayError),
}

impl QueryError {
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage(message.into())
    }

    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Usage(_))
    }
}

impl From<ParseFilterError> for QueryError {
    fn from(error: ParseFilterError) -> Self {
        Self::Usage(error.to_string())
    }
}
