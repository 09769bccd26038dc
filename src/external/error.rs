//! Error types for outbound HTTP requests

use std::time::Duration;

use thiserror::Error;

/// Failure of a single GET request against the source site.
///
/// The fetcher never retries; callers inspect [`FetchError::is_retryable`]
/// and decide for themselves.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The configured deadline elapsed before the response was complete
    #[error("Request to {url} timed out")]
    Timeout { url: String },

    /// The site answered with HTTP 429
    #[error("Rate limited by {url}")]
    RateLimited {
        url: String,
        retry_after: Option<Duration>,
    },

    /// Connection-level failure (DNS, TLS, refused, proxy unreachable)
    #[error("Network error while requesting {url}: {message}")]
    NetworkError {
        url: String,
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// Any other non-2xx status
    #[error("HTTP {status} from {url}")]
    HttpError { url: String, status: u16 },
}

impl FetchError {
    pub fn network(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NetworkError {
            url: url.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Map a transport error from reqwest onto the fetch taxonomy.
    pub fn from_reqwest(url: &str, error: reqwest::Error) -> Self {
        if error.is_timeout() {
            return Self::Timeout {
                url: url.to_string(),
            };
        }

        Self::NetworkError {
            url: url.to_string(),
            message: error.to_string(),
            source: Some(error),
        }
    }

    /// Classify a response status. `None` means the status is a success.
    pub fn from_status(url: &str, status: u16, retry_after: Option<Duration>) -> Option<Self> {
        match status {
            200..=299 => None,
            429 => Some(Self::RateLimited {
                url: url.to_string(),
                retry_after,
            }),
            _ => Some(Self::HttpError {
                url: url.to_string(),
                status,
            }),
        }
    }

    /// Whether a caller-side retry policy may try the request again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::RateLimited { .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RateLimited { .. } => Some(429),
            Self::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }
}
