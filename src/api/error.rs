use std::time::Duration;

use thiserror::Error;

/// Errors returned by the NewReleases API client.
///
/// Callers tell authorization failures apart from transport problems by
/// matching on the variant, never on the message.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("forbidden")]
    Forbidden,

    #[error("not found")]
    NotFound,

    #[error("too many requests{}", retry_after.map(|d| format!(", retry after {}s", d.as_secs())).unwrap_or_default())]
    RateLimited { retry_after: Option<Duration> },

    #[error("request timed out")]
    Timeout,

    #[error("{message} ({code})")]
    Status { code: u16, message: String },

    #[error("failed to connect to api: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("invalid api response: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("invalid api endpoint {0:?}")]
    InvalidEndpoint(String),
}

impl ApiError {
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_decode() {
            ApiError::Decode(err)
        } else {
            ApiError::Transport(err)
        }
    }
}
