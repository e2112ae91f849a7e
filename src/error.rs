use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can go wrong while asking the model for an answer.
///
/// Every variant is terminal for the submission that produced it; the
/// caller renders it and waits for the user to submit again.
#[derive(Debug, Error)]
pub enum RequestFailure {
    #[error("API key is not configured (set GEMINI_API_KEY)")]
    MissingApiKey,

    #[error("failed to build HTTP client: {0}")]
    ClientSetup(#[source] reqwest::Error),

    #[error("request timed out after {} seconds", .0.as_secs())]
    Timeout(Duration),

    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("authentication failed ({status}): {message}")]
    Authentication { status: StatusCode, message: String },

    #[error("API request failed with status {status}: {message}")]
    Api { status: StatusCode, message: String },

    #[error("malformed response from API: {0}")]
    MalformedResponse(String),

    #[error("the model returned an empty answer")]
    EmptyAnswer,
}

impl RequestFailure {
    /// Maps a transport error, keeping timeouts distinct from other failures.
    pub fn from_transport(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout)
        } else {
            Self::Network(err)
        }
    }

    /// Classifies a non-success HTTP status with the provider's message.
    pub fn from_status(status: StatusCode, message: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Self::Authentication { status, message }
            }
            _ => Self::Api { status, message },
        }
    }

    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication { .. } | Self::MissingApiKey)
    }
}
