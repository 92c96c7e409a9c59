use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured error body returned by the API on most failures.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub r#type: Option<String>,
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorDetail,
}

#[derive(Debug, Error)]
pub enum AnthropicRequestError {
    /// The request breaks an invariant and was never sent
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The client was built without an API key
    #[error("authentication missing: no API key provided")]
    AuthenticationMissing,

    /// The request body could not be serialized
    #[error("marshal request: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Connection, TLS or send failure
    #[error("send request: {0}")]
    Transport(#[source] reqwest::Error),

    /// The configured deadline elapsed
    #[error("request timed out: {0}")]
    Timeout(#[source] reqwest::Error),

    /// The response body could not be read
    #[error("read response body: {0}")]
    ReadBody(#[source] reqwest::Error),

    /// Non-success status; carries the raw body for diagnostics
    #[error("API request failed with status code {status}: {body}")]
    Api { status: u16, body: String },

    /// The response body is not a valid message response
    #[error("unmarshaling response: {0}")]
    Deserialize(#[source] serde_json::Error),
}

impl AnthropicRequestError {
    pub(crate) fn from_send(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err)
        } else {
            Self::Transport(err)
        }
    }

    pub(crate) fn from_body(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err)
        } else {
            Self::ReadBody(err)
        }
    }

    /// HTTP status of an [`AnthropicRequestError::Api`] failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Parses the structured error body, if the API sent one.
    pub fn api_error(&self) -> Option<ApiErrorDetail> {
        match self {
            Self::Api { body, .. } => serde_json::from_str::<ApiErrorResponse>(body)
                .ok()
                .map(|payload| payload.error),
            _ => None,
        }
    }
}
