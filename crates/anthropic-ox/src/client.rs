use bon::Builder;
use core::fmt;
use std::time::Duration;

use crate::{
    error::AnthropicRequestError,
    request::ChatRequest,
    response::ChatResponse,
};

const BASE_URL: &str = "https://api.anthropic.com";
const CHAT_URL: &str = "v1/messages";
const API_VERSION: &str = "2023-06-01";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

/// Deadline for a whole request, including reading the response body.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Stateless client for the Messages API.
///
/// Holds the credential and a reusable transport handle; cloning is cheap
/// because `reqwest::Client` is reference counted.
#[derive(Clone, Builder)]
pub struct Anthropic {
    #[builder(into)]
    pub(crate) api_key: Option<String>,
    #[builder(default)]
    pub(crate) client: reqwest::Client,
    #[builder(default = BASE_URL.to_string(), into)]
    pub(crate) base_url: String,
    #[builder(default = API_VERSION.to_string(), into)]
    pub(crate) api_version: String,
    #[builder(default = DEFAULT_TIMEOUT)]
    pub(crate) timeout: Duration,
}

impl Anthropic {
    /// Create a new Anthropic client with the provided API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::builder().api_key(api_key).build()
    }

    /// Create a client from the `ANTHROPIC_API_KEY` environment variable.
    pub fn load_from_env() -> Result<Self, std::env::VarError> {
        let api_key = std::env::var(API_KEY_ENV)?;
        Ok(Self::builder().api_key(api_key).build())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Sends a single message request and waits for the complete response.
    ///
    /// The request is validated before anything goes on the wire. The body is
    /// read in full before it is parsed, so a truncated body surfaces as
    /// [`AnthropicRequestError::ReadBody`] rather than a parse error.
    pub async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, AnthropicRequestError> {
        request.validate()?;
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(AnthropicRequestError::AuthenticationMissing)?;
        let body = serde_json::to_vec(request).map_err(AnthropicRequestError::Serialize)?;
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), CHAT_URL);

        tracing::debug!(
            model = %request.model,
            messages = request.messages.len(),
            max_tokens = request.max_tokens,
            "sending message request"
        );

        let res = self
            .client
            .post(&url)
            .header("x-api-key", api_key)
            .header("anthropic-version", &self.api_version)
            .header("content-type", "application/json")
            .timeout(self.timeout)
            .body(body)
            .send()
            .await
            .map_err(AnthropicRequestError::from_send)?;

        let status = res.status();
        let bytes = res.bytes().await.map_err(AnthropicRequestError::from_body)?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "message request rejected");
            return Err(AnthropicRequestError::Api {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        let response: ChatResponse =
            serde_json::from_slice(&bytes).map_err(AnthropicRequestError::Deserialize)?;
        tracing::debug!(
            id = %response.id,
            blocks = response.content.len(),
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "message response received"
        );
        Ok(response)
    }
}

impl fmt::Debug for Anthropic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Anthropic")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("client", &self.client)
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
