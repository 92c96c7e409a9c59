//! Description to PlantUML markup, via the Messages API.

use anthropic_ox::{
    API_KEY_ENV, Anthropic, AnthropicRequestError, ChatRequest, ChatResponse, ContentBlock, Model,
    message::ChatMessage,
};
use async_trait::async_trait;
use bon::Builder;

use crate::error::DiagramError;

/// First line of valid markup.
pub const START_MARKER: &str = "@startuml";
/// Last line of valid markup.
pub const END_MARKER: &str = "@enduml";

/// Token ceiling for a single generation.
pub const DEFAULT_MAX_TOKENS: u32 = 1000;
pub const DEFAULT_MODEL: Model = Model::Claude35Sonnet20241022;

/// Placeholder in [`PROMPT_TEMPLATE`] replaced by the user's description.
pub const DESCRIPTION_PLACEHOLDER: &str = "{description}";

pub const PROMPT_TEMPLATE: &str = "Generate a PlantUML diagram based on the following description.
Only return the PlantUML code without any explanation or additional text.
The code should start with @startuml and end with @enduml.

Description: {description}";

/// The seam between the generator and the model service.
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, AnthropicRequestError>;
}

#[async_trait]
impl ChatClient for Anthropic {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, AnthropicRequestError> {
        Anthropic::send(self, request).await
    }
}

/// Per-deployment generation policy. Callers cannot change it per request.
#[derive(Debug, Clone, Builder)]
pub struct GeneratorConfig {
    #[builder(default = DEFAULT_MODEL.to_string(), into)]
    pub model: String,
    #[builder(default = DEFAULT_MAX_TOKENS)]
    pub max_tokens: u32,
    #[builder(default = PROMPT_TEMPLATE.to_string(), into)]
    pub prompt_template: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl GeneratorConfig {
    /// The user message for `description`. A template without
    /// [`DESCRIPTION_PLACEHOLDER`] gets the description appended on its own
    /// line, so the description always reaches the model.
    pub fn prompt(&self, description: &str) -> String {
        if self.prompt_template.contains(DESCRIPTION_PLACEHOLDER) {
            self.prompt_template
                .replace(DESCRIPTION_PLACEHOLDER, description)
        } else {
            format!("{}\n\n{description}", self.prompt_template.trim_end())
        }
    }
}

/// Reads the API key from the environment. An unset or empty variable is a
/// configuration error.
pub fn api_key_from_env() -> Result<String, DiagramError> {
    credential(std::env::var(API_KEY_ENV).ok())
}

fn credential(value: Option<String>) -> Result<String, DiagramError> {
    match value {
        Some(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(DiagramError::Configuration(format!(
            "{API_KEY_ENV} environment variable not set"
        ))),
    }
}

#[derive(Debug, Clone)]
pub struct MarkupGenerator<C> {
    client: C,
    config: GeneratorConfig,
}

impl MarkupGenerator<Anthropic> {
    /// Builds a generator backed by the Messages API, using the key from
    /// `ANTHROPIC_API_KEY`.
    pub fn from_env(config: GeneratorConfig) -> Result<Self, DiagramError> {
        let api_key = api_key_from_env()?;
        Ok(Self::new(Anthropic::new(api_key), config))
    }
}

impl<C: ChatClient> MarkupGenerator<C> {
    pub fn new(client: C, config: GeneratorConfig) -> Self {
        Self { client, config }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// The single-message request sent for `description`.
    pub fn build_request(&self, description: &str) -> Result<ChatRequest, DiagramError> {
        if description.trim().is_empty() {
            return Err(DiagramError::InvalidInput("description is required"));
        }
        Ok(ChatRequest::builder()
            .model(self.config.model.clone())
            .max_tokens(self.config.max_tokens)
            .message(ChatMessage::user(self.config.prompt(description)))
            .build())
    }

    /// Asks the model for markup and returns the text of the first content
    /// block. A blank text block counts as no content. Beyond that the markup
    /// is not checked; the renderer is the judge.
    pub async fn generate(&self, description: &str) -> Result<String, DiagramError> {
        let request = self.build_request(description)?;
        let response = self.client.send(&request).await?;
        tracing::debug!(
            id = %response.id,
            blocks = response.content.len(),
            stop_reason = ?response.stop_reason,
            "model responded"
        );

        match response.content.into_iter().next() {
            None => Err(DiagramError::EmptyResponse),
            Some(ContentBlock::Text { text }) if text.trim().is_empty() => {
                Err(DiagramError::EmptyResponse)
            }
            Some(ContentBlock::Text { text }) => Ok(text),
            Some(other) => Err(DiagramError::MalformedResponse(format!(
                "expected a text block, got {}",
                other.block_type()
            ))),
        }
    }
}
