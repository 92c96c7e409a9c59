use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::{
    error::AnthropicRequestError,
    message::ChatMessage,
    tool::{Tool, ToolChoice},
};

/// Token ceiling used when the builder is not given one.
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Builder)]
#[builder(builder_type(vis = "pub"), state_mod(vis = "pub"))]
pub struct ChatRequest {
    #[builder(field)]
    pub messages: Vec<ChatMessage>,
    #[builder(into)]
    pub model: String,
    #[builder(default = DEFAULT_MAX_TOKENS)]
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Tool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<ToolChoice>,
}

impl<S: chat_request_builder::State> ChatRequestBuilder<S> {
    pub fn messages(mut self, messages: impl IntoIterator<Item = impl Into<ChatMessage>>) -> Self {
        self.messages = messages.into_iter().map(Into::into).collect();
        self
    }

    pub fn message(mut self, message: impl Into<ChatMessage>) -> Self {
        self.messages.push(message.into());
        self
    }
}

impl ChatRequest {
    /// Checks the invariants the API relies on: at least one message and a
    /// positive token budget.
    pub fn validate(&self) -> Result<(), AnthropicRequestError> {
        if self.messages.is_empty() {
            return Err(AnthropicRequestError::InvalidRequest(
                "at least one message is required".to_string(),
            ));
        }
        if self.max_tokens == 0 {
            return Err(AnthropicRequestError::InvalidRequest(
                "max_tokens must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Set temperature for response randomness (0.0 to 1.0)
    #[must_use]
    pub fn temp(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    #[must_use]
    pub fn tool(mut self, tool: Tool) -> Self {
        self.tools.get_or_insert_with(Vec::new).push(tool);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Role;

    #[test]
    fn test_builder_collects_messages() {
        let request = ChatRequest::builder()
            .model("claude-3-5-haiku-20241022")
            .message("first")
            .message(ChatMessage::assistant("second"))
            .build();

        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role(), Role::User);
        assert_eq!(request.messages[1].role(), Role::Assistant);
        assert_eq!(request.max_tokens, DEFAULT_MAX_TOKENS);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_messages() {
        let request = ChatRequest::builder().model("claude-3-5-haiku-20241022").build();
        let err = request.validate().unwrap_err();
        assert!(matches!(err, AnthropicRequestError::InvalidRequest(_)));
    }

    #[test]
    fn test_validate_rejects_zero_max_tokens() {
        let request = ChatRequest::builder()
            .model("claude-3-5-haiku-20241022")
            .message("hello")
            .max_tokens(0)
            .build();
        let err = request.validate().unwrap_err();
        assert!(err.to_string().contains("max_tokens"));
    }

    #[test]
    fn test_optional_fields_are_omitted() {
        let request = ChatRequest::builder()
            .model("claude-3-5-haiku-20241022")
            .message("hello")
            .max_tokens(10)
            .build();
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["model"], "claude-3-5-haiku-20241022");
        assert_eq!(json["max_tokens"], 10);
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "hello");
        assert!(json.get("temperature").is_none());
        assert!(json.get("tools").is_none());
        assert!(json.get("tool_choice").is_none());
    }

    #[test]
    fn test_temperature_and_tool_choice_serialized_when_set() {
        let request = ChatRequest::builder()
            .model("claude-3-5-haiku-20241022")
            .message("hello")
            .tool_choice(ToolChoice::Tool {
                name: "lookup".to_string(),
            })
            .build()
            .temp(0.5)
            .tool(Tool::new("lookup", "Look something up", serde_json::json!({"type": "object"})));
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["temperature"], 0.5);
        assert_eq!(json["tool_choice"]["type"], "tool");
        assert_eq!(json["tool_choice"]["name"], "lookup");
        assert_eq!(json["tools"][0]["input_schema"]["type"], "object");
    }
}
