use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::value::RawValue;
use std::str::FromStr;
use strum::{Display, EnumString};

use crate::{message::Role, tool::ToolUse, usage::Usage};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum StopReason {
    EndTurn,
    MaxTokens,
    StopSequence,
    ToolUse,
    PauseTurn,
    Refusal,
}

/// One element of the response payload.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text { text: String },
    ToolUse(ToolUse),
}

const BLOCK_TYPES: &[&str] = &["text", "tool_use"];

// Internally tagged enums buffer their content, which drops the raw
// `tool_use` input; the tag is read first and the block parsed from the
// original bytes instead.
impl<'de> Deserialize<'de> for ContentBlock {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Tag {
            r#type: String,
        }

        #[derive(Deserialize)]
        struct Text {
            text: String,
        }

        let raw = Box::<RawValue>::deserialize(deserializer)?;
        let Tag { r#type } = serde_json::from_str(raw.get()).map_err(de::Error::custom)?;
        match r#type.as_str() {
            "text" => {
                let Text { text } = serde_json::from_str(raw.get()).map_err(de::Error::custom)?;
                Ok(Self::Text { text })
            }
            "tool_use" => serde_json::from_str(raw.get())
                .map(Self::ToolUse)
                .map_err(de::Error::custom),
            other => Err(de::Error::unknown_variant(other, BLOCK_TYPES)),
        }
    }
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn as_text(&self) -> Option<&str> {
        if let Self::Text { text } = self {
            Some(text)
        } else {
            None
        }
    }

    pub fn as_tool_use(&self) -> Option<&ToolUse> {
        if let Self::ToolUse(tool_use) = self {
            Some(tool_use)
        } else {
            None
        }
    }

    /// The wire name of the block's `type` tag.
    pub fn block_type(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::ToolUse(_) => "tool_use",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatResponse {
    pub id: String,
    pub r#type: String,
    pub role: Role,
    pub content: Vec<ContentBlock>,
    pub model: String,
    pub stop_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_sequence: Option<String>,
    pub usage: Usage,
}

impl ChatResponse {
    pub fn text_content(&self) -> Vec<&str> {
        self.content.iter().filter_map(ContentBlock::as_text).collect()
    }

    pub fn tool_uses(&self) -> impl Iterator<Item = &ToolUse> {
        self.content.iter().filter_map(ContentBlock::as_tool_use)
    }

    pub fn has_tool_use(&self) -> bool {
        self.tool_uses().next().is_some()
    }

    /// Parsed stop reason; `None` when absent or not a known value.
    pub fn stop_reason_kind(&self) -> Option<StopReason> {
        self.stop_reason
            .as_deref()
            .and_then(|reason| StopReason::from_str(reason).ok())
    }
}

impl std::fmt::Display for ChatResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut content_summary = Vec::new();

        let text_parts = self.text_content();
        if !text_parts.is_empty() {
            content_summary.push(format!("text: [{}]", text_parts.join(", ")));
        }
        if self.has_tool_use() {
            content_summary.push("tools".to_string());
        }

        write!(
            f,
            "ChatResponse {{ id: {}, type: {}, role: {}, model: {}, content: {} }}",
            self.id,
            self.r#type,
            self.role,
            self.model,
            content_summary.join(", ")
        )
    }
}
