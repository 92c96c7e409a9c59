use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Value, value::RawValue};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToolChoice {
    Auto,
    Any,
    Tool { name: String },
}

/// A tool the model may call. The input schema is passed through untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tool {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

impl Tool {
    pub fn new(name: impl Into<String>, description: impl Into<String>, input_schema: Value) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }

    /// Declares a tool whose input schema is generated from `T`.
    #[cfg(feature = "schema")]
    pub fn from_schema<T: schemars::JsonSchema>(
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self::new(name, description, schemars::schema_for!(T).to_value())
    }
}

/// A tool invocation requested by the model.
///
/// `input` holds the exact bytes the service sent, so re-serializing the
/// block reproduces the document unchanged (key order, number spelling).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolUse {
    pub id: String,
    pub name: String,
    pub input: Box<RawValue>,
}

impl ToolUse {
    pub fn new(id: impl Into<String>, name: impl Into<String>, input: Box<RawValue>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            input,
        }
    }

    /// Builds a block from a JSON value, serialized compactly.
    pub fn from_value(
        id: impl Into<String>,
        name: impl Into<String>,
        input: &Value,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self::new(id, name, serde_json::value::to_raw_value(input)?))
    }

    /// The input document parsed into a [`Value`].
    pub fn input_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(self.input.get())
    }
}

impl PartialEq for ToolUse {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.name == other.name && self.input.get() == other.input.get()
    }
}

impl Eq for ToolUse {}

impl fmt::Display for ToolUse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ToolUse(id: {}, name: {})", self.id, self.name)
    }
}
