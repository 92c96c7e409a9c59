//! Common imports for working with the Messages API.
//!
//! ```rust,no_run
//! use anthropic_ox::prelude::*;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Anthropic::new("your-api-key");
//! let request = ChatRequest::builder()
//!     .model(Model::Claude35Haiku20241022)
//!     .message("Hello!")
//!     .max_tokens(256)
//!     .build();
//!
//! let response = client.send(&request).await?;
//! println!("{}", response.text_content().join(""));
//! # Ok(())
//! # }
//! ```

pub use crate::{
    Anthropic,
    AnthropicRequestError,
    ChatRequest,
    ChatResponse,
    ContentBlock,
    Model,
    message::{ChatMessage, Role},
    response::StopReason,
    tool::{Tool, ToolChoice, ToolUse},
    usage::Usage,
};
