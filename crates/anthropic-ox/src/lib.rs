#![cfg_attr(not(test), deny(unsafe_code))]
#![warn(
    clippy::pedantic,
    clippy::unwrap_used,
    clippy::missing_docs_in_private_items
)]

//! Client for the Anthropic Messages API.
//!
//! Only the non-streaming `POST /v1/messages` call is covered. Every request is a
//! single attempt; failures are returned to the caller as [`AnthropicRequestError`].

pub mod client;
pub mod error;
pub mod message;
pub mod model;
pub mod prelude;
pub mod request;
pub mod response;
pub mod tool;
pub mod usage;

// Re-export main types
pub use client::{API_KEY_ENV, Anthropic};
pub use error::AnthropicRequestError;
pub use model::Model;
pub use request::ChatRequest;
pub use response::{ChatResponse, ContentBlock};
