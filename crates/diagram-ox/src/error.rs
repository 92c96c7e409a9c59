use std::{io, path::PathBuf, time::Duration};

use anthropic_ox::AnthropicRequestError;
use thiserror::Error;

/// Coarse classification of a [`DiagramError`], independent of the stage that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Empty or malformed caller input
    InvalidInput,
    /// Missing credential
    Configuration,
    /// Network, TLS or deadline failure talking to the model service
    Transport,
    /// Non-success status from the model service
    Api,
    /// Unparseable or structurally unexpected response
    MalformedResponse,
    /// Well-formed response with nothing in it
    EmptyResponse,
    /// Scratch file or work directory failure
    Filesystem,
    /// Renderer launch failure, non-zero exit or deadline
    ExternalTool,
}

/// Failures of the render stage.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("create work directory {}: {source}", .path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("create scratch file in {}: {source}", .dir.display())]
    CreateScratch { dir: PathBuf, source: io::Error },

    #[error("write scratch file {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("remove scratch file {}: {source}", .path.display())]
    Cleanup { path: PathBuf, source: io::Error },

    #[error("launch {program}: {source}")]
    Launch { program: String, source: io::Error },

    /// The renderer ran and failed; `stderr` is its own diagnostic, verbatim.
    #[error("{program} failed ({status}): {stderr}")]
    ExitStatus {
        program: String,
        status: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("{program} did not finish within {timeout:?}")]
    Timeout { program: String, timeout: Duration },

    #[error("{program} exited successfully but wrote no image at {}", .path.display())]
    MissingOutput { program: String, path: PathBuf },
}

impl RenderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::CreateDir { .. }
            | Self::CreateScratch { .. }
            | Self::Write { .. }
            | Self::Cleanup { .. } => ErrorKind::Filesystem,
            Self::Launch { .. }
            | Self::ExitStatus { .. }
            | Self::Timeout { .. }
            | Self::MissingOutput { .. } => ErrorKind::ExternalTool,
        }
    }
}

/// Everything that can go wrong between a description and an image.
///
/// The `Display` output names the stage that failed and embeds the cause, so
/// it can be shown to a user as-is.
#[derive(Debug, Error)]
pub enum DiagramError {
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    #[error("{0}")]
    Configuration(String),

    #[error("failed to create message: {0}")]
    Generation(#[from] AnthropicRequestError),

    #[error("no content in response")]
    EmptyResponse,

    #[error("unexpected response: {0}")]
    MalformedResponse(String),

    #[error("failed to generate diagram: {0}")]
    Render(#[from] RenderError),
}

impl DiagramError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::Generation(err) => match err {
                AnthropicRequestError::InvalidRequest(_) | AnthropicRequestError::Serialize(_) => {
                    ErrorKind::InvalidInput
                }
                AnthropicRequestError::AuthenticationMissing => ErrorKind::Configuration,
                AnthropicRequestError::Transport(_)
                | AnthropicRequestError::Timeout(_)
                | AnthropicRequestError::ReadBody(_) => ErrorKind::Transport,
                AnthropicRequestError::Api { .. } => ErrorKind::Api,
                AnthropicRequestError::Deserialize(_) => ErrorKind::MalformedResponse,
            },
            Self::EmptyResponse => ErrorKind::EmptyResponse,
            Self::MalformedResponse(_) => ErrorKind::MalformedResponse,
            Self::Render(err) => err.kind(),
        }
    }
}
