//! Shared state for all request handlers.

use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;
use diagram_ox::{ChatClient, Diagram, DiagramError, DiagramService, Renderer};

/// Whatever turns a description into a [`Diagram`]; the handlers only see this.
#[async_trait]
pub trait Diagrams: Send + Sync {
    async fn create(&self, description: &str) -> Result<Diagram, DiagramError>;
}

#[async_trait]
impl<C, R> Diagrams for DiagramService<C, R>
where
    C: ChatClient,
    R: Renderer,
{
    async fn create(&self, description: &str) -> Result<Diagram, DiagramError> {
        DiagramService::create(self, description).await
    }
}

/// Stands in for the service when no credential is configured. The server
/// still comes up; every generation fails with the configuration error.
#[derive(Debug, Clone)]
pub struct Unconfigured {
    reason: String,
}

impl Unconfigured {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl Diagrams for Unconfigured {
    async fn create(&self, _description: &str) -> Result<Diagram, DiagramError> {
        Err(DiagramError::Configuration(self.reason.clone()))
    }
}

pub struct AppState {
    pub diagrams: Arc<dyn Diagrams>,
    /// Directory the rendered images are served from.
    pub work_dir: PathBuf,
    url_prefix: String,
}

impl AppState {
    pub fn new(diagrams: Arc<dyn Diagrams>, work_dir: impl Into<PathBuf>, url_prefix: &str) -> Self {
        let trimmed = url_prefix.trim_end_matches('/');
        let url_prefix = if trimmed.starts_with('/') {
            trimmed.to_owned()
        } else {
            format!("/{trimmed}")
        };
        Self {
            diagrams,
            work_dir: work_dir.into(),
            url_prefix,
        }
    }

    /// Mount point of the image route; always starts with `/` and never ends with one.
    pub fn url_prefix(&self) -> &str {
        &self.url_prefix
    }
}
