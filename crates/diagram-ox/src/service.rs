use crate::{
    error::DiagramError,
    generator::{ChatClient, MarkupGenerator},
    pipeline::{RenderArtifact, RenderPipeline},
    renderer::Renderer,
};

/// A description together with the markup generated for it and the rendered image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagram {
    pub description: String,
    pub markup: String,
    pub artifact: RenderArtifact,
}

impl Diagram {
    pub fn reference(&self) -> &str {
        &self.artifact.reference
    }
}

/// Generate, then render. Each call is independent; the service holds no
/// per-request state, so one instance can be shared across tasks.
#[derive(Debug, Clone)]
pub struct DiagramService<C, R> {
    generator: MarkupGenerator<C>,
    pipeline: RenderPipeline<R>,
}

impl<C: ChatClient, R: Renderer> DiagramService<C, R> {
    pub fn new(generator: MarkupGenerator<C>, pipeline: RenderPipeline<R>) -> Self {
        Self {
            generator,
            pipeline,
        }
    }

    pub fn generator(&self) -> &MarkupGenerator<C> {
        &self.generator
    }

    pub fn pipeline(&self) -> &RenderPipeline<R> {
        &self.pipeline
    }

    #[tracing::instrument(skip_all, fields(len = description.len()))]
    pub async fn create(&self, description: &str) -> Result<Diagram, DiagramError> {
        let markup = self.generator.generate(description).await?;
        let artifact = self.pipeline.render(&markup).await?;
        Ok(Diagram {
            description: description.to_owned(),
            markup,
            artifact,
        })
    }
}
