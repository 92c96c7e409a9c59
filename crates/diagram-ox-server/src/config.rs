//! Command-line and environment configuration.

use std::{net::SocketAddr, path::PathBuf, sync::Arc, time::Duration};

use anthropic_ox::{Anthropic, client::DEFAULT_TIMEOUT};
use clap::Parser;
use diagram_ox::{
    DiagramError, DiagramService, GeneratorConfig, ImageFormat, MarkupGenerator, PipelineConfig,
    PlantUml, RenderPipeline,
    generator::{DEFAULT_MODEL, api_key_from_env},
    pipeline::{DEFAULT_URL_PREFIX, DEFAULT_WORK_DIR},
    renderer::{DEFAULT_PROGRAM, DEFAULT_RENDER_TIMEOUT},
};

use crate::state::{AppState, Diagrams, Unconfigured};

/// Used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,diagram_ox=debug,diagram_ox_server=debug";

/// Turn natural-language descriptions into PlantUML diagrams over HTTP.
#[derive(Debug, Clone, Parser)]
#[command(name = "diagram-ox-server", version, about)]
pub struct Config {
    /// Address to listen on.
    #[arg(long, env = "DIAGRAM_OX_LISTEN", default_value = "0.0.0.0:8080")]
    pub listen: SocketAddr,

    /// Directory for scratch markup and rendered images.
    #[arg(long, env = "DIAGRAM_OX_WORK_DIR", default_value = DEFAULT_WORK_DIR)]
    pub work_dir: PathBuf,

    /// PlantUML executable.
    #[arg(long, env = "DIAGRAM_OX_PLANTUML", default_value = DEFAULT_PROGRAM)]
    pub plantuml: String,

    /// Image format: png or svg.
    #[arg(long, env = "DIAGRAM_OX_FORMAT", default_value_t = ImageFormat::Png)]
    pub format: ImageFormat,

    /// Model identifier sent with every request.
    #[arg(long, env = "DIAGRAM_OX_MODEL", default_value_t = DEFAULT_MODEL.to_string())]
    pub model: String,

    /// Seconds allowed for one model API call, body included.
    #[arg(
        long,
        env = "DIAGRAM_OX_API_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT.as_secs()
    )]
    pub api_timeout_secs: u64,

    /// Seconds allowed for one PlantUML run before it is killed.
    #[arg(
        long,
        env = "DIAGRAM_OX_RENDER_TIMEOUT_SECS",
        default_value_t = DEFAULT_RENDER_TIMEOUT.as_secs()
    )]
    pub render_timeout_secs: u64,

    /// Fail a render when PlantUML exits 0 without writing an image.
    #[arg(long, env = "DIAGRAM_OX_REQUIRE_OUTPUT")]
    pub require_output: bool,
}

impl Config {
    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig::builder().model(self.model.clone()).build()
    }

    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig::builder()
            .work_dir(self.work_dir.clone())
            .url_prefix(DEFAULT_URL_PREFIX)
            .build()
    }

    pub fn renderer(&self) -> PlantUml {
        PlantUml::builder()
            .program(self.plantuml.clone())
            .format(self.format)
            .timeout(Duration::from_secs(self.render_timeout_secs))
            .require_output(self.require_output)
            .build()
    }

    /// State for the router, with the credential read from `ANTHROPIC_API_KEY`.
    pub fn build_state(&self) -> AppState {
        self.build_state_with(api_key_from_env())
    }

    pub fn build_state_with(&self, api_key: Result<String, DiagramError>) -> AppState {
        let pipeline = self.pipeline_config();
        let diagrams: Arc<dyn Diagrams> = match api_key {
            Ok(api_key) => {
                let client = Anthropic::builder()
                    .api_key(api_key)
                    .timeout(Duration::from_secs(self.api_timeout_secs))
                    .build();
                Arc::new(DiagramService::new(
                    MarkupGenerator::new(client, self.generator_config()),
                    RenderPipeline::new(self.renderer(), pipeline.clone()),
                ))
            }
            Err(err) => {
                tracing::warn!(error = %err, "no API credential; diagram generation will fail");
                Arc::new(Unconfigured::new(err.to_string()))
            }
        };
        AppState::new(diagrams, pipeline.work_dir, &pipeline.url_prefix)
    }
}
