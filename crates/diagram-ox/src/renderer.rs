//! The external rendering tool, behind the [`Renderer`] capability.

use std::{
    path::{Path, PathBuf},
    process::Stdio,
    time::Duration,
};

use async_trait::async_trait;
use bon::Builder;
use tokio::process::Command;

use crate::error::RenderError;

pub const DEFAULT_PROGRAM: &str = "plantuml";
pub const DEFAULT_RENDER_TIMEOUT: Duration = Duration::from_secs(30);
pub const MARKUP_EXTENSION: &str = "puml";

/// Turns a markup file into an image file.
///
/// Implementations decide where the image lands; the pipeline only ever sees
/// the returned path.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Extension (without the dot) the input file must carry.
    fn markup_extension(&self) -> &str;

    async fn render(&self, markup_path: &Path) -> Result<PathBuf, RenderError>;
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Png,
    Svg,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        self.into()
    }

    /// Output-format selector understood by `plantuml`, e.g. `-tpng`.
    pub fn flag(self) -> String {
        format!("-t{self}")
    }
}

/// Runs `plantuml -t<format> <file>`; the image is written next to the input
/// with the format's extension.
#[derive(Debug, Clone, Builder)]
pub struct PlantUml {
    #[builder(default = DEFAULT_PROGRAM.to_string(), into)]
    program: String,
    #[builder(default)]
    format: ImageFormat,
    #[builder(default = DEFAULT_RENDER_TIMEOUT)]
    timeout: Duration,
    /// Treat a zero exit without an image on disk as a failure.
    #[builder(default)]
    require_output: bool,
}

impl Default for PlantUml {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl PlantUml {
    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn output_path(&self, markup_path: &Path) -> PathBuf {
        markup_path.with_extension(self.format.extension())
    }
}

#[async_trait]
impl Renderer for PlantUml {
    fn markup_extension(&self) -> &str {
        MARKUP_EXTENSION
    }

    async fn render(&self, markup_path: &Path) -> Result<PathBuf, RenderError> {
        let output_path = self.output_path(markup_path);
        tracing::debug!(
            program = %self.program,
            input = %markup_path.display(),
            "invoking renderer"
        );

        let child = Command::new(&self.program)
            .arg(self.format.flag())
            .arg(markup_path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| RenderError::Launch {
                program: self.program.clone(),
                source,
            })?;

        // Dropping the future on timeout kills the child.
        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| RenderError::Timeout {
                program: self.program.clone(),
                timeout: self.timeout,
            })?
            .map_err(|source| RenderError::Launch {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            tracing::warn!(status = %output.status, %stderr, "renderer failed");
            return Err(RenderError::ExitStatus {
                program: self.program.clone(),
                status: output.status.to_string(),
                code: output.status.code(),
                stderr,
            });
        }

        if self.require_output && !tokio::fs::try_exists(&output_path).await.unwrap_or(false) {
            return Err(RenderError::MissingOutput {
                program: self.program.clone(),
                path: output_path,
            });
        }

        Ok(output_path)
    }
}
