//! Markup to image: scratch file in, artifact reference out.

use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use bon::Builder;
use tempfile::TempPath;

use crate::{
    error::{DiagramError, RenderError},
    renderer::Renderer,
};

pub const DEFAULT_WORK_DIR: &str = "temp";
pub const DEFAULT_URL_PREFIX: &str = "/temp";
pub const DEFAULT_FILE_PREFIX: &str = "diagram-";

/// Random characters in each scratch file name.
const RANDOM_LEN: usize = 12;

#[derive(Debug, Clone, Builder)]
pub struct PipelineConfig {
    /// Directory holding scratch files and rendered images.
    #[builder(default = PathBuf::from(DEFAULT_WORK_DIR), into)]
    pub work_dir: PathBuf,
    /// Web path under which `work_dir` is served.
    #[builder(default = DEFAULT_URL_PREFIX.to_string(), into)]
    pub url_prefix: String,
    #[builder(default = DEFAULT_FILE_PREFIX.to_string(), into)]
    pub file_prefix: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Result of one successful render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderArtifact {
    pub markup: String,
    /// Where the markup was written; already deleted when the artifact is returned.
    pub scratch_path: PathBuf,
    pub image_path: PathBuf,
    /// Web-servable path to the image, e.g. `/temp/diagram-3fj2k9d0ab1c.png`.
    pub reference: String,
}

#[derive(Debug, Clone)]
pub struct RenderPipeline<R> {
    renderer: R,
    config: PipelineConfig,
}

impl<R: Renderer> RenderPipeline<R> {
    pub fn new(renderer: R, config: PipelineConfig) -> Self {
        Self { renderer, config }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Renders `markup` and returns a reference to the image.
    ///
    /// The scratch markup file is removed on every path out of this function.
    /// The image is left in place for the static file route; whether it exists
    /// is up to the renderer.
    pub async fn render(&self, markup: &str) -> Result<RenderArtifact, DiagramError> {
        if markup.trim().is_empty() {
            return Err(DiagramError::InvalidInput("markup is required"));
        }
        Ok(self.render_markup(markup).await?)
    }

    async fn render_markup(&self, markup: &str) -> Result<RenderArtifact, RenderError> {
        let work_dir = &self.config.work_dir;
        tokio::fs::create_dir_all(work_dir)
            .await
            .map_err(|source| RenderError::CreateDir {
                path: work_dir.clone(),
                source,
            })?;

        // From here on, returning early drops `scratch`, which deletes the file.
        let scratch = self.write_scratch(markup).await?;
        let scratch_path = scratch.to_path_buf();

        let rendered = self.renderer.render(&scratch_path).await;
        let cleanup = tokio::task::spawn_blocking(move || scratch.close())
            .await
            .unwrap_or_else(|err| Err(io::Error::other(err)));

        let image_path = match (rendered, cleanup) {
            (Ok(image_path), Ok(())) => image_path,
            (Ok(_), Err(source)) => {
                return Err(RenderError::Cleanup {
                    path: scratch_path,
                    source,
                });
            }
            (Err(err), cleanup) => {
                if let Err(source) = cleanup {
                    tracing::warn!(
                        path = %scratch_path.display(),
                        error = %source,
                        "failed to remove scratch file"
                    );
                }
                return Err(err);
            }
        };

        let reference = self.reference(&image_path);
        tracing::info!(%reference, "diagram rendered");
        Ok(RenderArtifact {
            markup: markup.to_owned(),
            scratch_path,
            image_path,
            reference,
        })
    }

    /// Creates a uniquely named scratch file, writes `markup` and closes the
    /// handle. The returned path deletes the file when dropped.
    async fn write_scratch(&self, markup: &str) -> Result<TempPath, RenderError> {
        let dir = self.config.work_dir.clone();
        let prefix = self.config.file_prefix.clone();
        let suffix = format!(".{}", self.renderer.markup_extension());
        let markup = markup.to_owned();
        tokio::task::spawn_blocking(move || create_scratch(&dir, &prefix, &suffix, &markup))
            .await
            .map_err(|err| RenderError::CreateScratch {
                dir: self.config.work_dir.clone(),
                source: io::Error::other(err),
            })?
    }

    fn reference(&self, image_path: &Path) -> String {
        let name = image_path
            .file_name()
            .map_or_else(|| image_path.to_string_lossy(), |name| name.to_string_lossy());
        format!("{}/{}", self.config.url_prefix.trim_end_matches('/'), name)
    }
}

fn create_scratch(
    dir: &Path,
    prefix: &str,
    suffix: &str,
    markup: &str,
) -> Result<TempPath, RenderError> {
    let mut file = tempfile::Builder::new()
        .prefix(prefix)
        .suffix(suffix)
        .rand_bytes(RANDOM_LEN)
        .tempfile_in(dir)
        .map_err(|source| RenderError::CreateScratch {
            dir: dir.to_path_buf(),
            source,
        })?;

    let path = file.path().to_path_buf();
    file.write_all(markup.as_bytes())
        .and_then(|()| file.flush())
        .map_err(|source| RenderError::Write { path, source })?;

    tracing::debug!(path = %file.path().display(), bytes = markup.len(), "scratch file written");
    Ok(file.into_temp_path())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct Echo;

    #[async_trait]
    impl Renderer for Echo {
        fn markup_extension(&self) -> &str {
            "puml"
        }

        async fn render(&self, markup_path: &Path) -> Result<PathBuf, RenderError> {
            Ok(markup_path.with_extension("png"))
        }
    }

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.work_dir, PathBuf::from("temp"));
        assert_eq!(config.url_prefix, "/temp");
        assert_eq!(config.file_prefix, "diagram-");
    }

    #[test]
    fn test_reference_uses_url_prefix_and_file_name() {
        let pipeline = RenderPipeline::new(
            Echo,
            PipelineConfig::builder()
                .work_dir("/var/lib/diagrams")
                .url_prefix("/images/")
                .build(),
        );
        assert_eq!(
            pipeline.reference(Path::new("/var/lib/diagrams/diagram-abc.png")),
            "/images/diagram-abc.png"
        );
    }

    #[tokio::test]
    async fn test_empty_markup_is_rejected() {
        let pipeline = RenderPipeline::new(Echo, PipelineConfig::default());
        let err = pipeline.render("  \n").await.unwrap_err();
        assert!(matches!(err, DiagramError::InvalidInput(_)));
    }
}
