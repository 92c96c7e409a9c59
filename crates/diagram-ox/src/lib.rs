#![cfg_attr(not(test), deny(unsafe_code))]
#![warn(clippy::pedantic, clippy::unwrap_used)]

//! Natural-language description in, rendered diagram out.
//!
//! Two stages, each behind a trait so either side can be replaced in tests:
//!
//! 1. [`MarkupGenerator`] asks a [`ChatClient`] (the Anthropic Messages API in
//!    production) to translate a description into PlantUML markup.
//! 2. [`RenderPipeline`] writes that markup to a scratch file and hands it to a
//!    [`Renderer`] (the `plantuml` binary in production), returning a
//!    [`RenderArtifact`] that points at the image.
//!
//! [`DiagramService`] runs both stages for one request.

pub mod error;
pub mod generator;
pub mod pipeline;
pub mod renderer;
pub mod service;

pub use error::{DiagramError, ErrorKind, RenderError};
pub use generator::{ChatClient, GeneratorConfig, MarkupGenerator};
pub use pipeline::{PipelineConfig, RenderArtifact, RenderPipeline};
pub use renderer::{ImageFormat, PlantUml, Renderer};
pub use service::{Diagram, DiagramService};
