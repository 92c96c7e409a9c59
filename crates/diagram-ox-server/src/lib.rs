//! HTTP front end for `diagram-ox`.
//!
//! ```text
//! Browser ──GET /──────► form page
//!         ──POST /─────► DiagramService ──► model API ──► plantuml
//!                             │
//!                             └─► page with <img src="/temp/diagram-....png">
//!         ──GET /temp/─► ServeDir(work dir)
//! ```

mod app;
mod config;
mod error;
mod handlers;
mod page;
mod state;

pub use app::create_router;
pub use config::{Config, DEFAULT_LOG_FILTER};
pub use error::ServerError;
pub use state::{AppState, Diagrams, Unconfigured};
