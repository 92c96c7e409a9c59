//! Router construction.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{handlers, state::AppState};

/// Builds the application router.
///
/// `/` serves the form on GET and generates on POST; any other method gets a
/// 405 from axum. Rendered images are served from the work directory under
/// the state's URL prefix.
pub fn create_router(state: Arc<AppState>) -> Router {
    let images = ServeDir::new(&state.work_dir);
    Router::new()
        .route("/", get(handlers::index).post(handlers::generate))
        .nest_service(state.url_prefix(), images)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
