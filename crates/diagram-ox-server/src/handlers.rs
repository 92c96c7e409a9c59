//! Request handlers for `/`.

use std::sync::Arc;

use axum::{
    Form,
    extract::State,
    response::Html,
};
use serde::Deserialize;

use crate::{error::ServerError, page, state::AppState};

#[derive(Debug, Default, Deserialize)]
pub(crate) struct GenerateForm {
    #[serde(default)]
    input: String,
}

pub(crate) async fn index() -> Html<String> {
    Html(page::render(None))
}

pub(crate) async fn generate(
    State(state): State<Arc<AppState>>,
    Form(form): Form<GenerateForm>,
) -> Result<Html<String>, ServerError> {
    if form.input.trim().is_empty() {
        return Err(ServerError::InputRequired);
    }
    let diagram = state.diagrams.create(&form.input).await?;
    Ok(Html(page::render(Some(&diagram))))
}
