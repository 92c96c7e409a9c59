use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use diagram_ox::{DiagramError, ErrorKind};

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Input is required")]
    InputRequired,

    #[error(transparent)]
    Diagram(#[from] DiagramError),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InputRequired => StatusCode::BAD_REQUEST,
            Self::Diagram(err) => match err.kind() {
                ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(error = %self, "diagram request failed");
        }
        (status, self.to_string()).into_response()
    }
}
