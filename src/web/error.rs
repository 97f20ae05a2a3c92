use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WebError {
    #[error("unknown model '{0}'")]
    UnknownModel(String),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = match self {
            WebError::UnknownModel(_) => StatusCode::NOT_FOUND,
        };
        (status, self.to_string()).into_response()
    }
}
