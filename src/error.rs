use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::error;

#[derive(Debug, ThisError)]
pub enum RecipeError {
    #[error("Recipe not found")]
    NotFound,

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid image filename")]
    InvalidFilename,

    #[error("malformed form: {0}")]
    MalformedForm(String),

    #[error("request body too large")]
    PayloadTooLarge,

    #[error("expected multipart/form-data or application/x-www-form-urlencoded")]
    UnsupportedContentType,

    #[error("Database error: {0}")]
    Database(#[from] SqlxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

impl RecipeError {
    /// Map a body rejection, keeping the size-limit case distinct.
    pub fn from_rejection(status: StatusCode, body_text: String) -> Self {
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            RecipeError::PayloadTooLarge
        } else {
            RecipeError::MalformedForm(body_text)
        }
    }
}

impl From<axum::extract::multipart::MultipartError> for RecipeError {
    fn from(e: axum::extract::multipart::MultipartError) -> Self {
        RecipeError::from_rejection(e.status(), e.body_text())
    }
}

impl IntoResponse for RecipeError {
    fn into_response(self) -> Response {
        let status = match &self {
            RecipeError::NotFound => StatusCode::NOT_FOUND,
            RecipeError::MissingField(_)
            | RecipeError::InvalidFilename
            | RecipeError::MalformedForm(_) => StatusCode::BAD_REQUEST,
            RecipeError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            RecipeError::UnsupportedContentType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            RecipeError::Database(_) | RecipeError::Io(_) | RecipeError::Template(_) => {
                error!(error = %self, "request failed");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred.",
                )
                    .into_response();
            }
        };
        (status, self.to_string()).into_response()
    }
}
