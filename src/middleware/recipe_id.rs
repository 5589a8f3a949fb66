use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use crate::error::RecipeError;

/// Recipe id from the `{id}` path segment.
/// Anything that does not parse as an integer names no recipe, so it is a 404.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecipeId(pub i64);

impl<S> FromRequestParts<S> for RecipeId
where
    S: Send + Sync,
{
    type Rejection = RecipeError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|_| RecipeError::NotFound)?;
        Ok(Self(id))
    }
}
