use askama::Template;
use axum::response::Html;

use crate::RecipeError;

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate;

/// GET / -> landing page.
pub async fn home() -> Result<Html<String>, RecipeError> {
    Ok(Html(IndexTemplate.render()?))
}
