use askama::Template;
use axum::{
    Json,
    extract::{Query, State},
    response::{Html, Redirect},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::db::{Recipe, RecipeDraft, RecipeFilter};
use crate::middleware::recipe_form::RecipeSubmission;
use crate::middleware::recipe_id::RecipeId;
use crate::service::uploads::ImageStore;
use crate::{RecipeError, router::RecipeState};

#[derive(Template)]
#[template(path = "browse.html")]
struct BrowseTemplate {
    page_title: &'static str,
    action: &'static str,
    show_filters: bool,
    recipes: Vec<Recipe>,
    selected_category: String,
    selected_cuisine: String,
    search: String,
}

#[derive(Template)]
#[template(path = "recipe.html")]
struct RecipeTemplate {
    recipe: Recipe,
}

#[derive(Template)]
#[template(path = "add.html")]
struct RecipeFormTemplate {
    edit: bool,
    action: String,
    title: String,
    cuisine: String,
    category: String,
    ingredients: String,
    steps: String,
    current_image: String,
}

impl RecipeFormTemplate {
    fn empty() -> Self {
        Self {
            edit: false,
            action: "/add".to_string(),
            title: String::new(),
            cuisine: String::new(),
            category: String::new(),
            ingredients: String::new(),
            steps: String::new(),
            current_image: String::new(),
        }
    }

    fn prefilled(recipe: Recipe) -> Self {
        Self {
            edit: true,
            action: format!("/edit/{}", recipe.id),
            title: recipe.title,
            cuisine: recipe.cuisine,
            category: recipe.category,
            ingredients: recipe.ingredients,
            steps: recipe.steps,
            current_image: recipe.image_filename.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct FavoritesQuery {
    pub search: Option<String>,
}

/// Body of the toggle acknowledgment.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ToggleAck {
    pub success: bool,
    pub new_status: u8,
}

/// Validate the form and, when a file came with it, store the image.
/// Returns `None` for the image name when no file was submitted.
async fn accept_submission(
    images: &ImageStore,
    submission: RecipeSubmission,
) -> Result<(RecipeDraft, Option<String>), RecipeError> {
    let draft = submission.fields.validate()?;
    let image = match submission.image {
        Some(upload) => Some(images.save(&upload.filename, &upload.bytes).await?),
        None => None,
    };
    Ok((draft, image))
}

/// GET /browse?category=&cuisine=&search=
pub async fn browse(
    State(state): State<RecipeState>,
    Query(filter): Query<RecipeFilter>,
) -> Result<Html<String>, RecipeError> {
    let filter = filter.normalized();
    let recipes = state.storage.list(&filter).await?;
    debug!(count = recipes.len(), ?filter, "browse");

    let page = BrowseTemplate {
        page_title: "Browse Recipes",
        action: "/browse",
        show_filters: true,
        recipes,
        selected_category: filter.category.unwrap_or_default(),
        selected_cuisine: filter.cuisine.unwrap_or_default(),
        search: filter.search.unwrap_or_default(),
    };
    Ok(Html(page.render()?))
}

/// GET /favorites?search=
pub async fn favorites(
    State(state): State<RecipeState>,
    Query(query): Query<FavoritesQuery>,
) -> Result<Html<String>, RecipeError> {
    let search = RecipeFilter {
        search: query.search,
        ..Default::default()
    }
    .normalized()
    .search;
    let recipes = state.storage.list_favorites(search.as_deref()).await?;

    let page = BrowseTemplate {
        page_title: "Favorites",
        action: "/favorites",
        show_filters: false,
        recipes,
        selected_category: String::new(),
        selected_cuisine: String::new(),
        search: search.unwrap_or_default(),
    };
    Ok(Html(page.render()?))
}

/// GET /add -> empty form.
pub async fn add_form() -> Result<Html<String>, RecipeError> {
    Ok(Html(RecipeFormTemplate::empty().render()?))
}

/// POST /add -> insert, then back to the listing.
pub async fn add_recipe(
    State(state): State<RecipeState>,
    submission: RecipeSubmission,
) -> Result<Redirect, RecipeError> {
    let (mut draft, image) = accept_submission(&state.images, submission).await?;
    draft.image_filename = image;

    let id = state.storage.insert(draft).await?;
    info!(recipe_id = id, "recipe created");
    Ok(Redirect::to("/browse"))
}

/// GET /recipe/{id}
pub async fn recipe_detail(
    State(state): State<RecipeState>,
    RecipeId(id): RecipeId,
) -> Result<Html<String>, RecipeError> {
    let recipe = state.storage.get_by_id(id).await?;
    Ok(Html(RecipeTemplate { recipe }.render()?))
}

/// GET /edit/{id} -> form pre-filled from the stored record.
pub async fn edit_form(
    State(state): State<RecipeState>,
    RecipeId(id): RecipeId,
) -> Result<Html<String>, RecipeError> {
    let recipe = state.storage.get_by_id(id).await?;
    Ok(Html(RecipeFormTemplate::prefilled(recipe).render()?))
}

/// POST /edit/{id} -> overwrite all fields; the old image stays unless a new one is sent.
pub async fn edit_recipe(
    State(state): State<RecipeState>,
    RecipeId(id): RecipeId,
    submission: RecipeSubmission,
) -> Result<Redirect, RecipeError> {
    let existing = state.storage.get_by_id(id).await?;
    let (mut draft, image) = accept_submission(&state.images, submission).await?;
    draft.image_filename = image.or(existing.image_filename);

    state.storage.update_by_id(id, draft).await?;
    info!(recipe_id = id, "recipe updated");
    Ok(Redirect::to(&format!("/recipe/{id}")))
}

/// POST /delete/{id} -> unconditional hard delete. The image file is left on disk.
pub async fn delete_recipe(
    State(state): State<RecipeState>,
    RecipeId(id): RecipeId,
) -> Result<Redirect, RecipeError> {
    let removed = state.storage.delete_by_id(id).await?;
    info!(recipe_id = id, removed, "recipe deleted");
    Ok(Redirect::to("/browse"))
}

/// POST /toggle_favorite/{id} -> `{"success": true, "new_status": 0|1}`.
pub async fn toggle_favorite(
    State(state): State<RecipeState>,
    RecipeId(id): RecipeId,
) -> Result<Json<ToggleAck>, RecipeError> {
    let now_favorite = state.storage.toggle_favorite(id).await?;
    info!(recipe_id = id, is_favorite = now_favorite, "favorite toggled");
    Ok(Json(ToggleAck {
        success: true,
        new_status: u8::from(now_favorite),
    }))
}
