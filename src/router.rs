use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::config::Config;
use crate::db::RecipeStorage;
use crate::handlers::{pages, recipes};
use crate::service::uploads::ImageStore;

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct RecipeState {
    pub storage: RecipeStorage,
    pub images: ImageStore,
    pub max_upload_bytes: usize,
}

impl RecipeState {
    pub fn new(storage: RecipeStorage, cfg: &Config) -> Self {
        Self {
            storage,
            images: ImageStore::new(cfg.storage.upload_dir.clone()),
            max_upload_bytes: cfg.basic.max_upload_bytes,
        }
    }
}

pub fn recipe_router(state: RecipeState) -> Router {
    let uploads = ServeDir::new(state.images.dir());
    let body_limit = state.max_upload_bytes;

    Router::new()
        .route("/", get(pages::home))
        .route("/browse", get(recipes::browse))
        .route("/favorites", get(recipes::favorites))
        .route("/add", get(recipes::add_form).post(recipes::add_recipe))
        .route("/recipe/{id}", get(recipes::recipe_detail))
        .route(
            "/edit/{id}",
            get(recipes::edit_form).post(recipes::edit_recipe),
        )
        .route("/delete/{id}", post(recipes::delete_recipe))
        .route("/toggle_favorite/{id}", post(recipes::toggle_favorite))
        .nest_service("/static/uploads", uploads)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
