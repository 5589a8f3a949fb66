use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Recipe {
    pub id: i64,
    pub title: String,
    pub cuisine: String,
    pub category: String,
    pub image_filename: Option<String>,
    pub ingredients: String,
    pub steps: String,
    pub is_favorite: bool,
}

impl Recipe {
    pub fn has_image(&self) -> bool {
        self.image_filename.is_some()
    }

    /// Empty when the recipe has no image.
    pub fn image_name(&self) -> &str {
        self.image_filename.as_deref().unwrap_or_default()
    }
}

/// Writable recipe fields, already validated.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeDraft {
    pub title: String,
    pub cuisine: String,
    pub category: String,
    pub ingredients: String,
    pub steps: String,
    pub image_filename: Option<String>,
}
