use axum::{
    Form,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
};
use serde::Deserialize;

use crate::db::RecipeDraft;
use crate::error::RecipeError;

/// Raw text fields of the add/edit form; absent fields stay `None`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecipeFields {
    pub title: Option<String>,
    pub cuisine: Option<String>,
    pub category: Option<String>,
    pub ingredients: Option<String>,
    pub steps: Option<String>,
}

impl RecipeFields {
    /// Check every required field is present and not blank.
    /// The image is decided by the caller, so it starts out as `None`.
    pub fn validate(self) -> Result<RecipeDraft, RecipeError> {
        Ok(RecipeDraft {
            title: required("title", self.title)?,
            cuisine: required("cuisine", self.cuisine)?,
            category: required("category", self.category)?,
            ingredients: required("ingredients", self.ingredients)?,
            steps: required("steps", self.steps)?,
            image_filename: None,
        })
    }
}

fn required(name: &'static str, value: Option<String>) -> Result<String, RecipeError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(RecipeError::MissingField(name)),
    }
}

#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// A submitted recipe form, from either a multipart body (with optional
/// `image` file part) or a urlencoded body (never an image).
#[derive(Debug)]
pub struct RecipeSubmission {
    pub fields: RecipeFields,
    pub image: Option<UploadedImage>,
}

impl<S> FromRequest<S> for RecipeSubmission
where
    S: Send + Sync,
{
    type Rejection = RecipeError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|rejection| {
                    RecipeError::from_rejection(rejection.status(), rejection.body_text())
                })?;
            return read_multipart(multipart).await;
        }

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(fields) = Form::<RecipeFields>::from_request(req, state)
                .await
                .map_err(|rejection| {
                    RecipeError::from_rejection(rejection.status(), rejection.body_text())
                })?;
            return Ok(Self {
                fields,
                image: None,
            });
        }

        Err(RecipeError::UnsupportedContentType)
    }
}

async fn read_multipart(mut multipart: Multipart) -> Result<RecipeSubmission, RecipeError> {
    let mut fields = RecipeFields::default();
    let mut image = None;

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        let slot = match name.as_str() {
            "title" => &mut fields.title,
            "cuisine" => &mut fields.cuisine,
            "category" => &mut fields.category,
            "ingredients" => &mut fields.ingredients,
            "steps" => &mut fields.steps,
            "image" => {
                // Browsers send an empty, nameless file part when nothing was picked.
                let filename = field.file_name().unwrap_or_default().to_owned();
                let bytes = field.bytes().await?;
                if !filename.is_empty() {
                    image = Some(UploadedImage {
                        filename,
                        bytes: bytes.to_vec(),
                    });
                }
                continue;
            }
            _ => continue,
        };
        *slot = Some(field.text().await?);
    }

    Ok(RecipeSubmission { fields, image })
}
