use crate::db::models::{Recipe, RecipeDraft};
use crate::db::query::{self, RecipeFilter};
use crate::db::schema::SQLITE_INIT;
use crate::error::RecipeError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;

pub type SqlitePool = Pool<Sqlite>;

/// Open a pool on `database_url`, creating the database file if needed.
pub async fn connect(database_url: &str) -> Result<SqlitePool, RecipeError> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new().connect_with(options).await?;
    Ok(pool)
}

#[derive(Clone)]
pub struct RecipeStorage {
    pool: SqlitePool,
}

impl RecipeStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), RecipeError> {
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Insert a new recipe. Returns the assigned id.
    pub async fn insert(&self, draft: RecipeDraft) -> Result<i64, RecipeError> {
        let done = sqlx::query(
            r#"
            INSERT INTO recipes (title, cuisine, category, image_filename, ingredients, steps)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(draft.title)
        .bind(draft.cuisine)
        .bind(draft.category)
        .bind(draft.image_filename)
        .bind(draft.ingredients)
        .bind(draft.steps)
        .execute(&self.pool)
        .await?;
        Ok(done.last_insert_rowid())
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Recipe, RecipeError> {
        sqlx::query_as::<_, Recipe>(
            r#"SELECT id, title, cuisine, category, image_filename, ingredients, steps, is_favorite
               FROM recipes WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(RecipeError::NotFound)
    }

    /// Overwrite every field except `id` and `is_favorite`.
    pub async fn update_by_id(&self, id: i64, draft: RecipeDraft) -> Result<(), RecipeError> {
        let done = sqlx::query(
            r#"UPDATE recipes SET
                title = ?,
                cuisine = ?,
                category = ?,
                image_filename = ?,
                ingredients = ?,
                steps = ?
              WHERE id = ?"#,
        )
        .bind(draft.title)
        .bind(draft.cuisine)
        .bind(draft.category)
        .bind(draft.image_filename)
        .bind(draft.ingredients)
        .bind(draft.steps)
        .bind(id)
        .execute(&self.pool)
        .await?;
        if done.rows_affected() == 0 {
            return Err(RecipeError::NotFound);
        }
        Ok(())
    }

    /// Hard delete. Returns whether a row was removed; a missing id is not an error.
    pub async fn delete_by_id(&self, id: i64) -> Result<bool, RecipeError> {
        let done = sqlx::query("DELETE FROM recipes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(done.rows_affected() > 0)
    }

    /// Flip `is_favorite` in one statement and return the persisted value.
    pub async fn toggle_favorite(&self, id: i64) -> Result<bool, RecipeError> {
        let rec: Option<(bool,)> = sqlx::query_as(
            "UPDATE recipes SET is_favorite = NOT is_favorite WHERE id = ? RETURNING is_favorite",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        rec.map(|r| r.0).ok_or(RecipeError::NotFound)
    }

    /// Recipes matching a normalized filter, in id order.
    pub async fn list(&self, filter: &RecipeFilter) -> Result<Vec<Recipe>, RecipeError> {
        let mut qb = query::browse_query(filter);
        let rows = qb.build_query_as::<Recipe>().fetch_all(&self.pool).await?;
        Ok(rows)
    }

    pub async fn list_favorites(&self, search: Option<&str>) -> Result<Vec<Recipe>, RecipeError> {
        let mut qb = query::favorites_query(search);
        let rows = qb.build_query_as::<Recipe>().fetch_all(&self.pool).await?;
        Ok(rows)
    }
}
