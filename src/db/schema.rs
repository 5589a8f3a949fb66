//! SQL DDL for initializing the recipe storage.

/// SQLite schema with:
/// - `id` INTEGER PRIMARY KEY AUTOINCREMENT (ids are never reused)
/// - `image_filename` nullable; names a file in the upload directory
/// - `is_favorite` BOOLEAN (stored as INTEGER 0/1)
///
/// Create-if-absent only; an existing table is left untouched.
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS recipes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    cuisine TEXT NOT NULL,
    category TEXT NOT NULL,
    image_filename TEXT NULL,
    ingredients TEXT NOT NULL,
    steps TEXT NOT NULL,
    is_favorite INTEGER NOT NULL DEFAULT 0
);
"#;
