//! Database module: models, schema and queries for recipe storage.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database
//! - `query.rs`: filtered `SELECT` builders for listings
//! - `sqlite.rs`: pool setup and the `RecipeStorage` handle

pub mod models;
pub mod query;
pub mod schema;
pub mod sqlite;

pub use models::{Recipe, RecipeDraft};
pub use query::RecipeFilter;
pub use schema::SQLITE_INIT;
pub use sqlite::{RecipeStorage, SqlitePool, connect};
