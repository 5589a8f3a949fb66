//! Filtered `SELECT` construction for the browse and favorites listings.
//!
//! Every user-supplied value goes through `push_bind`; nothing is spliced
//! into the SQL text.

use serde::Deserialize;
use sqlx::{QueryBuilder, Sqlite};

const RECIPE_COLUMNS: &str =
    "SELECT id, title, cuisine, category, image_filename, ingredients, steps, is_favorite FROM recipes";

/// Optional browse filters, as they arrive in the query string.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RecipeFilter {
    pub category: Option<String>,
    pub cuisine: Option<String>,
    pub search: Option<String>,
}

impl RecipeFilter {
    /// Trim every value and treat blank ones as absent.
    pub fn normalized(self) -> Self {
        Self {
            category: non_blank(self.category),
            cuisine: non_blank(self.cuisine),
            search: non_blank(self.search),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// `%term%` with LIKE metacharacters escaped, for use with `ESCAPE '\'`.
pub fn like_pattern(term: &str) -> String {
    let mut out = String::with_capacity(term.len() + 2);
    out.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('%');
    out
}

fn push_substring_match(qb: &mut QueryBuilder<'static, Sqlite>, term: &str) {
    let pattern = like_pattern(term);
    qb.push(" AND (");
    for (i, column) in ["title", "cuisine", "category"].into_iter().enumerate() {
        if i > 0 {
            qb.push(" OR ");
        }
        qb.push(format_args!("LOWER({column}) LIKE LOWER("));
        qb.push_bind(pattern.clone());
        qb.push(") ESCAPE '\\'");
    }
    qb.push(")");
}

/// Browse query: exact case-insensitive category/cuisine, substring search
/// over title/cuisine/category, all ANDed. Expects a normalized filter.
pub fn browse_query(filter: &RecipeFilter) -> QueryBuilder<'static, Sqlite> {
    let mut qb = QueryBuilder::new(RECIPE_COLUMNS);
    qb.push(" WHERE 1=1");

    if let Some(category) = &filter.category {
        qb.push(" AND LOWER(category) = LOWER(");
        qb.push_bind(category.clone());
        qb.push(")");
    }
    if let Some(cuisine) = &filter.cuisine {
        qb.push(" AND LOWER(cuisine) = LOWER(");
        qb.push_bind(cuisine.clone());
        qb.push(")");
    }
    if let Some(search) = &filter.search {
        push_substring_match(&mut qb, search);
    }

    qb.push(" ORDER BY id");
    qb
}

/// Favorites query, optionally narrowed by the same substring match as browse.
pub fn favorites_query(search: Option<&str>) -> QueryBuilder<'static, Sqlite> {
    let mut qb = QueryBuilder::new(RECIPE_COLUMNS);
    qb.push(" WHERE is_favorite = 1");
    if let Some(search) = search {
        push_substring_match(&mut qb, search);
    }
    qb.push(" ORDER BY id");
    qb
}
