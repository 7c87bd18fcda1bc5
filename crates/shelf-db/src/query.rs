//! # Filter → SQL
//!
//! Turns a validated [`ItemFilter`] into one parameterized `SELECT`.
//!
//! ## Shape of the generated statement
//! ```text
//! SELECT <item columns> FROM catalog_items
//! WHERE 1 = 1
//!   AND year = ?                                   -- year
//!   AND category = ?                               -- category
//!   AND instr(search_text, ?) > 0                  -- keyword
//!   AND rating >= ?                                -- min_rating
//!   AND discount >= ?                              -- min_discount
//!   AND is_new = 1                                 -- only_new
//! ORDER BY <per ItemSort>, id ASC
//! LIMIT ?                                          -- limit
//! ```
//!
//! Every user-supplied value goes through `push_bind`; the SQL text only ever
//! contains the fixed fragments above. `instr` is used instead of `LIKE` so
//! that `%` and `_` in a keyword are matched literally.
//!
//! SQLite's `lower()` folds ASCII only, so case folding happens here instead:
//! `search_text` is written from [`search_text`] and the keyword is folded
//! with the same `str::to_lowercase`.

use sqlx::{QueryBuilder, Sqlite};

use shelf_core::{ItemFilter, ItemInput, ItemSort};

/// Joins the searchable fields. Keywords reject control characters, so a
/// match cannot straddle two fields.
const SEARCH_SEPARATOR: char = '\u{1f}';

/// Column list shared by every full-item read, in `ItemRow` order.
pub(crate) const ITEM_COLUMNS: &str = "id, title, author, isbn, year, price, category, \
     original_price, discount, cover_image, rating, reviews_count, is_new, pages, \
     language, publisher, description, created_at, updated_at";

/// Lowercased `title`, `author` and `description` as stored in `search_text`.
pub(crate) fn search_text(input: &ItemInput) -> String {
    let mut text = input.title.to_lowercase();
    text.push(SEARCH_SEPARATOR);
    text.push_str(&input.author.to_lowercase());
    text.push(SEARCH_SEPARATOR);
    if let Some(description) = &input.description {
        text.push_str(&description.to_lowercase());
    }
    text
}

/// `ORDER BY` body for a sort. Each ends in `id ASC` so ties are stable.
pub(crate) fn order_clause(sort: ItemSort) -> &'static str {
    match sort {
        ItemSort::Catalog => "created_at ASC, id ASC",
        ItemSort::Relevance => "rating DESC, title ASC, id ASC",
        ItemSort::Newest => "created_at DESC, id ASC",
        ItemSort::Featured => "rating DESC, reviews_count DESC, id ASC",
        ItemSort::Discount => "discount DESC, rating DESC, id ASC",
    }
}

/// Builds the listing query for an already validated filter.
pub(crate) fn build_list_query(filter: &ItemFilter) -> QueryBuilder<'static, Sqlite> {
    let mut qb: QueryBuilder<'static, Sqlite> =
        QueryBuilder::new(format!("SELECT {ITEM_COLUMNS} FROM catalog_items WHERE 1 = 1"));

    if let Some(year) = filter.year {
        qb.push(" AND year = ").push_bind(year);
    }

    if let Some(category) = &filter.category {
        qb.push(" AND category = ").push_bind(category.clone());
    }

    if let Some(keyword) = &filter.keyword {
        qb.push(" AND instr(search_text, ")
            .push_bind(keyword.to_lowercase())
            .push(") > 0");
    }

    if let Some(min_rating) = filter.min_rating {
        qb.push(" AND rating >= ").push_bind(min_rating);
    }

    if let Some(min_discount) = filter.min_discount {
        qb.push(" AND discount >= ").push_bind(i64::from(min_discount));
    }

    if filter.only_new {
        qb.push(" AND is_new = 1");
    }

    qb.push(" ORDER BY ").push(order_clause(filter.sort));

    if let Some(limit) = filter.limit {
        qb.push(" LIMIT ").push_bind(i64::from(limit));
    }

    qb
}
