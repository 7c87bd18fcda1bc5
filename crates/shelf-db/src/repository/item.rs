//! # Catalog Item Repository
//!
//! Database operations for catalog items.
//!
//! ## Key Operations
//! - Filtered listing (one parameterized query per filter)
//! - CRUD with single-statement atomicity
//! - Summary lookup that loads only `id, title, author`
//!
//! ## Write Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    One statement per mutation                           │
//! │                                                                         │
//! │  insert  ──► INSERT ... RETURNING <columns>      ──► stored record     │
//! │  update  ──► UPDATE ... WHERE id = ? RETURNING   ──► record | NotFound │
//! │  delete  ──► DELETE ... WHERE id = ?             ──► rows_affected     │
//! │                                                                         │
//! │  The returned record is decoded from what SQLite stored, so the        │
//! │  caller never sees a value the store did not actually keep.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::query::QueryAs;
use sqlx::sqlite::SqliteArguments;
use sqlx::{Sqlite, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::query::{build_list_query, search_text, ITEM_COLUMNS};
use crate::repository::mapper::{encode_timestamp, ItemRow, SummaryRow};
use shelf_core::{CatalogItem, ItemFilter, ItemInput, ItemSummary};

type ItemQuery<'q> = QueryAs<'q, Sqlite, ItemRow, SqliteArguments<'q>>;

/// Binds the client-supplied columns in the order both INSERT and UPDATE
/// list them.
fn bind_fields<'q>(query: ItemQuery<'q>, input: &'q ItemInput) -> ItemQuery<'q> {
    query
        .bind(input.title.as_str())
        .bind(input.author.as_str())
        .bind(input.isbn.as_deref())
        .bind(input.year)
        .bind(input.price)
        .bind(input.category.as_deref())
        .bind(input.original_price)
        .bind(i64::from(input.discount))
        .bind(input.cover_image.as_deref())
        .bind(input.rating)
        .bind(i64::from(input.reviews_count))
        .bind(input.is_new)
        .bind(input.pages.map(i64::from))
        .bind(input.language.as_deref())
        .bind(input.publisher.as_deref())
        .bind(input.description.as_deref())
}

/// Repository for catalog item database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ItemRepository::new(pool);
///
/// let fiction = repo
///     .list(&ItemFilter::default().with_category("Fiction"))
///     .await?;
///
/// let item = repo.get_by_id("uuid-here").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: SqlitePool,
}

impl ItemRepository {
    /// Creates a new ItemRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ItemRepository { pool }
    }

    /// Lists items matching every constraint of `filter`, in its order.
    ///
    /// The filter must already be validated; an empty result is `Ok(vec![])`.
    pub async fn list(&self, filter: &ItemFilter) -> DbResult<Vec<CatalogItem>> {
        debug!(
            year = ?filter.year,
            category = ?filter.category,
            keyword = ?filter.keyword,
            sort = ?filter.sort,
            limit = ?filter.limit,
            "Listing catalog items"
        );

        let mut query = build_list_query(filter);
        let rows = query
            .build_query_as::<ItemRow>()
            .fetch_all(&self.pool)
            .await?;

        let items = rows
            .into_iter()
            .map(CatalogItem::try_from)
            .collect::<DbResult<Vec<_>>>()?;

        debug!(count = items.len(), "Listing returned items");
        Ok(items)
    }

    /// Gets an item by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(CatalogItem))` - Item found
    /// * `Ok(None)` - Item not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<CatalogItem>> {
        debug!(id = %id, "Fetching catalog item");

        let sql = format!("SELECT {ITEM_COLUMNS} FROM catalog_items WHERE id = ?");
        let row = sqlx::query_as::<_, ItemRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(CatalogItem::try_from).transpose()
    }

    /// Gets the `{id, title, author}` projection of an item.
    ///
    /// Only those three columns are read from storage.
    pub async fn get_summary(&self, id: &str) -> DbResult<Option<ItemSummary>> {
        debug!(id = %id, "Fetching catalog item summary");

        let row = sqlx::query_as::<_, SummaryRow>(
            "SELECT id, title, author FROM catalog_items WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ItemSummary::from))
    }

    /// Inserts a new item with both timestamps set to `now`.
    ///
    /// ## Arguments
    /// * `id` - New item id (see [`generate_item_id`])
    /// * `input` - Validated client fields
    /// * `now` - Creation time
    ///
    /// ## Returns
    /// * `Ok(CatalogItem)` - The stored record
    /// * `Err(DbError::UniqueViolation)` - `id` already exists
    pub async fn insert(
        &self,
        id: &str,
        input: &ItemInput,
        now: DateTime<Utc>,
    ) -> DbResult<CatalogItem> {
        debug!(id = %id, title = %input.title, "Inserting catalog item");

        let now = encode_timestamp(now);
        let search = search_text(input);
        let sql = format!(
            "INSERT INTO catalog_items (
                id, title, author, isbn, year, price, category, original_price,
                discount, cover_image, rating, reviews_count, is_new, pages,
                language, publisher, description, search_text, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {ITEM_COLUMNS}"
        );

        let query = sqlx::query_as::<_, ItemRow>(&sql).bind(id);
        let row = bind_fields(query, input)
            .bind(search.as_str())
            .bind(now.as_str())
            .bind(now.as_str())
            .fetch_one(&self.pool)
            .await?;

        CatalogItem::try_from(row)
    }

    /// Replaces every client field of an existing item.
    ///
    /// `created_at` is kept; `updated_at` becomes `now` (never earlier than
    /// `created_at`, even if the clock stepped back).
    ///
    /// ## Returns
    /// * `Ok(CatalogItem)` - The updated record
    /// * `Err(DbError::NotFound)` - No item has this id; nothing changed
    pub async fn update(
        &self,
        id: &str,
        input: &ItemInput,
        now: DateTime<Utc>,
    ) -> DbResult<CatalogItem> {
        debug!(id = %id, "Updating catalog item");

        let now = encode_timestamp(now);
        let search = search_text(input);
        let sql = format!(
            "UPDATE catalog_items SET
                title = ?, author = ?, isbn = ?, year = ?, price = ?, category = ?,
                original_price = ?, discount = ?, cover_image = ?, rating = ?,
                reviews_count = ?, is_new = ?, pages = ?, language = ?,
                publisher = ?, description = ?, search_text = ?,
                updated_at = MAX(created_at, ?)
            WHERE id = ?
            RETURNING {ITEM_COLUMNS}"
        );

        let query = sqlx::query_as::<_, ItemRow>(&sql);
        let row = bind_fields(query, input)
            .bind(search.as_str())
            .bind(now.as_str())
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => CatalogItem::try_from(row),
            None => Err(DbError::not_found("Item", id)),
        }
    }

    /// Hard-deletes an item.
    ///
    /// ## Returns
    /// * `Ok(())` - One row removed
    /// * `Err(DbError::NotFound)` - Zero rows affected
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting catalog item");

        let result = sqlx::query("DELETE FROM catalog_items WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Item", id));
        }

        Ok(())
    }

    /// Distinct non-empty categories, ascending.
    pub async fn categories(&self) -> DbResult<Vec<String>> {
        let categories: Vec<String> = sqlx::query_scalar(
            "SELECT DISTINCT category FROM catalog_items
             WHERE category IS NOT NULL AND trim(category) <> ''
             ORDER BY category ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = categories.len(), "Loaded categories");
        Ok(categories)
    }

    /// Counts stored items (for diagnostics and the seed binary).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM catalog_items")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Generates a new item ID (UUID v4).
pub fn generate_item_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
