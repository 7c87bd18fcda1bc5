//! # Catalog Service
//!
//! The operations behind every catalog and reservation endpoint.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    CatalogService                                       │
//! │                                                                         │
//! │  handler ──► service op                                                │
//! │                 │                                                       │
//! │                 ├── 1. normalize + validate (shelf-core)  ── 400       │
//! │                 │                                                       │
//! │                 ├── 2. one repository call (shelf-db)     ── 404 / 500 │
//! │                 │      or one ReservationStore call       ── 404 / 409 │
//! │                 │                                                       │
//! │                 └── 3. info!(elapsed_ms, count)                        │
//! │                                                                         │
//! │  Validation always happens before the first write.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use std::time::Instant;
use tracing::{debug, info};

use crate::error::ApiResult;
use shelf_core::validation::{validate_item, validate_keyword};
use shelf_core::{
    CatalogItem, CoreError, InventoryUnit, ItemFilter, ItemInput, ItemSort, ItemSummary,
    ItemView, ReservationStore,
};
use shelf_db::{generate_item_id, Database};

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

/// Catalog and reservation operations.
///
/// Cheap to clone: both the pool and the reservation store are shared
/// handles.
#[derive(Debug, Clone)]
pub struct CatalogService {
    db: Database,
    inventory: ReservationStore,
}

impl CatalogService {
    /// Creates a service over a database and an inventory.
    pub fn new(db: Database, inventory: ReservationStore) -> Self {
        CatalogService { db, inventory }
    }

    /// The underlying database handle.
    pub fn database(&self) -> &Database {
        &self.db
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Lists items matching `filter`. Never absent: no match is an empty list.
    pub async fn list(&self, filter: ItemFilter) -> ApiResult<Vec<CatalogItem>> {
        let start = Instant::now();
        let filter = filter.validate()?;

        let items = self.db.items().list(&filter).await?;

        info!(
            elapsed_ms = elapsed_ms(start),
            count = items.len(),
            sort = ?filter.sort,
            "list_items complete"
        );
        Ok(items)
    }

    /// Gets one fully hydrated item.
    pub async fn get_by_id(&self, id: &str) -> ApiResult<CatalogItem> {
        debug!(id = %id, "get_item");
        let item = self
            .db
            .items()
            .get_by_id(id)
            .await?
            .ok_or_else(|| CoreError::ItemNotFound(id.to_string()))?;
        Ok(item)
    }

    /// Gets the `{id, title, author}` projection of one item.
    pub async fn get_summary(&self, id: &str) -> ApiResult<ItemSummary> {
        debug!(id = %id, "get_item_summary");
        let summary = self
            .db
            .items()
            .get_summary(id)
            .await?
            .ok_or_else(|| CoreError::ItemNotFound(id.to_string()))?;
        Ok(summary)
    }

    /// Distinct non-empty categories, ascending.
    pub async fn list_categories(&self) -> ApiResult<Vec<String>> {
        Ok(self.db.items().categories().await?)
    }

    /// Keyword search over title, author and description, best rated first.
    ///
    /// An empty or whitespace-only keyword is a validation error.
    pub async fn search(&self, keyword: &str) -> ApiResult<Vec<CatalogItem>> {
        let keyword = validate_keyword(keyword)?;
        let filter = ItemFilter::default()
            .with_keyword(keyword)
            .sorted_by(ItemSort::Relevance);
        self.list(filter).await
    }

    /// Runs a derived view; `limit` overrides the view's default.
    pub async fn view(&self, view: ItemView, limit: Option<u32>) -> ApiResult<Vec<CatalogItem>> {
        debug!(view = ?view, limit = ?limit, "view");
        self.list(view.filter(limit)).await
    }

    /// New arrivals, newest first (5 by default).
    pub async fn new_arrivals(&self, limit: Option<u32>) -> ApiResult<Vec<CatalogItem>> {
        self.view(ItemView::New, limit).await
    }

    /// Rating >= 4.0, best rated first (10 by default).
    pub async fn featured(&self, limit: Option<u32>) -> ApiResult<Vec<CatalogItem>> {
        self.view(ItemView::Featured, limit).await
    }

    /// Discounted items, deepest discount first (unlimited by default).
    pub async fn discounted(&self, limit: Option<u32>) -> ApiResult<Vec<CatalogItem>> {
        self.view(ItemView::Discounted, limit).await
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Validates and stores a new item. The store assigns id and timestamps.
    pub async fn create(&self, input: ItemInput) -> ApiResult<CatalogItem> {
        let start = Instant::now();
        let input = input.normalized();
        validate_item(&input)?;

        let id = generate_item_id();
        let item = self.db.items().insert(&id, &input, Utc::now()).await?;

        info!(
            elapsed_ms = elapsed_ms(start),
            id = %item.id,
            title = %item.title(),
            "create_item complete"
        );
        Ok(item)
    }

    /// Replaces every client field of an existing item.
    pub async fn update(&self, id: &str, input: ItemInput) -> ApiResult<CatalogItem> {
        let start = Instant::now();
        let input = input.normalized();
        validate_item(&input)?;

        let item = self.db.items().update(id, &input, Utc::now()).await?;

        info!(elapsed_ms = elapsed_ms(start), id = %id, "update_item complete");
        Ok(item)
    }

    /// Hard-deletes an item.
    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        self.db.items().delete(id).await?;
        info!(id = %id, "delete_item complete");
        Ok(())
    }

    // =========================================================================
    // Reservations
    // =========================================================================

    /// Atomically reserves an inventory unit.
    pub fn reserve(&self, id: &str) -> ApiResult<InventoryUnit> {
        Ok(self.inventory.reserve(id)?)
    }

    /// Snapshot of the inventory, or of the one unit with `id`.
    ///
    /// An unknown id yields an empty list, not an error.
    pub fn inventory(&self, id: Option<&str>) -> Vec<InventoryUnit> {
        match id.map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => self.inventory.get(id).into_iter().collect(),
            None => self.inventory.snapshot(),
        }
    }

    // =========================================================================
    // Health
    // =========================================================================

    /// Whether the store answers a trivial query.
    pub async fn health(&self) -> bool {
        self.db.health_check().await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use shelf_core::Money;
    use shelf_db::DbConfig;

    async fn service() -> CatalogService {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        CatalogService::new(db, ReservationStore::with_demo_inventory())
    }

    fn input(title: &str, author: &str) -> ItemInput {
        ItemInput::new(title, author, Money::from_cents(1000))
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let service = service().await;

        let mut new = input("  Dune ", "Frank Herbert");
        new.category = Some("  ".to_string());
        let created = service.create(new).await.unwrap();

        assert!(!created.id.is_empty());
        assert_eq!(created.title(), "Dune");
        assert_eq!(created.fields.category, None);
        assert_eq!(created.created_at, created.updated_at);

        let fetched = service.get_by_id(&created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_invalid_create_writes_nothing() {
        let service = service().await;

        let mut bad = input("Dune", "Frank Herbert");
        bad.rating = 7.0;
        let err = service.create(bad).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = service.create(input("", "Nobody")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        assert_eq!(service.database().items().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_and_delete_unknown_id() {
        let service = service().await;
        service.create(input("Dune", "Frank Herbert")).await.unwrap();

        let err = service
            .update("missing", input("X", "Y"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = service.delete("missing").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        assert_eq!(service.list(ItemFilter::default()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_update_on_unknown_id_is_validation_error() {
        let service = service().await;
        let err = service.update("missing", input("", "")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let service = service().await;
        let created = service.create(input("Dune", "Frank Herbert")).await.unwrap();

        service.delete(&created.id).await.unwrap();
        let err = service.get_by_id(&created.id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = service.get_summary(&created.id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_search() {
        let service = service().await;
        service.create(input("Air Force 1", "Nike")).await.unwrap();
        service.create(input("574 Classic", "New Balance")).await.unwrap();

        let found = service.search("nike").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title(), "Air Force 1");

        for empty in ["", "   "] {
            let err = service.search(empty).await.unwrap_err();
            assert_eq!(err.code, ErrorCode::ValidationError);
        }
    }

    #[tokio::test]
    async fn test_view_limit_is_validated() {
        let service = service().await;
        let err = service.featured(Some(0)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(service.discounted(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reserve_and_inventory() {
        let service = service().await;

        let unit = service.reserve("1").unwrap();
        assert!(unit.reserved);

        let err = service.reserve("1").unwrap_err();
        assert_eq!(err.code, ErrorCode::Conflict);

        let err = service.reserve("9").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = service.reserve("").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        assert_eq!(service.inventory(None).len(), 3);
        assert_eq!(service.inventory(Some("2"))[0].name, "Ultraboost 22");
        assert!(service.inventory(Some("9")).is_empty());
    }

    #[tokio::test]
    async fn test_health() {
        let service = service().await;
        assert!(service.health().await);

        service.database().close().await;
        assert!(!service.health().await);
    }
}
