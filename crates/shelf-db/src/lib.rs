//! # shelf-db: Database Layer for Shelf Catalog
//!
//! Catalog persistence on SQLite through sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Shelf Catalog Data Flow                            │
//! │                                                                         │
//! │  HTTP handler → CatalogService (validated ItemFilter / ItemInput)      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     shelf-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │ ItemRepository│    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │◄───│  query.rs     │    │  (embedded)  │  │   │
//! │  │   │  SqlitePool   │    │  mapper.rs    │    │ 001_...sql   │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite (./data/shelf.db, or :memory: for tests)                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - The catalog item repository and row mapping
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shelf_core::ItemFilter;
//! use shelf_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./data/shelf.db")).await?;
//! let fiction = db
//!     .items()
//!     .list(&ItemFilter::default().with_category("Fiction"))
//!     .await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
mod query;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::item::{generate_item_id, ItemRepository};
