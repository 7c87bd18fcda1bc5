//! # shelf-core: Pure Domain Logic for Shelf Catalog
//!
//! This crate is the **heart** of Shelf Catalog. It holds the catalog item
//! model, input validation, filter definitions and the reservation state
//! machine, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Shelf Catalog Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 HTTP clients (storefront UI)                    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON over HTTP                         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              shelf-api (routes + CatalogService)                │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ shelf-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  filter   │  │reservation│  │ validation│  │   │
//! │  │   │CatalogItem│  │ItemFilter │  │  Store    │  │   rules   │  │   │
//! │  │   │ ItemInput │  │ ItemView  │  │InvUnit    │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK                            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 shelf-db (Database Layer)                       │   │
//! │  │           SQLite queries, migrations, row mapping               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (CatalogItem, ItemInput, ItemSummary)
//! - [`money`] - Money type with integer cents
//! - [`filter`] - Catalog filters, sort orders and derived views
//! - [`reservation`] - Inventory units and the atomic reservation store
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use shelf_core::filter::{ItemFilter, ItemView};
//!
//! // The "featured" view: rating floor 4.0, best rated first
//! let filter = ItemView::Featured.filter(None);
//! assert_eq!(filter.min_rating, Some(4.0));
//! assert_eq!(filter.limit, Some(10));
//!
//! // Conjunctive ad-hoc filter
//! let filter = ItemFilter::default().with_year(2020).with_category("Fiction");
//! assert!(filter.validate().is_ok());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod filter;
pub mod money;
pub mod reservation;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use filter::{ItemFilter, ItemSort, ItemView};
pub use money::Money;
pub use reservation::{InventoryUnit, ReservationState, ReservationStore};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Earliest publication/release year accepted on an item.
pub const MIN_ITEM_YEAR: i32 = 1000;

/// Latest publication/release year accepted on an item.
pub const MAX_ITEM_YEAR: i32 = 2100;

/// Upper bound of the rating scale (inclusive).
pub const MAX_RATING: f64 = 5.0;

/// Upper bound of a discount percentage (inclusive).
pub const MAX_DISCOUNT_PERCENT: u32 = 100;

/// Maximum number of rows a single listing may return.
///
/// ## Business Reason
/// Keeps view requests (`?limit=`) bounded. Unlimited listings are still
/// possible by omitting the limit.
pub const MAX_LIST_LIMIT: u32 = 100;

/// Rating floor of the "featured" view.
pub const FEATURED_MIN_RATING: f64 = 4.0;

/// Default size of the "featured" view.
pub const FEATURED_DEFAULT_LIMIT: u32 = 10;

/// Default size of the "new arrivals" view.
pub const NEW_ARRIVALS_DEFAULT_LIMIT: u32 = 5;
