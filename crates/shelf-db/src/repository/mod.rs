//! # Repository Module
//!
//! Database repository implementations for Shelf Catalog.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  CatalogService                                                        │
//! │       │                                                                 │
//! │       │  db.items().list(&filter)                                      │
//! │       ▼                                                                 │
//! │  ItemRepository                                                        │
//! │  ├── list(&self, filter)                                               │
//! │  ├── get_by_id / get_summary(&self, id)                                │
//! │  ├── insert / update(&self, id, input, now)                            │
//! │  └── delete(&self, id)                                                 │
//! │       │                                                                 │
//! │       │  SQL (query.rs) + row mapping (mapper.rs)                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod item;
pub(crate) mod mapper;
