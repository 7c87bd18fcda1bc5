//! # Services Module
//!
//! Business operations invoked by the HTTP handlers.
//!
//! ```text
//! services/
//! ├── mod.rs              ◄─── You are here (exports)
//! └── catalog_service.rs  ◄─── Catalog CRUD, views, search, reservations
//! ```

pub mod catalog_service;

pub use catalog_service::CatalogService;
