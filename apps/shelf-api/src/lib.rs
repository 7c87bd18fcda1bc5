//! # Shelf API
//!
//! JSON-over-HTTP service for the Shelf Catalog.
//!
//! ## Module Organization
//! ```text
//! shelf_api/
//! ├── lib.rs          ◄─── You are here (router + tracing setup)
//! ├── main.rs         ◄─── Binary: config → state → serve
//! ├── config.rs       ◄─── Environment configuration
//! ├── state.rs        ◄─── AppState shared by all handlers
//! ├── extract.rs      ◄─── JSON / query extractors with ApiError rejections
//! ├── error.rs        ◄─── ApiError {code, message} + IntoResponse
//! ├── services/
//! │   └── catalog_service.rs  ◄─── Every catalog/reservation operation
//! └── routes/
//!     ├── items.rs        ◄─── /api/v1/items..., /api/v1/categories
//!     ├── reservation.rs  ◄─── /api/v1/inventory, /api/v1/reserve
//!     └── health.rs       ◄─── /health
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. init_tracing()          RUST_LOG or the default filter             │
//! │  2. ApiConfig::load()       SHELF_* environment variables              │
//! │  3. AppState::from_config() open SQLite, run migrations, seed shoes    │
//! │  4. router(state)           routes + TraceLayer                        │
//! │  5. axum::serve(...)        until Ctrl+C / SIGTERM                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod services;
pub mod state;

use tracing_subscriber::EnvFilter;

pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use routes::router;
pub use services::CatalogService;
pub use state::AppState;

/// Default log filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,shelf=debug,sqlx=warn,tower_http=info";

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages everywhere
/// - `RUST_LOG=shelf_db=trace` - Trace one crate only
/// - Default: [`DEFAULT_LOG_FILTER`]
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
