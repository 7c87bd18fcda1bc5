//! # Routes Module
//!
//! ```text
//! routes/
//! ├── mod.rs          ◄─── You are here (router assembly)
//! ├── items.rs        ◄─── Catalog CRUD, search, views, categories
//! ├── reservation.rs  ◄─── Inventory snapshot and reserve
//! └── health.rs       ◄─── /health
//! ```
//!
//! Every request passes through `TraceLayer`, which opens a span per request
//! and logs the response status and latency.

pub mod health;
pub mod items;
pub mod reservation;

use axum::http::Uri;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::state::AppState;

/// Builds the full application router.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/items", get(items::list_items).post(items::create_item))
        .route("/items/search", get(items::search_items))
        .route("/items/new", get(items::new_items))
        .route("/items/featured", get(items::featured_items))
        .route("/items/discounted", get(items::discounted_items))
        .route(
            "/items/{id}",
            get(items::get_item)
                .put(items::update_item)
                .delete(items::delete_item),
        )
        .route("/items/{id}/summary", get(items::get_item_summary))
        .route("/categories", get(items::list_categories))
        .route("/inventory", get(reservation::list_inventory))
        .route(
            "/reserve",
            get(reservation::reserve).post(reservation::reserve),
        );

    Router::new()
        .nest("/api/v1", api)
        .route("/health", get(health::health))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found("Route", uri.path())
}
