//! # Catalog Item Routes
//!
//! ```text
//! GET    /api/v1/items                 list (filters in the query string)
//! POST   /api/v1/items                 create          → 201
//! GET    /api/v1/items/search?q=       keyword search
//! GET    /api/v1/items/new?limit=      new arrivals
//! GET    /api/v1/items/featured?limit= featured
//! GET    /api/v1/items/discounted?limit=
//! GET    /api/v1/items/{id}            one item
//! PUT    /api/v1/items/{id}            full replace
//! DELETE /api/v1/items/{id}            hard delete
//! GET    /api/v1/items/{id}/summary    {id, title, author}
//! GET    /api/v1/categories            distinct categories
//! ```

use std::fmt;
use std::str::FromStr;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;
use crate::extract::{AppJson, AppQuery};
use crate::state::AppState;
use shelf_core::{CatalogItem, ItemFilter, ItemInput, ItemSummary};

// =============================================================================
// Query Parameters
// =============================================================================

/// Reads an optional query value, treating `?name=` like an absent parameter.
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
    }
}

/// Query string of the plain listing.
///
/// Empty values (`?year=&category=`) mean "no filter". The keyword is the
/// exception: `q=` is rejected like an empty search.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub category: Option<String>,
    /// Keyword; switches the order to rating DESC, title ASC.
    pub q: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub min_rating: Option<f64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub min_discount: Option<u32>,
    /// `true` keeps only new arrivals; `false` adds no constraint.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub is_new: Option<bool>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub limit: Option<u32>,
}

impl From<ListParams> for ItemFilter {
    fn from(params: ListParams) -> Self {
        ItemFilter {
            year: params.year,
            category: params.category,
            keyword: params.q,
            min_rating: params.min_rating,
            min_discount: params.min_discount,
            only_new: params.is_new.unwrap_or(false),
            limit: params.limit,
            ..ItemFilter::default()
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LimitParams {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// =============================================================================
// Handlers
// =============================================================================

pub async fn list_items(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ListParams>,
) -> ApiResult<Json<Vec<CatalogItem>>> {
    Ok(Json(state.catalog.list(params.into()).await?))
}

pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<CatalogItem>> {
    Ok(Json(state.catalog.get_by_id(&id).await?))
}

pub async fn get_item_summary(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ItemSummary>> {
    Ok(Json(state.catalog.get_summary(&id).await?))
}

pub async fn create_item(
    State(state): State<AppState>,
    AppJson(input): AppJson<ItemInput>,
) -> ApiResult<(StatusCode, Json<CatalogItem>)> {
    let item = state.catalog.create(input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<ItemInput>,
) -> ApiResult<Json<CatalogItem>> {
    Ok(Json(state.catalog.update(&id, input).await?))
}

pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    state.catalog.delete(&id).await?;
    Ok(Json(MessageResponse {
        message: "Item deleted successfully".to_string(),
    }))
}

/// A missing `q` is treated like an empty one: 400.
pub async fn search_items(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<SearchParams>,
) -> ApiResult<Json<Vec<CatalogItem>>> {
    let keyword = params.q.unwrap_or_default();
    Ok(Json(state.catalog.search(&keyword).await?))
}

pub async fn new_items(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<LimitParams>,
) -> ApiResult<Json<Vec<CatalogItem>>> {
    Ok(Json(state.catalog.new_arrivals(params.limit).await?))
}

pub async fn featured_items(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<LimitParams>,
) -> ApiResult<Json<Vec<CatalogItem>>> {
    Ok(Json(state.catalog.featured(params.limit).await?))
}

pub async fn discounted_items(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<LimitParams>,
) -> ApiResult<Json<Vec<CatalogItem>>> {
    Ok(Json(state.catalog.discounted(params.limit).await?))
}

pub async fn list_categories(State(state): State<AppState>) -> ApiResult<Json<Vec<String>>> {
    Ok(Json(state.catalog.list_categories().await?))
}
