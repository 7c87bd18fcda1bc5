//! # Row Mapping
//!
//! Storage rows ↔ domain types.
//!
//! ## Rules
//! ```text
//! ┌──────────────────────────┬───────────────────────────────────────────┐
//! │ column                   │ domain                                    │
//! ├──────────────────────────┼───────────────────────────────────────────┤
//! │ original_price NULL      │ None            (0 stays Some(0))         │
//! │ pages NULL               │ None            (0 stays Some(0))         │
//! │ price / original_price   │ Money cents, must be >= 0                 │
//! │ discount                 │ u32, must be 0..=100                      │
//! │ reviews_count / pages    │ u32, must fit                             │
//! │ created_at / updated_at  │ RFC 3339 text, microseconds, UTC "Z"      │
//! └──────────────────────────┴───────────────────────────────────────────┘
//! ```
//!
//! A row that breaks a rule fails with [`DbError::CorruptRow`]. Nothing is
//! clamped into range.

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::FromRow;

use crate::error::{DbError, DbResult};
use shelf_core::{CatalogItem, ItemInput, ItemSummary, Money, MAX_DISCOUNT_PERCENT, MAX_RATING};

/// Raw `catalog_items` row, column for column.
#[derive(Debug, Clone, FromRow)]
pub(crate) struct ItemRow {
    pub id: String,
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub year: Option<i64>,
    pub price: i64,
    pub category: Option<String>,
    pub original_price: Option<i64>,
    pub discount: i64,
    pub cover_image: Option<String>,
    pub rating: f64,
    pub reviews_count: i64,
    pub is_new: bool,
    pub pages: Option<i64>,
    pub language: Option<String>,
    pub publisher: Option<String>,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// The three columns loaded by a summary lookup.
#[derive(Debug, Clone, FromRow)]
pub(crate) struct SummaryRow {
    pub id: String,
    pub title: String,
    pub author: String,
}

impl From<SummaryRow> for ItemSummary {
    fn from(row: SummaryRow) -> Self {
        ItemSummary {
            id: row.id,
            title: row.title,
            author: row.author,
        }
    }
}

/// Formats a timestamp the way it is stored.
///
/// Fixed width, so lexicographic order in SQL equals time order.
pub(crate) fn encode_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn decode_timestamp(id: &str, column: &str, raw: &str) -> DbResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| DbError::corrupt(id, format!("{column} '{raw}' is not RFC 3339: {e}")))
}

fn non_negative_money(id: &str, column: &str, cents: i64) -> DbResult<Money> {
    if cents < 0 {
        return Err(DbError::corrupt(id, format!("{column} {cents} is negative")));
    }
    Ok(Money::from_cents(cents))
}

fn count(id: &str, column: &str, value: i64) -> DbResult<u32> {
    u32::try_from(value)
        .map_err(|_| DbError::corrupt(id, format!("{column} {value} is out of range")))
}

impl TryFrom<ItemRow> for CatalogItem {
    type Error = DbError;

    fn try_from(row: ItemRow) -> DbResult<Self> {
        let id = row.id.as_str();

        let year = row
            .year
            .map(|y| {
                i32::try_from(y).map_err(|_| DbError::corrupt(id, format!("year {y} is out of range")))
            })
            .transpose()?;

        let discount = count(id, "discount", row.discount)?;
        if discount > MAX_DISCOUNT_PERCENT {
            return Err(DbError::corrupt(
                id,
                format!("discount {discount} is out of range"),
            ));
        }

        if !(0.0..=MAX_RATING).contains(&row.rating) {
            return Err(DbError::corrupt(
                id,
                format!("rating {} is out of range", row.rating),
            ));
        }

        let fields = ItemInput {
            price: non_negative_money(id, "price", row.price)?,
            original_price: row
                .original_price
                .map(|cents| non_negative_money(id, "original_price", cents))
                .transpose()?,
            discount,
            rating: row.rating,
            reviews_count: count(id, "reviews_count", row.reviews_count)?,
            pages: row.pages.map(|p| count(id, "pages", p)).transpose()?,
            year,
            is_new: row.is_new,
            title: row.title,
            author: row.author,
            isbn: row.isbn,
            category: row.category,
            cover_image: row.cover_image,
            language: row.language,
            publisher: row.publisher,
            description: row.description,
        };

        let created_at = decode_timestamp(id, "created_at", &row.created_at)?;
        let updated_at = decode_timestamp(id, "updated_at", &row.updated_at)?;

        Ok(CatalogItem {
            id: row.id,
            fields,
            created_at,
            updated_at,
        })
    }
}
