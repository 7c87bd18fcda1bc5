//! # Domain Types
//!
//! Core domain types used throughout Shelf Catalog.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   ItemInput     │   │  CatalogItem    │   │  ItemSummary    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  client fields  │──►│  id (UUID)      │──►│  id             │       │
//! │  │  (no id, no     │   │  client fields  │   │  title          │       │
//! │  │   timestamps)   │   │  created_at     │   │  author         │       │
//! │  └─────────────────┘   │  updated_at     │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Null vs Zero
//! `original_price` and `pages` are `Option`s: `None` means "not known" and is
//! omitted from JSON, `Some(0)` is a real zero and is serialized as `0`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Item Input
// =============================================================================

/// The client-supplied fields of a catalog item.
///
/// Used as the body of both create and update. Update is a full replace:
/// every field here overwrites the stored value, and fields left out of the
/// JSON body fall back to their defaults rather than keeping old values.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemInput {
    /// Book title or shoe model name.
    #[serde(default)]
    pub title: String,

    /// Book author or shoe brand.
    #[serde(default)]
    pub author: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub isbn: Option<String>,

    /// Publication or release year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub year: Option<i32>,

    /// Current selling price.
    #[serde(default)]
    pub price: Money,

    /// Grouping tag, matched exactly by the category filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub category: Option<String>,

    /// Price before discount. Absent is not the same as zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub original_price: Option<Money>,

    /// Discount percentage, 0 means no discount.
    #[serde(default)]
    pub discount: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub cover_image: Option<String>,

    /// Average rating on a 0.0 - 5.0 scale.
    #[serde(default)]
    pub rating: f64,

    #[serde(default)]
    pub reviews_count: u32,

    /// Marked as a new arrival.
    #[serde(default)]
    pub is_new: bool,

    /// Page count. Absent is not the same as zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub pages: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub language: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub publisher: Option<String>,

    /// Free text, searched by keyword.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub description: Option<String>,
}

impl ItemInput {
    /// Creates an input with the two required text fields and a price.
    pub fn new(title: impl Into<String>, author: impl Into<String>, price: Money) -> Self {
        ItemInput {
            title: title.into(),
            author: author.into(),
            price,
            ..ItemInput::default()
        }
    }

    /// Returns a copy with surrounding whitespace removed from text fields and
    /// blank optional text collapsed to `None`.
    ///
    /// ## Why?
    /// The categories listing promises "distinct, non-empty" values. Storing
    /// `Some("")` would make an empty category indistinguishable from a
    /// missing one in every other place, so blank text is normalised once,
    /// before validation.
    pub fn normalized(mut self) -> Self {
        fn blank_to_none(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        self.title = self.title.trim().to_string();
        self.author = self.author.trim().to_string();
        self.isbn = blank_to_none(self.isbn);
        self.category = blank_to_none(self.category);
        self.cover_image = blank_to_none(self.cover_image);
        self.language = blank_to_none(self.language);
        self.publisher = blank_to_none(self.publisher);
        self.description = blank_to_none(self.description);
        self
    }
}

// =============================================================================
// Catalog Item
// =============================================================================

/// A stored catalog item (a book, a pair of shoes, ...).
///
/// ## Identity
/// - `id`: UUID v4 assigned by the store on create, never changes
/// - `created_at` / `updated_at`: set by the store only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CatalogItem {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Client-supplied fields, flattened into the JSON object.
    #[serde(flatten)]
    #[ts(flatten)]
    pub fields: ItemInput,

    /// When the item was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the item was last replaced.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl CatalogItem {
    /// Builds a freshly created item: both timestamps equal `now`.
    pub fn new(id: impl Into<String>, fields: ItemInput, now: DateTime<Utc>) -> Self {
        CatalogItem {
            id: id.into(),
            fields,
            created_at: now,
            updated_at: now,
        }
    }

    /// Title shortcut.
    #[inline]
    pub fn title(&self) -> &str {
        &self.fields.title
    }

    /// Projects the item down to its summary.
    pub fn summary(&self) -> ItemSummary {
        ItemSummary {
            id: self.id.clone(),
            title: self.fields.title.clone(),
            author: self.fields.author.clone(),
        }
    }
}

// =============================================================================
// Item Summary
// =============================================================================

/// Lightweight projection returned by the summary lookup.
///
/// Only these three fields are loaded from storage. It is a separate type so
/// that nothing downstream can mistake it for a fully hydrated item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemSummary {
    pub id: String,
    pub title: String,
    pub author: String,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_item() -> CatalogItem {
        let mut fields = ItemInput::new("Dune", "Frank Herbert", Money::from_cents(1999));
        fields.year = Some(1965);
        fields.pages = Some(0);
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        CatalogItem::new("id-1", fields, now)
    }

    #[test]
    fn test_new_item_has_equal_timestamps() {
        let item = sample_item();
        assert_eq!(item.created_at, item.updated_at);
    }

    #[test]
    fn test_absent_optionals_are_omitted_from_json() {
        let json = serde_json::to_value(sample_item()).unwrap();
        let obj = json.as_object().unwrap();

        assert!(!obj.contains_key("original_price"));
        assert!(!obj.contains_key("category"));
        // Some(0) is a real value and must survive.
        assert_eq!(obj["pages"], 0);
        assert_eq!(obj["price"], 19.99);
        assert_eq!(obj["id"], "id-1");
        assert_eq!(obj["title"], "Dune");
    }

    #[test]
    fn test_input_defaults_for_missing_fields() {
        let input: ItemInput =
            serde_json::from_str(r#"{"title":"Air Force 1","author":"Nike","price":3500}"#)
                .unwrap();

        assert_eq!(input.price.cents(), 350000);
        assert_eq!(input.discount, 0);
        assert_eq!(input.pages, None);
        assert_eq!(input.original_price, None);
        assert!(!input.is_new);
    }

    #[test]
    fn test_normalized_collapses_blank_text() {
        let mut input = ItemInput::new("  Dune ", " Frank Herbert", Money::zero());
        input.category = Some("   ".to_string());
        input.description = Some(" classic ".to_string());

        let input = input.normalized();
        assert_eq!(input.title, "Dune");
        assert_eq!(input.author, "Frank Herbert");
        assert_eq!(input.category, None);
        assert_eq!(input.description.as_deref(), Some("classic"));
    }

    #[test]
    fn test_summary_projection() {
        let summary = sample_item().summary();
        assert_eq!(summary.id, "id-1");
        assert_eq!(summary.author, "Frank Herbert");
    }
}
