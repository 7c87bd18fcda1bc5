//! # Catalog Filters
//!
//! The value object describing "which items, in which order, how many".
//!
//! ## Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    ItemFilter → result set                              │
//! │                                                                         │
//! │   year        = 2020        ─┐                                          │
//! │   category    = "Fiction"    │                                          │
//! │   keyword     ~ "dune"       ├── AND ──► matching rows                  │
//! │   rating     >= min_rating   │               │                          │
//! │   discount   >= min_discount │               ▼                          │
//! │   is_new      = true        ─┘         ORDER BY sort, id                │
//! │                                              │                          │
//! │   (unset fields add no constraint)           ▼                          │
//! │                                          LIMIT limit                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The keyword is the only filter with an internal OR: it matches title,
//! author or description, case-insensitively, as a substring.
//!
//! Turning a filter into SQL is the database layer's job; this module only
//! defines and validates it.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::validation::{
    validate_discount, validate_keyword, validate_limit, validate_rating, validate_year,
    ValidationResult,
};
use crate::{FEATURED_DEFAULT_LIMIT, FEATURED_MIN_RATING, NEW_ARRIVALS_DEFAULT_LIMIT};

// =============================================================================
// Sort Order
// =============================================================================

/// Result ordering. Every variant ends with `id ASC` so the order is total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ItemSort {
    /// `created_at ASC` - insertion order for plain listings.
    #[default]
    Catalog,
    /// `rating DESC, title ASC` - keyword search.
    Relevance,
    /// `created_at DESC` - new arrivals.
    Newest,
    /// `rating DESC, reviews_count DESC` - featured view.
    Featured,
    /// `discount DESC, rating DESC` - discounted view.
    Discount,
}

// =============================================================================
// Item Filter
// =============================================================================

/// A conjunctive filter over catalog items.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub category: Option<String>,
    /// Case-insensitive substring over title, author and description.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub keyword: Option<String>,
    /// Inclusive rating floor.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub min_rating: Option<f64>,
    /// Inclusive discount floor, in percent.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub min_discount: Option<u32>,
    /// Only items flagged `is_new`.
    #[serde(default)]
    pub only_new: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub sort: ItemSort,
}

impl ItemFilter {
    /// Adds an exact year constraint.
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Adds an exact category constraint.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Adds a keyword constraint.
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    /// Adds a rating floor.
    pub fn with_min_rating(mut self, rating: f64) -> Self {
        self.min_rating = Some(rating);
        self
    }

    /// Adds a discount floor.
    pub fn with_min_discount(mut self, discount: u32) -> Self {
        self.min_discount = Some(discount);
        self
    }

    /// Restricts to new arrivals.
    pub fn only_new(mut self) -> Self {
        self.only_new = true;
        self
    }

    /// Truncates the result after ordering.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the ordering.
    pub fn sorted_by(mut self, sort: ItemSort) -> Self {
        self.sort = sort;
        self
    }

    /// Validates the filter and returns it with the keyword trimmed.
    ///
    /// ## Rules
    /// - keyword: present means non-empty (see `validate_keyword`)
    /// - year: 1000..=2100
    /// - min_rating: 0.0..=5.0
    /// - min_discount: 0..=100
    /// - limit: 1..=100
    /// - a plain `Catalog` listing that carries a keyword is ordered by
    ///   `Relevance`, the same as a search
    pub fn validate(mut self) -> ValidationResult<Self> {
        if let Some(keyword) = self.keyword.take() {
            self.keyword = Some(validate_keyword(&keyword)?);
            if self.sort == ItemSort::Catalog {
                self.sort = ItemSort::Relevance;
            }
        }

        if let Some(year) = self.year {
            validate_year(year)?;
        }

        if let Some(rating) = self.min_rating {
            validate_rating("min_rating", rating)?;
        }

        if let Some(discount) = self.min_discount {
            validate_discount(discount)?;
        }

        if let Some(limit) = self.limit {
            validate_limit(limit)?;
        }

        Ok(self)
    }
}

// =============================================================================
// Derived Views
// =============================================================================

/// A named, pre-defined filter + sort combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ItemView {
    /// Items flagged new, newest first, 5 by default.
    New,
    /// Rating >= 4.0, best rated first, 10 by default.
    Featured,
    /// Discount > 0, deepest discount first, unlimited by default.
    Discounted,
}

impl ItemView {
    /// Builds the filter for this view. `limit` overrides the default.
    ///
    /// ## Example
    /// ```rust
    /// use shelf_core::filter::{ItemSort, ItemView};
    ///
    /// let filter = ItemView::New.filter(Some(3));
    /// assert!(filter.only_new);
    /// assert_eq!(filter.sort, ItemSort::Newest);
    /// assert_eq!(filter.limit, Some(3));
    /// ```
    pub fn filter(self, limit: Option<u32>) -> ItemFilter {
        match self {
            ItemView::New => ItemFilter::default()
                .only_new()
                .sorted_by(ItemSort::Newest)
                .with_limit(limit.unwrap_or(NEW_ARRIVALS_DEFAULT_LIMIT)),
            ItemView::Featured => ItemFilter::default()
                .with_min_rating(FEATURED_MIN_RATING)
                .sorted_by(ItemSort::Featured)
                .with_limit(limit.unwrap_or(FEATURED_DEFAULT_LIMIT)),
            ItemView::Discounted => {
                let filter = ItemFilter::default()
                    .with_min_discount(1)
                    .sorted_by(ItemSort::Discount);
                match limit {
                    Some(limit) => filter.with_limit(limit),
                    None => filter,
                }
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
