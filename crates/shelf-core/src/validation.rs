//! # Validation Module
//!
//! Input validation for catalog writes and catalog queries.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP extractors (axum)                                       │
//! │  ├── Type validation (JSON / query-string deserialization)             │
//! │  └── Malformed body → 400 before any service code runs                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Required text, ranges, lengths                                    │
//! │  └── Runs before the first statement is sent to the store              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite CHECK constraints)                          │
//! │  └── Last line for anything that slipped through                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shelf_core::validation::{validate_item, validate_keyword};
//! use shelf_core::{ItemInput, Money};
//!
//! let input = ItemInput::new("Dune", "Frank Herbert", Money::from_cents(1999));
//! assert!(validate_item(&input).is_ok());
//!
//! assert!(validate_keyword("").is_err());
//! ```

use crate::error::ValidationError;
use crate::types::ItemInput;
use crate::{MAX_DISCOUNT_PERCENT, MAX_ITEM_YEAR, MAX_LIST_LIMIT, MAX_RATING, MIN_ITEM_YEAR};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_NAME_LEN: usize = 200;
const MAX_ISBN_LEN: usize = 20;
const MAX_CATEGORY_LEN: usize = 100;
const MAX_KEYWORD_LEN: usize = 100;

// =============================================================================
// Item Validation
// =============================================================================

/// Validates every client-supplied field of an item.
///
/// ## Rules
/// - `title`, `author`: non-empty after trimming, at most 200 characters
/// - `year`: 1000..=2100 when present
/// - `price`, `original_price`: >= 0
/// - `discount`: 0..=100
/// - `rating`: finite, 0.0..=5.0
/// - `isbn`: at most 20 characters, `category`: at most 100 characters
///
/// Stops at the first violation.
pub fn validate_item(input: &ItemInput) -> ValidationResult<()> {
    validate_required_text("title", &input.title, MAX_NAME_LEN)?;
    validate_required_text("author", &input.author, MAX_NAME_LEN)?;

    if let Some(isbn) = &input.isbn {
        validate_max_len("isbn", isbn, MAX_ISBN_LEN)?;
    }

    if let Some(category) = &input.category {
        validate_max_len("category", category, MAX_CATEGORY_LEN)?;
    }

    if let Some(year) = input.year {
        validate_year(year)?;
    }

    if input.price.is_negative() {
        return Err(ValidationError::out_of_range("price", 0, i64::MAX));
    }

    if input.original_price.is_some_and(|p| p.is_negative()) {
        return Err(ValidationError::out_of_range("original_price", 0, i64::MAX));
    }

    validate_discount(input.discount)?;
    validate_rating("rating", input.rating)?;

    Ok(())
}

fn validate_required_text(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::required(field));
    }

    validate_max_len(field, value, max)
}

fn validate_max_len(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a publication/release year.
pub fn validate_year(year: i32) -> ValidationResult<()> {
    if !(MIN_ITEM_YEAR..=MAX_ITEM_YEAR).contains(&year) {
        return Err(ValidationError::out_of_range(
            "year",
            MIN_ITEM_YEAR,
            MAX_ITEM_YEAR,
        ));
    }

    Ok(())
}

/// Validates a rating (or rating floor) on the 0.0 - 5.0 scale.
///
/// ## Example
/// ```rust
/// use shelf_core::validation::validate_rating;
///
/// assert!(validate_rating("rating", 4.5).is_ok());
/// assert!(validate_rating("rating", 5.1).is_err());
/// assert!(validate_rating("rating", f64::NAN).is_err());
/// ```
pub fn validate_rating(field: &str, rating: f64) -> ValidationResult<()> {
    if !rating.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    if !(0.0..=MAX_RATING).contains(&rating) {
        return Err(ValidationError::out_of_range(field, 0.0, MAX_RATING));
    }

    Ok(())
}

/// Validates a discount percentage.
pub fn validate_discount(discount: u32) -> ValidationResult<()> {
    if discount > MAX_DISCOUNT_PERCENT {
        return Err(ValidationError::out_of_range(
            "discount",
            0,
            MAX_DISCOUNT_PERCENT,
        ));
    }

    Ok(())
}

/// Validates a listing limit.
///
/// ## Rules
/// - Must be at least 1
/// - Must not exceed MAX_LIST_LIMIT (100)
pub fn validate_limit(limit: u32) -> ValidationResult<()> {
    if limit == 0 || limit > MAX_LIST_LIMIT {
        return Err(ValidationError::out_of_range("limit", 1, MAX_LIST_LIMIT));
    }

    Ok(())
}

// =============================================================================
// Query Validators
// =============================================================================

/// Validates a search keyword.
///
/// ## Rules
/// - Must not be empty or whitespace-only (an empty keyword is an error,
///   never "match everything")
/// - Maximum 100 characters
/// - No control characters
///
/// ## Returns
/// The trimmed keyword.
pub fn validate_keyword(keyword: &str) -> ValidationResult<String> {
    let keyword = keyword.trim();

    if keyword.is_empty() {
        return Err(ValidationError::required("keyword"));
    }

    validate_max_len("keyword", keyword, MAX_KEYWORD_LEN)?;

    if keyword.chars().any(char::is_control) {
        return Err(ValidationError::invalid_format(
            "keyword",
            "control characters are not allowed",
        ));
    }

    Ok(keyword.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================
