//! # Error Types
//!
//! Domain-specific error types for shelf-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shelf-core errors (this file)                                         │
//! │  ├── CoreError        - Domain errors (not found, already reserved)    │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  shelf-db errors (separate crate)                                      │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  shelf-api errors (in app)                                             │
//! │  └── ApiError         - What HTTP clients see (status + JSON body)     │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → ApiError → Client       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, ID, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to exactly one HTTP status

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Catalog item cannot be found.
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// Inventory unit cannot be found.
    #[error("Inventory unit not found: {0}")]
    UnitNotFound(String),

    /// The inventory unit was reserved by an earlier request.
    ///
    /// ## User Workflow
    /// ```text
    /// reserve(id="1")  ──► Available → Reserved  ──► 200
    ///      │
    ///      ▼
    /// reserve(id="1")  ──► AlreadyReserved       ──► 409
    /// ```
    #[error("Inventory unit {0} is already reserved")]
    AlreadyReserved(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when client input doesn't meet requirements.
/// They are always raised before anything is written.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: String, max: String },

    /// Invalid format (e.g., NaN rating, unparsable query value).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates a `Required` error for the given field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    /// Creates an `OutOfRange` error with displayable bounds.
    pub fn out_of_range(
        field: impl Into<String>,
        min: impl ToString,
        max: impl ToString,
    ) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min: min.to_string(),
            max: max.to_string(),
        }
    }

    /// Creates an InvalidFormat error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::AlreadyReserved("1".to_string());
        assert_eq!(err.to_string(), "Inventory unit 1 is already reserved");

        let err = CoreError::ItemNotFound("abc".to_string());
        assert_eq!(err.to_string(), "Item not found: abc");
    }

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(
            ValidationError::required("title").to_string(),
            "title is required"
        );
        assert_eq!(
            ValidationError::out_of_range("rating", 0.0, 5.0).to_string(),
            "rating must be between 0 and 5"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::required("keyword").into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
