//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── CoreError        - Pricing and cart rule violations               │
//! │  └── ValidationError  - Catalog record / input validation failures     │
//! │                                                                         │
//! │  checkout-cli errors (app)                                             │
//! │  ├── ConfigError      - Bad environment values                         │
//! │  └── anyhow::Error    - What the terminal sees                         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → anyhow → stderr                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (code, field, etc.)
//! 3. Errors are enum variants, never String

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A product code is not in the catalog.
    ///
    /// ## When This Occurs
    /// Only under [`UnknownCodePolicy::Reject`](crate::pricing::UnknownCodePolicy).
    /// The default policy skips unknown codes instead.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Tried to remove a code the cart does not hold.
    #[error("Product {0} not in cart")]
    NotInCart(String),

    /// A quantity below one reached the pricing engine.
    ///
    /// The cart never holds such a line, so this is a caller bug.
    #[error("Quantity must be at least 1, got {0}")]
    InvalidQuantity(i64),

    /// A line or cart total does not fit in an `i64` of cents.
    ///
    /// Catalog validation caps prices, so only hand-built products with
    /// extreme prices or quantities get here.
    #[error("Amount out of range while pricing {0}")]
    AmountOverflow(String),

    /// A catalog record failed validation.
    #[error("Invalid product record '{code}': {source}")]
    InvalidRecord {
        code: String,
        #[source]
        source: ValidationError,
    },

    /// Catalog or request JSON could not be parsed.
    ///
    /// ## When This Occurs
    /// - Not JSON at all
    /// - A price that is not a decimal number ("fifty", "12.345")
    #[error("Malformed data: {0}")]
    MalformedData(#[from] serde_json::Error),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised while turning inbound catalog records into domain values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Monetary value outside `0..=max`.
    #[error("{field} must be between $0.00 and {max}")]
    AmountOutOfRange { field: String, max: Money },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g. a price with three decimals).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g. two products sharing a code).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
