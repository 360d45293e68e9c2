//! # Validation Module
//!
//! Input validation for catalog records and cart quantities.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Deserialization (serde)                                      │
//! │  ├── Shape of the JSON record                                          │
//! │  └── Decimal amounts parsed exactly (Money's Deserialize impl)         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Codes, names, prices, thresholds                                  │
//! │  └── Quantities entering a cart                                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Pricing engine                                               │
//! │  └── Trusts validated values, rejects quantity < 1                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::validation::{validate_code, validate_quantity};
//!
//! validate_code("A").unwrap();
//! validate_quantity(5).unwrap();
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_CODE_LENGTH, MAX_ITEM_QUANTITY, MAX_PRICE_CENTS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum length of a product name.
const MAX_NAME_LENGTH: usize = 100;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product code.
///
/// ## Rules
/// - Must not be empty
/// - At most `MAX_CODE_LENGTH` characters
/// - No whitespace
///
/// Codes are compared byte for byte everywhere; no case folding happens here.
///
/// ## Example
/// ```rust
/// use storefront_core::validation::validate_code;
///
/// assert!(validate_code("A").is_ok());
/// assert!(validate_code("").is_err());
/// assert!(validate_code("A B").is_err());
/// ```
pub fn validate_code(code: &str) -> ValidationResult<()> {
    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "code".to_string(),
        });
    }

    if code.chars().count() > MAX_CODE_LENGTH {
        return Err(ValidationError::TooLong {
            field: "code".to_string(),
            max: MAX_CODE_LENGTH,
        });
    }

    if code.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidFormat {
            field: "code".to_string(),
            reason: "must not contain whitespace".to_string(),
        });
    }

    Ok(())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be blank
/// - At most 100 characters (the catalog's column width)
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0). A line at zero is removed, never kept.
/// - Must not exceed `MAX_ITEM_QUANTITY` (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items, free bundles)
/// - At most `MAX_PRICE_CENTS` ($9999.99)
///
/// ## Example
/// ```rust
/// use storefront_core::money::Money;
/// use storefront_core::validation::validate_price;
///
/// assert!(validate_price("unit_price", Money::from_cents(5000)).is_ok());
/// assert!(validate_price("unit_price", Money::zero()).is_ok());
/// assert!(validate_price("unit_price", Money::from_cents(-1)).is_err());
/// assert!(validate_price("unit_price", Money::from_cents(1_000_000)).is_err());
/// ```
pub fn validate_price(field: &str, price: Money) -> ValidationResult<()> {
    if price.is_negative() || price.cents() > MAX_PRICE_CENTS {
        return Err(ValidationError::AmountOutOfRange {
            field: field.to_string(),
            max: Money::from_cents(MAX_PRICE_CENTS),
        });
    }

    Ok(())
}

/// Validates a discount tier threshold.
///
/// ## Rules
/// - Must be at least 1 (a bundle of zero units is meaningless)
pub fn validate_threshold(threshold: i64) -> ValidationResult<()> {
    if threshold < 1 {
        return Err(ValidationError::OutOfRange {
            field: "discount quantity".to_string(),
            min: 1,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_code() {
        assert!(validate_code("A").is_ok());
        assert!(validate_code("SKU-1").is_ok());

        assert!(validate_code("").is_err());
        assert!(validate_code(" ").is_err());
        assert!(validate_code("A\tB").is_err());
        assert!(validate_code(&"A".repeat(MAX_CODE_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Product A").is_ok());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"A".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(MAX_ITEM_QUANTITY).is_ok());
        assert!(validate_quantity(MAX_ITEM_QUANTITY + 1).is_err());
        assert!(validate_quantity(i64::MAX).is_err());

        assert_eq!(
            validate_quantity(0),
            Err(ValidationError::MustBePositive {
                field: "quantity".to_string()
            })
        );
        assert!(validate_quantity(-1).is_err());
    }

    #[test]
    fn test_validate_price_bounds() {
        assert!(validate_price("unit_price", Money::zero()).is_ok());
        assert!(validate_price("unit_price", Money::from_cents(MAX_PRICE_CENTS)).is_ok());

        assert_eq!(
            validate_price("unit_price", Money::from_cents(MAX_PRICE_CENTS + 1)),
            Err(ValidationError::AmountOutOfRange {
                field: "unit_price".to_string(),
                max: Money::from_cents(999_999),
            })
        );
        assert!(validate_price("discount_price", Money::from_cents(-1)).is_err());
    }

    #[test]
    fn test_validate_threshold() {
        assert!(validate_threshold(1).is_ok());
        assert!(validate_threshold(3).is_ok());
        assert!(validate_threshold(0).is_err());
        assert!(validate_threshold(-2).is_err());
    }
}
