//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The storefront UI priced carts with JavaScript numbers:                │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A UI estimate and a checkout total computed that way can disagree      │
//! │  by a fraction of a cent for the same cart.                             │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    "130.00" is parsed exactly into 13000 cents                          │
//! │    Every sum, product and difference is exact                           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::money::Money;
//!
//! let price = Money::from_cents(5000); // $50.00
//! let three: Money = price * 3;        // $150.00
//! let bundle = Money::parse_decimal("130.00").unwrap();
//! assert_eq!((three - bundle).cents(), 2000);
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Sub};
use ts_rs::TS;

use crate::error::ValidationError;

/// Number of minor units in one major unit.
const MINOR_PER_MAJOR: i64 = 100;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: differences such as `regular - charged` stay in range
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Serializes in major units**: `230.0` on every wire type, read back
///   exactly from a number or a decimal string
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Product.unit_price ──┬──► LineTotal.regular_price ──► CartTotals      │
/// │                       │                                                 │
/// │  DiscountTier.bundle_price ──► LineTotal.discount_amount               │
/// │                                                                         │
/// │  CartTotals.grand_total ──► CheckoutResponse.total_price               │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, TS)]
#[ts(export)]
pub struct Money(#[ts(type = "number")] i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (dollars and cents).
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let price = Money::from_major_minor(130, 0); // $130.00
    /// assert_eq!(price.cents(), 13000);
    ///
    /// let negative = Money::from_major_minor(-5, 50); // -$5.50
    /// assert_eq!(negative.cents(), -550);
    /// ```
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * MINOR_PER_MAJOR - minor)
        } else {
            Money(major * MINOR_PER_MAJOR + minor)
        }
    }

    /// Parses a decimal amount such as `"130.00"`, `"50"` or `"19.9"`.
    ///
    /// ## Rules
    /// - Optional leading `-`
    /// - Digits, then optionally `.` and fraction digits
    /// - Fraction digits past the second must be zeros (`"1.500"` is fine,
    ///   `"1.505"` is not: no silent rounding)
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// assert_eq!(Money::parse_decimal("130.00").unwrap().cents(), 13000);
    /// assert_eq!(Money::parse_decimal("19.9").unwrap().cents(), 1990);
    /// assert!(Money::parse_decimal("12.345").is_err());
    /// assert!(Money::parse_decimal("abc").is_err());
    /// ```
    pub fn parse_decimal(input: &str) -> Result<Money, ValidationError> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "amount".to_string(),
            reason: format!("'{}' {}", input, reason),
        };

        let text = input.trim();
        let (negative, unsigned) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };

        let (whole, fraction) = match unsigned.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (unsigned, ""),
        };

        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("is not a decimal number"));
        }
        if !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("is not a decimal number"));
        }
        if fraction.len() > 2 && fraction[2..].bytes().any(|b| b != b'0') {
            return Err(invalid("has more than two decimal places"));
        }

        let mut minor = 0;
        for (i, digit) in fraction.bytes().take(2).enumerate() {
            let place = if i == 0 { 10 } else { 1 };
            minor += i64::from(digit - b'0') * place;
        }

        let cents = whole
            .parse::<i64>()
            .ok()
            .and_then(|major| major.checked_mul(MINOR_PER_MAJOR))
            .and_then(|cents| cents.checked_add(minor))
            .ok_or_else(|| invalid("is too large"))?;

        Ok(Money(if negative { -cents } else { cents }))
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / MINOR_PER_MAJOR
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % MINOR_PER_MAJOR).abs()
    }

    /// Returns the amount in major units as a float.
    ///
    /// Only for wire formats that demand a JSON number (the checkout
    /// response). Never feed the result back into arithmetic.
    #[inline]
    pub fn to_major_f64(&self) -> f64 {
        self.0 as f64 / MINOR_PER_MAJOR as f64
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity, `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(5000); // $50.00
    /// assert_eq!(unit_price.checked_mul_quantity(3), Some(Money::from_cents(15000)));
    /// assert_eq!(unit_price.checked_mul_quantity(i64::MAX), None);
    /// ```
    #[inline]
    pub const fn checked_mul_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Adds two amounts, `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Subtracts `other`, `None` on overflow.
    #[inline]
    pub const fn checked_sub(&self, other: Money) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }
}

// =============================================================================
// Decimal Wire Format
// =============================================================================

/// An amount as it arrives in JSON: a number (`50.0`) or a decimal string
/// (`"130.00"`).
#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Text(String),
    Number(serde_json::Number),
}

/// Reads a decimal amount.
///
/// Numbers go through their shortest decimal representation, so `19.99`
/// becomes 1999 cents rather than whatever the nearest `f64` rounds to.
impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = match RawAmount::deserialize(deserializer)? {
            RawAmount::Text(text) => text,
            RawAmount::Number(number) => number.to_string(),
        };
        Money::parse_decimal(&text).map_err(serde::de::Error::custom)
    }
}

/// Writes a JSON number in major units (`23000` cents → `230.0`).
impl Serialize for Money {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(self.to_major_f64())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// For logs and the CLI text receipt. Localised display belongs to the UI.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Multiplication by i64 (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
