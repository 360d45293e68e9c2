//! # Domain Types
//!
//! Core domain types used throughout the storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌───────────────────┐   ┌─────────────────┐     │
//! │  │    Product      │   │   DiscountTier    │   │   LineTotal     │     │
//! │  │  ─────────────  │   │  ───────────────  │   │  ─────────────  │     │
//! │  │  code           │──►│  threshold_qty    │   │  regular_price  │     │
//! │  │  name           │0..1  bundle_price    │   │  discount_amount│     │
//! │  │  unit_price     │   └───────────────────┘   │  final_price    │     │
//! │  │  discount       │                           └─────────────────┘     │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## One Tier Per Product
//! Catalog records may list several discount tiers, but pricing only ever
//! honours the first one. The type models that directly: `Option`, not `Vec`.
//! Multi-tier pricing is not supported, on purpose.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Discount Tier
// =============================================================================

/// Bulk pricing: `threshold_quantity` units cost `bundle_price` together.
///
/// ## Example
/// "3 for $130.00" is `threshold_quantity = 3`, `bundle_price = 13000` cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountTier {
    /// Units per bundle (always >= 1).
    pub threshold_quantity: i64,

    /// Price of one full bundle.
    pub bundle_price: Money,
}

impl DiscountTier {
    /// Creates a tier. Values are checked by catalog validation, not here.
    #[inline]
    pub const fn new(threshold_quantity: i64, bundle_price: Money) -> Self {
        DiscountTier {
            threshold_quantity,
            bundle_price,
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available for purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Short unique identifier ("A", "B", ...). Cart lines reference this.
    pub code: String,

    /// Display name. Irrelevant to pricing.
    pub name: String,

    /// Price of a single unit.
    pub unit_price: Money,

    /// Optional bulk discount.
    pub discount: Option<DiscountTier>,
}

impl Product {
    /// Creates a product without a discount tier.
    pub fn new(code: impl Into<String>, name: impl Into<String>, unit_price: Money) -> Self {
        Product {
            code: code.into(),
            name: name.into(),
            unit_price,
            discount: None,
        }
    }

    /// Attaches a discount tier.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::{DiscountTier, Money, Product};
    ///
    /// let a = Product::new("A", "Product A", Money::from_cents(5000))
    ///     .with_discount(DiscountTier::new(3, Money::from_cents(13000)));
    /// assert_eq!(a.discount.unwrap().threshold_quantity, 3);
    /// ```
    pub fn with_discount(mut self, tier: DiscountTier) -> Self {
        self.discount = Some(tier);
        self
    }

    /// Regular (undiscounted) price of `quantity` units.
    ///
    /// ## Errors
    /// [`CoreError::AmountOverflow`] when the product does not fit in cents.
    #[inline]
    pub fn regular_price(&self, quantity: i64) -> CoreResult<Money> {
        self.unit_price
            .checked_mul_quantity(quantity)
            .ok_or_else(|| CoreError::AmountOverflow(self.code.clone()))
    }
}

// =============================================================================
// Pricing Results
// =============================================================================

/// Price breakdown for one cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineTotal {
    /// Units in the line.
    pub quantity: i64,

    /// `quantity × unit_price`.
    pub regular_price: Money,

    /// Savings from the discount tier (0 ≤ discount ≤ regular).
    pub discount_amount: Money,

    /// `regular_price − discount_amount`.
    pub final_price: Money,
}

/// Totals for a whole cart.
///
/// `lines` is keyed by product code in sorted order, so two calls with the
/// same inputs serialize byte-for-byte identically.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Per-line breakdown for every priced line.
    pub lines: BTreeMap<String, LineTotal>,

    /// Sum of regular prices.
    pub subtotal: Money,

    /// Sum of discounts.
    pub total_discount: Money,

    /// `subtotal − total_discount`.
    pub grand_total: Money,

    /// Cart codes missing from the catalog, excluded from every total.
    pub skipped_codes: Vec<String>,
}

impl CartTotals {
    /// Whether every cart line was priced.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.skipped_codes.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_price() {
        let product = Product::new("B", "Product B", Money::from_cents(3000));
        assert_eq!(product.regular_price(4).unwrap().cents(), 12000);
        assert!(matches!(
            product.regular_price(i64::MAX),
            Err(CoreError::AmountOverflow(code)) if code == "B"
        ));
        assert!(product.discount.is_none());
    }

    #[test]
    fn test_with_discount() {
        let product = Product::new("A", "Product A", Money::from_cents(5000))
            .with_discount(DiscountTier::new(3, Money::from_cents(13000)));
        assert_eq!(
            product.discount,
            Some(DiscountTier::new(3, Money::from_cents(13000)))
        );
    }

    #[test]
    fn test_cart_totals_serializes_camel_case() {
        let totals = CartTotals::default();
        let json = serde_json::to_value(&totals).unwrap();
        assert!(json.get("grandTotal").is_some());
        assert!(json.get("skippedCodes").is_some());
        assert!(totals.is_complete());
    }

    #[test]
    fn test_line_total_amounts_serialize_in_major_units() {
        let line = LineTotal {
            quantity: 5,
            regular_price: Money::from_cents(25000),
            discount_amount: Money::from_cents(2000),
            final_price: Money::from_cents(23000),
        };

        let json = serde_json::to_value(line).unwrap();
        assert_eq!(json["quantity"], 5);
        assert_eq!(json["regularPrice"], 250.0);
        assert_eq!(json["finalPrice"], 230.0);

        let back: LineTotal = serde_json::from_value(json).unwrap();
        assert_eq!(back, line);
    }
}
