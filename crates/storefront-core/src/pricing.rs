//! # Pricing Engine
//!
//! Turns a catalog and a cart into discounted totals.
//!
//! ## The Discount Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Product A: $50.00 each, "3 for $130.00"        Cart: A × 5             │
//! │                                                                         │
//! │  full_bundles = 5 / 3 = 1      remainder = 5 % 3 = 2                    │
//! │                                                                         │
//! │  charged  = 1 × $130.00 + 2 × $50.00 = $230.00                          │
//! │  regular  = 5 × $50.00               = $250.00                          │
//! │  discount = regular − charged        =  $20.00                          │
//! │                                                                         │
//! │  Savings accrue per COMPLETE bundle; leftover units pay unit price.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything here is a pure function of its arguments. The same functions
//! produce the UI estimate and the checkout total (see [`crate::checkout`]),
//! so the two cannot drift apart.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use ts_rs::TS;

use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{CartTotals, LineTotal, Product};

// =============================================================================
// Options
// =============================================================================

/// What to do with a code the catalog does not know.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum UnknownCodePolicy {
    /// Skip it. Carts can hold stale codes after a catalog reload.
    #[default]
    Ignore,
    /// Fail with [`CoreError::ProductNotFound`].
    Reject,
}

impl FromStr for UnknownCodePolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ignore" => Ok(UnknownCodePolicy::Ignore),
            "reject" => Ok(UnknownCodePolicy::Reject),
            other => Err(ValidationError::InvalidFormat {
                field: "unknown code policy".to_string(),
                reason: format!("'{}' is not one of: ignore, reject", other),
            }),
        }
    }
}

/// Knobs for the `*_with` variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PricingOptions {
    pub unknown_codes: UnknownCodePolicy,
}

impl PricingOptions {
    /// Options that reject unknown codes.
    pub const fn strict() -> Self {
        PricingOptions {
            unknown_codes: UnknownCodePolicy::Reject,
        }
    }
}

// =============================================================================
// Line Pricing
// =============================================================================

/// Discount earned by buying `quantity` units of `product`.
///
/// ## Rules
/// - No tier, or fewer units than the threshold: zero
/// - Otherwise `full_bundles × (threshold × unit_price − bundle_price)`
/// - Never negative: a "bundle" that costs more than its units bought
///   singly earns nothing
///
/// ## Errors
/// - [`CoreError::InvalidQuantity`] for `quantity < 1`
/// - [`CoreError::AmountOverflow`] when an amount leaves the `i64` range
///
/// ## Example
/// ```rust
/// use storefront_core::{pricing::discount_for, Catalog};
///
/// let catalog = Catalog::sample();
/// let a = catalog.get("A").unwrap(); // $50.00, 3 for $130.00
///
/// assert_eq!(discount_for(a, 2).unwrap().cents(), 0);
/// assert_eq!(discount_for(a, 3).unwrap().cents(), 2000);
/// assert_eq!(discount_for(a, 6).unwrap().cents(), 4000);
/// ```
pub fn discount_for(product: &Product, quantity: i64) -> CoreResult<Money> {
    ensure_quantity(quantity)?;
    bundle_discount(product, quantity)
}

/// Regular price, discount and final price for `quantity` units.
///
/// ## Errors
/// Same as [`discount_for`].
pub fn line_total(product: &Product, quantity: i64) -> CoreResult<LineTotal> {
    ensure_quantity(quantity)?;
    price_line(product, quantity)
}

fn ensure_quantity(quantity: i64) -> CoreResult<()> {
    if quantity < 1 {
        return Err(CoreError::InvalidQuantity(quantity));
    }
    Ok(())
}

/// Caller guarantees `quantity >= 1`.
fn bundle_discount(product: &Product, quantity: i64) -> CoreResult<Money> {
    let Some(tier) = product.discount else {
        return Ok(Money::zero());
    };

    // A zero threshold only gets here by bypassing catalog validation.
    if tier.threshold_quantity < 1 || quantity < tier.threshold_quantity {
        return Ok(Money::zero());
    }

    let full_bundles = quantity / tier.threshold_quantity;
    let remainder = quantity % tier.threshold_quantity;

    let charged = tier
        .bundle_price
        .checked_mul_quantity(full_bundles)
        .zip(product.unit_price.checked_mul_quantity(remainder))
        .and_then(|(bundles, rest)| bundles.checked_add(rest));
    let discount = charged.and_then(|charged| {
        product
            .regular_price(quantity)
            .ok()
            .and_then(|regular| regular.checked_sub(charged))
    });

    discount
        .map(|discount| discount.max(Money::zero()))
        .ok_or_else(|| overflow(&product.code))
}

/// Caller guarantees `quantity >= 1`.
fn price_line(product: &Product, quantity: i64) -> CoreResult<LineTotal> {
    let regular_price = product.regular_price(quantity)?;
    let discount_amount = bundle_discount(product, quantity)?;
    let final_price = regular_price
        .checked_sub(discount_amount)
        .ok_or_else(|| overflow(&product.code))?;

    Ok(LineTotal {
        quantity,
        regular_price,
        discount_amount,
        final_price,
    })
}

fn overflow(code: &str) -> CoreError {
    warn!(code, "Amount out of range while pricing");
    CoreError::AmountOverflow(code.to_string())
}

// =============================================================================
// Cart Pricing
// =============================================================================

/// Prices every cart line found in the catalog.
///
/// Lines whose code is missing from the catalog are left out of every total
/// and listed in [`CartTotals::skipped_codes`].
///
/// ## Errors
/// [`CoreError::AmountOverflow`] when a line or running total leaves the
/// `i64` range. A catalog loaded from records never gets there for carts
/// that fit in memory.
///
/// ## Example
/// ```rust
/// use storefront_core::{pricing::cart_totals, Cart, Catalog};
///
/// let totals = cart_totals(&Catalog::sample(), &Cart::from_codes(["A", "A", "A", "Z"])).unwrap();
/// assert_eq!(totals.subtotal.cents(), 15000);
/// assert_eq!(totals.total_discount.cents(), 2000);
/// assert_eq!(totals.grand_total.cents(), 13000);
/// assert_eq!(totals.skipped_codes, ["Z"]);
/// ```
pub fn cart_totals(catalog: &Catalog, cart: &Cart) -> CoreResult<CartTotals> {
    let mut totals = CartTotals::default();

    for (code, quantity) in cart.lines() {
        let Some(product) = catalog.get(code) else {
            debug!(code, quantity, "Cart line references unknown product, skipped");
            totals.skipped_codes.push(code.to_string());
            continue;
        };

        let line = price_line(product, quantity)?;
        totals.subtotal = totals
            .subtotal
            .checked_add(line.regular_price)
            .ok_or_else(|| overflow(code))?;
        totals.total_discount = totals
            .total_discount
            .checked_add(line.discount_amount)
            .ok_or_else(|| overflow(code))?;
        totals.lines.insert(code.to_string(), line);
    }

    totals.grand_total = totals
        .subtotal
        .checked_sub(totals.total_discount)
        .ok_or_else(|| overflow("cart"))?;
    Ok(totals)
}

/// [`cart_totals`] honouring [`PricingOptions`].
///
/// ## Errors
/// - Everything [`cart_totals`] returns
/// - Under [`UnknownCodePolicy::Reject`], the first unknown code (in code
///   order) as [`CoreError::ProductNotFound`]
pub fn cart_totals_with(
    catalog: &Catalog,
    cart: &Cart,
    options: &PricingOptions,
) -> CoreResult<CartTotals> {
    let totals = cart_totals(catalog, cart)?;

    if options.unknown_codes == UnknownCodePolicy::Reject {
        if let Some(code) = totals.skipped_codes.first() {
            return Err(CoreError::ProductNotFound(code.clone()));
        }
    }
    Ok(totals)
}

// =============================================================================
// Pattern Entry
// =============================================================================

/// Builds a fresh cart from a string where every character is one unit.
///
/// Characters that are not a product code are dropped. Matching is exact:
/// callers that want `"aab"` to mean `"AAB"` upper-case it first.
///
/// ## Example
/// ```rust
/// use storefront_core::{pricing::apply_pattern, Catalog};
///
/// let cart = apply_pattern(&Catalog::sample(), "AAB?a");
/// assert_eq!(cart.quantity("A"), 2);
/// assert_eq!(cart.quantity("B"), 1);
/// assert_eq!(cart.line_count(), 2);
/// ```
pub fn apply_pattern(catalog: &Catalog, pattern: &str) -> Cart {
    Cart::from_codes(pattern_codes(pattern).filter(|code| catalog.contains(code)))
}

/// [`apply_pattern`] honouring [`PricingOptions`].
///
/// ## Errors
/// Under [`UnknownCodePolicy::Reject`], the first unmatched character as
/// [`CoreError::ProductNotFound`].
pub fn apply_pattern_with(
    catalog: &Catalog,
    pattern: &str,
    options: &PricingOptions,
) -> CoreResult<Cart> {
    if options.unknown_codes == UnknownCodePolicy::Reject {
        if let Some(code) = pattern_codes(pattern).find(|code| !catalog.contains(code)) {
            return Err(CoreError::ProductNotFound(code));
        }
    }
    Ok(apply_pattern(catalog, pattern))
}

fn pattern_codes(pattern: &str) -> impl Iterator<Item = String> + '_ {
    pattern.chars().map(String::from)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DiscountTier;

    fn product_a() -> Product {
        Product::new("A", "Product A", Money::from_cents(5000))
            .with_discount(DiscountTier::new(3, Money::from_cents(13000)))
    }

    fn product_b_plain() -> Product {
        Product::new("B", "Product B", Money::from_cents(3000))
    }

    #[test]
    fn test_exact_bundle() {
        let line = line_total(&product_a(), 3).unwrap();
        assert_eq!(line.regular_price.cents(), 15000);
        assert_eq!(line.discount_amount.cents(), 2000);
        assert_eq!(line.final_price.cents(), 13000);
    }

    #[test]
    fn test_bundle_plus_remainder() {
        let line = line_total(&product_a(), 5).unwrap();
        assert_eq!(line.final_price.cents(), 23000);
        assert_eq!(line.discount_amount.cents(), 2000);
    }

    #[test]
    fn test_no_tier() {
        let line = line_total(&product_b_plain(), 4).unwrap();
        assert_eq!(line.regular_price.cents(), 12000);
        assert!(line.discount_amount.is_zero());
        assert_eq!(line.final_price.cents(), 12000);
    }

    #[test]
    fn test_below_threshold() {
        assert!(discount_for(&product_a(), 1).unwrap().is_zero());
        assert!(discount_for(&product_a(), 2).unwrap().is_zero());
    }

    #[test]
    fn test_multiple_bundles() {
        // 7 = 2 bundles + 1 → 2 × $130 + $50 = $310
        let line = line_total(&product_a(), 7).unwrap();
        assert_eq!(line.final_price.cents(), 31000);
        assert_eq!(line.discount_amount.cents(), 4000);
    }

    #[test]
    fn test_expensive_bundle_earns_nothing() {
        let product = Product::new("X", "Odd deal", Money::from_cents(100))
            .with_discount(DiscountTier::new(2, Money::from_cents(250)));
        assert!(discount_for(&product, 4).unwrap().is_zero());
        assert_eq!(line_total(&product, 4).unwrap().final_price.cents(), 400);
    }

    #[test]
    fn test_free_bundle() {
        let product = Product::new("F", "Freebie", Money::from_cents(100))
            .with_discount(DiscountTier::new(2, Money::zero()));
        let line = line_total(&product, 5).unwrap();
        assert_eq!(line.discount_amount.cents(), 400);
        assert_eq!(line.final_price.cents(), 100);
    }

    #[test]
    fn test_zero_threshold_is_ignored() {
        let product = Product::new("Q", "Broken", Money::from_cents(100))
            .with_discount(DiscountTier::new(0, Money::zero()));
        assert!(discount_for(&product, 3).unwrap().is_zero());
    }

    #[test]
    fn test_non_positive_quantity_fails_fast() {
        assert!(matches!(
            discount_for(&product_a(), 0),
            Err(CoreError::InvalidQuantity(0))
        ));
        assert!(matches!(
            line_total(&product_a(), -2),
            Err(CoreError::InvalidQuantity(-2))
        ));
    }

    #[test]
    fn test_overflowing_line_is_an_error() {
        let yacht = Product::new("Y", "Yacht", Money::from_cents(5_000_000_000_000_000_000));
        assert!(line_total(&yacht, 1).is_ok());
        assert!(matches!(
            line_total(&yacht, 2),
            Err(CoreError::AmountOverflow(code)) if code == "Y"
        ));

        let bundled = Product::new("B", "Bundled", Money::from_cents(1))
            .with_discount(DiscountTier::new(2, Money::from_cents(i64::MAX)));
        assert!(matches!(
            discount_for(&bundled, 4),
            Err(CoreError::AmountOverflow(_))
        ));
    }

    #[test]
    fn test_cart_totals_reports_overflow() {
        let catalog = Catalog::new([
            Product::new("X", "Jet", Money::from_cents(5_000_000_000_000_000_000)),
            Product::new("Y", "Yacht", Money::from_cents(5_000_000_000_000_000_000)),
        ])
        .unwrap();

        assert!(cart_totals(&catalog, &Cart::from_codes(["X"])).is_ok());
        assert!(matches!(
            cart_totals(&catalog, &Cart::from_codes(["X", "Y"])),
            Err(CoreError::AmountOverflow(code)) if code == "Y"
        ));
        assert!(matches!(
            cart_totals_with(&catalog, &Cart::from_codes(["Y", "Y"]), &PricingOptions::default()),
            Err(CoreError::AmountOverflow(_))
        ));
    }

    #[test]
    fn test_cart_totals_sums_lines() {
        let catalog = Catalog::sample();
        let cart = Cart::from_codes(["A", "A", "A", "B", "B", "C"]);

        let totals = cart_totals(&catalog, &cart).unwrap();
        // A: 150 − 20, B: 60 − 15, C: 20
        assert_eq!(totals.subtotal.cents(), 23000);
        assert_eq!(totals.total_discount.cents(), 3500);
        assert_eq!(totals.grand_total.cents(), 19500);
        assert_eq!(totals.lines.len(), 3);
        assert!(totals.is_complete());

        let sum_final: Money = totals.lines.values().map(|l| l.final_price).sum();
        assert_eq!(sum_final, totals.grand_total);
    }

    #[test]
    fn test_cart_totals_skips_unknown_codes() {
        let catalog = Catalog::sample();
        let cart = Cart::from_codes(["B", "Z"]);

        let totals = cart_totals(&catalog, &cart).unwrap();
        assert_eq!(totals.grand_total.cents(), 3000);
        assert_eq!(totals.skipped_codes, ["Z"]);
        assert!(!totals.lines.contains_key("Z"));
    }

    #[test]
    fn test_cart_totals_empty_cart() {
        let totals = cart_totals(&Catalog::sample(), &Cart::new()).unwrap();
        assert!(totals.grand_total.is_zero());
        assert!(totals.lines.is_empty());
    }

    #[test]
    fn test_cart_totals_with_reject() {
        let catalog = Catalog::sample();
        let cart = Cart::from_codes(["A", "Z", "Y"]);

        assert!(cart_totals_with(&catalog, &cart, &PricingOptions::default()).is_ok());
        assert!(matches!(
            cart_totals_with(&catalog, &cart, &PricingOptions::strict()),
            Err(CoreError::ProductNotFound(code)) if code == "Y"
        ));
    }

    #[test]
    fn test_apply_pattern() {
        let catalog = Catalog::sample();

        let cart = apply_pattern(&catalog, "AAB");
        assert_eq!(cart, Cart::from_codes(["A", "A", "B"]));

        // order does not matter, unknown characters vanish
        assert_eq!(apply_pattern(&catalog, "BxA A"), apply_pattern(&catalog, "AB"));
        assert!(apply_pattern(&catalog, "").is_empty());
    }

    #[test]
    fn test_apply_pattern_is_case_sensitive() {
        assert!(apply_pattern(&Catalog::sample(), "aab").is_empty());
    }

    #[test]
    fn test_apply_pattern_with_reject() {
        let catalog = Catalog::sample();
        assert!(apply_pattern_with(&catalog, "AB", &PricingOptions::strict()).is_ok());
        assert!(matches!(
            apply_pattern_with(&catalog, "AqB", &PricingOptions::strict()),
            Err(CoreError::ProductNotFound(code)) if code == "q"
        ));
        assert_eq!(
            apply_pattern_with(&catalog, "AqB", &PricingOptions::default()).unwrap(),
            Cart::from_codes(["A", "B"])
        );
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("ignore".parse::<UnknownCodePolicy>(), Ok(UnknownCodePolicy::Ignore));
        assert_eq!(" Reject ".parse::<UnknownCodePolicy>(), Ok(UnknownCodePolicy::Reject));
        assert!("strict".parse::<UnknownCodePolicy>().is_err());
    }
}
