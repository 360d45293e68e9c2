//! # Cart
//!
//! The shopping cart as a plain value: product code → quantity.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  UI Action                Operation               Result                │
//! │  ─────────                ─────────               ──────                │
//! │                                                                         │
//! │  Click "Add" ────────────► increment(code) ─────► qty + 1 (or new line) │
//! │                                                                         │
//! │  Click "−" ──────────────► decrement(code) ─────► qty − 1, gone at 0    │
//! │                                                                         │
//! │  Click "Remove" ─────────► remove(code) ────────► line gone             │
//! │                                                                         │
//! │  Submit pattern "AAB" ───► pricing::apply_pattern ► fresh cart          │
//! │                                                                         │
//! │  NOTE: every operation consumes the cart and returns a new one.         │
//! │        Whoever owns the current cart serializes the updates.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;

use serde::Serialize;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::validation::validate_quantity;

/// Quantities by product code.
///
/// ## Invariants
/// - One line per code (adding the same code increases its quantity)
/// - Every quantity is >= 1 (a line reaching 0 is removed)
/// - Lines iterate in code order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct Cart {
    lines: BTreeMap<String, i64>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Builds a cart from a flat sequence, one entry per unit.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::Cart;
    ///
    /// let cart = Cart::from_codes(["A", "A", "B"]);
    /// assert_eq!(cart.quantity("A"), 2);
    /// assert_eq!(cart.quantity("B"), 1);
    /// ```
    pub fn from_codes<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        codes.into_iter().fold(Cart::new(), |cart, code| cart.increment(code))
    }

    /// Adds `quantity` units of `code`, merging into an existing line.
    ///
    /// ## Errors
    /// `quantity` below 1 or above [`MAX_ITEM_QUANTITY`](crate::MAX_ITEM_QUANTITY).
    pub fn add(mut self, code: impl Into<String>, quantity: i64) -> CoreResult<Self> {
        validate_quantity(quantity)?;
        let line = self.lines.entry(code.into()).or_insert(0);
        *line = line
            .checked_add(quantity)
            .ok_or(CoreError::InvalidQuantity(quantity))?;
        Ok(self)
    }

    /// Adds one unit of `code`.
    pub fn increment(mut self, code: impl Into<String>) -> Self {
        let line = self.lines.entry(code.into()).or_insert(0);
        *line = line.saturating_add(1);
        self
    }

    /// Removes one unit of `code`; the line disappears when it reaches zero.
    ///
    /// A code that is not in the cart leaves the cart unchanged.
    pub fn decrement(mut self, code: &str) -> Self {
        if let Some(quantity) = self.lines.get_mut(code) {
            if *quantity > 1 {
                *quantity -= 1;
            } else {
                self.lines.remove(code);
            }
        }
        self
    }

    /// Removes the whole line for `code`.
    pub fn remove(mut self, code: &str) -> CoreResult<Self> {
        match self.lines.remove(code) {
            Some(_) => Ok(self),
            None => Err(CoreError::NotInCart(code.to_string())),
        }
    }

    /// Empties the cart.
    pub fn clear(mut self) -> Self {
        self.lines.clear();
        self
    }

    /// Quantity held for `code` (0 if absent).
    pub fn quantity(&self, code: &str) -> i64 {
        self.lines.get(code).copied().unwrap_or(0)
    }

    /// `(code, quantity)` pairs in code order.
    pub fn lines(&self) -> impl Iterator<Item = (&str, i64)> {
        self.lines.iter().map(|(code, qty)| (code.as_str(), *qty))
    }

    /// Returns the number of distinct codes in the cart.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the total quantity of all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.values().sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Flattens the cart to one code per unit, in code order.
    ///
    /// The checkout request carries items in this shape.
    pub fn to_codes(&self) -> Vec<String> {
        self.lines
            .iter()
            .flat_map(|(code, qty)| std::iter::repeat(code.clone()).take(*qty as usize))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    #[test]
    fn test_cart_add_item() {
        let cart = Cart::new().add("A", 2).unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.total_quantity(), 2);
    }

    #[test]
    fn test_cart_add_same_product_increases_quantity() {
        let cart = Cart::new().add("A", 2).unwrap().add("A", 3).unwrap();

        assert_eq!(cart.line_count(), 1); // Still one line
        assert_eq!(cart.quantity("A"), 5);
    }

    #[test]
    fn test_cart_add_rejects_non_positive_quantity() {
        assert!(Cart::new().add("A", 0).is_err());
        assert!(Cart::new().add("A", -3).is_err());
    }

    #[test]
    fn test_cart_add_caps_single_quantity() {
        assert!(Cart::new().add("A", crate::MAX_ITEM_QUANTITY).is_ok());
        assert!(matches!(
            Cart::new().add("A", i64::MAX),
            Err(CoreError::Validation(ValidationError::OutOfRange { .. }))
        ));
    }

    #[test]
    fn test_cart_quantities_never_wrap() {
        let cart = Cart::from_codes(["A"]);
        let cart = Cart {
            lines: cart.lines.into_iter().map(|(code, _)| (code, i64::MAX - 1)).collect(),
        };

        let cart = cart.increment("A").increment("A");
        assert_eq!(cart.quantity("A"), i64::MAX);
        assert!(matches!(
            cart.add("A", 5),
            Err(CoreError::InvalidQuantity(5))
        ));
    }

    #[test]
    fn test_decrement_removes_line_at_zero() {
        let cart = Cart::new().increment("A").increment("A");

        let cart = cart.decrement("A");
        assert_eq!(cart.quantity("A"), 1);

        let cart = cart.decrement("A");
        assert!(cart.is_empty());
        assert_eq!(cart.lines().count(), 0);
    }

    #[test]
    fn test_decrement_unknown_code_is_noop() {
        let cart = Cart::new().increment("A");
        assert_eq!(cart.clone().decrement("B"), cart);
    }

    #[test]
    fn test_remove() {
        let cart = Cart::from_codes(["A", "A", "B"]).remove("A").unwrap();
        assert_eq!(cart.quantity("A"), 0);
        assert_eq!(cart.quantity("B"), 1);

        assert!(matches!(
            cart.remove("Z"),
            Err(CoreError::NotInCart(code)) if code == "Z"
        ));
    }

    #[test]
    fn test_cart_clear() {
        let cart = Cart::from_codes(["A", "B"]);
        assert!(!cart.is_empty());

        let cart = cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_to_codes_flattens_in_code_order() {
        let cart = Cart::from_codes(["B", "A", "B", "A", "A"]);
        assert_eq!(cart.to_codes(), ["A", "A", "A", "B", "B"]);
        assert_eq!(Cart::from_codes(cart.to_codes()), cart);
    }

    #[test]
    fn test_lines_iterate_in_code_order() {
        let cart = Cart::from_codes(["C", "A", "B"]);
        let codes: Vec<_> = cart.lines().map(|(code, _)| code).collect();
        assert_eq!(codes, ["A", "B", "C"]);
    }
}
