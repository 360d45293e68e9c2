//! # Checkout Contract
//!
//! The request/response pair the storefront UI exchanges with the checkout
//! endpoint, and the function that answers it.
//!
//! ## Wire Format
//! ```text
//! Request:   { "items": ["A", "A", "A", "B"] }   one code per unit
//!        or  { "items": "AAAB" }                 one character per unit
//!
//! Response:  { "total_price": 160.0 }            major units
//! ```
//!
//! The answer is `cart_totals(..).grand_total` for the equivalent cart, so
//! the total the UI shows locally and the total checkout returns agree.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::error::CoreResult;
use crate::money::Money;
use crate::pricing::{cart_totals_with, PricingOptions};

/// The purchased units, in either accepted shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(untagged)]
pub enum CheckoutItems {
    /// `["A", "A", "B"]`
    Codes(Vec<String>),
    /// `"AAB"`
    Pattern(String),
}

impl Default for CheckoutItems {
    fn default() -> Self {
        CheckoutItems::Codes(Vec::new())
    }
}

/// Body of a checkout request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckoutRequest {
    #[serde(default)]
    pub items: CheckoutItems,
}

impl CheckoutRequest {
    /// Flattens a cart into the request the UI sends.
    pub fn from_cart(cart: &Cart) -> Self {
        CheckoutRequest {
            items: CheckoutItems::Codes(cart.to_codes()),
        }
    }

    /// Rebuilds the cart the request describes.
    ///
    /// Every unit becomes part of the cart, known code or not; the catalog
    /// is only consulted when pricing.
    pub fn to_cart(&self) -> Cart {
        match &self.items {
            CheckoutItems::Codes(codes) => Cart::from_codes(codes.iter().cloned()),
            CheckoutItems::Pattern(pattern) => Cart::from_codes(pattern.chars().map(String::from)),
        }
    }
}

/// Body of a checkout response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct CheckoutResponse {
    pub total_price: Money,
}

/// Answers a checkout request.
///
/// ## Errors
/// - Under a rejecting [`PricingOptions`], an item code missing from the
///   catalog
/// - [`CoreError::AmountOverflow`](crate::CoreError::AmountOverflow) when
///   the total does not fit in an `i64` of cents
///
/// ## Example
/// ```rust
/// use storefront_core::checkout::{checkout, CheckoutRequest};
/// use storefront_core::{Catalog, PricingOptions};
///
/// let request: CheckoutRequest =
///     serde_json::from_str(r#"{"items": ["A", "A", "A", "A", "A"]}"#).unwrap();
/// let response = checkout(&Catalog::sample(), &request, &PricingOptions::default()).unwrap();
///
/// assert_eq!(response.total_price.cents(), 23000);
/// assert_eq!(serde_json::to_string(&response).unwrap(), r#"{"total_price":230.0}"#);
/// ```
pub fn checkout(
    catalog: &Catalog,
    request: &CheckoutRequest,
    options: &PricingOptions,
) -> CoreResult<CheckoutResponse> {
    let cart = request.to_cart();
    let totals = cart_totals_with(catalog, &cart, options)?;

    debug!(
        units = cart.total_quantity(),
        total = %totals.grand_total,
        skipped = totals.skipped_codes.len(),
        "Checkout priced"
    );

    Ok(CheckoutResponse {
        total_price: totals.grand_total,
    })
}
