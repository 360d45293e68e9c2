//! # storefront-core: Pure Pricing Logic for the Storefront
//!
//! This crate is the **heart** of the storefront. It contains the catalog,
//! cart and discount rules as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │          Storefront UI / checkout endpoint / CLI                │   │
//! │  │    Product list ──► Cart ──► Estimate ──► Checkout total        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ plain values                           │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ storefront-core (THIS CRATE) ★                  │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐  ┌─────────┐  ┌─────────┐  ┌─────────┐           │   │
//! │  │   │ catalog │  │  cart   │  │ pricing │  │checkout │           │   │
//! │  │   │ Product │  │  Cart   │  │ totals  │  │ request │           │   │
//! │  │   │ records │  │ lines   │  │ pattern │  │response │           │   │
//! │  │   └─────────┘  └─────────┘  └─────────┘  └─────────┘           │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, DiscountTier, LineTotal, CartTotals)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`catalog`] - Product records and the catalog lookup
//! - [`cart`] - Cart value type
//! - [`pricing`] - The discount rule and cart totals
//! - [`checkout`] - Checkout request/response contract
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same catalog + same cart = same totals, always
//! 2. **No I/O**: file and network access belong to the caller
//! 3. **Integer Money**: all monetary values are cents (i64)
//! 4. **One Discount Tier**: a product has at most one bulk offer
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::{pricing, Catalog};
//!
//! let catalog = Catalog::sample();
//! let cart = pricing::apply_pattern(&catalog, "AAAAA");
//! let totals = pricing::cart_totals(&catalog, &cart).unwrap();
//!
//! // 5 × $50.00 with "3 for $130.00": $130.00 + 2 × $50.00
//! assert_eq!(totals.grand_total.cents(), 23000);
//! assert_eq!(totals.total_discount.cents(), 2000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::Cart;
pub use catalog::{Catalog, DiscountRecord, ProductRecord};
pub use checkout::{CheckoutRequest, CheckoutResponse};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::{PricingOptions, UnknownCodePolicy};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a product code.
///
/// Pattern entry treats each character as a code, so only one-character
/// codes can be entered that way; longer codes still price normally.
pub const MAX_CODE_LENGTH: usize = 16;

/// Maximum quantity added to a cart line in one `Cart::add`.
///
/// ## Business Reason
/// Catches typos such as 1000 for 10. Units added one at a time (pattern
/// entry, checkout items) are not capped.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Highest accepted unit or bundle price in cents ($9999.99).
///
/// Six digits with two decimals, the width of the catalog's price columns.
pub const MAX_PRICE_CENTS: i64 = 999_999;
