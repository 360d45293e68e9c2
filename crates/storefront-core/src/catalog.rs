//! # Catalog
//!
//! The read-only set of products a cart can be priced against.
//!
//! ## Record Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Product listing JSON                                                   │
//! │  [{ "code": "A", "unit_price": 50.0,                                    │
//! │     "discounts": [{ "quantity": 3, "discount_price": "130.00" }] }]     │
//! │        │                                                                │
//! │        ▼  serde (Money reads numbers and decimal strings exactly)       │
//! │  Vec<ProductRecord>                                                     │
//! │        │                                                                │
//! │        ▼  Catalog::from_records (validation, discounts[0] only)         │
//! │  Catalog { code → Product }                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Malformed amounts (three decimals, text that isn't a number) are a
//! data-integrity error: loading fails instead of coercing the value.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{DiscountTier, Product};
use crate::validation::{validate_code, validate_price, validate_product_name, validate_threshold};

// =============================================================================
// Wire Records
// =============================================================================

/// One discount rule as listed by the product endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountRecord {
    /// Threshold quantity.
    pub quantity: i64,

    /// Price for `quantity` units.
    pub discount_price: Money,
}

/// A product as listed by the product endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductRecord {
    pub code: String,
    pub name: String,
    pub unit_price: Money,

    #[serde(default)]
    pub discounts: Vec<DiscountRecord>,
}

impl ProductRecord {
    /// Validates the record and converts it into a [`Product`].
    ///
    /// Only `discounts[0]` is kept.
    pub fn into_product(self) -> CoreResult<Product> {
        let invalid = |source: ValidationError| CoreError::InvalidRecord {
            code: self.code.clone(),
            source,
        };

        validate_code(&self.code).map_err(invalid)?;
        validate_product_name(&self.name).map_err(invalid)?;
        validate_price("unit_price", self.unit_price).map_err(invalid)?;

        let discount = match self.discounts.first() {
            Some(rule) => {
                validate_threshold(rule.quantity).map_err(invalid)?;
                validate_price("discount_price", rule.discount_price).map_err(invalid)?;
                Some(DiscountTier::new(rule.quantity, rule.discount_price))
            }
            None => None,
        };

        if self.discounts.len() > 1 {
            warn!(
                code = %self.code,
                ignored = self.discounts.len() - 1,
                "Product lists several discount tiers, only the first is used"
            );
        }

        Ok(Product {
            code: self.code,
            name: self.name,
            unit_price: self.unit_price,
            discount,
        })
    }
}

impl From<&Product> for ProductRecord {
    fn from(product: &Product) -> Self {
        ProductRecord {
            code: product.code.clone(),
            name: product.name.clone(),
            unit_price: product.unit_price,
            discounts: product
                .discount
                .iter()
                .map(|tier| DiscountRecord {
                    quantity: tier.threshold_quantity,
                    discount_price: tier.bundle_price,
                })
                .collect(),
        }
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// Products keyed by code.
///
/// ## Thread Safety
/// Immutable once built; share it behind an `Arc` and price from as many
/// threads as needed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    products: BTreeMap<String, Product>,
}

impl Catalog {
    /// Builds a catalog from already-validated products.
    ///
    /// ## Errors
    /// `ValidationError::Duplicate` if two products share a code.
    pub fn new(products: impl IntoIterator<Item = Product>) -> CoreResult<Self> {
        let mut map = BTreeMap::new();
        for product in products {
            if map.contains_key(&product.code) {
                return Err(ValidationError::Duplicate {
                    field: "code".to_string(),
                    value: product.code,
                }
                .into());
            }
            map.insert(product.code.clone(), product);
        }
        Ok(Catalog { products: map })
    }

    /// Validates listing records and builds a catalog.
    pub fn from_records(records: impl IntoIterator<Item = ProductRecord>) -> CoreResult<Self> {
        let products = records
            .into_iter()
            .map(ProductRecord::into_product)
            .collect::<CoreResult<Vec<_>>>()?;

        let catalog = Catalog::new(products)?;
        debug!(products = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }

    /// Parses a JSON array of product records.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::Catalog;
    ///
    /// let catalog = Catalog::from_json(r#"[
    ///     {"code": "A", "name": "Product A", "unit_price": 50.0,
    ///      "discounts": [{"quantity": 3, "discount_price": "130.00"}]}
    /// ]"#).unwrap();
    /// assert_eq!(catalog.get("A").unwrap().unit_price.cents(), 5000);
    /// ```
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let records: Vec<ProductRecord> = serde_json::from_str(json)?;
        Catalog::from_records(records)
    }

    /// The seed catalog the storefront ships with.
    ///
    /// | Code | Unit price | Offer          |
    /// |------|-----------:|----------------|
    /// | A    |     $50.00 | 3 for $130.00  |
    /// | B    |     $30.00 | 2 for $45.00   |
    /// | C    |     $20.00 |                |
    /// | D    |     $15.00 |                |
    pub fn sample() -> Self {
        let products = [
            Product::new("A", "Product A", Money::from_major_minor(50, 0))
                .with_discount(DiscountTier::new(3, Money::from_major_minor(130, 0))),
            Product::new("B", "Product B", Money::from_major_minor(30, 0))
                .with_discount(DiscountTier::new(2, Money::from_major_minor(45, 0))),
            Product::new("C", "Product C", Money::from_major_minor(20, 0)),
            Product::new("D", "Product D", Money::from_major_minor(15, 0)),
        ];

        Catalog {
            products: products
                .into_iter()
                .map(|p| (p.code.clone(), p))
                .collect(),
        }
    }

    /// Looks up a product by exact code.
    #[inline]
    pub fn get(&self, code: &str) -> Option<&Product> {
        self.products.get(code)
    }

    #[inline]
    pub fn contains(&self, code: &str) -> bool {
        self.products.contains_key(code)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Products in code order.
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    /// The listing shape, as the product endpoint serves it.
    pub fn to_records(&self) -> Vec<ProductRecord> {
        self.products().map(ProductRecord::from).collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
