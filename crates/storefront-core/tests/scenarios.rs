//! End-to-end pricing scenarios against the seed catalog, plus concurrent use
//! of one catalog snapshot.

use std::sync::Arc;

use storefront_core::checkout::{checkout, CheckoutRequest};
use storefront_core::pricing::{apply_pattern, cart_totals, line_total};
use storefront_core::{Cart, Catalog, Money, PricingOptions};

fn catalog() -> Catalog {
    Catalog::sample()
}

#[test]
fn scenario_exact_bundle() {
    let catalog = catalog();
    let line = line_total(catalog.get("A").unwrap(), 3).unwrap();

    assert_eq!(line.regular_price, Money::from_major_minor(150, 0));
    assert_eq!(line.discount_amount, Money::from_major_minor(20, 0));
    assert_eq!(line.final_price, Money::from_major_minor(130, 0));
}

#[test]
fn scenario_bundle_with_remainder() {
    let catalog = catalog();
    let line = line_total(catalog.get("A").unwrap(), 5).unwrap();

    assert_eq!(line.final_price, Money::from_major_minor(230, 0));
    assert_eq!(line.discount_amount, Money::from_major_minor(20, 0));
}

#[test]
fn scenario_product_without_tier() {
    let catalog = Catalog::from_json(
        r#"[{"code": "B", "name": "Product B", "unit_price": "30.00", "discounts": []}]"#,
    )
    .unwrap();
    let line = line_total(catalog.get("B").unwrap(), 4).unwrap();

    assert_eq!(line.regular_price, Money::from_major_minor(120, 0));
    assert!(line.discount_amount.is_zero());
    assert_eq!(line.final_price, Money::from_major_minor(120, 0));
}

#[test]
fn scenario_pattern_builds_fresh_cart() {
    let catalog = catalog();
    let cart = apply_pattern(&catalog, "AAB");

    assert_eq!(cart.quantity("A"), 2);
    assert_eq!(cart.quantity("B"), 1);
    assert_eq!(cart.line_count(), 2);
}

#[test]
fn scenario_stale_code_is_excluded() {
    let catalog = catalog();
    let cart = Cart::from_codes(["A", "C", "Z", "Z"]);

    let totals = cart_totals(&catalog, &cart).unwrap();
    assert_eq!(totals.subtotal, Money::from_major_minor(70, 0));
    assert_eq!(totals.grand_total, Money::from_major_minor(70, 0));
    assert_eq!(totals.skipped_codes, ["Z"]);
}

#[test]
fn scenario_mixed_basket_matches_checkout() {
    // A×4: 130 + 50, B×3: 45 + 30, C×1: 20, D×2: 30 → 305
    let catalog = catalog();
    let cart = apply_pattern(&catalog, "DABACBADBA");
    let totals = cart_totals(&catalog, &cart).unwrap();
    assert_eq!(totals.grand_total, Money::from_major_minor(305, 0));

    let response = checkout(
        &catalog,
        &CheckoutRequest::from_cart(&cart),
        &PricingOptions::default(),
    )
    .unwrap();
    assert_eq!(response.total_price, totals.grand_total);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_pricing_of_one_snapshot() {
    let catalog = Arc::new(catalog());
    let patterns = ["A", "AAA", "AAAAA", "BB", "ABCD", "DDDD", "ABABAB", ""];

    let expected: Vec<Money> = patterns
        .iter()
        .map(|p| cart_totals(&catalog, &apply_pattern(&catalog, p)).unwrap().grand_total)
        .collect();

    let mut handles = Vec::new();
    for round in 0..16 {
        for (i, pattern) in patterns.iter().enumerate() {
            let catalog = Arc::clone(&catalog);
            let pattern = pattern.to_string();
            handles.push(tokio::spawn(async move {
                let cart = apply_pattern(&catalog, &pattern);
                (round, i, cart_totals(&catalog, &cart).map(|t| t.grand_total))
            }));
        }
    }

    for handle in handles {
        let (round, i, total) = handle.await.unwrap();
        let total = total.unwrap();
        assert_eq!(total, expected[i], "round {round}, pattern {:?}", patterns[i]);
    }
}
