//! # Commands
//!
//! One function per subcommand. Each takes already-loaded inputs and a
//! writer, so tests can drive them without touching the terminal.
//!
//! ## Command Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  storefront catalog            ──► Catalog::to_records ──► JSON         │
//! │                                                                         │
//! │  storefront price "aab"        ──► upper-case ──► apply_pattern         │
//! │                                        ──► cart_totals ──► JSON / text  │
//! │                                                                         │
//! │  echo '{"items":"AAB"}' |                                               │
//! │  storefront checkout           ──► checkout ──► {"total_price": ...}    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::Context;
use clap::ValueEnum;
use storefront_core::checkout::{checkout, CheckoutRequest};
use storefront_core::pricing::{apply_pattern_with, cart_totals_with};
use storefront_core::{CartTotals, Catalog};
use tracing::{debug, info, warn};

use crate::config::CliConfig;

/// Output format of `price`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

/// Loads the catalog from a listing file, or the sample catalog.
pub fn load_catalog(path: Option<&Path>) -> anyhow::Result<Catalog> {
    let Some(path) = path else {
        debug!("No catalog file configured, using the sample catalog");
        return Ok(Catalog::sample());
    };

    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog file {}", path.display()))?;
    let catalog = Catalog::from_json(&json)
        .with_context(|| format!("Failed to load catalog from {}", path.display()))?;

    info!(path = %path.display(), products = catalog.len(), "Catalog loaded");
    Ok(catalog)
}

/// `storefront catalog`
pub fn list_catalog(catalog: &Catalog, out: &mut impl Write) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, &catalog.to_records())?;
    writeln!(out)?;
    Ok(())
}

/// `storefront price <PATTERN>`
///
/// The pattern is upper-cased first, the way the storefront's pattern box
/// normalises what the shopper types. The engine itself matches exactly.
pub fn price(
    catalog: &Catalog,
    pattern: &str,
    format: OutputFormat,
    config: &CliConfig,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let options = config.pricing_options();
    let normalized = pattern.to_uppercase();

    let cart = apply_pattern_with(catalog, &normalized, &options)?;
    let totals = cart_totals_with(catalog, &cart, &options)?;

    let dropped = normalized.chars().count() as i64 - cart.total_quantity();
    if dropped > 0 {
        warn!(dropped, "Pattern characters without a matching product were ignored");
    }

    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &totals)?;
            writeln!(out)?;
        }
        OutputFormat::Text => render_receipt(catalog, &totals, config, out)?,
    }
    Ok(())
}

/// `storefront checkout`: one request JSON in, one response JSON out.
pub fn checkout_request(
    catalog: &Catalog,
    input: impl Read,
    config: &CliConfig,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let request: CheckoutRequest =
        serde_json::from_reader(input).context("Invalid checkout request")?;
    let response = checkout(catalog, &request, &config.pricing_options())?;

    serde_json::to_writer(&mut *out, &response)?;
    writeln!(out)?;
    Ok(())
}

/// Writes totals as a plain-text receipt.
pub fn render_receipt(
    catalog: &Catalog,
    totals: &CartTotals,
    config: &CliConfig,
    out: &mut impl Write,
) -> io::Result<()> {
    const WIDTH: usize = 44;
    let money = |amount| config.format_currency(amount);

    for (code, line) in &totals.lines {
        let name = catalog.get(code).map_or(code.as_str(), |p| p.name.as_str());
        let label = format!("{} x{}", name, line.quantity);
        writeln!(out, "{:<30}{:>14}", label, money(line.regular_price))?;

        if line.discount_amount.is_positive() {
            if let Some(tier) = catalog.get(code).and_then(|p| p.discount) {
                let offer = format!(
                    "  {} for {}",
                    tier.threshold_quantity,
                    money(tier.bundle_price)
                );
                let saving = format!("-{}", money(line.discount_amount));
                writeln!(out, "{:<30}{:>14}", offer, saving)?;
            }
        }
    }

    writeln!(out, "{}", "-".repeat(WIDTH))?;
    writeln!(out, "{:<30}{:>14}", "Subtotal", money(totals.subtotal))?;
    writeln!(out, "{:<30}{:>14}", "Total Savings", money(totals.total_discount))?;
    writeln!(out, "{:<30}{:>14}", "Final Total", money(totals.grand_total))?;

    for code in &totals.skipped_codes {
        writeln!(out, "(unknown product {} not priced)", code)?;
    }

    Ok(())
}
