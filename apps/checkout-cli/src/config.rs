//! # CLI Configuration
//!
//! Stores configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command line flags (`--catalog`, `--strict`)
//! 2. Environment variables (`STOREFRONT_*`)
//! 3. Defaults (this file)
//!
//! Configuration is read-only after startup.

use std::env;
use std::path::PathBuf;

use serde::Serialize;
use storefront_core::{Money, PricingOptions, UnknownCodePolicy};

/// Command line configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CliConfig {
    /// Catalog listing to load. `None` means the built-in sample catalog.
    pub catalog_path: Option<PathBuf>,

    /// What to do with codes the catalog does not know.
    pub unknown_codes: UnknownCodePolicy,

    /// Currency symbol for the text receipt.
    pub currency_symbol: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            catalog_path: None,
            unknown_codes: UnknownCodePolicy::Ignore,
            currency_symbol: "$".to_string(),
        }
    }
}

impl CliConfig {
    /// Loads configuration from environment variables.
    ///
    /// ## Environment Variables
    /// - `STOREFRONT_CATALOG`: path to a product listing JSON file
    /// - `STOREFRONT_UNKNOWN_CODES`: `ignore` (default) or `reject`
    /// - `STOREFRONT_CURRENCY_SYMBOL`: receipt currency symbol (default `$`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = CliConfig::default();

        if let Some(path) = lookup("STOREFRONT_CATALOG").filter(|p| !p.trim().is_empty()) {
            config.catalog_path = Some(PathBuf::from(path));
        }

        if let Some(policy) = lookup("STOREFRONT_UNKNOWN_CODES") {
            config.unknown_codes = policy
                .parse()
                .map_err(|_| ConfigError::InvalidValue("STOREFRONT_UNKNOWN_CODES".to_string()))?;
        }

        if let Some(symbol) = lookup("STOREFRONT_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        Ok(config)
    }

    /// Pricing options derived from this configuration.
    pub fn pricing_options(&self) -> PricingOptions {
        PricingOptions {
            unknown_codes: self.unknown_codes,
        }
    }

    /// Formats an amount for the text receipt.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_checkout::config::CliConfig;
    /// use storefront_core::Money;
    ///
    /// let config = CliConfig::default();
    /// assert_eq!(config.format_currency(Money::from_cents(23000)), "$230.00");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        format!(
            "{}{}{}.{:02}",
            if amount.is_negative() { "-" } else { "" },
            self.currency_symbol,
            amount.dollars().abs(),
            amount.cents_part()
        )
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = CliConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.pricing_options(), PricingOptions::default());
    }

    #[test]
    fn test_env_overrides() {
        let config = CliConfig::from_lookup(lookup(&[
            ("STOREFRONT_CATALOG", "/tmp/catalog.json"),
            ("STOREFRONT_UNKNOWN_CODES", "reject"),
            ("STOREFRONT_CURRENCY_SYMBOL", "€"),
        ]))
        .unwrap();

        assert_eq!(config.catalog_path, Some(PathBuf::from("/tmp/catalog.json")));
        assert_eq!(config.pricing_options(), PricingOptions::strict());
        assert_eq!(config.format_currency(Money::from_cents(4500)), "€45.00");
    }

    #[test]
    fn test_blank_catalog_path_is_ignored() {
        let config = CliConfig::from_lookup(lookup(&[("STOREFRONT_CATALOG", "  ")])).unwrap();
        assert!(config.catalog_path.is_none());
    }

    #[test]
    fn test_invalid_policy() {
        let err = CliConfig::from_lookup(lookup(&[("STOREFRONT_UNKNOWN_CODES", "maybe")]))
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for STOREFRONT_UNKNOWN_CODES");
    }

    #[test]
    fn test_format_currency() {
        let config = CliConfig::default();
        assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
        assert_eq!(config.format_currency(Money::from_cents(5)), "$0.05");
        assert_eq!(config.format_currency(Money::from_cents(-1234)), "-$12.34");
    }
}
