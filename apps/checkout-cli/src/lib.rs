//! # Storefront Checkout CLI
//!
//! Command line access to the storefront pricing engine.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Initialize Logging ───────────────────────────────────────────────► │
//! │     • tracing-subscriber with env filter, written to stderr             │
//! │     • Default: INFO, can be overridden with RUST_LOG                    │
//! │                                                                         │
//! │  2. Load Configuration ───────────────────────────────────────────────► │
//! │     • STOREFRONT_* environment variables, then command line flags       │
//! │                                                                         │
//! │  3. Load Catalog ─────────────────────────────────────────────────────► │
//! │     • --catalog FILE, STOREFRONT_CATALOG, or the sample catalog         │
//! │                                                                         │
//! │  4. Run Subcommand ───────────────────────────────────────────────────► │
//! │     • catalog | price | checkout, results on stdout                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod config;

use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use storefront_core::UnknownCodePolicy;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::commands::OutputFormat;
use crate::config::CliConfig;

/// Price storefront carts with bulk discounts.
#[derive(Debug, Parser)]
#[command(name = "storefront", version)]
pub struct Cli {
    /// Product listing JSON (defaults to STOREFRONT_CATALOG, then the sample catalog)
    #[arg(long, global = true, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Fail on product codes missing from the catalog instead of skipping them
    #[arg(long, global = true)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the catalog as a product listing
    Catalog,

    /// Build a cart from a pattern such as "AAB" and print its totals
    Price {
        /// One character per unit; case-insensitive
        pattern: String,

        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// Answer a checkout request ({"items": [...]}) read from stdin or a file
    Checkout {
        #[arg(long, value_name = "FILE")]
        request: Option<PathBuf>,
    },
}

impl Cli {
    /// Applies command line overrides on top of the environment configuration.
    pub fn merge_into(&self, mut config: CliConfig) -> CliConfig {
        if let Some(path) = &self.catalog {
            config.catalog_path = Some(path.clone());
        }
        if self.strict {
            config.unknown_codes = UnknownCodePolicy::Reject;
        }
        config
    }
}

/// Entry point used by `main`.
pub fn run() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = cli.merge_into(CliConfig::from_env()?);
    debug!(?config, "Configuration loaded");

    let stdin = io::stdin();
    let stdout = io::stdout();
    execute(&cli, &config, stdin.lock(), &mut stdout.lock())
}

/// Runs one parsed command against explicit input and output streams.
pub fn execute(
    cli: &Cli,
    config: &CliConfig,
    input: impl Read,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let catalog = commands::load_catalog(config.catalog_path.as_deref())?;

    match &cli.command {
        Command::Catalog => commands::list_catalog(&catalog, out),
        Command::Price { pattern, format } => {
            info!(pattern = %pattern, "Pricing pattern");
            commands::price(&catalog, pattern, *format, config, out)
        }
        Command::Checkout { request: Some(path) } => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("Failed to open request file {}", path.display()))?;
            commands::checkout_request(&catalog, file, config, out)
        }
        Command::Checkout { request: None } => {
            commands::checkout_request(&catalog, input, config, out)
        }
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show skipped codes and loaded configuration
/// - `RUST_LOG=storefront_core=trace` - Core crate only
/// - Default: INFO level
///
/// Logs go to stderr; stdout carries command output only.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
