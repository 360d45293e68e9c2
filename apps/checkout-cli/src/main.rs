//! # `storefront` Binary Entry Point
//!
//! The actual setup is in lib.rs for better testability.

fn main() -> anyhow::Result<()> {
    storefront_checkout::run()
}
