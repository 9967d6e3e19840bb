//! # Storefront Demo Entry Point
//!
//! ```bash
//! # Canonical transcript
//! cargo run -p storefront-demo
//!
//! # Custom scenario, with catalog and receipts
//! cargo run -p storefront-demo -- --config ./storefront.toml --show-catalog --receipts-json
//! ```

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // The actual setup is in lib.rs for better testability
    storefront_demo::run(std::env::args().skip(1))?;
    Ok(())
}
