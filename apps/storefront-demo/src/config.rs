//! # Demo Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command line flags (highest priority, applied in lib.rs)           │
//! │     --show-catalog, --receipts-json                                    │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     STOREFRONT_SHOW_CATALOG=true                                       │
//! │     STOREFRONT_RECEIPTS_JSON=1                                         │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     --config <PATH>, or STOREFRONT_CONFIG, or                          │
//! │     ~/.config/storefront/storefront.toml (Linux)                       │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     The canonical three-step scenario, catalog display off             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [output]
//! show_catalog = true
//! receipts_json = false
//!
//! [scenario.customer]
//! first_name = "John"
//! last_name = "Doe"
//!
//! [[scenario.products]]
//! key = "laptop"
//! name = "Laptop"
//! kind = "physical"
//! price_cents = 100000
//! stock = 5
//!
//! [[scenario.steps]]
//! order = "laptop_order"
//! product = "laptop"
//! quantity = 3
//! discount = { kind = "percentage", percent = 10 }
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{DemoError, DemoResult};
use crate::scenario::Scenario;

/// Output toggles. Both default to off so the transcript stays canonical.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Print the catalog before and after the steps.
    #[serde(default)]
    pub show_catalog: bool,

    /// Dump every receipt as pretty JSON after the transcript.
    #[serde(default)]
    pub receipts_json: bool,
}

/// Complete demo configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoConfig {
    #[serde(default)]
    pub output: OutputSettings,

    #[serde(default)]
    pub scenario: Scenario,
}

impl DemoConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file
    /// 3. Environment variables
    ///
    /// A path given explicitly (argument or `STOREFRONT_CONFIG`) must exist;
    /// the platform default path is optional.
    pub fn load(config_path: Option<PathBuf>) -> DemoResult<Self> {
        let explicit =
            config_path.or_else(|| std::env::var_os("STOREFRONT_CONFIG").map(PathBuf::from));

        let mut config = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(DemoError::ConfigNotFound(path));
                }
                Self::read(&path)?
            }
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::read(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Parses a config from TOML text.
    pub fn from_toml_str(contents: &str) -> DemoResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    fn read(path: &Path) -> DemoResult<Self> {
        info!(?path, "Loading demo config from file");
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Validates the scenario.
    pub fn validate(&self) -> DemoResult<()> {
        self.scenario.validate()?;
        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("STOREFRONT_SHOW_CATALOG") {
            match parse_flag(&value) {
                Some(flag) => self.output.show_catalog = flag,
                None => warn!(value = %value, "Ignoring STOREFRONT_SHOW_CATALOG"),
            }
        }

        if let Some(value) = lookup("STOREFRONT_RECEIPTS_JSON") {
            match parse_flag(&value) {
                Some(flag) => self.output.receipts_json = flag,
                None => warn!(value = %value, "Ignoring STOREFRONT_RECEIPTS_JSON"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "storefront", "storefront")
            .map(|dirs| dirs.config_dir().join("storefront.toml"))
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::DiscountSpec;
    use storefront_core::ProductKind;

    #[test]
    fn test_default_config() {
        let config = DemoConfig::default();
        assert!(!config.output.show_catalog);
        assert!(!config.output.receipts_json);
        assert_eq!(config.scenario.steps.len(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_file_keeps_default_scenario() {
        let config = DemoConfig::from_toml_str("[output]\nshow_catalog = true\n").unwrap();
        assert!(config.output.show_catalog);
        assert_eq!(config.scenario, Scenario::default());
    }

    #[test]
    fn test_parse_full_scenario() {
        let config = DemoConfig::from_toml_str(
            r#"
            [scenario.customer]
            first_name = "Ada"
            last_name = "Lovelace"

            [[scenario.products]]
            key = "ebook"
            name = "E-Book"
            kind = "digital"
            price_cents = 1250

            [[scenario.steps]]
            order = "o1"
            product = "ebook"
            quantity = 2
            discount = { kind = "fixed", amount_cents = 500 }
            "#,
        )
        .unwrap();

        let product = &config.scenario.products[0];
        assert_eq!(product.kind, ProductKind::Digital);
        assert_eq!(product.stock, 0);
        assert_eq!(
            config.scenario.steps[0].discount,
            Some(DiscountSpec::Fixed { amount_cents: 500 })
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_error() {
        let err = DemoConfig::from_toml_str("[output]\nshow_catalog = \"maybe\"\n").unwrap_err();
        assert!(matches!(err, DemoError::ConfigParse(_)));
    }

    #[test]
    fn test_missing_explicit_path_is_an_error() {
        let err = DemoConfig::load(Some(PathBuf::from("/nonexistent/storefront.toml"))).unwrap_err();
        assert!(matches!(err, DemoError::ConfigNotFound(_)));
    }

    #[test]
    fn test_overrides() {
        let mut config = DemoConfig::default();
        config.apply_overrides(|key| match key {
            "STOREFRONT_SHOW_CATALOG" => Some("yes".to_string()),
            "STOREFRONT_RECEIPTS_JSON" => Some("sometimes".to_string()),
            _ => None,
        });

        assert!(config.output.show_catalog);
        assert!(!config.output.receipts_json);
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" off "), Some(false));
        assert_eq!(parse_flag("2"), None);
    }
}
