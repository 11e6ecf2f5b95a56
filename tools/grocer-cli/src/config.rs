//! CLI configuration.

use anyhow::{anyhow, Context, Result};
use grocer_core::cart::{Promotion, PromotionTable};
use grocer_core::checkout::Pacing;
use grocer_core::Currency;
use serde::{Deserialize, Serialize};

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Storefront settings.
    #[serde(default)]
    pub storefront: StorefrontConfig,

    /// Checkout simulation settings.
    #[serde(default)]
    pub checkout: CheckoutConfig,

    /// Accepted promotion codes. Empty means the built-in table.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub promotions: Vec<PromotionConfig>,
}

impl CliConfig {
    /// Load config from a TOML or JSON file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    pub fn currency(&self) -> Result<Currency> {
        Currency::from_code(&self.storefront.currency)
            .ok_or_else(|| anyhow!("Unknown currency: {}", self.storefront.currency))
    }

    pub fn promotion_table(&self) -> Result<PromotionTable> {
        if self.promotions.is_empty() {
            return Ok(PromotionTable::default());
        }
        let promotions = self
            .promotions
            .iter()
            .map(|p| Promotion::new(p.code.clone(), p.percent, p.description.clone()))
            .collect();
        PromotionTable::new(promotions).context("Invalid [[promotions]] table")
    }

    pub fn pacing(&self) -> Pacing {
        Pacing::scaled(self.checkout.pacing)
    }
}

/// Storefront settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Currency code for catalog prices.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Start in dark mode.
    #[serde(default = "default_true")]
    pub dark_theme: bool,

    /// Catalog file, relative to the config file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<String>,
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            dark_theme: true,
            catalog: None,
        }
    }
}

/// Checkout simulation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutConfig {
    /// Scale for gateway delays: 1.0 real time, 0 instant.
    #[serde(default = "default_pacing")]
    pub pacing: f64,
}

fn default_pacing() -> f64 {
    1.0
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            pacing: default_pacing(),
        }
    }
}

/// One accepted promotion code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromotionConfig {
    pub code: String,
    pub percent: u8,
    #[serde(default)]
    pub description: String,
}

/// Generate a default grocer.toml config file.
pub fn generate_default_config(catalog: &str) -> String {
    format!(
        r#"# Orbit Grocer storefront configuration

[storefront]
currency = "USD"
dark_theme = true
catalog = "{catalog}"

[checkout]
# 1.0 plays the gateway at real speed, 0 skips the waits
pacing = 1.0

[[promotions]]
code = "SAVE10"
percent = 10
description = "10% off your order"

[[promotions]]
code = "FREESHIP"
percent = 0
description = "Free Shipping"

[[promotions]]
code = "ORBIT20"
percent = 20
description = "20% off for Orbit members"
"#,
        catalog = catalog
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_round_trips() {
        let config: CliConfig = toml::from_str(&generate_default_config("catalog.toml")).unwrap();
        assert_eq!(config.storefront.catalog.as_deref(), Some("catalog.toml"));
        assert_eq!(config.currency().unwrap(), Currency::USD);
        assert_eq!(config.promotion_table().unwrap().len(), 3);
        assert_eq!(config.pacing(), Pacing::realtime());
    }

    #[test]
    fn test_empty_config_uses_builtins() {
        let config: CliConfig = toml::from_str("").unwrap();
        assert!(config.storefront.dark_theme);
        assert_eq!(
            config.promotion_table().unwrap(),
            PromotionTable::default()
        );
    }

    #[test]
    fn test_bad_promotion_rejected() {
        let config: CliConfig = toml::from_str(
            r#"
            [[promotions]]
            code = "HUGE"
            percent = 150
            "#,
        )
        .unwrap();
        assert!(config.promotion_table().is_err());
    }
}
