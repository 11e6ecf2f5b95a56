//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};
use grocer_core::checkout::MAX_STEP_DELAY;

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init { catalog, force } => init_config(&catalog, force, ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");

    ctx.output.info("");
    ctx.output.info("[storefront]");
    ctx.output.kv("currency", &ctx.config.storefront.currency);
    ctx.output
        .kv("dark_theme", &ctx.config.storefront.dark_theme.to_string());
    match ctx.catalog_path() {
        Some(path) => ctx.output.kv("catalog", &path.display().to_string()),
        None => ctx.output.kv("catalog", "(none)"),
    }

    ctx.output.info("");
    ctx.output.info("[checkout]");
    ctx.output.kv("pacing", &ctx.config.checkout.pacing.to_string());

    ctx.output.info("");
    if ctx.config.promotions.is_empty() {
        ctx.output.info("Promotions: built-in table");
    } else {
        ctx.output.info("Promotions:");
        for promo in &ctx.config.promotions {
            ctx.output
                .list_item(&format!("{} ({}%)", promo.code, promo.percent));
        }
    }

    Ok(())
}

async fn init_config(catalog: &str, force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("grocer.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config(catalog))?;

    ctx.output
        .success(&format!("Created {}", config_path.display()));
    if !ctx.cwd.join(catalog).exists() {
        ctx.output
            .warn(&format!("Catalog file {} does not exist yet", catalog));
    }

    Ok(())
}

async fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    let currency = match ctx.config.currency() {
        Ok(c) => Some(c),
        Err(e) => {
            errors.push(format!("storefront.currency: {}", e));
            None
        }
    };

    if let Err(e) = ctx.config.promotion_table() {
        errors.push(format!("{:#}", e));
    }

    let pacing = ctx.config.checkout.pacing;
    if !pacing.is_finite() || pacing < 0.0 {
        errors.push(format!("checkout.pacing must be a non-negative number, got {}", pacing));
    } else if pacing == 0.0 {
        warnings.push("checkout.pacing is 0, the gateway will not pause".to_string());
    } else if ctx.config.pacing().is_capped() {
        warnings.push(format!(
            "checkout.pacing {} is capped at {}s per gateway step",
            pacing,
            MAX_STEP_DELAY.as_secs()
        ));
    }

    match (ctx.catalog_path(), currency) {
        (None, _) => warnings.push("storefront.catalog is not set".to_string()),
        (Some(_), None) => {}
        (Some(_), Some(_)) => match ctx.load_catalog() {
            Ok(catalog) if catalog.is_empty() => {
                warnings.push("catalog has no items".to_string());
            }
            Ok(catalog) => {
                ctx.output
                    .debug(&format!("Catalog loaded with {} items", catalog.len()));
            }
            Err(e) => errors.push(format!("catalog: {:#}", e)),
        },
    }

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CliConfig;

    fn context(pacing: f64) -> Context {
        let mut config = CliConfig::default();
        config.checkout.pacing = pacing;
        Context::for_dir(config, std::env::temp_dir())
    }

    #[tokio::test]
    async fn test_validate_accepts_oversized_pacing_with_warning() {
        assert!(validate_config(&context(1e20)).await.is_ok());
    }

    #[tokio::test]
    async fn test_validate_rejects_negative_pacing() {
        assert!(validate_config(&context(-1.0)).await.is_err());
    }
}
