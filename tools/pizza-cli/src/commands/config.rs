//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};
use serde_json::json;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig, CONFIG_FILE_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "config_file": ctx.config_path,
            "api": ctx.api_config,
            "order": ctx.config.order,
            "logging": ctx.config.logging,
            "cart_file": ctx.cart_path,
        }));
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(none, using defaults)"),
    }

    // Api section, with env and flag overrides applied
    ctx.output.info("");
    ctx.output.info("[api]");
    ctx.output.kv("url", &ctx.api_config.url);
    if let Some(timeout) = ctx.api_config.timeout_secs {
        ctx.output.kv("timeout_secs", &timeout.to_string());
    }

    // Order section
    ctx.output.info("");
    ctx.output.info("[order]");
    let order = &ctx.config.order;
    ctx.output.kv("default_type", &order.default_type);
    ctx.output.kv("default_size", order.default_size.code());
    ctx.output
        .kv("catalog_refresh", &format!("{:?}", order.catalog_refresh));
    ctx.output.kv("clear_cart", &format!("{:?}", order.clear_cart));

    // Logging section
    ctx.output.info("");
    ctx.output.info("[logging]");
    ctx.output.kv("level", ctx.config.logging.level.as_str());
    ctx.output
        .kv("format", &format!("{:?}", ctx.config.logging.format));

    ctx.output.info("");
    ctx.output.kv("cart file", &ctx.cart_path.display().to_string());

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_FILE_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let (mut errors, warnings) = check(&ctx.config);
    if ctx.api_config.url != ctx.config.api.url {
        if let Err(e) = ctx.api_config.validate() {
            errors.push(format!("API URL override: {}", e));
        }
    }

    // Print results
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

/// Errors and warnings for a loaded config.
fn check(config: &CliConfig) -> (Vec<String>, Vec<String>) {
    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    if let Err(e) = config.api.validate() {
        errors.push(format!("api.url: {}", e));
    }

    if config.api.timeout_secs == Some(0) {
        errors.push("api.timeout_secs must be greater than 0".to_string());
    }

    if config.order.default_type.trim().is_empty() {
        errors.push("order.default_type is required".to_string());
    }

    if let Ok(url) = config.api.parsed_url() {
        let local = matches!(url.host_str(), Some("localhost" | "127.0.0.1" | "[::1]"));
        if url.scheme() == "http" && !local {
            warnings.push(format!("api.url '{}' is not using https", config.api.url));
        }
    }

    (errors, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_clean() {
        let (errors, warnings) = check(&CliConfig::default());
        assert!(errors.is_empty(), "{errors:?}");
        assert!(warnings.is_empty(), "{warnings:?}");
    }

    #[test]
    fn test_check_reports_problems() {
        let mut config = CliConfig::default();
        config.api.url = "pizza.example".into();
        config.api.timeout_secs = Some(0);
        config.order.default_type = " ".into();

        let (errors, _) = check(&config);
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_plain_http_remote_warns() {
        let mut config = CliConfig::default();
        config.api.url = "http://pizza.example".into();

        let (errors, warnings) = check(&config);
        assert!(errors.is_empty());
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_malformed_host_is_an_error() {
        let mut config = CliConfig::default();
        config.api.url = "http://bad host:3000".into();

        let (errors, warnings) = check(&config);
        assert_eq!(errors.len(), 1);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_loopback_http_does_not_warn() {
        let mut config = CliConfig::default();
        config.api.url = "http://127.0.0.1:3000/".into();

        let (errors, warnings) = check(&config);
        assert!(errors.is_empty());
        assert!(warnings.is_empty());
    }
}
