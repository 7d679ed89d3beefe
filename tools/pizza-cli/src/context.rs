//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use pizza_commerce::checkout::OrderWorkflow;
use pizza_data::{ApiConfig, HttpPizzaApi, API_URL_ENV};
use tracing::debug;

use crate::cart_file::FileCartStore;
use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Default cart location, relative to the working directory.
pub const DEFAULT_CART_FILE: &str = ".pizza/cart.json";

/// The workflow as the CLI runs it.
pub type CliWorkflow = OrderWorkflow<HttpPizzaApi, FileCartStore>;

/// Global flags that shape the context.
#[derive(Debug, Default)]
pub struct GlobalOptions<'a> {
    pub config: Option<&'a str>,
    pub api_url: Option<&'a str>,
    pub cart_file: Option<&'a str>,
}

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Where the configuration came from, if a file was found.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Effective backend settings.
    pub api_config: ApiConfig,
    /// Persisted cart location.
    pub cart_path: PathBuf,
}

impl Context {
    /// Load context from config file, environment and flags.
    pub fn load(options: &GlobalOptions<'_>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = options.config {
            let path = resolve_path(&cwd, path);
            (CliConfig::load(&path)?, Some(path))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            }
        };

        let api_config = resolve_api_config(
            &config.api,
            std::env::var(API_URL_ENV).ok(),
            options.api_url,
        );
        let cart_path = resolve_path(&cwd, options.cart_file.unwrap_or(DEFAULT_CART_FILE));

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
            api_config,
            cart_path,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    match CliConfig::load(&config_path) {
                        Ok(config) => return Some((config, config_path)),
                        Err(e) => debug!(
                            path = %config_path.display(),
                            error = %e,
                            "skipping config file"
                        ),
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Backend client for the effective API settings.
    pub fn api(&self) -> Result<HttpPizzaApi> {
        HttpPizzaApi::new(&self.api_config)
            .with_context(|| format!("Invalid API URL: {}", self.api_config.url))
    }

    /// The persisted cart.
    pub fn cart(&self) -> FileCartStore {
        FileCartStore::new(&self.cart_path)
    }

    /// A fresh ordering session over the backend and the persisted cart.
    pub fn workflow(&self) -> Result<CliWorkflow> {
        self.output.debug(&format!("Backend: {}", self.api_config.base_url()));
        self.output.debug(&format!("Cart: {}", self.cart_path.display()));
        Ok(OrderWorkflow::with_options(
            self.api()?,
            self.cart(),
            self.config.workflow_options(),
        ))
    }
}

fn resolve_path(cwd: &Path, path: &str) -> PathBuf {
    if Path::new(path).is_absolute() {
        PathBuf::from(path)
    } else {
        cwd.join(path)
    }
}

/// Apply URL overrides: flag, then environment, then the config file.
pub fn resolve_api_config(
    file: &ApiConfig,
    env_url: Option<String>,
    flag_url: Option<&str>,
) -> ApiConfig {
    file.clone()
        .with_env_override(env_url)
        .with_env_override(flag_url.map(str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pizza_data::DEFAULT_API_URL;

    #[test]
    fn test_url_precedence() {
        let file = ApiConfig::new("http://from-file:3000");

        let config = resolve_api_config(&file, None, None);
        assert_eq!(config.url, "http://from-file:3000");

        let config = resolve_api_config(&file, Some("http://from-env".into()), None);
        assert_eq!(config.url, "http://from-env");

        let config = resolve_api_config(
            &file,
            Some("http://from-env".into()),
            Some("http://from-flag"),
        );
        assert_eq!(config.url, "http://from-flag");
    }

    #[test]
    fn test_url_defaults() {
        let config = resolve_api_config(&ApiConfig::default(), Some(String::new()), None);
        assert_eq!(config.url, DEFAULT_API_URL);
    }

    #[test]
    fn test_resolve_path() {
        let cwd = Path::new("/srv/shop");
        assert_eq!(
            resolve_path(cwd, DEFAULT_CART_FILE),
            PathBuf::from("/srv/shop/.pizza/cart.json")
        );
        assert_eq!(resolve_path(cwd, "/tmp/cart.json"), PathBuf::from("/tmp/cart.json"));
    }
}
