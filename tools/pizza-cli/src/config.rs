//! CLI configuration.

use std::path::Path;

use anyhow::{Context, Result};
use pizza_commerce::catalog::SizeCode;
use pizza_commerce::checkout::{
    CatalogRefresh, ClearPolicy, Selection, WorkflowOptions, DEFAULT_PIZZA,
};
use pizza_commerce::PizzaId;
use pizza_data::ApiConfig;
use pizza_observability::LoggingConfig;
use serde::{Deserialize, Serialize};

/// Config file names searched for, in order, from the working directory up.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["pizza.toml", ".pizza.toml", "pizza.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Backend connection.
    #[serde(default)]
    pub api: ApiConfig,

    /// Ordering defaults.
    #[serde(default)]
    pub order: OrderConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CliConfig {
    /// Load config from a file. Files ending in `.json` are read as JSON, anything else as TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Workflow tuning derived from the `[order]` section.
    pub fn workflow_options(&self) -> WorkflowOptions {
        WorkflowOptions {
            refresh: self.order.catalog_refresh,
            clear_policy: self.order.clear_cart,
            selection: Selection {
                pizza_id: PizzaId::new(self.order.default_type.as_str()),
                size: self.order.default_size,
            },
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Ordering defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderConfig {
    /// Pizza type selected when a session starts.
    #[serde(default = "default_type")]
    pub default_type: String,

    /// Size selected when a session starts.
    #[serde(default)]
    pub default_size: SizeCode,

    /// When the catalog is refetched.
    #[serde(default)]
    pub catalog_refresh: CatalogRefresh,

    /// When the cart is cleared after checkout.
    #[serde(default)]
    pub clear_cart: ClearPolicy,
}

fn default_type() -> String {
    DEFAULT_PIZZA.to_string()
}

impl Default for OrderConfig {
    fn default() -> Self {
        Self {
            default_type: default_type(),
            default_size: SizeCode::default(),
            catalog_refresh: CatalogRefresh::default(),
            clear_cart: ClearPolicy::default(),
        }
    }
}

/// Generate a default pizza.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Pizza storefront configuration

[api]
url = "{url}"
# timeout_secs = 10

[order]
default_type = "{pizza}"
default_size = "L"
# "once" or "on-size-change"
catalog_refresh = "once"
# "on-success" or "always"
clear_cart = "on-success"

[logging]
level = "warn"
# "human" or "json"
format = "human"
"#,
        url = pizza_data::DEFAULT_API_URL,
        pizza = DEFAULT_PIZZA,
    )
}
