//! CLI command implementations.

pub mod add;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod menu;
pub mod order;
pub mod past_order;
pub mod show;

use clap::{Args, Subcommand};
use pizza_commerce::catalog::SizeCode;

/// Arguments for the show command.
#[derive(Args)]
pub struct ShowArgs {
    /// Pizza type id, e.g. `pepperoni`.
    pub pizza: String,

    /// Size to price (S, M or L). Defaults to the configured size.
    #[arg(short, long)]
    pub size: Option<SizeCode>,
}

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    /// Pizza type id, e.g. `pepperoni`.
    pub pizza: String,

    /// Size (S, M or L). Defaults to the configured size.
    #[arg(short, long)]
    pub size: Option<SizeCode>,

    /// Number of line items to add.
    #[arg(
        short = 'n',
        long,
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub count: u32,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart and its total.
    Show,
    /// Remove every line item.
    Clear,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the order command.
#[derive(Args)]
pub struct OrderArgs {
    /// Pizza type to start with.
    #[arg(short, long)]
    pub pizza: Option<String>,

    /// Size to start with.
    #[arg(short, long)]
    pub size: Option<SizeCode>,
}

/// Arguments for the past-order command.
#[derive(Args)]
pub struct PastOrderArgs {
    /// Order id.
    pub order_id: String,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the configuration.
    Validate,
}
