//! Pizza CLI - order pizza from the storefront backend.
//!
//! Commands:
//! - `pizza menu` - List pizzas and their prices
//! - `pizza show` - Show one pizza and its price for a size
//! - `pizza add` - Add a pizza to the cart
//! - `pizza cart` - Show or clear the cart
//! - `pizza checkout` - Submit the cart as an order
//! - `pizza order` - Interactive ordering session
//! - `pizza past-order` - Look up a past order
//! - `pizza config` - Manage configuration

mod cart_file;
mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;

use commands::{
    AddArgs, CartArgs, CheckoutArgs, ConfigArgs, OrderArgs, PastOrderArgs, ShowArgs,
};
use context::GlobalOptions;

/// Pizza CLI - browse the menu, fill a cart and check out
#[derive(Parser)]
#[command(name = "pizza")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Backend base URL (overrides PIZZA_API_URL and the config file)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Cart file path
    #[arg(long, global = true)]
    cart_file: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the pizzas on the menu
    Menu,

    /// Show a pizza and its price
    Show(ShowArgs),

    /// Add a pizza to the cart
    Add(AddArgs),

    /// Show or clear the cart
    Cart(CartArgs),

    /// Submit the cart as an order
    Checkout(CheckoutArgs),

    /// Start an interactive ordering session
    Order(OrderArgs),

    /// Look up a past order
    PastOrder(PastOrderArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Menu => "menu",
            Commands::Show(_) => "show",
            Commands::Add(_) => "add",
            Commands::Cart(_) => "cart",
            Commands::Checkout(_) => "checkout",
            Commands::Order(_) => "order",
            Commands::PastOrder(_) => "past-order",
            Commands::Config(_) => "config",
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let options = GlobalOptions {
        config: cli.config.as_deref(),
        api_url: cli.api_url.as_deref(),
        cart_file: cli.cart_file.as_deref(),
    };
    let ctx = match context::Context::load(&options, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    let mut logging = ctx.config.logging;
    if cli.verbose {
        logging = logging.verbose();
    }
    if let Err(e) = pizza_observability::init_logging(&logging) {
        ctx.output.warn(&format!("Logging disabled: {}", e));
    }
    debug!(command = cli.command.name(), "dispatching command");

    // Execute command
    let result = match cli.command {
        Commands::Menu => commands::menu::run(&ctx).await,
        Commands::Show(args) => commands::show::run(args, &ctx).await,
        Commands::Add(args) => commands::add::run(args, &ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Checkout(args) => commands::checkout::run(args, &ctx).await,
        Commands::Order(args) => commands::order::run(args, &ctx).await,
        Commands::PastOrder(args) => commands::past_order::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
