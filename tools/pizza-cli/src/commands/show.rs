//! Show one pizza with the price for a size.

use anyhow::Result;
use serde_json::json;

use super::ShowArgs;
use crate::context::Context;

/// Run the show command.
pub async fn run(args: ShowArgs, ctx: &Context) -> Result<()> {
    let mut workflow = ctx.workflow()?;

    let spinner = ctx.output.spinner("Loading menu...");
    let loaded = workflow.load_catalog().await;
    spinner.finish_and_clear();
    loaded?;

    workflow.select_type(args.pizza.as_str());
    if let Some(size) = args.size {
        workflow.select_size(size).await?;
    }

    let pizza = workflow.selected_pizza()?;
    let size = workflow.selection().size;
    let price = workflow.derive_price()?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "pizza": pizza,
            "size": size,
            "price": price,
        }));
        return Ok(());
    }

    ctx.output.header(&pizza.name);
    if !pizza.description.is_empty() {
        ctx.output.kv("Description", &pizza.description);
    }
    if !pizza.image.is_empty() {
        ctx.output.kv("Image", &pizza.image);
    }
    ctx.output.kv("Size", size.display_name());
    ctx.output.kv("Price", &price);

    Ok(())
}
