//! Add pizzas to the persisted cart.

use anyhow::Result;
use pizza_commerce::cart::CartStore;
use serde_json::json;

use super::AddArgs;
use crate::context::Context;

/// Run the add command.
pub async fn run(args: AddArgs, ctx: &Context) -> Result<()> {
    let mut workflow = ctx.workflow()?;

    let spinner = ctx.output.spinner("Loading menu...");
    let loaded = workflow.load_catalog().await;
    spinner.finish_and_clear();
    loaded?;

    workflow.select_type(args.pizza.as_str());
    if let Some(size) = args.size {
        workflow.select_size(size).await?;
    }

    let mut added = Vec::with_capacity(args.count as usize);
    for _ in 0..args.count {
        added.push(workflow.add_to_cart()?);
    }
    let line_items = workflow.cart().len()?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "added": added,
            "line_items": line_items,
        }));
        return Ok(());
    }

    if let Some(item) = added.first() {
        ctx.output.success(&format!(
            "Added {} x {} ({}) at {} each",
            added.len(),
            item.pizza.name,
            item.size.display_name(),
            item.price
        ));
    }
    ctx.output.info(&format!("Cart now holds {} line item(s)", line_items));

    Ok(())
}
