//! List the menu.

use anyhow::Result;
use pizza_commerce::catalog::SizeCode;

use crate::context::Context;
use crate::output::price_cell;

/// Run the menu command.
pub async fn run(ctx: &Context) -> Result<()> {
    let mut workflow = ctx.workflow()?;

    let spinner = ctx.output.spinner("Loading menu...");
    let loaded = workflow.load_catalog().await;
    spinner.finish_and_clear();
    loaded?;

    let catalog = workflow.catalog();
    if ctx.output.is_json() {
        let pizzas: Vec<_> = catalog.iter().collect();
        ctx.output.json(&pizzas);
        return Ok(());
    }

    ctx.output.header(&format!("Menu ({} pizzas)", catalog.len()));
    if catalog.is_empty() {
        ctx.output.info("The kitchen has nothing on offer right now.");
        return Ok(());
    }

    let widths = [16, 36, 8, 8, 8];
    ctx.output.table_header(&["ID", "NAME", "S", "M", "L"], &widths);
    for pizza in catalog.iter() {
        let prices: Vec<String> = SizeCode::ALL
            .iter()
            .map(|size| price_cell(pizza.price_for(*size)))
            .collect();
        ctx.output.table_row(
            &[
                pizza.id.as_str(),
                &pizza.name,
                &prices[0],
                &prices[1],
                &prices[2],
            ],
            &widths,
        );
    }

    Ok(())
}
