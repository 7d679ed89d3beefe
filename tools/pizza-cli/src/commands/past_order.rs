//! Look up a past order.

use anyhow::Result;
use pizza_commerce::{OrderId, PizzaApi};

use super::PastOrderArgs;
use crate::context::Context;

/// Run the past-order command.
pub async fn run(args: PastOrderArgs, ctx: &Context) -> Result<()> {
    let api = ctx.api()?;
    let order_id = OrderId::new(args.order_id.trim());

    let spinner = ctx.output.spinner(&format!("Looking up order #{}...", order_id));
    let result = api.fetch_past_order(&order_id).await;
    spinner.finish_and_clear();
    let order = result?;

    if ctx.output.is_json() {
        ctx.output.json(&order);
        return Ok(());
    }

    let summary = &order.order;
    let shown_id = summary.order_id.as_ref().unwrap_or(&order_id);
    ctx.output.header(&format!("Order #{}", shown_id));
    if !summary.date.is_empty() {
        ctx.output.kv("Date", &summary.date);
    }
    if !summary.time.is_empty() {
        ctx.output.kv("Time", &summary.time);
    }

    if order.order_items.is_empty() {
        ctx.output.info("No items on this order.");
        return Ok(());
    }

    let widths = [36, 6, 5, 10, 10];
    ctx.output
        .table_header(&["PIZZA", "SIZE", "QTY", "PRICE", "TOTAL"], &widths);
    for item in &order.order_items {
        ctx.output.table_row(
            &[
                &item.name,
                &item.size,
                &item.quantity.to_string(),
                &item.price_display(),
                &item.total_display(),
            ],
            &widths,
        );
    }
    if let Some(total) = order.total() {
        ctx.output.kv("Total", &total.display());
    }

    Ok(())
}
