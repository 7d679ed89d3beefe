//! Show or clear the persisted cart.

use anyhow::Result;
use pizza_commerce::cart::{Cart, CartStore};
use serde_json::json;

use super::{CartArgs, CartCommand};
use crate::context::Context;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => show_cart(ctx),
        CartCommand::Clear => clear_cart(ctx),
    }
}

fn show_cart(ctx: &Context) -> Result<()> {
    let store = ctx.cart();
    let cart = store.snapshot()?;
    let total = cart.total_display().ok();

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "items": cart.items,
            "total": total,
            "updated_at": store.updated_at()?,
        }));
        return Ok(());
    }

    ctx.output.header("Cart");
    print_cart(ctx, &cart);
    if cart.is_empty() {
        return Ok(());
    }

    match total {
        Some(total) => ctx.output.kv("Total", &total),
        None => ctx
            .output
            .warn("Total unavailable: a line item has no catalog price for its size"),
    }
    if let Some(updated_at) = store.updated_at()? {
        ctx.output
            .kv("Updated", &updated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string());
    }
    ctx.output
        .debug(&format!("Cart file: {}", store.path().display()));

    Ok(())
}

fn clear_cart(ctx: &Context) -> Result<()> {
    let store = ctx.cart();
    let removed = store.len()?;
    store.clear()?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "removed": removed }));
    } else {
        ctx.output
            .success(&format!("Removed {} line item(s) from the cart", removed));
    }
    Ok(())
}

/// Print line items in the order they were added.
pub fn print_cart(ctx: &Context, cart: &Cart) {
    if cart.is_empty() {
        ctx.output.info("The cart is empty.");
        return;
    }

    let widths = [4, 36, 8, 10];
    ctx.output.table_header(&["#", "PIZZA", "SIZE", "PRICE"], &widths);
    for (i, item) in cart.items.iter().enumerate() {
        ctx.output.table_row(
            &[
                &(i + 1).to_string(),
                &item.pizza.name,
                item.size.code(),
                &item.price,
            ],
            &widths,
        );
    }
}
