//! Submit the persisted cart as an order.

use anyhow::{bail, Result};
use dialoguer::Confirm;
use indicatif::ProgressBar;
use pizza_commerce::cart::CartStore;
use pizza_commerce::checkout::{CheckoutOutcome, ClearPolicy};
use serde_json::json;

use super::CheckoutArgs;
use crate::commands::cart::print_cart;
use crate::context::{CliWorkflow, Context};
use crate::output::Output;

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let mut workflow = ctx.workflow()?;
    let cart = workflow.cart().snapshot()?;

    ctx.output.header("Checkout");
    print_cart(ctx, &cart);
    if let Ok(total) = cart.total_display() {
        ctx.output.kv("Total", &total);
    }
    if cart.is_empty() {
        ctx.output.warn("The cart is empty; an empty order will be submitted");
    }
    if workflow.options().clear_policy == ClearPolicy::Always {
        ctx.output
            .debug("Cart is cleared even if the submission fails (clear_cart = \"always\")");
    }

    if !args.yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt("Place this order?")
            .default(true)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Checkout cancelled");
            return Ok(());
        }
    }

    submit(&mut workflow, ctx, true).await
}

/// Check out and report the outcome. A failed submission is an error.
///
/// Pass `show_spinner = false` when the workflow already has a listener
/// drawing progress for the `Loading` state.
pub async fn submit(workflow: &mut CliWorkflow, ctx: &Context, show_spinner: bool) -> Result<()> {
    let spinner = checkout_spinner(&ctx.output, show_spinner);
    let outcome = workflow.checkout().await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    match outcome? {
        CheckoutOutcome::Submitted {
            line_items,
            order_id,
        } => {
            if ctx.output.is_json() {
                ctx.output.json(&json!({
                    "submitted": true,
                    "line_items": line_items,
                    "order_id": order_id,
                }));
                return Ok(());
            }
            match order_id {
                Some(id) => ctx
                    .output
                    .success(&format!("Order #{} placed ({} line item(s))", id, line_items)),
                None => ctx
                    .output
                    .success(&format!("Order placed ({} line item(s))", line_items)),
            }
            Ok(())
        }
        CheckoutOutcome::Failed {
            reason,
            cart_cleared,
        } => {
            if ctx.output.is_json() {
                ctx.output.json(&json!({
                    "submitted": false,
                    "reason": reason,
                    "cart_cleared": cart_cleared,
                }));
            } else if cart_cleared {
                ctx.output.warn("The cart was cleared anyway");
            } else {
                ctx.output.info("Your cart was kept; run checkout again to retry");
            }
            bail!("Order was not placed: {}", reason)
        }
    }
}

fn checkout_spinner(output: &Output, show_spinner: bool) -> Option<ProgressBar> {
    show_spinner.then(|| output.spinner("Sending order to the kitchen..."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_is_skipped_when_disabled() {
        let output = Output::new(false, true);
        assert!(checkout_spinner(&output, false).is_none());
        assert!(checkout_spinner(&output, true).is_some());
    }
}
