//! Interactive ordering session.

use std::sync::{Arc, Mutex};

use anyhow::{bail, Result};
use dialoguer::Select;
use indicatif::ProgressBar;
use pizza_commerce::cart::CartStore;
use pizza_commerce::catalog::SizeCode;
use pizza_commerce::checkout::{WorkflowEvent, WorkflowState};

use super::OrderArgs;
use crate::commands::cart::print_cart;
use crate::commands::checkout::submit;
use crate::context::{CliWorkflow, Context};
use crate::output::{price_cell, Output};

enum Action {
    ChoosePizza,
    ChooseSize,
    AddToCart,
    ViewCart,
    Checkout,
    Reload,
    Quit,
}

/// Run the order command.
pub async fn run(args: OrderArgs, ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        bail!("The order session is interactive; use `add` and `checkout` with --json");
    }

    let mut workflow = ctx.workflow()?;
    attach_spinner(&mut workflow, ctx.output.clone());

    workflow.load_catalog().await?;
    if let Some(pizza) = args.pizza {
        workflow.select_type(pizza);
    }
    if let Some(size) = args.size {
        workflow.select_size(size).await?;
    }

    ctx.output.header("Pizza order");
    loop {
        let (labels, actions) = menu(&workflow)?;
        let choice = Select::new()
            .with_prompt("What next?")
            .items(&labels)
            .default(0)
            .interact()?;

        match actions[choice] {
            Action::ChoosePizza => choose_pizza(&mut workflow, ctx)?,
            Action::ChooseSize => {
                if let Err(e) = choose_size(&mut workflow).await {
                    ctx.output.warn(&format!("Could not refresh the menu: {}", e));
                }
            }
            Action::AddToCart => match workflow.add_to_cart() {
                Ok(item) => ctx.output.success(&format!(
                    "Added {} ({}) at {}",
                    item.pizza.name,
                    item.size.display_name(),
                    item.price
                )),
                Err(e) => ctx.output.warn(&e.to_string()),
            },
            Action::ViewCart => {
                let cart = workflow.cart().snapshot()?;
                print_cart(ctx, &cart);
                if let Ok(total) = cart.total_display() {
                    ctx.output.kv("Total", &total);
                }
            }
            Action::Checkout => {
                if let Err(e) = submit(&mut workflow, ctx, false).await {
                    ctx.output.error(&format!("{:#}", e));
                }
            }
            Action::Reload => {
                if let Err(e) = workflow.load_catalog().await {
                    ctx.output.warn(&format!("Could not load the menu: {}", e));
                }
            }
            Action::Quit => break,
        }
    }

    Ok(())
}

/// Show a spinner whenever the workflow is waiting on the backend.
fn attach_spinner(workflow: &mut CliWorkflow, output: Output) {
    let active: Arc<Mutex<Option<ProgressBar>>> = Arc::new(Mutex::new(None));
    workflow.subscribe(move |event| {
        let WorkflowEvent::StateChanged(state) = event else {
            return;
        };
        let Ok(mut slot) = active.lock() else {
            return;
        };
        if let Some(spinner) = slot.take() {
            spinner.finish_and_clear();
        }
        if *state == WorkflowState::Loading {
            *slot = Some(output.spinner("Talking to the kitchen..."));
        }
    });
}

fn menu(workflow: &CliWorkflow) -> Result<(Vec<String>, Vec<Action>)> {
    if !workflow.is_ready() {
        return Ok((
            vec!["Reload menu".to_string(), "Quit".to_string()],
            vec![Action::Reload, Action::Quit],
        ));
    }

    let selection = workflow.selection();
    let pizza = workflow
        .selected_pizza()
        .map(|p| p.name.clone())
        .unwrap_or_else(|_| format!("{} (not on the menu)", selection.pizza_id));
    let price = match workflow.derive_price() {
        Ok(price) => price,
        Err(_) => "no price".to_string(),
    };
    let line_items = workflow.cart().len()?;

    Ok((
        vec![
            format!("Add to cart: {} {} ({})", selection.size.display_name(), pizza, price),
            format!("Choose pizza [{}]", pizza),
            format!("Choose size [{}]", selection.size.display_name()),
            format!("View cart [{} item(s)]", line_items),
            "Checkout".to_string(),
            "Quit".to_string(),
        ],
        vec![
            Action::AddToCart,
            Action::ChoosePizza,
            Action::ChooseSize,
            Action::ViewCart,
            Action::Checkout,
            Action::Quit,
        ],
    ))
}

fn choose_pizza(workflow: &mut CliWorkflow, ctx: &Context) -> Result<()> {
    let pizzas: Vec<_> = workflow
        .catalog()
        .iter()
        .map(|p| (p.id.clone(), p.name.clone()))
        .collect();
    if pizzas.is_empty() {
        ctx.output.warn("The menu is empty");
        return Ok(());
    }

    let current = &workflow.selection().pizza_id;
    let default = pizzas.iter().position(|(id, _)| id == current).unwrap_or(0);
    let labels: Vec<&str> = pizzas.iter().map(|(_, name)| name.as_str()).collect();

    let choice = Select::new()
        .with_prompt("Pizza")
        .items(&labels)
        .default(default)
        .interact()?;
    workflow.select_type(pizzas[choice].0.clone());
    Ok(())
}

async fn choose_size(workflow: &mut CliWorkflow) -> Result<()> {
    let pizza = workflow.selected_pizza().ok();
    let labels: Vec<String> = SizeCode::ALL
        .iter()
        .map(|size| {
            let price = pizza.and_then(|p| p.price_for(*size));
            format!("{} ({})", size.display_name(), price_cell(price))
        })
        .collect();
    let default = SizeCode::ALL
        .iter()
        .position(|size| *size == workflow.selection().size)
        .unwrap_or(0);

    let choice = Select::new()
        .with_prompt("Size")
        .items(&labels)
        .default(default)
        .interact()?;
    workflow.select_size(SizeCode::ALL[choice]).await?;
    Ok(())
}
