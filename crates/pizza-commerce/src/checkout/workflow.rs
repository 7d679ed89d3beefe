//! Order workflow state machine.
//!
//! Drives one ordering session: load the catalog, pick a pizza and a size,
//! derive the displayed price, append line items to the shared cart and
//! check out.
//!
//! ```text
//!            load_catalog ok
//!  Loading ──────────────────▶ Ready
//!     │
//!     └── load_catalog err ──▶ Failed(reason)
//!
//!  checkout:  S ──▶ Loading ──▶ S   (S is Ready or Failed)
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::api::PizzaApi;
use crate::cart::{CartLineItem, CartStore};
use crate::catalog::{Catalog, PizzaType, SizeCode};
use crate::checkout::OrderRequest;
use crate::error::CommerceError;
use crate::ids::{OrderId, PizzaId};

/// Pizza type selected when a session starts.
pub const DEFAULT_PIZZA: &str = "pepperoni";

/// Workflow state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowState {
    /// Waiting on the catalog or an order submission.
    Loading,
    /// Catalog loaded, selection and cart operations available.
    Ready,
    /// The catalog could not be loaded.
    Failed(String),
}

impl WorkflowState {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowState::Loading => "loading",
            WorkflowState::Ready => "ready",
            WorkflowState::Failed(_) => "failed",
        }
    }
}

/// When the catalog is fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CatalogRefresh {
    /// Only on explicit `load_catalog` calls.
    #[default]
    Once,
    /// Also every time the size selection changes.
    OnSizeChange,
}

/// What happens to the cart after a checkout attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ClearPolicy {
    /// Clear only once the backend accepted the order.
    #[default]
    OnSuccess,
    /// Clear whether or not the submission went through.
    Always,
}

/// The user's current pizza and size choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub pizza_id: PizzaId,
    pub size: SizeCode,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            pizza_id: PizzaId::new(DEFAULT_PIZZA),
            size: SizeCode::default(),
        }
    }
}

/// Workflow tuning.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WorkflowOptions {
    pub refresh: CatalogRefresh,
    pub clear_policy: ClearPolicy,
    /// Selection a new session starts with.
    pub selection: Selection,
}

/// Result of a checkout attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// The backend accepted the order and the cart was cleared.
    Submitted {
        line_items: usize,
        order_id: Option<OrderId>,
    },
    /// The submission failed.
    Failed { reason: String, cart_cleared: bool },
}

impl CheckoutOutcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, CheckoutOutcome::Submitted { .. })
    }
}

/// Observable workflow changes, for anything rendering the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowEvent {
    StateChanged(WorkflowState),
    CatalogLoaded { pizzas: usize },
    SelectionChanged(Selection),
    CartChanged { line_items: usize },
}

type Listener = Box<dyn Fn(&WorkflowEvent) + Send + Sync>;

/// One ordering session over a backend `A` and a shared cart `S`.
pub struct OrderWorkflow<A, S> {
    api: A,
    cart: S,
    catalog: Catalog,
    selection: Selection,
    state: WorkflowState,
    options: WorkflowOptions,
    listeners: Vec<Listener>,
}

impl<A: PizzaApi, S: CartStore> OrderWorkflow<A, S> {
    /// Start a session with default options. The cart may already hold items.
    pub fn new(api: A, cart: S) -> Self {
        Self::with_options(api, cart, WorkflowOptions::default())
    }

    pub fn with_options(api: A, cart: S, options: WorkflowOptions) -> Self {
        Self {
            api,
            cart,
            catalog: Catalog::default(),
            selection: options.selection.clone(),
            state: WorkflowState::Loading,
            options,
            listeners: Vec::new(),
        }
    }

    /// Register a listener for workflow events.
    pub fn subscribe(&mut self, listener: impl Fn(&WorkflowEvent) + Send + Sync + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == WorkflowState::Ready
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn options(&self) -> &WorkflowOptions {
        &self.options
    }

    pub fn cart(&self) -> &S {
        &self.cart
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Fetch the catalog and become `Ready`, or `Failed` if the fetch fails.
    pub async fn load_catalog(&mut self) -> Result<(), CommerceError> {
        self.set_state(WorkflowState::Loading);
        match self.api.fetch_catalog().await {
            Ok(pizzas) => {
                let count = pizzas.len();
                self.catalog = Catalog::new(pizzas);
                info!(pizzas = count, "catalog loaded");
                self.emit(WorkflowEvent::CatalogLoaded { pizzas: count });
                self.set_state(WorkflowState::Ready);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "catalog load failed");
                self.set_state(WorkflowState::Failed(e.to_string()));
                Err(e)
            }
        }
    }

    /// Change the selected pizza type. The id is not checked against the catalog.
    pub fn select_type(&mut self, pizza_id: impl Into<PizzaId>) {
        self.selection.pizza_id = pizza_id.into();
        debug!(pizza = %self.selection.pizza_id, "pizza type selected");
        self.emit(WorkflowEvent::SelectionChanged(self.selection.clone()));
    }

    /// Change the selected size, refetching the catalog under
    /// [`CatalogRefresh::OnSizeChange`].
    pub async fn select_size(&mut self, size: SizeCode) -> Result<(), CommerceError> {
        self.selection.size = size;
        debug!(size = %size, "size selected");
        self.emit(WorkflowEvent::SelectionChanged(self.selection.clone()));

        if self.options.refresh == CatalogRefresh::OnSizeChange {
            self.load_catalog().await?;
        }
        Ok(())
    }

    /// The catalog entry for the current selection.
    pub fn selected_pizza(&self) -> Result<&PizzaType, CommerceError> {
        if !self.is_ready() {
            return Err(CommerceError::NotReady);
        }
        self.catalog
            .get(&self.selection.pizza_id)
            .ok_or_else(|| CommerceError::PizzaNotFound(self.selection.pizza_id.to_string()))
    }

    /// Formatted price of the current selection.
    pub fn derive_price(&self) -> Result<String, CommerceError> {
        self.selected_pizza()?.display_price(self.selection.size)
    }

    /// Append the current selection to the cart.
    ///
    /// Every call appends a new line item, even when an identical one exists.
    pub fn add_to_cart(&mut self) -> Result<CartLineItem, CommerceError> {
        let price = self.derive_price()?;
        let pizza = self.selected_pizza()?.clone();
        let item = CartLineItem::new(pizza, self.selection.size, price);

        self.cart.append(item.clone())?;
        let line_items = self.cart.len()?;
        info!(
            pizza = %item.pizza.id,
            size = %item.size,
            price = %item.price,
            line_items,
            "added to cart"
        );
        self.emit(WorkflowEvent::CartChanged { line_items });
        Ok(item)
    }

    /// Submit the whole cart, then clear it according to the [`ClearPolicy`].
    ///
    /// An empty cart is still submitted. Backend failures are reported in the
    /// outcome; cart storage failures are returned as errors. The workflow is
    /// `Loading` while the order is in flight and then returns to the state it
    /// was in, so a session without a catalog stays `Failed`.
    pub async fn checkout(&mut self) -> Result<CheckoutOutcome, CommerceError> {
        let previous = self.state.clone();
        self.set_state(WorkflowState::Loading);
        let result = self.submit_and_clear().await;
        self.set_state(previous);
        result
    }

    async fn submit_and_clear(&mut self) -> Result<CheckoutOutcome, CommerceError> {
        let request = OrderRequest::new(self.cart.items()?);
        let line_items = request.line_items();
        info!(line_items, "submitting order");

        let submission = self.api.submit_order(&request).await;
        let clear = submission.is_ok() || self.options.clear_policy == ClearPolicy::Always;
        if clear {
            self.cart.clear()?;
            self.emit(WorkflowEvent::CartChanged { line_items: 0 });
        }

        Ok(match submission {
            Ok(confirmation) => {
                info!(line_items, order_id = ?confirmation.order_id, "order submitted");
                CheckoutOutcome::Submitted {
                    line_items,
                    order_id: confirmation.order_id,
                }
            }
            Err(e) => {
                warn!(error = %e, cart_cleared = clear, "order submission failed");
                CheckoutOutcome::Failed {
                    reason: e.to_string(),
                    cart_cleared: clear,
                }
            }
        })
    }

    fn set_state(&mut self, state: WorkflowState) {
        if self.state != state {
            debug!(from = self.state.as_str(), to = state.as_str(), "workflow state change");
            self.state = state;
            self.emit(WorkflowEvent::StateChanged(self.state.clone()));
        }
    }

    fn emit(&self, event: WorkflowEvent) {
        for listener in &self.listeners {
            listener(&event);
        }
    }
}
