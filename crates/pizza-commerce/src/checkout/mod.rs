//! Checkout module.
//!
//! Contains the order workflow and the order payloads it exchanges.

mod order;
mod workflow;

pub use order::{OrderConfirmation, OrderRequest, PastOrder, PastOrderItem, PastOrderSummary};
pub use workflow::{
    CatalogRefresh, CheckoutOutcome, ClearPolicy, OrderWorkflow, Selection, WorkflowEvent,
    WorkflowOptions, WorkflowState, DEFAULT_PIZZA,
};
