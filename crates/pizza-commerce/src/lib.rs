//! Domain types and ordering logic for the pizza storefront.
//!
//! - **Money**: the shared `en-US`/`USD` price formatter and cent-based totals
//! - **Catalog**: pizza types and their per-size prices
//! - **Cart**: line items and the [`CartStore`](cart::CartStore) seam
//! - **Checkout**: the [`OrderWorkflow`](checkout::OrderWorkflow) state machine
//!   and the order payloads
//!
//! # Example
//!
//! ```rust,ignore
//! use pizza_commerce::prelude::*;
//!
//! let cart = MemoryCartStore::new();
//! let mut workflow = OrderWorkflow::new(api, cart.clone());
//! workflow.load_catalog().await?;
//!
//! workflow.select_type("veggie");
//! workflow.select_size(SizeCode::M).await?;
//! println!("{}", workflow.derive_price()?);
//!
//! workflow.add_to_cart()?;
//! let outcome = workflow.checkout().await?;
//! ```

pub mod api;
pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;

pub use api::PizzaApi;
pub use error::CommerceError;
pub use ids::*;
pub use money::{format_price, Currency, CurrencyFormatter, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::api::PizzaApi;
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{format_price, Currency, CurrencyFormatter, Money};

    // Catalog
    pub use crate::catalog::{Catalog, PizzaType, SizeCode};

    // Cart
    pub use crate::cart::{Cart, CartLineItem, CartStore, MemoryCartStore};

    // Checkout
    pub use crate::checkout::{
        CatalogRefresh, CheckoutOutcome, ClearPolicy, OrderConfirmation, OrderRequest,
        OrderWorkflow, PastOrder, PastOrderItem, Selection, WorkflowEvent, WorkflowOptions,
        WorkflowState,
    };
}
