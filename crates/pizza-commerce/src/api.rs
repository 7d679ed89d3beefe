//! Backend collaborators of the order workflow.

use async_trait::async_trait;

use crate::catalog::PizzaType;
use crate::checkout::{OrderConfirmation, OrderRequest, PastOrder};
use crate::error::CommerceError;
use crate::ids::OrderId;

/// The storefront backend.
///
/// `pizza-data` provides the HTTP implementation; tests substitute in-memory
/// fakes.
#[async_trait]
pub trait PizzaApi: Send + Sync {
    /// Fetch every orderable pizza type.
    async fn fetch_catalog(&self) -> Result<Vec<PizzaType>, CommerceError>;

    /// Submit a cart as an order.
    async fn submit_order(&self, order: &OrderRequest) -> Result<OrderConfirmation, CommerceError>;

    /// Look up a previously placed order.
    async fn fetch_past_order(&self, order_id: &OrderId) -> Result<PastOrder, CommerceError>;
}

#[async_trait]
impl<T: PizzaApi + ?Sized> PizzaApi for std::sync::Arc<T> {
    async fn fetch_catalog(&self) -> Result<Vec<PizzaType>, CommerceError> {
        (**self).fetch_catalog().await
    }

    async fn submit_order(&self, order: &OrderRequest) -> Result<OrderConfirmation, CommerceError> {
        (**self).submit_order(order).await
    }

    async fn fetch_past_order(&self, order_id: &OrderId) -> Result<PastOrder, CommerceError> {
        (**self).fetch_past_order(order_id).await
    }
}
