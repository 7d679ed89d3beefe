//! REST implementation of the storefront backend.

use async_trait::async_trait;
use pizza_commerce::catalog::PizzaType;
use pizza_commerce::checkout::{OrderConfirmation, OrderRequest, PastOrder};
use pizza_commerce::{CommerceError, OrderId, PizzaApi};
use reqwest::Url;
use tracing::info;

use crate::{ApiConfig, FetchClient, FetchError};

/// Catalog endpoint.
pub const CATALOG_PATH: &str = "/api/pizzas";

/// Order submission endpoint.
pub const ORDER_PATH: &str = "/api/order";

/// Past-order URL for an order id under `base_url`. The id is percent-encoded
/// as a single path segment.
pub fn past_order_url(base_url: &str, order_id: &OrderId) -> Result<Url, FetchError> {
    let mut url =
        Url::parse(base_url).map_err(|e| FetchError::InvalidUrl(format!("{base_url}: {e}")))?;
    url.path_segments_mut()
        .map_err(|_| FetchError::InvalidUrl(base_url.to_string()))?
        .pop_if_empty()
        .extend(["api", "past-order"])
        .push(order_id.as_str());
    Ok(url)
}

/// [`PizzaApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpPizzaApi {
    client: FetchClient,
}

impl HttpPizzaApi {
    /// Connect to the configured backend.
    pub fn new(config: &ApiConfig) -> Result<Self, FetchError> {
        Ok(Self::with_client(FetchClient::from_config(config)?))
    }

    /// Use an existing client; it must carry the backend base URL.
    pub fn with_client(client: FetchClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &FetchClient {
        &self.client
    }

    async fn get_catalog(&self) -> Result<Vec<PizzaType>, FetchError> {
        self.client
            .get(CATALOG_PATH)
            .accept("application/json")
            .send()
            .await?
            .error_for_status()?
            .json()
    }

    async fn post_order(&self, order: &OrderRequest) -> Result<OrderConfirmation, FetchError> {
        let response = self
            .client
            .post(ORDER_PATH)
            .json(order)?
            .send()
            .await?
            .error_for_status()?;
        Ok(OrderConfirmation::from_body(response.bytes()))
    }
}

#[async_trait]
impl PizzaApi for HttpPizzaApi {
    async fn fetch_catalog(&self) -> Result<Vec<PizzaType>, CommerceError> {
        self.get_catalog()
            .await
            .map_err(|e| CommerceError::CatalogUnavailable(e.to_string()))
    }

    async fn submit_order(&self, order: &OrderRequest) -> Result<OrderConfirmation, CommerceError> {
        let confirmation = self
            .post_order(order)
            .await
            .map_err(|e| CommerceError::SubmissionFailed(e.to_string()))?;
        info!(line_items = order.line_items(), order_id = ?confirmation.order_id, "order accepted");
        Ok(confirmation)
    }

    async fn fetch_past_order(&self, order_id: &OrderId) -> Result<PastOrder, CommerceError> {
        let url = past_order_url(self.client.base_url().unwrap_or_default(), order_id)
            .map_err(|e| CommerceError::Backend(e.to_string()))?;
        let response = self
            .client
            .get(url.to_string())
            .accept("application/json")
            .send()
            .await
            .map_err(|e| CommerceError::Backend(e.to_string()))?;

        if response.is_not_found() {
            return Err(CommerceError::OrderNotFound(order_id.to_string()));
        }

        response
            .error_for_status()
            .and_then(|r| r.json())
            .map_err(|e| CommerceError::Backend(e.to_string()))
    }
}
