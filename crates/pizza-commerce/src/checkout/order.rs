//! Order payloads exchanged with the backend.

use crate::cart::CartLineItem;
use crate::ids::OrderId;
use crate::money::{format_price, Currency, Money};
use serde::{Deserialize, Serialize};

/// Body of the order submission: the whole cart, as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct OrderRequest {
    pub cart: Vec<CartLineItem>,
}

impl OrderRequest {
    pub fn new(cart: Vec<CartLineItem>) -> Self {
        Self { cart }
    }

    pub fn line_items(&self) -> usize {
        self.cart.len()
    }
}

/// What the backend said about a submitted order.
///
/// The response body is otherwise ignored; only an `orderId` is picked up
/// when present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct OrderConfirmation {
    #[serde(default, rename = "orderId", deserialize_with = "lenient_order_id")]
    pub order_id: Option<OrderId>,
}

impl OrderConfirmation {
    /// Interpret a raw response body. Non-JSON bodies yield an empty confirmation.
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }
}

/// Accept both numeric and string order ids.
fn lenient_order_id<'de, D>(deserializer: D) -> Result<Option<OrderId>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(OrderId::new(s)),
        Some(serde_json::Value::Number(n)) => Some(OrderId::new(n.to_string())),
        _ => None,
    })
}

/// A previously placed order as returned by the past-order endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PastOrder {
    #[serde(default)]
    pub order: PastOrderSummary,
    #[serde(default, rename = "orderItems")]
    pub order_items: Vec<PastOrderItem>,
}

impl PastOrder {
    /// Sum of the item totals.
    pub fn total(&self) -> Option<Money> {
        let totals: Vec<Money> = self
            .order_items
            .iter()
            .map(|item| Money::from_decimal(item.total, Currency::USD))
            .collect();
        Money::try_sum(totals.iter(), Currency::USD)
    }
}

/// Order header.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PastOrderSummary {
    #[serde(default, deserialize_with = "lenient_order_id")]
    pub order_id: Option<OrderId>,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
}

/// One line of a past order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PastOrderItem {
    #[serde(default, rename = "pizzaTypeId")]
    pub pizza_type_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub image: String,
}

impl PastOrderItem {
    pub fn price_display(&self) -> String {
        format_price(Some(self.price))
    }

    pub fn total_display(&self) -> String {
        format_price(Some(self.total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{PizzaType, SizeCode};

    #[test]
    fn test_order_request_shape() {
        let request = OrderRequest::new(vec![CartLineItem::new(
            PizzaType::new("veggie", "Veggie").with_price(SizeCode::M, 9.0),
            SizeCode::M,
            "$9.00",
        )]);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["cart"].as_array().unwrap().len(), 1);
        assert_eq!(json["cart"][0]["price"], "$9.00");
    }

    #[test]
    fn test_empty_order_request() {
        let json = serde_json::to_string(&OrderRequest::default()).unwrap();
        assert_eq!(json, r#"{"cart":[]}"#);
    }

    #[test]
    fn test_confirmation_from_body() {
        let confirmation = OrderConfirmation::from_body(br#"{"orderId": 118}"#);
        assert_eq!(confirmation.order_id, Some(OrderId::new("118")));

        let confirmation = OrderConfirmation::from_body(br#"{"orderId": "abc"}"#);
        assert_eq!(confirmation.order_id, Some(OrderId::new("abc")));

        assert_eq!(OrderConfirmation::from_body(b"ok").order_id, None);
        assert_eq!(OrderConfirmation::from_body(b"{}").order_id, None);
    }

    #[test]
    fn test_past_order_parsing() {
        let json = r#"{
            "order": { "order_id": 7, "date": "2015-01-01", "time": "11:38:36" },
            "orderItems": [
                { "pizzaTypeId": "hawaiian", "name": "The Hawaiian Pizza", "size": "M",
                  "quantity": 2, "price": 13.25, "total": 26.5,
                  "image": "/public/pizzas/hawaiian.webp" },
                { "pizzaTypeId": "classic_dlx", "name": "The Classic Deluxe Pizza", "size": "S",
                  "quantity": 1, "price": 12, "total": 12 }
            ]
        }"#;
        let order: PastOrder = serde_json::from_str(json).unwrap();
        assert_eq!(order.order.order_id, Some(OrderId::new("7")));
        assert_eq!(order.order_items.len(), 2);
        assert_eq!(order.order_items[0].total_display(), "$26.50");
        assert_eq!(order.order_items[1].image, "");
        assert_eq!(order.total().unwrap().display(), "$38.50");
    }
}
