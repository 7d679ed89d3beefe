//! Cart and line item types.

use crate::catalog::{PizzaType, SizeCode};
use crate::error::CommerceError;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// One cart entry: the chosen pizza, its size and the price shown when it was added.
///
/// The serialized form is the order wire format: `{"pizza", "size", "price"}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLineItem {
    pub pizza: PizzaType,
    pub size: SizeCode,
    /// Formatted price captured at add time; never re-derived.
    pub price: String,
}

impl CartLineItem {
    pub fn new(pizza: PizzaType, size: SizeCode, price: impl Into<String>) -> Self {
        Self {
            pizza,
            size,
            price: price.into(),
        }
    }

    /// Unit price in cents from the pizza's price table.
    pub fn unit_price(&self) -> Result<Money, CommerceError> {
        self.pizza
            .money_for(self.size)
            .ok_or_else(|| CommerceError::PriceUnavailable {
                pizza: self.pizza.id.to_string(),
                size: self.size.code().to_string(),
            })
    }
}

/// An ordered snapshot of line items, in the order they were added.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Cart {
    pub items: Vec<CartLineItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Order total from each line's catalog price.
    ///
    /// Fails when any line has no price rather than under-reporting the total.
    pub fn total(&self) -> Result<Money, CommerceError> {
        let prices = self
            .items
            .iter()
            .map(CartLineItem::unit_price)
            .collect::<Result<Vec<_>, _>>()?;
        Money::try_sum(prices.iter(), Currency::USD).ok_or(CommerceError::Overflow)
    }

    /// Formatted order total.
    pub fn total_display(&self) -> Result<String, CommerceError> {
        Ok(self.total()?.display())
    }
}

impl From<Vec<CartLineItem>> for Cart {
    fn from(items: Vec<CartLineItem>) -> Self {
        Self { items }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pepperoni() -> PizzaType {
        PizzaType::new("pepperoni", "The Pepperoni Pizza")
            .with_price(SizeCode::S, 9.75)
            .with_price(SizeCode::L, 15.25)
    }

    #[test]
    fn test_line_item_wire_shape() {
        let item = CartLineItem::new(pepperoni(), SizeCode::L, "$15.25");
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["size"], "L");
        assert_eq!(json["price"], "$15.25");
        assert_eq!(json["pizza"]["id"], "pepperoni");
        assert_eq!(json["pizza"]["sizes"]["S"], 9.75);
    }

    #[test]
    fn test_cart_total() {
        let cart = Cart::from(vec![
            CartLineItem::new(pepperoni(), SizeCode::L, "$15.25"),
            CartLineItem::new(pepperoni(), SizeCode::S, "$9.75"),
            CartLineItem::new(pepperoni(), SizeCode::S, "$9.75"),
        ]);
        assert_eq!(cart.total().unwrap().amount_cents, 3475);
        assert_eq!(cart.total_display().unwrap(), "$34.75");
    }

    #[test]
    fn test_empty_cart_total_is_zero() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.total_display().unwrap(), "$0.00");
    }

    #[test]
    fn test_total_fails_on_unpriced_line() {
        let cart = Cart::from(vec![CartLineItem::new(pepperoni(), SizeCode::M, "$0.00")]);
        assert!(matches!(
            cart.total(),
            Err(CommerceError::PriceUnavailable { .. })
        ));
    }
}
