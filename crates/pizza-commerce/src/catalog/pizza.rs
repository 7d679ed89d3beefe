//! Pizza types and sizes.

use crate::error::CommerceError;
use crate::ids::PizzaId;
use crate::money::{format_price, Currency, Money};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Pizza size code.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub enum SizeCode {
    S,
    M,
    #[default]
    L,
}

impl SizeCode {
    /// All sizes, smallest first.
    pub const ALL: [SizeCode; 3] = [SizeCode::S, SizeCode::M, SizeCode::L];

    /// Key used in a pizza's price table.
    pub fn code(&self) -> &'static str {
        match self {
            SizeCode::S => "S",
            SizeCode::M => "M",
            SizeCode::L => "L",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SizeCode::S => "Small",
            SizeCode::M => "Medium",
            SizeCode::L => "Large",
        }
    }
}

impl fmt::Display for SizeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for SizeCode {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "s" | "small" => Ok(SizeCode::S),
            "m" | "medium" => Ok(SizeCode::M),
            "l" | "large" => Ok(SizeCode::L),
            _ => Err(CommerceError::InvalidSize(s.to_string())),
        }
    }
}

/// An orderable pizza as served by the catalog endpoint.
///
/// Every field is defaulted when absent: the backend response is not
/// schema-checked beyond being JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PizzaType {
    #[serde(default)]
    pub id: PizzaId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Image reference (URL or path on the backend).
    #[serde(default)]
    pub image: String,
    /// Unit price in dollars keyed by size code. May be missing entirely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizes: Option<BTreeMap<String, f64>>,
}

impl PizzaType {
    pub fn new(id: impl Into<PizzaId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the unit price for a size.
    pub fn with_price(mut self, size: SizeCode, price: f64) -> Self {
        self.sizes
            .get_or_insert_with(BTreeMap::new)
            .insert(size.code().to_string(), price);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Unit price for a size, if the catalog provides one.
    pub fn price_for(&self, size: SizeCode) -> Option<f64> {
        self.sizes.as_ref()?.get(size.code()).copied()
    }

    /// Unit price as cents.
    pub fn money_for(&self, size: SizeCode) -> Option<Money> {
        self.price_for(size)
            .map(|price| Money::from_decimal(price, Currency::USD))
    }

    /// Formatted unit price, or an explicit error when the size has no price.
    pub fn display_price(&self, size: SizeCode) -> Result<String, CommerceError> {
        self.price_for(size)
            .map(|price| format_price(Some(price)))
            .ok_or_else(|| CommerceError::PriceUnavailable {
                pizza: self.id.to_string(),
                size: size.code().to_string(),
            })
    }
}

/// The loaded catalog, in backend order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pizzas: Vec<PizzaType>,
}

impl Catalog {
    pub fn new(pizzas: Vec<PizzaType>) -> Self {
        Self { pizzas }
    }

    pub fn get(&self, id: &PizzaId) -> Option<&PizzaType> {
        self.pizzas.iter().find(|p| &p.id == id)
    }

    pub fn contains(&self, id: &PizzaId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PizzaType> {
        self.pizzas.iter()
    }

    pub fn len(&self) -> usize {
        self.pizzas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pizzas.is_empty()
    }
}

impl From<Vec<PizzaType>> for Catalog {
    fn from(pizzas: Vec<PizzaType>) -> Self {
        Self::new(pizzas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_parsing() {
        assert_eq!("S".parse::<SizeCode>().unwrap(), SizeCode::S);
        assert_eq!("medium".parse::<SizeCode>().unwrap(), SizeCode::M);
        assert_eq!(" l ".parse::<SizeCode>().unwrap(), SizeCode::L);
        assert!(matches!(
            "XL".parse::<SizeCode>(),
            Err(CommerceError::InvalidSize(_))
        ));
    }

    #[test]
    fn test_default_size_is_large() {
        assert_eq!(SizeCode::default(), SizeCode::L);
    }

    #[test]
    fn test_pizza_deserializes_backend_shape() {
        let json = r#"{
            "id": "pepperoni",
            "name": "The Pepperoni Pizza",
            "category": "Classic",
            "description": "Mozzarella Cheese, Pepperoni",
            "image": "/public/pizzas/pepperoni.webp",
            "sizes": { "S": 9.75, "M": 12.5, "L": 15.25 }
        }"#;
        let pizza: PizzaType = serde_json::from_str(json).unwrap();
        assert_eq!(pizza.id, PizzaId::new("pepperoni"));
        assert_eq!(pizza.price_for(SizeCode::M), Some(12.5));
        assert_eq!(pizza.display_price(SizeCode::L).unwrap(), "$15.25");
    }

    #[test]
    fn test_pizza_without_sizes() {
        let pizza: PizzaType = serde_json::from_str(r#"{"id": "mystery"}"#).unwrap();
        assert!(pizza.sizes.is_none());
        assert_eq!(pizza.price_for(SizeCode::L), None);
        assert!(matches!(
            pizza.display_price(SizeCode::L),
            Err(CommerceError::PriceUnavailable { .. })
        ));
    }

    #[test]
    fn test_pizza_missing_one_size() {
        let pizza = PizzaType::new("big_meat", "The Big Meat Pizza").with_price(SizeCode::S, 12.0);
        assert_eq!(pizza.price_for(SizeCode::S), Some(12.0));
        assert_eq!(pizza.price_for(SizeCode::L), None);
        assert_eq!(pizza.money_for(SizeCode::S).unwrap().amount_cents, 1200);
    }

    #[test]
    fn test_catalog_lookup() {
        let catalog = Catalog::new(vec![
            PizzaType::new("pepperoni", "Pepperoni"),
            PizzaType::new("veggie", "Veggie"),
        ]);
        assert_eq!(catalog.len(), 2);
        assert!(catalog.contains(&PizzaId::new("veggie")));
        assert!(catalog.get(&PizzaId::new("anchovy")).is_none());
    }
}
