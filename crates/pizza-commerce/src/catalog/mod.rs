//! Catalog module.
//!
//! Contains pizza types, size codes and the loaded catalog.

mod pizza;

pub use pizza::{Catalog, PizzaType, SizeCode};
