//! Shopping cart module.
//!
//! Contains line items, the cart snapshot and the storage seam the order
//! workflow appends to.

mod cart;
mod store;

pub use cart::{Cart, CartLineItem};
pub use store::{CartStore, MemoryCartStore};
