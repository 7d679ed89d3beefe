//! Commerce error types.

use thiserror::Error;

/// Errors that can occur while building and submitting an order.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// The catalog has not finished loading.
    #[error("Catalog is not loaded yet")]
    NotReady,

    /// Selected pizza type is not in the loaded catalog.
    #[error("Pizza not found: {0}")]
    PizzaNotFound(String),

    /// The pizza has no price for the requested size.
    #[error("No price for {pizza} in size {size}")]
    PriceUnavailable { pizza: String, size: String },

    /// Unrecognized size code.
    #[error("Invalid size: {0}")]
    InvalidSize(String),

    /// Catalog could not be fetched.
    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(String),

    /// Order submission was rejected or never reached the backend.
    #[error("Order submission failed: {0}")]
    SubmissionFailed(String),

    /// Past order lookup found nothing.
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// Any other backend failure.
    #[error("Backend error: {0}")]
    Backend(String),

    /// Cart storage failed.
    #[error("Cart store error: {0}")]
    CartStore(String),

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
