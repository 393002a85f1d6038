//! Error types for the cart

use crate::types::ItemId;
use cart_store_runtime::StoreError;
use thiserror::Error;

/// Errors produced while loading or mutating the cart
#[derive(Debug, Error)]
pub enum CartError {
    /// The HTTP request could not be sent or the connection failed
    #[error("Request failed: {0}")]
    Request(String),

    /// The endpoint answered with a non-success status
    #[error("Unexpected response status {status}")]
    Status {
        /// HTTP status code
        status: u16,
    },

    /// The response body was not a list of cart items
    #[error("Response parsing failed: {0}")]
    Decode(String),

    /// No cart item has the requested id
    #[error("Cart item not found: {0}")]
    ItemNotFound(ItemId),

    /// A quantity change would leave the `i64` range
    #[error("Quantity overflow on cart item {0}")]
    QuantityOverflow(ItemId),

    /// A load settled as rejected
    #[error("Cart load rejected: {0}")]
    LoadRejected(String),

    /// A load finished but its outcome was never observed
    #[error("Cart load finished without a visible outcome")]
    LoadUnobserved,

    /// The store refused the action or timed out
    #[error(transparent)]
    Store(#[from] StoreError),
}
