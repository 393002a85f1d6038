//! Environment dependencies for the cart reducer.

use crate::error::CartError;
use crate::types::{CartAction, CartItem, CartLoad};
use cart_store_core::{async_effect, effect::Effect};
use futures::future::BoxFuture;
use std::sync::Arc;

/// Source of cart items
///
/// Returns a boxed future rather than using `async fn` so the client can live
/// behind `Arc<dyn CartClient>` and be moved into effects.
pub trait CartClient: Send + Sync {
    /// Fetch the current cart items
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Request`], [`CartError::Status`] or
    /// [`CartError::Decode`] depending on where the fetch failed.
    fn fetch_cart_items(&self) -> BoxFuture<'_, Result<Vec<CartItem>, CartError>>;
}

/// Environment dependencies for the cart reducer
#[derive(Clone)]
pub struct CartEnvironment {
    /// Where cart items are loaded from
    pub client: Arc<dyn CartClient>,
}

impl CartEnvironment {
    /// Creates a new `CartEnvironment`
    #[must_use]
    pub fn new(client: Arc<dyn CartClient>) -> Self {
        Self { client }
    }

    /// Effect that fetches items and settles the load
    ///
    /// Failure detail goes to the log; the settled action only carries the
    /// fixed rejection reason.
    pub fn fetch_cart_items(&self) -> Effect<CartAction> {
        let client = Arc::clone(&self.client);

        async_effect! {
            let load = match client.fetch_cart_items().await {
                Ok(items) => {
                    tracing::info!(items = items.len(), "Cart items loaded");
                    CartLoad::Fulfilled { items }
                }
                Err(error) => {
                    tracing::warn!(%error, "Loading cart items failed");
                    CartLoad::rejected()
                }
            };
            Some(CartAction::Load(load))
        }
    }
}
