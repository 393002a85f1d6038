//! # Cart Store
//!
//! Shopping cart state built on the `cart-store` Store runtime.
//!
//! The cart holds a list of items loaded from a remote JSON endpoint, lets the
//! caller change quantities or drop lines, and derives the total quantity and
//! cost when asked to.
//!
//! - [`CartState`]: items, cached totals and the loading flag
//! - [`CartAction`]: everything the reducer accepts
//! - [`CartReducer`]: applies actions and starts the fetch effect
//! - [`CartEnvironment`]: injects the [`CartClient`] used to fetch items
//!
//! ## Example
//!
//! ```no_run
//! use cart_store::{cart_store, load_cart, CartAction, HttpCartClient, ItemId};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), cart_store::CartError> {
//! let store = cart_store(Arc::new(HttpCartClient::new(cart_store::DEFAULT_API_URL)));
//!
//! load_cart(&store, Duration::from_secs(15)).await?;
//! store.send(CartAction::Increase { id: ItemId::new("rec1JZlfCIBOPdcT2") }).await?;
//! store.send(CartAction::CalculateTotals).await?;
//!
//! let (amount, total) = store.state(|s| (s.amount, s.total)).await;
//! println!("{amount} items, ${total:.2}");
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod environment;
pub mod error;
pub mod mocks;
pub mod reducer;
pub mod types;

pub use client::HttpCartClient;
pub use config::{CartConfig, DEFAULT_API_URL};
pub use environment::{CartClient, CartEnvironment};
pub use error::CartError;
pub use reducer::CartReducer;
pub use types::{
    CartAction, CartItem, CartLoad, CartState, CartTotals, ItemId, LOAD_FAILED_MESSAGE,
};

use cart_store_runtime::Store;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast::error::TryRecvError;

/// Store type for the cart
pub type CartStore = Store<CartState, CartAction, CartEnvironment, CartReducer>;

/// Create a cart store in its startup state, loading items through `client`
#[must_use]
pub fn cart_store(client: Arc<dyn CartClient>) -> CartStore {
    Store::new(
        CartState::new(),
        CartReducer::new(),
        CartEnvironment::new(client),
    )
}

/// Load the cart and wait for the load to settle
///
/// When this returns, the store state already reflects the outcome: the items
/// were replaced on success, left alone on failure, and `is_loading` is `false`
/// either way.
///
/// # Errors
///
/// - [`CartError::LoadRejected`]: the fetch failed
/// - [`CartError::Store`]: the store is shutting down, or the load did not
///   settle within `timeout`
/// - [`CartError::LoadUnobserved`]: the load finished but its outcome was not
///   seen, for example because the action broadcast overflowed
pub async fn load_cart(store: &CartStore, timeout: Duration) -> Result<Vec<CartItem>, CartError> {
    let mut actions = store.subscribe_actions();

    let mut handle = store.send(CartAction::LoadCart).await?;
    handle.wait_with_timeout(timeout).await?;

    let mut settled = None;
    loop {
        match actions.try_recv() {
            Ok(CartAction::Load(load)) if load.is_settled() => settled = Some(load),
            Ok(_) => {},
            Err(TryRecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "Cart load observer lagged");
            },
            Err(TryRecvError::Empty | TryRecvError::Closed) => break,
        }
    }

    match settled {
        Some(CartLoad::Fulfilled { items }) => Ok(items),
        Some(CartLoad::Rejected { reason }) => Err(CartError::LoadRejected(reason)),
        Some(CartLoad::Pending) | None => Err(CartError::LoadUnobserved),
    }
}
