//! Cart reducer.

use crate::environment::CartEnvironment;
use crate::types::{CartAction, CartLoad, CartState};
use cart_store_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};

/// Cart reducer
///
/// Every action except [`CartAction::LoadCart`] is a pure state change.
/// `LoadCart` marks the cart as loading and hands back the fetch effect, whose
/// outcome returns as a [`CartAction::Load`].
#[derive(Clone, Copy, Debug, Default)]
pub struct CartReducer;

impl CartReducer {
    /// Create a new cart reducer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn apply_load(state: &mut CartState, load: CartLoad) {
        match load {
            CartLoad::Pending => {
                state.is_loading = true;
            },
            CartLoad::Fulfilled { items } => {
                tracing::debug!(items = items.len(), "Replacing cart items");
                state.cart_items = items;
                state.is_loading = false;
            },
            CartLoad::Rejected { reason } => {
                tracing::debug!(%reason, "Cart load rejected, keeping current items");
                state.is_loading = false;
            },
        }
    }
}

impl Reducer for CartReducer {
    type State = CartState;
    type Action = CartAction;
    type Environment = CartEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            CartAction::LoadCart => {
                Self::apply_load(state, CartLoad::Pending);
                return smallvec![env.fetch_cart_items()];
            },
            CartAction::Load(load) => Self::apply_load(state, load),
            CartAction::ClearCart => state.clear(),
            CartAction::RemoveItem { id } => {
                let removed = state.remove(&id);
                tracing::trace!(%id, removed, "Removed cart item");
            },
            CartAction::Increase { id } => {
                if let Err(error) = state.increase(&id) {
                    tracing::warn!(%error, "Increase ignored");
                }
            },
            CartAction::Decrease { id } => {
                if let Err(error) = state.decrease(&id) {
                    tracing::warn!(%error, "Decrease ignored");
                }
            },
            CartAction::CalculateTotals => {
                let totals = state.calculate_totals();
                tracing::trace!(amount = totals.amount, total = totals.total, "Totals recalculated");
            },
        }

        SmallVec::new()
    }
}
