//! # Cart Store Testing
//!
//! Testing helpers for reducers built on `cart-store-core`.
//!
//! - [`ReducerTest`]: Given-When-Then harness that runs a reducer without a Store
//! - [`assertions`]: checks over the effects a reducer returned
//!
//! ## Example
//!
//! ```ignore
//! use cart_store_testing::{assertions, ReducerTest};
//!
//! ReducerTest::new(CartReducer::new())
//!     .with_env(test_environment())
//!     .given_state(state_with_items())
//!     .when_action(CartAction::ClearCart)
//!     .then_state(|state| assert!(state.cart_items.is_empty()))
//!     .then_effects(assertions::assert_no_effects)
//!     .run();
//! ```


pub use reducer_test::{assertions, ReducerTest};
