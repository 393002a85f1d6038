//! Cart store binary
//!
//! Loads the cart from the configured endpoint, walks through each cart
//! action and prints the state after every step.

use cart_store::{
    cart_store, load_cart, CartAction, CartConfig, CartError, CartStore, HttpCartClient,
};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CartConfig::from_env();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Cart Store ===\n");

    let client = HttpCartClient::from_config(&config)?;
    println!("Loading cart from {}", client.url());
    let store = cart_store(Arc::new(client));

    match load_cart(&store, config.load_wait()).await {
        Ok(items) => println!("Loaded {} items", items.len()),
        Err(CartError::LoadRejected(reason)) => println!("Load failed: {reason}"),
        Err(error) => return Err(error.into()),
    }

    store.send(CartAction::CalculateTotals).await?;
    print_cart(&store).await;

    if let Some(id) = store.state(|s| s.cart_items.first().map(|item| item.id.clone())).await {
        println!("\n>>> Increase {id}");
        store.send(CartAction::Increase { id: id.clone() }).await?;
        store.send(CartAction::CalculateTotals).await?;
        print_cart(&store).await;

        println!("\n>>> Decrease {id}");
        store.send(CartAction::Decrease { id: id.clone() }).await?;
        store.send(CartAction::CalculateTotals).await?;
        print_cart(&store).await;

        println!("\n>>> Remove {id}");
        store.send(CartAction::RemoveItem { id }).await?;
        store.send(CartAction::CalculateTotals).await?;
        print_cart(&store).await;
    }

    println!("\n>>> Clear cart");
    store.send(CartAction::ClearCart).await?;
    store.send(CartAction::CalculateTotals).await?;
    print_cart(&store).await;

    store.shutdown(Duration::from_secs(5)).await?;
    Ok(())
}

async fn print_cart(store: &CartStore) {
    let state = store.state(Clone::clone).await;

    for item in &state.cart_items {
        println!(
            "  {:<24} x{:<3} @ {:>8.2}  {}",
            item.title.as_deref().unwrap_or("(untitled)"),
            item.amount,
            item.price,
            item.id
        );
    }
    println!("Amount: {}  Total: {:.2}", state.amount, state.total);
}
