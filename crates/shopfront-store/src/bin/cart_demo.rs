//! # Cart Demo
//!
//! Runs a short cart session against a real store and prints the final cart.
//!
//! ## Usage
//! ```bash
//! cargo run -p shopfront-store --bin cart-demo
//!
//! # With a config file
//! cargo run -p shopfront-store --bin cart-demo -- --config ./store.toml
//!
//! # Quieter
//! SHOPFRONT_LOG=warn cargo run -p shopfront-store --bin cart-demo
//! ```

use std::env;
use std::path::PathBuf;

use shopfront_core::{Money, Product, ProductId};
use shopfront_store::config::DEFAULT_LOG_FILTER;
use shopfront_store::{init_tracing, CartStore, StoreConfig, TracingNotifier};
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let log_filter = init_tracing(DEFAULT_LOG_FILTER);

    let config = StoreConfig::load(parse_config_arg())?;
    if let Some(log_filter) = &log_filter {
        log_filter.apply_config(&config.logging)?;
    }

    let store = CartStore::new(&config).with_sink(TracingNotifier);
    store.subscribe(|cart| info!(lines = cart.len(), "Cart changed"));

    let jacket = Product::new(ProductId(1), "Denim Jacket", Money::from_cents(4999))
        .with_original_price(Money::from_cents(6999))
        .with_image("/img/denim-jacket.jpg")
        .with_rating(4.5);
    let sneakers = Product::new(ProductId(2), "White Sneakers", Money::from_cents(7900))
        .with_image("/img/white-sneakers.jpg")
        .with_rating(4.8);

    store.add_to_cart(jacket.clone());
    store.add_to_cart(jacket);
    store.add_to_cart(sneakers);
    store.increment_quantity(ProductId(1));
    store.increment_quantity(ProductId(1));
    store.decrement_quantity(ProductId(2));
    store.dispatch_json(r#"{"type":"cart/decrementQuantity","payload":{"id":1}}"#)?;

    for product in store.products() {
        info!(
            id = %product.id,
            name = %product.name,
            price = %product.price,
            quantity = %product.quantity,
            "Cart line"
        );
    }

    println!("{}", store.snapshot_json()?);
    Ok(())
}

/// Reads `--config <path>` from the command line.
fn parse_config_arg() -> Option<PathBuf> {
    let args: Vec<String> = env::args().collect();
    args.iter()
        .position(|a| a == "--config")
        .and_then(|i| args.get(i + 1))
        .map(PathBuf::from)
}
