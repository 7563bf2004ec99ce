//! # Soko Storefront Entry Point
//!
//! Thin binary wrapper: the actual setup lives in lib.rs for better
//! testability.

#[tokio::main]
async fn main() {
    soko_storefront::run().await;
}
