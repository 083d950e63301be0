//! Integration tests against the MakeCommerce test environment.
//!
//! These tests call the real gateway with the shop credentials taken from
//! `MAKECOMMERCE_SHOP_ID` and `MAKECOMMERCE_SECRET_KEY`. They are marked
//! `#[ignore]` so they don't run during normal `cargo test`.
//!
//! Run them with:
//! ```text
//! MAKECOMMERCE_SHOP_ID=... MAKECOMMERCE_SECRET_KEY=... \
//!     cargo test -p makecommerce-integration -- --ignored
//! ```

use std::sync::Once;
use std::time::{SystemTime, UNIX_EPOCH};

use makecommerce_client::MakeCommerceClient;
use makecommerce_core::MakeCommerceConfig;
use serde_json::{Value, json};

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Configuration from the environment, forced onto the test gateway.
#[must_use]
pub fn test_config() -> MakeCommerceConfig {
    let mut config = MakeCommerceConfig::from_env();
    config.test_env = true;
    config
}

/// Create a client for the test gateway.
#[must_use]
pub fn client() -> MakeCommerceClient {
    init_tracing();
    MakeCommerceClient::from_config(&test_config())
        .unwrap_or_else(|e| panic!("failed to create client: {e}"))
}

/// Generate a unique order reference for a test.
#[must_use]
pub fn test_reference(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("test-{prefix}-{nanos}")
}

/// Request body for a small EUR transaction.
#[must_use]
pub fn transaction_request(reference: &str, amount: &str) -> Value {
    json!({
        "transaction": {
            "amount": amount,
            "currency": "EUR",
            "reference": reference,
        },
        "customer": {
            "email": "integration@example.com",
            "ip": "127.0.0.1",
            "country": "ee",
            "locale": "et",
        },
    })
}

/// Create a transaction and return its ID.
pub async fn create_test_transaction(client: &MakeCommerceClient, prefix: &str) -> String {
    let reference = test_reference(prefix);
    let response = client
        .create_transaction(&transaction_request(&reference, "1.00"))
        .await
        .unwrap_or_else(|e| panic!("failed to create transaction {reference}: {e}"));
    let id = response
        .parsed_body
        .as_ref()
        .and_then(|body| body["id"].as_str())
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| panic!("transaction response has no id: {}", response.raw_body));
    tracing::info!(%id, %reference, "created test transaction");
    id
}

mod test_shop;
mod test_shipment;
mod test_transaction;
