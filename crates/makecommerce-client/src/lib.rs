//! Authenticated REST client for the MakeCommerce payment gateway.
//!
//! This crate wraps the gateway's REST API: transactions, payments, refunds,
//! shipments, carts and shop configuration. Calls are authenticated with the
//! merchant's shop ID and secret key and return a uniform [`ApiResponse`].
//!
//! # Usage
//!
//! ```rust,no_run
//! use makecommerce_client::MakeCommerceClient;
//! use makecommerce_core::MakeCommerceConfig;
//!
//! # async fn run() -> Result<(), makecommerce_client::ClientError> {
//! let client = MakeCommerceClient::from_config(&MakeCommerceConfig::from_env())?;
//! let response = client
//!     .create_transaction(&serde_json::json!({
//!         "transaction": {"amount": "10.00", "currency": "EUR", "reference": "order-1"},
//!         "customer": {"email": "buyer@example.com", "ip": "127.0.0.1", "country": "ee", "locale": "et"},
//!     }))
//!     .await?;
//! println!("created transaction: {}", response.raw_body);
//! # Ok(())
//! # }
//! ```

mod client;
mod endpoints;
mod error;
mod filter;
mod response;

pub use client::{MakeCommerceClient, VERSION};
pub use error::{ClientError, ClientResult};
pub use filter::TransactionFilter;
pub use response::ApiResponse;
