//! Core types and configuration for the MakeCommerce payment gateway client.
//!
//! This crate provides the building blocks shared by the authentication and
//! endpoint client crates: merchant credentials, the gateway's environment URL
//! tables, and environment-driven configuration.

mod config;
mod environment;
mod error;
mod types;

pub use config::MakeCommerceConfig;
pub use environment::{Environment, EnvironmentUrls};
pub use error::{CoreError, CoreResult};
pub use types::{Credential, ShopId};
