//! Message authentication for the MakeCommerce payment gateway.
//!
//! This crate computes and verifies the authentication codes that protect
//! gateway notifications and payment-form redirects. Three schemes have been
//! used over the gateway's lifetime and all of them are still accepted:
//!
//! | Scheme | Code location | Canonical input |
//! |--------|---------------|-----------------|
//! | MAC | `mac` form field | the `json` payload text |
//! | Legacy V2 | `signature` payload field | `amount currency reference transaction status` |
//! | Legacy V1 | `signature` payload field | `paymentId amount status` |
//!
//! Every code is `UPPERCASE(HEX(SHA512(canonical || secret_key)))`.
//!
//! # Usage
//!
//! ```rust
//! use makecommerce_auth::{NotificationEnvelope, verify_mac};
//!
//! // Build the envelope from the webhook's form body.
//! let envelope = NotificationEnvelope::from_form_urlencoded("json=%7B%7D&mac=ABC");
//!
//! // A mismatch is `Ok(false)`, never an error.
//! assert!(!verify_mac(&envelope, "s3cret").unwrap());
//! ```
//!
//! # Modules
//!
//! - [`authenticator`] - Authentication code computation and constant-time comparison
//! - [`canonical`] - Canonical input construction per scheme
//! - [`error`] - Authentication error types
//! - [`notification`] - Inbound envelopes and extraction of payload, MAC and signature
//! - [`scheme`] - Scheme selection from payload shape
//! - [`verify`] - Composition and verification entry points

pub mod authenticator;
pub mod canonical;
pub mod error;
pub mod notification;
pub mod scheme;
pub mod verify;

pub use authenticator::{AuthCode, Authenticator, Sha512SuffixAuthenticator};
pub use error::AuthError;
pub use notification::{
    CanonicalPayload, NotificationEnvelope, extract_legacy_signature, extract_mac, extract_payload,
};
pub use scheme::SchemeTag;
pub use verify::{
    Verification, compose_embedded_signature, compose_mac, compose_mac_raw, explain_notification,
    verify_mac, verify_notification, verify_signature,
};
