//! Notification verification and outbound code composition.
//!
//! These entry points wire the pieces together:
//!
//! ```text
//! envelope -> extract -> select scheme -> canonicalize -> verify
//! ```
//!
//! Current integrations use [`verify_mac`]. [`verify_signature`] and
//! [`verify_notification`] exist for gateways still sending legacy
//! `signature` notifications.

use serde_json::Value;
use tracing::{debug, warn};

use crate::authenticator::{AuthCode, Authenticator, Sha512SuffixAuthenticator};
use crate::canonical::{
    build_embedded_input, build_mac_input, build_mac_input_from_value, canonicalize,
};
use crate::error::AuthError;
use crate::notification::{
    CanonicalPayload, NotificationEnvelope, extract_legacy_signature, extract_mac, extract_payload,
};
use crate::scheme::SchemeTag;

/// Outcome of checking an inbound notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verification {
    /// The scheme the notification was checked under.
    pub scheme: SchemeTag,
    /// Whether the received code matches the recomputed one.
    pub authentic: bool,
}

/// Compute the MAC of a structured payload.
///
/// # Examples
///
/// ```
/// use makecommerce_auth::compose_mac;
///
/// let mac = compose_mac(&serde_json::json!({"amount": "10.00"}), "s3cret");
/// assert_eq!(mac.as_str().len(), 128);
/// ```
#[must_use]
pub fn compose_mac(payload: &Value, secret_key: &str) -> AuthCode {
    let canonical = build_mac_input_from_value(payload);
    Sha512SuffixAuthenticator.compose(canonical.as_bytes(), secret_key)
}

/// Compute the MAC of JSON text exactly as it will be sent.
///
/// # Errors
///
/// Returns [`AuthError::MalformedEnvelope`] if `raw_json` is not valid JSON.
pub fn compose_mac_raw(raw_json: &str, secret_key: &str) -> Result<AuthCode, AuthError> {
    let canonical = build_mac_input(raw_json)?;
    Ok(Sha512SuffixAuthenticator.compose(canonical.as_bytes(), secret_key))
}

/// Compute the signature embedded in a payment-form redirect.
///
/// # Examples
///
/// ```
/// use makecommerce_auth::compose_embedded_signature;
///
/// let signature = compose_embedded_signature("1500", "EUR", None, "abc");
/// assert!(signature.as_str().starts_with("0D505A99"));
/// ```
#[must_use]
pub fn compose_embedded_signature(
    amount: &str,
    currency: &str,
    reference: Option<&str>,
    secret_key: &str,
) -> AuthCode {
    let canonical = build_embedded_input(amount, currency, reference);
    Sha512SuffixAuthenticator.compose(canonical.as_bytes(), secret_key)
}

/// Verify a notification under the current MAC scheme.
///
/// An envelope without a `mac` field is not authentic.
///
/// # Errors
///
/// Returns [`AuthError::MalformedEnvelope`] if the envelope has no valid JSON payload.
pub fn verify_mac(envelope: &NotificationEnvelope, secret_key: &str) -> Result<bool, AuthError> {
    let payload = extract_payload(envelope)?;
    let Some(received) = extract_mac(envelope) else {
        warn!(
            fingerprint = %payload.fingerprint(),
            "notification has no mac field"
        );
        return Ok(false);
    };
    check(&payload, SchemeTag::Mac, received, secret_key)
}

/// Verify a notification under one of the legacy signature schemes.
///
/// # Errors
///
/// Returns [`AuthError::UnknownScheme`] if the payload carries no `signature`,
/// [`AuthError::MissingField`] or [`AuthError::InvalidField`] if a signed field is
/// unusable, and [`AuthError::MalformedEnvelope`] for a missing or invalid payload.
pub fn verify_signature(
    envelope: &NotificationEnvelope,
    secret_key: &str,
) -> Result<bool, AuthError> {
    let payload = extract_payload(envelope)?;
    let scheme = SchemeTag::select(&payload);
    if !scheme.is_legacy() {
        return Err(AuthError::UnknownScheme);
    }
    let received = extract_legacy_signature(&payload).unwrap_or_default();
    check(&payload, scheme, &received, secret_key)
}

/// Verify a notification under whichever scheme its shape indicates.
///
/// # Errors
///
/// Returns [`AuthError::UnknownScheme`] if the notification carries neither a
/// `signature` nor a `mac`, plus the errors of [`verify_signature`].
///
/// # Examples
///
/// ```
/// use makecommerce_auth::{NotificationEnvelope, SchemeTag, compose_mac_raw, verify_notification};
///
/// let json = r#"{"transaction":"T1","status":"COMPLETED"}"#;
/// let mac = compose_mac_raw(json, "s3cret").unwrap();
/// let envelope = NotificationEnvelope::new(json, Some(mac.into_string()));
///
/// let result = verify_notification(&envelope, "s3cret").unwrap();
/// assert_eq!(result.scheme, SchemeTag::Mac);
/// assert!(result.authentic);
/// ```
pub fn verify_notification(
    envelope: &NotificationEnvelope,
    secret_key: &str,
) -> Result<Verification, AuthError> {
    let payload = extract_payload(envelope)?;
    let scheme = SchemeTag::select(&payload);

    let received = match scheme {
        SchemeTag::Mac => extract_mac(envelope)
            .ok_or(AuthError::UnknownScheme)?
            .to_owned(),
        SchemeTag::LegacyV1 | SchemeTag::LegacyV2 => {
            extract_legacy_signature(&payload).unwrap_or_default()
        }
    };

    let authentic = check(&payload, scheme, &received, secret_key)?;
    Ok(Verification { scheme, authentic })
}

/// Describe how the envelope's code is computed, for diagnostics only.
///
/// The output contains the canonical input, which may include payment data;
/// keep it out of production logs.
///
/// # Errors
///
/// Returns the same errors as [`verify_notification`] does for the canonical step.
pub fn explain_notification(envelope: &NotificationEnvelope) -> Result<String, AuthError> {
    let payload = extract_payload(envelope)?;
    let scheme = SchemeTag::select(&payload);
    let canonical = canonicalize(&payload, scheme)?;
    Ok(format!(
        "{scheme}: {}",
        Sha512SuffixAuthenticator.explain(canonical.as_bytes())
    ))
}

fn check(
    payload: &CanonicalPayload,
    scheme: SchemeTag,
    received: &str,
    secret_key: &str,
) -> Result<bool, AuthError> {
    let canonical = canonicalize(payload, scheme)?;
    let authentic = Sha512SuffixAuthenticator.verify(received, canonical.as_bytes(), secret_key);

    if authentic {
        debug!(
            scheme = %scheme,
            fingerprint = %payload.fingerprint(),
            len = payload.raw().len(),
            "notification verified"
        );
    } else {
        warn!(
            scheme = %scheme,
            fingerprint = %payload.fingerprint(),
            len = payload.raw().len(),
            "notification authentication code mismatch"
        );
    }

    Ok(authentic)
}
