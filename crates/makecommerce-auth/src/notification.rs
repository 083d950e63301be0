//! Inbound notification envelopes and extraction of their parts.
//!
//! The gateway delivers notifications as form fields or query parameters:
//!
//! - `json` - the notification payload as JSON text
//! - `mac` - the authentication code of `json` (current scheme only)
//!
//! Legacy notifications carry their code as a `signature` field inside the
//! JSON payload instead.

use std::fmt;

use serde_json::{Map, Value};
use sha2::{Digest, Sha512};

use crate::error::AuthError;

/// Name of the form field carrying the payload.
pub const JSON_FIELD: &str = "json";
/// Name of the form field carrying the MAC.
pub const MAC_FIELD: &str = "mac";
/// Name of the payload field carrying a legacy signature.
pub const SIGNATURE_FIELD: &str = "signature";

/// Raw inbound notification as delivered by the transport.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationEnvelope {
    /// The `json` field, verbatim.
    pub json: Option<String>,
    /// The `mac` field, verbatim.
    pub mac: Option<String>,
}

impl NotificationEnvelope {
    /// Create an envelope from its two fields.
    #[must_use]
    pub fn new(json: impl Into<String>, mac: Option<String>) -> Self {
        Self {
            json: Some(json.into()),
            mac,
        }
    }

    /// Build an envelope from decoded name/value pairs.
    ///
    /// Unknown names are ignored. When a name repeats, the last value wins.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut envelope = Self::default();
        for (name, value) in pairs {
            match name.as_ref() {
                JSON_FIELD => envelope.json = Some(value.into()),
                MAC_FIELD => envelope.mac = Some(value.into()),
                _ => {}
            }
        }
        envelope
    }

    /// Build an envelope from an `application/x-www-form-urlencoded` body or query string.
    ///
    /// # Examples
    ///
    /// ```
    /// use makecommerce_auth::NotificationEnvelope;
    ///
    /// let envelope = NotificationEnvelope::from_form_urlencoded(
    ///     "json=%7B%22status%22%3A%22COMPLETED%22%7D&mac=ABC",
    /// );
    /// assert_eq!(envelope.json.as_deref(), Some(r#"{"status":"COMPLETED"}"#));
    /// assert_eq!(envelope.mac.as_deref(), Some("ABC"));
    /// ```
    #[must_use]
    pub fn from_form_urlencoded(input: &str) -> Self {
        Self::from_pairs(form_urlencoded::parse(input.as_bytes()))
    }
}

/// A decoded notification payload that keeps its original JSON text.
///
/// The field map preserves the key order of the original text. The raw text is
/// what the current MAC scheme is computed over.
#[derive(Clone, PartialEq)]
pub struct CanonicalPayload {
    raw: String,
    fields: Map<String, Value>,
}

impl CanonicalPayload {
    /// Decode JSON text into a payload.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MalformedEnvelope`] if the text is not valid JSON or
    /// is not a JSON object.
    pub fn from_json(raw: impl Into<String>) -> Result<Self, AuthError> {
        let raw = raw.into();
        let value: Value = serde_json::from_str(&raw)
            .map_err(|e| AuthError::MalformedEnvelope(format!("invalid JSON payload: {e}")))?;
        match value {
            Value::Object(fields) => Ok(Self { raw, fields }),
            other => Err(AuthError::MalformedEnvelope(format!(
                "payload must be a JSON object, got {}",
                json_type_name(&other)
            ))),
        }
    }

    /// The original JSON text.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The decoded fields, in original order.
    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Look up a field.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Whether the payload has a field with this name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Short digest of the raw text, safe to log in place of the payload.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let digest = Sha512::digest(self.raw.as_bytes());
        hex::encode(&digest[..6])
    }
}

impl fmt::Debug for CanonicalPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CanonicalPayload")
            .field("len", &self.raw.len())
            .field("fingerprint", &self.fingerprint())
            .finish_non_exhaustive()
    }
}

/// Decode the payload carried in the envelope's `json` field.
///
/// # Errors
///
/// Returns [`AuthError::MalformedEnvelope`] when the field is absent or does not
/// hold a JSON object.
pub fn extract_payload(envelope: &NotificationEnvelope) -> Result<CanonicalPayload, AuthError> {
    let json = envelope
        .json
        .as_deref()
        .ok_or_else(|| AuthError::MalformedEnvelope("missing `json` field".to_owned()))?;
    CanonicalPayload::from_json(json)
}

/// Read the envelope's `mac` field, independent of the payload content.
#[must_use]
pub fn extract_mac(envelope: &NotificationEnvelope) -> Option<&str> {
    envelope.mac.as_deref()
}

/// Read the legacy `signature` field from inside a decoded payload.
///
/// Non-string values are rendered as their JSON text; `null` counts as absent.
#[must_use]
pub fn extract_legacy_signature(payload: &CanonicalPayload) -> Option<String> {
    match payload.get(SIGNATURE_FIELD)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
