//! Canonical input construction for every authentication scheme.
//!
//! The canonical input is the exact text that is hashed together with the secret
//! key. Each [`SchemeTag`] has its own rule:
//!
//! - [`SchemeTag::Mac`]: the payload's JSON text, with `\/` unescaped and
//!   non-ASCII `\uXXXX` escapes replaced by the literal character.
//! - [`SchemeTag::LegacyV2`]: `amount + currency + reference + transaction + status`.
//! - [`SchemeTag::LegacyV1`]: `paymentId + amount + status`.
//!
//! The payment-form signature uses `amount + currency + reference` taken
//! directly from the caller (see [`build_embedded_input`]).

use serde_json::Value;

use crate::error::AuthError;
use crate::notification::CanonicalPayload;
use crate::scheme::SchemeTag;

/// Field order of the legacy V1 signature input.
const LEGACY_V1_FIELDS: &[&str] = &["paymentId", "amount", "status"];

/// Field order of the legacy V2 signature input.
const LEGACY_V2_FIELDS: &[&str] = &["amount", "currency", "reference", "transaction", "status"];

/// Legacy fields that may be absent, rendering as an empty string.
const OPTIONAL_FIELDS: &[&str] = &["reference"];

/// Build the canonical input of `payload` under `scheme`.
///
/// # Errors
///
/// Returns [`AuthError::MissingField`] or [`AuthError::InvalidField`] when a
/// legacy field is absent or not a scalar, and [`AuthError::MalformedEnvelope`]
/// if the payload text is not valid JSON.
pub fn canonicalize(payload: &CanonicalPayload, scheme: SchemeTag) -> Result<String, AuthError> {
    match scheme {
        SchemeTag::Mac => build_mac_input(payload.raw()),
        SchemeTag::LegacyV2 => concat_fields(payload, LEGACY_V2_FIELDS),
        SchemeTag::LegacyV1 => concat_fields(payload, LEGACY_V1_FIELDS),
    }
}

/// Normalize raw JSON text into the MAC scheme's canonical form.
///
/// The text is hashed as the sender wrote it, so key order and whitespace are
/// kept byte for byte. Only two escape forms are rewritten inside strings:
///
/// - `\/` becomes `/`
/// - `\uXXXX` (including surrogate pairs) for code points from U+0080 becomes the
///   literal character, except U+2028 and U+2029 which stay escaped
///
/// # Errors
///
/// Returns [`AuthError::MalformedEnvelope`] if `raw` is not valid JSON.
///
/// # Examples
///
/// ```
/// use makecommerce_auth::canonical::build_mac_input;
///
/// let canonical = build_mac_input(r#"{"note":"k\u00e4si\/jalg"}"#).unwrap();
/// assert_eq!(canonical, r#"{"note":"käsi/jalg"}"#);
/// ```
pub fn build_mac_input(raw: &str) -> Result<String, AuthError> {
    serde_json::from_str::<Value>(raw)
        .map_err(|e| AuthError::MalformedEnvelope(format!("invalid JSON payload: {e}")))?;

    let bytes = raw.as_bytes();
    let mut out = String::with_capacity(raw.len());
    let mut in_string = false;
    let mut copied = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'"' => {
                in_string = !in_string;
                i += 1;
            }
            b'\\' if in_string => {
                out.push_str(&raw[copied..i]);
                i += rewrite_escape(raw, i, &mut out);
                copied = i;
            }
            _ => i += 1,
        }
    }
    out.push_str(&raw[copied..]);

    Ok(out)
}

/// Serialize a structured value into the MAC scheme's canonical form.
///
/// Object keys keep their insertion order. Non-ASCII characters and slashes are
/// emitted literally; U+2028 and U+2029 are escaped.
///
/// # Examples
///
/// ```
/// use makecommerce_auth::canonical::build_mac_input_from_value;
///
/// let value = serde_json::json!({"url": "https://shop.example/return", "amount": 10.5});
/// assert_eq!(
///     build_mac_input_from_value(&value),
///     r#"{"url":"https://shop.example/return","amount":10.5}"#
/// );
/// ```
#[must_use]
pub fn build_mac_input_from_value(value: &Value) -> String {
    let text = value.to_string();
    if text.contains(['\u{2028}', '\u{2029}']) {
        text.replace('\u{2028}', "\\u2028")
            .replace('\u{2029}', "\\u2029")
    } else {
        text
    }
}

/// Build the payment-form signature input: `amount + currency + reference`.
///
/// An absent reference renders as an empty string.
///
/// # Examples
///
/// ```
/// use makecommerce_auth::canonical::build_embedded_input;
///
/// assert_eq!(build_embedded_input("1500", "EUR", None), "1500EUR");
/// assert_eq!(build_embedded_input("1500", "EUR", Some("order-7")), "1500EURorder-7");
/// ```
#[must_use]
pub fn build_embedded_input(amount: &str, currency: &str, reference: Option<&str>) -> String {
    let reference = reference.unwrap_or_default();
    let mut out = String::with_capacity(amount.len() + currency.len() + reference.len());
    out.push_str(amount);
    out.push_str(currency);
    out.push_str(reference);
    out
}

/// Concatenate the textual form of `fields` in order, without separators.
///
/// A missing required field fails fast instead of rendering as an empty string.
fn concat_fields(payload: &CanonicalPayload, fields: &[&'static str]) -> Result<String, AuthError> {
    let mut out = String::new();
    for &field in fields {
        let optional = OPTIONAL_FIELDS.contains(&field);
        match payload.get(field) {
            None | Some(Value::Null) if optional => {}
            None => return Err(AuthError::MissingField(field)),
            Some(value) => out.push_str(&scalar_text(field, value)?),
        }
    }
    Ok(out)
}

/// Cast a scalar JSON value to its textual form.
///
/// `null` counts as missing.
fn scalar_text(field: &'static str, value: &Value) -> Result<String, AuthError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(number_text(n)),
        Value::Null => Err(AuthError::MissingField(field)),
        Value::Array(_) | Value::Object(_) => Err(AuthError::InvalidField {
            field,
            reason: "expected a scalar value".to_owned(),
        }),
    }
}

/// Decimal text of a number: integers verbatim, floats in shortest form without
/// exponent or trailing zeros (`10.0` renders as `10`).
fn number_text(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        n.as_f64().map(|f| f.to_string()).unwrap_or_else(|| n.to_string())
    }
}

/// Rewrite the escape sequence starting at `raw[start]` (a backslash) into `out`.
///
/// Returns the number of bytes consumed.
fn rewrite_escape(raw: &str, start: usize, out: &mut String) -> usize {
    let bytes = raw.as_bytes();
    match bytes.get(start + 1) {
        Some(b'/') => {
            out.push('/');
            2
        }
        Some(b'u') => {
            let Some(unit) = hex_unit(raw, start + 2) else {
                out.push_str(&raw[start..start + 2]);
                return 2;
            };

            if (0xD800..0xDC00).contains(&unit) && raw[start + 6..].starts_with("\\u") {
                if let Some(low) = hex_unit(raw, start + 8).filter(|l| (0xDC00..0xE000).contains(l))
                {
                    let code = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                    if let Some(ch) = char::from_u32(code) {
                        out.push(ch);
                        return 12;
                    }
                }
            }

            match char::from_u32(unit) {
                Some(ch) if unit >= 0x80 && ch != '\u{2028}' && ch != '\u{2029}' => out.push(ch),
                _ => out.push_str(&raw[start..start + 6]),
            }
            6
        }
        Some(_) => {
            out.push_str(&raw[start..start + 2]);
            2
        }
        None => {
            out.push('\\');
            1
        }
    }
}

/// Parse the four hex digits at `raw[at..at + 4]`.
fn hex_unit(raw: &str, at: usize) -> Option<u32> {
    let digits = raw.get(at..at + 4)?;
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}
