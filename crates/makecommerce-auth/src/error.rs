//! Error types for notification authentication.
//!
//! A failed authentication check is not an error: verification returns `false`
//! for a mismatching code. [`AuthError`] covers inputs that cannot be checked at all.

/// Errors that can occur while extracting, classifying, or canonicalizing a message.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The envelope carries no JSON text, or the text is not a JSON object.
    #[error("Malformed notification envelope: {0}")]
    MalformedEnvelope(String),

    /// The message carries neither a `mac` nor an embedded `signature`.
    #[error("Unable to determine the authentication scheme of the message")]
    UnknownScheme,

    /// A field required by a legacy signature scheme is absent.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// A field has a value that cannot be cast to text (object or array).
    #[error("Invalid value for field {field}: {reason}")]
    InvalidField {
        /// Name of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}
