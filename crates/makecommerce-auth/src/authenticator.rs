//! Authentication code computation and comparison.
//!
//! Every scheme the gateway has used hashes the canonical input with the merchant
//! secret appended as a UTF-8 suffix:
//!
//! ```text
//! AuthCode = UPPERCASE(HEX(SHA512(canonical || secret_key)))
//! ```
//!
//! This is a keyed-suffix hash, not HMAC. It is kept as-is for wire compatibility
//! and hidden behind the [`Authenticator`] trait so a different construction can
//! be introduced as a new scheme without touching callers.

use std::fmt;

use sha2::{Digest, Sha512};
use subtle::ConstantTimeEq;

/// An authentication code: uppercase hexadecimal digest output.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AuthCode(String);

impl AuthCode {
    /// Build a code from raw digest bytes.
    #[must_use]
    pub fn from_digest(digest: &[u8]) -> Self {
        Self(hex::encode_upper(digest))
    }

    /// Get the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the code, returning the inner string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for AuthCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AuthCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Computes and checks authentication codes over canonical byte strings.
pub trait Authenticator: Send + Sync {
    /// Compute the authentication code of `canonical` under `secret_key`.
    fn compose(&self, canonical: &[u8], secret_key: &str) -> AuthCode;

    /// Describe the computation for diagnostics. Never includes the secret.
    fn explain(&self, canonical: &[u8]) -> String;

    /// Recompute the code and compare it with `received`.
    ///
    /// The comparison is exact (case-sensitive) and constant-time.
    fn verify(&self, received: &str, canonical: &[u8], secret_key: &str) -> bool {
        let expected = self.compose(canonical, secret_key);
        received.as_bytes().ct_eq(expected.as_str().as_bytes()).into()
    }
}

/// SHA-512 over the canonical input followed by the secret key.
///
/// # Examples
///
/// ```
/// use makecommerce_auth::{Authenticator, Sha512SuffixAuthenticator};
///
/// let code = Sha512SuffixAuthenticator.compose(b"1500EUR", "abc");
/// assert_eq!(code.as_str().len(), 128);
/// assert!(Sha512SuffixAuthenticator.verify(code.as_str(), b"1500EUR", "abc"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha512SuffixAuthenticator;

impl Authenticator for Sha512SuffixAuthenticator {
    fn compose(&self, canonical: &[u8], secret_key: &str) -> AuthCode {
        let mut hasher = Sha512::new();
        hasher.update(canonical);
        hasher.update(secret_key.as_bytes());
        AuthCode::from_digest(&hasher.finalize())
    }

    fn explain(&self, canonical: &[u8]) -> String {
        format!(
            "UPPERCASE(HEX(SHA512({} + SECRET_KEY)))",
            String::from_utf8_lossy(canonical)
        )
    }
}
