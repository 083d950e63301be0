//! Merchant identity and credential types.

use std::fmt;

use crate::error::CoreError;

/// Shop identifier assigned by the gateway to a merchant account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ShopId(String);

impl ShopId {
    /// Create a new shop ID.
    ///
    /// # Errors
    /// Returns an error if the ID is empty or contains whitespace.
    pub fn new(id: impl Into<String>) -> Result<Self, CoreError> {
        let id = id.into();
        if id.is_empty() || id.chars().any(char::is_whitespace) {
            return Err(CoreError::InvalidShopId(id));
        }
        Ok(Self(id))
    }

    /// Get the shop ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Merchant credentials used to authenticate API calls and to sign messages.
///
/// The secret key is never transmitted as message content; it is mixed into every
/// authentication code. A credential is immutable once built.
///
/// # Examples
///
/// ```
/// use makecommerce_core::{Credential, ShopId};
///
/// let credential = Credential::new(ShopId::new("f64b4f20").unwrap(), "s3cret")
///     .with_publishable_key("pk_live");
/// assert_eq!(credential.shop_id().as_str(), "f64b4f20");
/// assert!(!format!("{credential:?}").contains("s3cret"));
/// ```
#[derive(Clone)]
pub struct Credential {
    shop_id: ShopId,
    publishable_key: Option<String>,
    secret_key: String,
}

impl Credential {
    /// Create a credential from a shop ID and its secret key.
    #[must_use]
    pub fn new(shop_id: ShopId, secret_key: impl Into<String>) -> Self {
        Self {
            shop_id,
            publishable_key: None,
            secret_key: secret_key.into(),
        }
    }

    /// Attach the shop's publishable key.
    #[must_use]
    pub fn with_publishable_key(mut self, key: impl Into<String>) -> Self {
        self.publishable_key = Some(key.into());
        self
    }

    /// The shop ID.
    #[must_use]
    pub fn shop_id(&self) -> &ShopId {
        &self.shop_id
    }

    /// The publishable key, if configured.
    #[must_use]
    pub fn publishable_key(&self) -> Option<&str> {
        self.publishable_key.as_deref()
    }

    /// The secret key.
    #[must_use]
    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("shop_id", &self.shop_id)
            .field("publishable_key", &self.publishable_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}
