//! Configuration management for MakeCommerce clients.
//!
//! All configuration is driven by environment variables. Secrets are never
//! serialized.

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::environment::{Environment, EnvironmentUrls};
use crate::error::{CoreError, CoreResult};
use crate::types::{Credential, ShopId};

/// Client and webhook receiver configuration.
///
/// # Examples
///
/// ```
/// use makecommerce_core::{Environment, MakeCommerceConfig};
///
/// let config = MakeCommerceConfig::builder()
///     .shop_id("f64b4f20".into())
///     .secret_key("s3cret".into())
///     .test_env(true)
///     .build();
/// assert_eq!(config.environment(), Environment::Test);
/// assert_eq!(config.api_url(), "https://api.test.maksekeskus.ee");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct MakeCommerceConfig {
    /// Shop ID of the merchant account.
    #[builder(default)]
    pub shop_id: String,

    /// Secret API key. Skipped when serializing.
    #[builder(default)]
    #[serde(skip_serializing, default)]
    pub secret_key: String,

    /// Publishable key, if the integration uses one.
    #[builder(default)]
    pub publishable_key: Option<String>,

    /// Whether to talk to the test environment.
    #[builder(default = false)]
    pub test_env: bool,

    /// Override of the environment's API base URL.
    #[builder(default)]
    pub api_url_override: Option<String>,

    /// Override of the environment's static resources URL.
    #[builder(default)]
    pub statics_url_override: Option<String>,

    /// HTTP request timeout in seconds.
    #[builder(default = 30)]
    pub timeout_secs: u64,

    /// Bind address of the webhook receiver.
    #[builder(default = String::from("0.0.0.0:8080"))]
    pub webhook_listen: String,

    /// Log level filter string (e.g. `"info"`, `"debug"`).
    #[builder(default = String::from("info"))]
    pub log_level: String,
}

impl Default for MakeCommerceConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl MakeCommerceConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `MAKECOMMERCE_SHOP_ID` | empty |
    /// | `MAKECOMMERCE_SECRET_KEY` | empty |
    /// | `MAKECOMMERCE_PUBLISHABLE_KEY` | unset |
    /// | `MAKECOMMERCE_TEST_ENV` | `false` |
    /// | `MAKECOMMERCE_API_URL` | unset |
    /// | `MAKECOMMERCE_STATICS_URL` | unset |
    /// | `MAKECOMMERCE_TIMEOUT_SECS` | `30` |
    /// | `WEBHOOK_LISTEN` | `0.0.0.0:8080` |
    /// | `LOG_LEVEL` | `info` |
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(v) = lookup("MAKECOMMERCE_SHOP_ID") {
            config.shop_id = v;
        }
        if let Some(v) = lookup("MAKECOMMERCE_SECRET_KEY") {
            config.secret_key = v;
        }
        if let Some(v) = lookup("MAKECOMMERCE_PUBLISHABLE_KEY") {
            config.publishable_key = Some(v);
        }
        if let Some(v) = lookup("MAKECOMMERCE_TEST_ENV") {
            config.test_env = parse_bool(&v);
        }
        if let Some(v) = lookup("MAKECOMMERCE_API_URL") {
            config.api_url_override = Some(v);
        }
        if let Some(v) = lookup("MAKECOMMERCE_STATICS_URL") {
            config.statics_url_override = Some(v);
        }
        if let Some(v) = lookup("MAKECOMMERCE_TIMEOUT_SECS") {
            if let Ok(n) = v.parse::<u64>() {
                config.timeout_secs = n;
            } else {
                tracing::warn!(value = %v, "ignoring invalid MAKECOMMERCE_TIMEOUT_SECS");
            }
        }
        if let Some(v) = lookup("WEBHOOK_LISTEN") {
            config.webhook_listen = v;
        }
        if let Some(v) = lookup("LOG_LEVEL") {
            config.log_level = v;
        }

        config
    }

    /// The configured gateway environment.
    #[must_use]
    pub fn environment(&self) -> Environment {
        Environment::from_test_flag(self.test_env)
    }

    /// URL table of the configured environment, with the API and statics
    /// overrides applied.
    #[must_use]
    pub fn environment_urls(&self) -> EnvironmentUrls {
        let mut urls = self.environment().urls();
        if let Some(api_url) = &self.api_url_override {
            urls.api_url.clone_from(api_url);
        }
        if let Some(statics_url) = &self.statics_url_override {
            urls.statics_url.clone_from(statics_url);
        }
        urls
    }

    /// Effective API base URL.
    #[must_use]
    pub fn api_url(&self) -> String {
        self.environment_urls().api_url
    }

    /// Build the merchant credential from this configuration.
    ///
    /// # Errors
    /// Returns [`CoreError::Config`] if the secret key is empty, or
    /// [`CoreError::InvalidShopId`] if the shop ID is invalid.
    pub fn credential(&self) -> CoreResult<Credential> {
        let shop_id = ShopId::new(self.shop_id.clone())?;
        if self.secret_key.is_empty() {
            return Err(CoreError::Config("secret key is not configured".to_owned()));
        }
        let credential = Credential::new(shop_id, self.secret_key.clone());
        Ok(match &self.publishable_key {
            Some(key) => credential.with_publishable_key(key.clone()),
            None => credential,
        })
    }
}

/// Parse a string as a boolean, accepting `"1"` and `"true"` (case-insensitive).
fn parse_bool(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_create_default_config() {
        let config = MakeCommerceConfig::default();
        assert!(config.shop_id.is_empty());
        assert!(!config.test_env);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.webhook_listen, "0.0.0.0:8080");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.api_url(), "https://api.maksekeskus.ee");
    }

    fn lookup_from<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |name: &str| {
            vars.iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| (*v).to_owned())
        }
    }

    #[test]
    fn test_should_load_variables() {
        let config = MakeCommerceConfig::from_lookup(lookup_from(&[
            ("MAKECOMMERCE_SHOP_ID", "shop-1"),
            ("MAKECOMMERCE_SECRET_KEY", "s3cret"),
            ("MAKECOMMERCE_TEST_ENV", "true"),
            ("MAKECOMMERCE_TIMEOUT_SECS", "5"),
            ("MAKECOMMERCE_STATICS_URL", "http://127.0.0.1:9000/"),
            ("WEBHOOK_LISTEN", "127.0.0.1:9090"),
        ]));
        assert_eq!(config.shop_id, "shop-1");
        assert_eq!(config.secret_key, "s3cret");
        assert_eq!(config.environment(), Environment::Test);
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.environment_urls().statics_url, "http://127.0.0.1:9000/");
        assert_eq!(config.webhook_listen, "127.0.0.1:9090");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_should_keep_default_timeout_on_invalid_value() {
        let config = MakeCommerceConfig::from_lookup(lookup_from(&[(
            "MAKECOMMERCE_TIMEOUT_SECS",
            "soon",
        )]));
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_should_apply_statics_url_override() {
        let config = MakeCommerceConfig::builder()
            .statics_url_override(Some("https://cdn.example.com/".into()))
            .build();
        let urls = config.environment_urls();
        assert_eq!(urls.statics_url, "https://cdn.example.com/");
        assert_eq!(urls.api_url, "https://api.maksekeskus.ee");
    }

    #[test]
    fn test_should_apply_api_url_override() {
        let config = MakeCommerceConfig::builder()
            .test_env(true)
            .api_url_override(Some("http://127.0.0.1:9999".into()))
            .build();
        let urls = config.environment_urls();
        assert_eq!(urls.api_url, "http://127.0.0.1:9999");
        assert_eq!(urls.statics_url, "https://static-test.maksekeskus.ee/");
    }

    #[test]
    fn test_should_build_credential() {
        let config = MakeCommerceConfig::builder()
            .shop_id("shop-1".into())
            .secret_key("s3cret".into())
            .publishable_key(Some("pk".into()))
            .build();
        let credential = config.credential().unwrap();
        assert_eq!(credential.shop_id().as_str(), "shop-1");
        assert_eq!(credential.secret_key(), "s3cret");
        assert_eq!(credential.publishable_key(), Some("pk"));
    }

    #[test]
    fn test_should_reject_credential_without_secret() {
        let config = MakeCommerceConfig::builder().shop_id("shop-1".into()).build();
        assert!(matches!(config.credential(), Err(CoreError::Config(_))));

        let config = MakeCommerceConfig::builder().secret_key("s3cret".into()).build();
        assert!(matches!(
            config.credential(),
            Err(CoreError::InvalidShopId(_))
        ));
    }

    #[test]
    fn test_should_not_serialize_secret_key() {
        let config = MakeCommerceConfig::builder()
            .shop_id("shop-1".into())
            .secret_key("s3cret".into())
            .build();
        let json = serde_json::to_string(&config).expect("test serialization");
        assert!(json.contains("shopId"));
        assert!(json.contains("webhookListen"));
        assert!(!json.contains("s3cret"));
    }

    #[test]
    fn test_should_parse_bool_values() {
        assert!(parse_bool("1"));
        assert!(parse_bool("TRUE"));
        assert!(!parse_bool("0"));
        assert!(!parse_bool(""));
    }
}
