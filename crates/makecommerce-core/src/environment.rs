//! Gateway environments and their published endpoint URLs.

use std::fmt;

/// The gateway environment a client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Production gateway.
    #[default]
    Live,
    /// Sandbox gateway for integration testing.
    Test,
}

impl Environment {
    /// Pick the environment from a "test mode" flag.
    #[must_use]
    pub fn from_test_flag(test: bool) -> Self {
        if test { Self::Test } else { Self::Live }
    }

    /// The URL table for this environment.
    #[must_use]
    pub fn urls(self) -> EnvironmentUrls {
        match self {
            Self::Live => EnvironmentUrls {
                api_url: "https://api.maksekeskus.ee".to_owned(),
                checkoutjs_url: "https://payment.maksekeskus.ee/checkout/dist/".to_owned(),
                gateway_url: "https://payment.maksekeskus.ee/pay/1/signed.html".to_owned(),
                merchant_url: "https://merchant.maksekeskus.ee/".to_owned(),
                statics_url: "https://static.maksekeskus.ee/".to_owned(),
            },
            Self::Test => EnvironmentUrls {
                api_url: "https://api.test.maksekeskus.ee".to_owned(),
                checkoutjs_url: "https://payment.test.maksekeskus.ee/checkout/dist/".to_owned(),
                gateway_url: "https://payment.test.maksekeskus.ee/pay/1/signed.html".to_owned(),
                merchant_url: "https://merchant.test.maksekeskus.ee/".to_owned(),
                statics_url: "https://static-test.maksekeskus.ee/".to_owned(),
            },
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Live => f.write_str("live"),
            Self::Test => f.write_str("test"),
        }
    }
}

/// Endpoint URLs of one gateway environment.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentUrls {
    /// REST API base URL.
    pub api_url: String,
    /// Base URL of the checkout.js distribution.
    pub checkoutjs_url: String,
    /// Signed payment-form gateway URL.
    pub gateway_url: String,
    /// Merchant portal URL.
    pub merchant_url: String,
    /// Static resources (scripts, images) URL.
    pub statics_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_select_environment_from_flag() {
        assert_eq!(Environment::from_test_flag(true), Environment::Test);
        assert_eq!(Environment::from_test_flag(false), Environment::Live);
        assert_eq!(Environment::default(), Environment::Live);
    }

    #[test]
    fn test_should_return_test_urls() {
        let urls = Environment::Test.urls();
        assert_eq!(urls.api_url, "https://api.test.maksekeskus.ee");
        assert_eq!(urls.statics_url, "https://static-test.maksekeskus.ee/");
    }

    #[test]
    fn test_should_return_live_urls() {
        let urls = Environment::Live.urls();
        assert_eq!(urls.api_url, "https://api.maksekeskus.ee");
        assert_eq!(
            urls.gateway_url,
            "https://payment.maksekeskus.ee/pay/1/signed.html"
        );
    }

    #[test]
    fn test_should_serialize_urls_in_camel_case() {
        let json = serde_json::to_value(Environment::Live.urls()).unwrap();
        assert!(json.get("checkoutjsUrl").is_some());
        assert!(json.get("statics_url").is_none());
    }
}
