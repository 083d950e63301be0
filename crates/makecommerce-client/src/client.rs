//! Authenticated HTTP transport to the gateway API.
//!
//! Every call uses HTTP basic authentication with the shop ID and secret key.
//! POST and PUT bodies are sent as JSON. The response of each call is returned
//! to the caller; the client keeps no per-call state.

use std::time::Duration;

use makecommerce_auth::{
    AuthCode, NotificationEnvelope, Verification, compose_embedded_signature, verify_mac,
    verify_notification,
};
use makecommerce_core::{Credential, EnvironmentUrls, MakeCommerceConfig};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::{Method, Url};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{ClientError, ClientResult};
use crate::response::ApiResponse;

/// Library version reported by [`MakeCommerceClient::version`].
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Characters kept unescaped when an identifier is placed in a path segment.
const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Client for the gateway's REST API.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct MakeCommerceClient {
    http: reqwest::Client,
    credential: Credential,
    urls: EnvironmentUrls,
}

impl MakeCommerceClient {
    /// Create a client for the given credential and environment URLs.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] if the HTTP client cannot be built.
    pub fn new(
        credential: Credential,
        urls: EnvironmentUrls,
        timeout: Duration,
    ) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(format!("makecommerce-rs/{VERSION}"))
            .build()?;

        Ok(Self {
            http,
            credential,
            urls,
        })
    }

    /// Create a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Core`] if the credentials are incomplete.
    pub fn from_config(config: &MakeCommerceConfig) -> ClientResult<Self> {
        let credential = config.credential()?;
        info!(
            shop_id = %credential.shop_id(),
            environment = %config.environment(),
            "creating MakeCommerce client"
        );
        Self::new(
            credential,
            config.environment_urls(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Library version.
    #[must_use]
    pub fn version(&self) -> &'static str {
        VERSION
    }

    /// URLs of the environment this client talks to.
    #[must_use]
    pub fn environment_urls(&self) -> &EnvironmentUrls {
        &self.urls
    }

    /// The credential this client authenticates with.
    #[must_use]
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Send a GET request.
    pub async fn get(&self, path: &str, params: &[(&str, &str)]) -> ClientResult<ApiResponse> {
        self.send(Method::GET, path, params, None).await
    }

    /// Send a POST request with a JSON body.
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<ApiResponse> {
        let body = serde_json::to_vec(body)?;
        self.send(Method::POST, path, &[], Some(body)).await
    }

    /// Send a PUT request with query parameters and a JSON body.
    pub async fn put<B: Serialize + ?Sized>(
        &self,
        path: &str,
        params: &[(&str, &str)],
        body: &B,
    ) -> ClientResult<ApiResponse> {
        let body = serde_json::to_vec(body)?;
        self.send(Method::PUT, path, params, Some(body)).await
    }

    /// Compute the payment-form signature with this client's secret key.
    #[must_use]
    pub fn embedded_signature(
        &self,
        amount: &str,
        currency: &str,
        reference: Option<&str>,
    ) -> AuthCode {
        compose_embedded_signature(amount, currency, reference, self.credential.secret_key())
    }

    /// Verify a MAC notification with this client's secret key.
    pub fn verify_mac(&self, envelope: &NotificationEnvelope) -> ClientResult<bool> {
        Ok(verify_mac(envelope, self.credential.secret_key())?)
    }

    /// Verify a notification under any supported scheme with this client's secret key.
    pub fn verify_notification(
        &self,
        envelope: &NotificationEnvelope,
    ) -> ClientResult<Verification> {
        Ok(verify_notification(
            envelope,
            self.credential.secret_key(),
        )?)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, &str)],
        body: Option<Vec<u8>>,
    ) -> ClientResult<ApiResponse> {
        let url = self.build_url(path, params)?;

        info!(method = %method, path, "calling gateway API");

        let mut request = self
            .http
            .request(method.clone(), url)
            .basic_auth(
                self.credential.shop_id().as_str(),
                Some(self.credential.secret_key()),
            );
        if let Some(body) = body {
            request = request
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let raw_body = response.text().await?;
        let response = ApiResponse::new(status, raw_body);

        debug!(method = %method, path, status, "gateway API responded");

        if response.is_success() {
            Ok(response)
        } else {
            let (message, code) = response.error_details();
            Err(ClientError::Api {
                status,
                code,
                message: message.unwrap_or_else(|| response.raw_body.clone()),
                response: Box::new(response),
            })
        }
    }

    fn build_url(&self, path: &str, params: &[(&str, &str)]) -> ClientResult<Url> {
        let raw = format!("{}{path}", self.urls.api_url.trim_end_matches('/'));
        let mut url = Url::parse(&raw).map_err(|e| ClientError::InvalidUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })?;
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        Ok(url)
    }
}

/// Percent-encode an identifier for use as a single path segment.
pub(crate) fn path_segment(id: &str) -> String {
    utf8_percent_encode(id, PATH_SEGMENT_ENCODE_SET).to_string()
}
