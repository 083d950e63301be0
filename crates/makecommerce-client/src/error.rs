//! Error types for the endpoint client.

use crate::response::ApiResponse;

/// Errors returned by [`MakeCommerceClient`](crate::MakeCommerceClient) calls.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request could not be sent or the response could not be read.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The gateway answered with a status other than 200 or 201.
    #[error("gateway returned HTTP {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Gateway error code from the response body, if any.
        code: Option<i64>,
        /// Gateway error message from the response body, or the raw body.
        message: String,
        /// The full response.
        response: Box<ApiResponse>,
    },

    /// The configured API URL and endpoint path do not form a valid URL.
    #[error("invalid request URL {url}: {reason}")]
    InvalidUrl {
        /// The URL that failed to parse.
        url: String,
        /// Parser error.
        reason: String,
    },

    /// A request body could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Credentials or configuration are unusable.
    #[error(transparent)]
    Core(#[from] makecommerce_core::CoreError),

    /// A notification could not be checked.
    #[error(transparent)]
    Auth(#[from] makecommerce_auth::AuthError),
}

/// Convenience result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
