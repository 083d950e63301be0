//! Notification receiver implementing hyper's `Service` trait.
//!
//! [`WebhookService`] accepts gateway notifications on any path:
//!
//! 1. `GET /health` answers `200`
//! 2. `POST` reads the envelope from the form-encoded body
//! 3. `GET` reads the envelope from the query string
//!
//! The envelope is verified with the merchant secret key. Authentic
//! notifications answer `200`, mismatches `401`, unparseable envelopes `400`.
//! Bodies larger than [`MAX_BODY_BYTES`] answer `413`.

use std::convert::Infallible;
use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use bytes::Bytes;
use http::header::{CONTENT_TYPE, HeaderValue};
use http::{Method, Request, Response, StatusCode};
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Incoming};
use hyper::service::Service;
use makecommerce_auth::{NotificationEnvelope, verify_notification};
use tracing::{debug, info, warn};

/// Largest notification body accepted.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Body type of every response this service produces.
pub type WebhookBody = Full<Bytes>;

/// Hyper service verifying inbound notifications.
#[derive(Clone)]
pub struct WebhookService {
    secret_key: Arc<str>,
}

impl fmt::Debug for WebhookService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookService")
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

impl WebhookService {
    /// Create a service verifying with `secret_key`.
    #[must_use]
    pub fn new(secret_key: impl Into<Arc<str>>) -> Self {
        Self {
            secret_key: secret_key.into(),
        }
    }
}

impl Service<Request<Incoming>> for WebhookService {
    type Response = Response<WebhookBody>;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: Request<Incoming>) -> Self::Future {
        let secret_key = Arc::clone(&self.secret_key);

        Box::pin(async move {
            let (parts, incoming) = req.into_parts();
            let body = match collect_limited(incoming, MAX_BODY_BYTES).await {
                Ok(body) => body,
                Err(response) => return Ok(response),
            };
            Ok(handle_notification(
                &parts.method,
                parts.uri.path(),
                parts.uri.query(),
                &body,
                &secret_key,
            ))
        })
    }
}

/// Read a request body of at most `limit` bytes.
///
/// Answers `413` past the limit and `400` when the body cannot be read.
async fn collect_limited<B>(body: B, limit: usize) -> Result<Bytes, Response<WebhookBody>>
where
    B: Body,
    B::Error: Into<Box<dyn StdError + Send + Sync>>,
{
    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => {
            warn!(limit, "rejected oversized notification body");
            Err(text_response(
                StatusCode::PAYLOAD_TOO_LARGE,
                "notification body too large",
            ))
        }
        Err(e) => {
            warn!(error = %e, "failed to read notification body");
            Err(text_response(StatusCode::BAD_REQUEST, "unreadable body"))
        }
    }
}

/// Answer one request whose body has been fully read.
pub fn handle_notification(
    method: &Method,
    path: &str,
    query: Option<&str>,
    body: &[u8],
    secret_key: &str,
) -> Response<WebhookBody> {
    debug!(%method, path, "received request");

    if is_health_check(method, path) {
        return text_response(StatusCode::OK, "ok");
    }

    let envelope = match *method {
        Method::POST => match std::str::from_utf8(body) {
            Ok(form) => NotificationEnvelope::from_form_urlencoded(form),
            Err(_) => return text_response(StatusCode::BAD_REQUEST, "body is not UTF-8"),
        },
        Method::GET => NotificationEnvelope::from_form_urlencoded(query.unwrap_or_default()),
        _ => return text_response(StatusCode::METHOD_NOT_ALLOWED, "method not allowed"),
    };

    match verify_notification(&envelope, secret_key) {
        Ok(result) if result.authentic => {
            info!(path, scheme = %result.scheme, "accepted notification");
            text_response(StatusCode::OK, "ok")
        }
        Ok(result) => {
            warn!(path, scheme = %result.scheme, "rejected notification with mismatched code");
            text_response(StatusCode::UNAUTHORIZED, "authentication code mismatch")
        }
        Err(e) => {
            warn!(path, error = %e, "rejected malformed notification");
            text_response(StatusCode::BAD_REQUEST, &e.to_string())
        }
    }
}

fn is_health_check(method: &Method, path: &str) -> bool {
    *method == Method::GET && path == "/health"
}

fn text_response(status: StatusCode, text: &str) -> Response<WebhookBody> {
    let mut response = Response::new(Full::new(Bytes::from(text.to_owned())));
    *response.status_mut() = status;
    response.headers_mut().insert(
        CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    response
}
