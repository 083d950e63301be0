//! Uniform gateway response.

use serde::de::DeserializeOwned;
use serde_json::Value;

/// A gateway response: status code, parsed JSON body (if any) and raw body text.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status_code: u16,
    /// The body decoded as JSON, or `None` if it is empty or not JSON.
    pub parsed_body: Option<Value>,
    /// The body text as received.
    pub raw_body: String,
}

impl ApiResponse {
    /// Build a response from a status code and body text.
    #[must_use]
    pub fn new(status_code: u16, raw_body: String) -> Self {
        let parsed_body = if raw_body.trim().is_empty() {
            None
        } else {
            serde_json::from_str(&raw_body).ok()
        };
        Self {
            status_code,
            parsed_body,
            raw_body,
        }
    }

    /// Whether the gateway accepted the call (200 or 201).
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self.status_code, 200 | 201)
    }

    /// Decode the body into a typed value.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.raw_body)
    }

    /// The gateway's error `message` and `code` fields, if present.
    #[must_use]
    pub fn error_details(&self) -> (Option<String>, Option<i64>) {
        let Some(body) = &self.parsed_body else {
            return (None, None);
        };
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .map(ToOwned::to_owned);
        let code = body.get("code").and_then(Value::as_i64);
        (message, code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_parse_json_body() {
        let response = ApiResponse::new(200, r#"{"id":"T1"}"#.to_owned());
        assert!(response.is_success());
        assert_eq!(response.parsed_body.unwrap()["id"], "T1");
    }

    #[test]
    fn test_should_keep_non_json_body_raw() {
        let response = ApiResponse::new(502, "Bad Gateway".to_owned());
        assert!(!response.is_success());
        assert!(response.parsed_body.is_none());
        assert_eq!(response.raw_body, "Bad Gateway");
    }

    #[test]
    fn test_should_treat_empty_body_as_absent() {
        let response = ApiResponse::new(201, String::new());
        assert!(response.is_success());
        assert!(response.parsed_body.is_none());
    }

    #[test]
    fn test_should_extract_error_details() {
        let response = ApiResponse::new(
            400,
            r#"{"code":1024,"message":"Transaction not found"}"#.to_owned(),
        );
        assert_eq!(
            response.error_details(),
            (Some("Transaction not found".to_owned()), Some(1024))
        );
    }

    #[test]
    fn test_should_decode_typed_body() {
        #[derive(serde::Deserialize)]
        struct Shop {
            name: String,
        }
        let response = ApiResponse::new(200, r#"{"name":"Demo"}"#.to_owned());
        let shop: Shop = response.json().unwrap();
        assert_eq!(shop.name, "Demo");
    }
}
