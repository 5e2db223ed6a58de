//! Normalized response envelope.
//!
//! Every call returns an [`ApiResponse`]: the decoded body in `data` and the
//! transport metadata in `info`. The provider's own envelope
//! (`status_code`, `message`, `data`, ...) is passed through untouched inside
//! `data`.

use serde_json::Value;

use crate::clients::transport::{InfoField, ResponseBody};

/// The body of a response, decoded when possible.
#[derive(Clone, Debug, PartialEq)]
pub enum ResponseData {
    /// The body parsed as JSON.
    Json(Value),
    /// A text body that is not valid JSON, kept verbatim.
    Text(String),
    /// A non-UTF-8 body, passed through unchanged.
    Binary(Vec<u8>),
}

impl ResponseData {
    /// Decodes a raw transport body.
    ///
    /// Text is parsed as JSON; if that fails the text is kept unchanged.
    /// Decoding never fails. A JSON `null` body is also kept as text, so
    /// `"null"` stays distinguishable from a parsed value.
    #[must_use]
    pub fn decode(body: ResponseBody) -> Self {
        match body {
            ResponseBody::Text(text) => match serde_json::from_str::<Value>(&text) {
                Ok(Value::Null) | Err(_) => {
                    tracing::debug!(len = text.len(), "response body is not JSON, keeping raw text");
                    Self::Text(text)
                }
                Ok(value) => Self::Json(value),
            },
            ResponseBody::Binary(bytes) => Self::Binary(bytes),
        }
    }

    /// Returns the parsed JSON, if the body was JSON.
    #[must_use]
    pub const fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the raw text, if the body was not JSON.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    /// Returns the raw bytes of a non-UTF-8 body.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Binary(bytes) => Some(bytes.as_slice()),
            _ => None,
        }
    }

    /// Returns `true` if the body was parsed as JSON.
    #[must_use]
    pub const fn is_json(&self) -> bool {
        matches!(self, Self::Json(_))
    }

    /// Returns the provider envelope's `status_code`, when present.
    #[must_use]
    pub fn status_code(&self) -> Option<i64> {
        self.as_json()?.get("status_code")?.as_i64()
    }

    /// Returns the provider envelope's `message`, when present.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.as_json()?.get("message")?.as_str()
    }

    /// Returns the provider envelope's `data` payload, when present.
    #[must_use]
    pub fn payload(&self) -> Option<&Value> {
        self.as_json()?.get("data")
    }
}

/// The normalized result of a request.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
    /// The decoded response body.
    pub data: ResponseData,
    /// Transport metadata (status code, timing, effective URL, ...).
    pub info: Value,
}

impl ApiResponse {
    /// Creates a response from a raw body and transport metadata.
    #[must_use]
    pub fn new(body: ResponseBody, info: Value) -> Self {
        Self {
            data: ResponseData::decode(body),
            info,
        }
    }

    /// Returns the HTTP status code reported by the transport.
    #[must_use]
    pub fn http_code(&self) -> Option<u16> {
        self.info
            .get(InfoField::HttpCode.key())?
            .as_u64()
            .and_then(|code| u16::try_from(code).ok())
    }

    /// Returns `true` if the HTTP status code is 2xx.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.http_code().is_some_and(|code| (200..300).contains(&code))
    }

    /// Returns the URL the exchange finished at.
    #[must_use]
    pub fn effective_url(&self) -> Option<&str> {
        self.info.get(InfoField::EffectiveUrl.key())?.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_json_body() {
        let data = ResponseData::decode(ResponseBody::Text(
            r#"{"status_code":200,"data":[{"id":7}]}"#.to_string(),
        ));

        assert!(data.is_json());
        assert_eq!(data.as_json().unwrap()["data"][0]["id"], 7);
        assert_eq!(data.status_code(), Some(200));
        assert_eq!(data.payload(), Some(&json!([{"id": 7}])));
    }

    #[test]
    fn test_decode_falls_back_to_raw_text() {
        let data = ResponseData::decode(ResponseBody::Text("plain text".to_string()));
        assert_eq!(data, ResponseData::Text("plain text".to_string()));

        let html = "<html><body>502 Bad Gateway</body></html>";
        let data = ResponseData::decode(ResponseBody::Text(html.to_string()));
        assert_eq!(data.as_text(), Some(html));
        assert_eq!(data.status_code(), None);
    }

    #[test]
    fn test_decode_keeps_empty_and_null_bodies_as_text() {
        assert_eq!(
            ResponseData::decode(ResponseBody::Text(String::new())),
            ResponseData::Text(String::new())
        );
        assert_eq!(
            ResponseData::decode(ResponseBody::Text("null".to_string())),
            ResponseData::Text("null".to_string())
        );
    }

    #[test]
    fn test_decode_scalar_json() {
        assert_eq!(
            ResponseData::decode(ResponseBody::Text("42".to_string())),
            ResponseData::Json(json!(42))
        );
    }

    #[test]
    fn test_decode_passes_binary_through() {
        let data = ResponseData::decode(ResponseBody::Binary(vec![0xde, 0xad]));
        assert_eq!(data.as_bytes(), Some(&[0xde, 0xad][..]));
        assert!(data.as_json().is_none());
    }

    #[test]
    fn test_message_accessor() {
        let data = ResponseData::Json(json!({"status_code": 404, "message": "Server not found"}));
        assert_eq!(data.message(), Some("Server not found"));
    }

    #[test]
    fn test_api_response_metadata_accessors() {
        let response = ApiResponse::new(
            ResponseBody::Text("{}".to_string()),
            json!({"http_code": 201, "url": "https://example.com/ssl/"}),
        );

        assert_eq!(response.http_code(), Some(201));
        assert!(response.is_success());
        assert_eq!(response.effective_url(), Some("https://example.com/ssl/"));
        assert_eq!(response.data, ResponseData::Json(json!({})));
    }

    #[test]
    fn test_api_response_without_status() {
        let response = ApiResponse::new(ResponseBody::Text("x".to_string()), Value::Null);
        assert_eq!(response.http_code(), None);
        assert!(!response.is_success());
    }
}
