//! Pluggable single-exchange HTTP transport.
//!
//! An [`HttpTransport`] accumulates [`TransportOption`]s, performs exactly one
//! exchange on [`execute`](HttpTransport::execute), exposes metadata about it
//! through [`info`](HttpTransport::info), and releases its resources on
//! [`close`](HttpTransport::close).
//!
//! - [`ReqwestTransport`]: production implementation
//! - [`MockTransport`]: scripted in-memory double for tests
//!
//! Transports do no retrying or pooling, and a fresh instance is used for
//! every logical request unless the client has an override installed.

mod mock;
mod reqwest_transport;

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clients::errors::TransportError;
use crate::clients::http_request::HttpMethod;

pub use mock::{MockHandle, MockResponse, MockTransport, RecordedExchange};
pub use reqwest_transport::ReqwestTransport;

/// A configuration option for an [`HttpTransport`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransportOption {
    /// Return the body from `execute` instead of discarding it.
    ReturnTransfer(bool),
    /// Overall time allowed for the exchange. Zero means no limit.
    Timeout(Duration),
    /// Follow redirect responses.
    FollowLocation(bool),
    /// The request method.
    CustomRequest(HttpMethod),
    /// The request body.
    PostFields(String),
    /// Request headers as name/value pairs.
    HttpHeader(Vec<(String, String)>),
    /// The fully-built request URL.
    Url(String),
}

impl TransportOption {
    /// Returns a short name for this option, used in errors and logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ReturnTransfer(_) => "RETURNTRANSFER",
            Self::Timeout(_) => "TIMEOUT",
            Self::FollowLocation(_) => "FOLLOWLOCATION",
            Self::CustomRequest(_) => "CUSTOMREQUEST",
            Self::PostFields(_) => "POSTFIELDS",
            Self::HttpHeader(_) => "HTTPHEADER",
            Self::Url(_) => "URL",
        }
    }
}

/// The raw result of an exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResponseBody {
    /// A UTF-8 body.
    Text(String),
    /// A body that is not valid UTF-8.
    Binary(Vec<u8>),
}

impl ResponseBody {
    /// Builds a body from raw bytes, keeping them as text when they are
    /// valid UTF-8.
    #[must_use]
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        match String::from_utf8(bytes) {
            Ok(text) => Self::Text(text),
            Err(e) => Self::Binary(e.into_bytes()),
        }
    }
}

/// A single metadata field of [`TransportInfo`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InfoField {
    /// Final HTTP status code.
    HttpCode,
    /// URL after following redirects.
    EffectiveUrl,
    /// `Content-Type` of the response.
    ContentType,
    /// Total exchange time, in seconds.
    TotalTime,
    /// Number of body bytes received.
    SizeDownload,
    /// Number of redirects followed.
    RedirectCount,
}

impl InfoField {
    /// Returns the key of this field in the serialized metadata object.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::HttpCode => "http_code",
            Self::EffectiveUrl => "url",
            Self::ContentType => "content_type",
            Self::TotalTime => "total_time",
            Self::SizeDownload => "size_download",
            Self::RedirectCount => "redirect_count",
        }
    }
}

/// Metadata describing a completed exchange.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TransportInfo {
    /// Final HTTP status code; `0` when no response was received.
    pub http_code: u16,
    /// URL after following redirects.
    #[serde(rename = "url")]
    pub effective_url: String,
    /// `Content-Type` of the response.
    pub content_type: Option<String>,
    /// Total exchange time, in seconds.
    pub total_time: f64,
    /// Number of body bytes received.
    pub size_download: u64,
    /// Number of redirects followed.
    pub redirect_count: u32,
}

impl TransportInfo {
    /// Returns all metadata as a JSON object.
    #[must_use]
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Returns one field, or the full object when `field` is `None`.
    #[must_use]
    pub fn get(&self, field: Option<InfoField>) -> Value {
        let all = self.to_value();
        match field {
            None => all,
            Some(field) => all.get(field.key()).cloned().unwrap_or(Value::Null),
        }
    }
}

/// A single configurable HTTP exchange.
#[async_trait]
pub trait HttpTransport: Send {
    /// Records an option for the next exchange. A later option of the same
    /// kind replaces an earlier one.
    fn apply(&mut self, option: TransportOption);

    /// Chainable form of [`apply`](Self::apply).
    fn set_option(&mut self, option: TransportOption) -> &mut Self
    where
        Self: Sized,
    {
        self.apply(option);
        self
    }

    /// Performs the exchange.
    ///
    /// Non-2xx responses are not errors; the status is available through
    /// [`info`](Self::info).
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] on network, TLS, or timeout failure, or if
    /// the transport was misconfigured.
    async fn execute(&mut self) -> Result<ResponseBody, TransportError>;

    /// Returns metadata of the last exchange: one field, or everything when
    /// `field` is `None`.
    fn info(&self, field: Option<InfoField>) -> Value;

    /// Releases underlying resources and clears the options of the finished
    /// exchange. The transport stays usable, and calling it more than once is
    /// harmless.
    fn close(&mut self);
}
