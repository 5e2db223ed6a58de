//! Request types for the THG Hosting API client.
//!
//! This module provides [`ApiRequest`] and its builder, the [`HttpMethod`]
//! enumeration, and the query-string encoder used for GET requests.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde_json::{Map, Value};

use crate::clients::attachments::{AttachmentRecord, FileInput};
use crate::clients::errors::ClientError;

/// Content type sent when the caller does not choose one.
pub const CONTENT_JSON: &str = "application/json";

/// Ordered argument mapping sent as a query string (GET) or JSON body.
pub type Arguments = Map<String, Value>;

/// HTTP methods accepted by the THG Hosting API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources and triggering actions.
    Post,
    /// HTTP PUT method for updating resources.
    Put,
    /// HTTP PATCH method for partial updates.
    Patch,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// All accepted methods, in the order they are reported to callers.
    pub const ALL: [Self; 5] = [Self::Get, Self::Post, Self::Delete, Self::Put, Self::Patch];

    /// Returns the upper-case wire name of this method.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// Comma separated list of accepted methods.
    #[must_use]
    pub const fn allowed() -> &'static str {
        "GET, POST, DELETE, PUT, PATCH"
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = ClientError;

    /// Parses a method name. Matching is exact and case-sensitive: `"get"`
    /// is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str() == s)
            .ok_or_else(|| ClientError::InvalidMethod {
                method: s.to_string(),
            })
    }
}

impl From<HttpMethod> for String {
    fn from(method: HttpMethod) -> Self {
        method.as_str().to_string()
    }
}

/// A request to be sent through [`ThgHostingClient::request`](crate::ThgHostingClient::request).
///
/// The method is kept as the caller supplied it and validated by
/// [`verify`](Self::verify) before anything else happens.
///
/// # Example
///
/// ```rust
/// use thg_hosting::clients::{ApiRequest, HttpMethod};
///
/// let request = ApiRequest::builder(HttpMethod::Post, "ssh-keys")
///     .argument("public_key", "ssh-rsa AAAA")
///     .argument("label", "laptop")
///     .build()
///     .unwrap();
///
/// assert_eq!(request.http_method().unwrap(), HttpMethod::Post);
/// assert_eq!(request.arguments["label"], "laptop");
/// ```
#[derive(Clone, Debug)]
pub struct ApiRequest {
    /// The HTTP method, exactly as supplied.
    pub method: String,
    /// Endpoint path relative to the base URL.
    pub endpoint: String,
    /// Arguments encoded as query string or JSON body.
    pub arguments: Arguments,
    /// Files to attach inline under the `attachments` key.
    pub files: Vec<FileInput>,
    /// Value of the `Content-Type` header.
    pub content_type: String,
    /// Per-call timeout overriding the client default.
    pub timeout: Option<Duration>,
}

impl ApiRequest {
    /// Creates a new builder for constructing an `ApiRequest`.
    #[must_use]
    pub fn builder(method: impl Into<String>, endpoint: impl Into<String>) -> ApiRequestBuilder {
        ApiRequestBuilder::new(method, endpoint)
    }

    /// Parses the method of this request.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidMethod`] for anything other than the
    /// five accepted upper-case method names.
    pub fn http_method(&self) -> Result<HttpMethod, ClientError> {
        self.method.parse()
    }

    /// Validates the request before any side effect takes place.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidMethod`] if the method is not accepted.
    pub fn verify(&self) -> Result<HttpMethod, ClientError> {
        self.http_method()
    }
}

/// Builder for [`ApiRequest`].
#[derive(Debug)]
pub struct ApiRequestBuilder {
    method: String,
    endpoint: String,
    arguments: Arguments,
    files: Vec<FileInput>,
    content_type: Option<String>,
    timeout: Option<Duration>,
}

impl ApiRequestBuilder {
    fn new(method: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            endpoint: endpoint.into(),
            arguments: Arguments::new(),
            files: Vec::new(),
            content_type: None,
            timeout: None,
        }
    }

    /// Replaces all arguments at once.
    #[must_use]
    pub fn arguments(mut self, arguments: Arguments) -> Self {
        self.arguments = arguments;
        self
    }

    /// Adds a single argument.
    #[must_use]
    pub fn argument(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    /// Adds an argument only when `value` is `Some`.
    ///
    /// Absent optionals are omitted entirely, never sent as `null`.
    #[must_use]
    pub fn optional_argument<V: Into<Value>>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.argument(key, value),
            None => self,
        }
    }

    /// Attaches a local file by path.
    #[must_use]
    pub fn file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.push(FileInput::Path(path.into()));
        self
    }

    /// Attaches a pre-encoded record.
    #[must_use]
    pub fn file_record(mut self, record: AttachmentRecord) -> Self {
        self.files.push(FileInput::Record(record));
        self
    }

    /// Appends several attachments.
    #[must_use]
    pub fn files(mut self, files: impl IntoIterator<Item = FileInput>) -> Self {
        self.files.extend(files);
        self
    }

    /// Overrides the `Content-Type` header (default `application/json`).
    #[must_use]
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Overrides the client timeout for this call only.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the [`ApiRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidMethod`] if the method is not accepted.
    pub fn build(self) -> Result<ApiRequest, ClientError> {
        let request = ApiRequest {
            method: self.method,
            endpoint: self.endpoint,
            arguments: self.arguments,
            files: self.files,
            content_type: self.content_type.unwrap_or_else(|| CONTENT_JSON.to_string()),
            timeout: self.timeout,
        };
        request.verify()?;
        Ok(request)
    }
}

/// Encodes arguments as a URL query string.
///
/// Follows the form-encoding conventions the API expects: arrays and objects
/// are flattened into `key[0]=..` and `key[sub]=..` pairs, booleans become
/// `1`/`0`, and `null` values are dropped. Keys and values are
/// percent-encoded.
///
/// ```rust
/// use serde_json::json;
/// use thg_hosting::clients::build_query;
///
/// let args = json!({"limit": 10, "ids": [1, 2], "show_add_ons": true});
/// let query = build_query(args.as_object().unwrap());
/// assert_eq!(query, "limit=10&ids%5B0%5D=1&ids%5B1%5D=2&show_add_ons=1");
/// ```
#[must_use]
pub fn build_query(arguments: &Arguments) -> String {
    let mut pairs = Vec::new();
    for (key, value) in arguments {
        push_pairs(&mut pairs, key.clone(), value);
    }
    pairs
        .into_iter()
        .map(|(key, value)| format!("{}={}", urlencoding::encode(&key), urlencoding::encode(&value)))
        .collect::<Vec<_>>()
        .join("&")
}

fn push_pairs(pairs: &mut Vec<(String, String)>, key: String, value: &Value) {
    match value {
        Value::Null => {}
        Value::Bool(flag) => pairs.push((key, if *flag { "1" } else { "0" }.to_string())),
        Value::Number(number) => pairs.push((key, number.to_string())),
        Value::String(text) => pairs.push((key, text.clone())),
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                push_pairs(pairs, format!("{key}[{index}]"), item);
            }
        }
        Value::Object(fields) => {
            for (name, item) in fields {
                push_pairs(pairs, format!("{key}[{name}]"), item);
            }
        }
    }
}
