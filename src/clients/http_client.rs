//! The request engine behind every THG Hosting API call.
//!
//! [`ThgHostingClient::request`] validates the method, inlines attachments,
//! builds the URL, body and headers, drives one [`HttpTransport`] exchange and
//! normalizes the result into an [`ApiResponse`].

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::sync::Mutex;

use crate::clients::attachments::{self, ATTACHMENTS_KEY};
use crate::clients::errors::ClientError;
use crate::clients::http_request::{build_query, ApiRequest, Arguments, HttpMethod};
use crate::clients::http_response::ApiResponse;
use crate::clients::transport::{HttpTransport, ReqwestTransport, TransportOption};
use crate::config::{ApiToken, BaseUrl, ClientConfig};

/// Header carrying the API token.
pub const API_TOKEN_HEADER: &str = "X-Api-Token";

type SharedTransport = Arc<Mutex<Box<dyn HttpTransport>>>;

/// A fully assembled request, ready to hand to a transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreparedRequest {
    /// The validated method.
    pub method: HttpMethod,
    /// Final URL, including the query string for GET requests.
    pub url: String,
    /// JSON body; `None` when arguments went into the query string.
    pub body: Option<String>,
    /// Request headers, in the order they are sent.
    pub headers: Vec<(String, String)>,
    /// Effective timeout for the exchange.
    pub timeout: Duration,
}

/// Client for the THG Hosting REST API.
///
/// Holds the API token, base URL and default timeout. Each call to
/// [`request`](Self::request) builds a fresh [`ReqwestTransport`] unless a
/// transport override was installed with
/// [`set_transport`](Self::set_transport).
///
/// # Thread Safety
///
/// `ThgHostingClient` is `Send + Sync`. Concurrent calls without an override
/// each use their own transport. An installed override is shared, so calls
/// using it are serialized.
///
/// # Example
///
/// ```rust,ignore
/// use thg_hosting::ThgHostingClient;
///
/// let client = ThgHostingClient::new("my-token", None, None)?;
/// let response = client.create_ssh_key("ssh-rsa AAAA...", "My Key").await?;
/// println!("{:?}", response.data);
/// ```
pub struct ThgHostingClient {
    api_token: ApiToken,
    base_url: BaseUrl,
    timeout: u64,
    transport: Option<SharedTransport>,
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ThgHostingClient>();
};

impl fmt::Debug for ThgHostingClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThgHostingClient")
            .field("api_token", &self.api_token)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("transport_override", &self.transport.is_some())
            .finish()
    }
}

impl ThgHostingClient {
    /// Creates a client from a token, an optional timeout in seconds and an
    /// optional base URL.
    ///
    /// An empty `base_url` means the production endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] for an empty token or malformed base
    /// URL, and [`ClientError::InvalidTimeout`] for a negative timeout.
    pub fn new(
        api_token: impl Into<String>,
        timeout: Option<i64>,
        base_url: Option<&str>,
    ) -> Result<Self, ClientError> {
        let mut builder = ClientConfig::builder().api_token(ApiToken::new(api_token)?);
        if let Some(url) = base_url.filter(|url| !url.trim().is_empty()) {
            builder = builder.base_url(BaseUrl::new(url)?);
        }

        let mut client = Self::from_config(builder.build()?);
        if let Some(seconds) = timeout {
            client.set_timeout(seconds)?;
        }
        Ok(client)
    }

    /// Creates a client from a validated configuration.
    #[must_use]
    pub fn from_config(config: ClientConfig) -> Self {
        Self {
            api_token: config.api_token().clone(),
            base_url: config.base_url().clone(),
            timeout: config.timeout(),
            transport: None,
        }
    }

    /// Returns the default timeout, in seconds.
    #[must_use]
    pub const fn timeout(&self) -> u64 {
        self.timeout
    }

    /// Sets the default timeout, in seconds. Zero disables the limit.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidTimeout`] (code 400) if `seconds` is
    /// negative; the current timeout is left unchanged.
    pub fn set_timeout(&mut self, seconds: i64) -> Result<&mut Self, ClientError> {
        self.timeout =
            u64::try_from(seconds).map_err(|_| ClientError::InvalidTimeout { timeout: seconds })?;
        Ok(self)
    }

    /// Returns the API base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Points the client at another base URL.
    pub fn set_base_url(&mut self, base_url: BaseUrl) -> &mut Self {
        self.base_url = base_url;
        self
    }

    /// Installs a transport used for every subsequent call instead of a
    /// fresh [`ReqwestTransport`].
    ///
    /// The transport is closed after each exchange and reused for the next.
    pub fn set_transport<T: HttpTransport + 'static>(&mut self, transport: T) -> &mut Self {
        self.transport = Some(Arc::new(Mutex::new(Box::new(transport))));
        self
    }

    /// Removes an installed transport override.
    pub fn reset_transport(&mut self) -> &mut Self {
        self.transport = None;
        self
    }

    /// Sends a request and normalizes the response.
    ///
    /// Exactly one exchange happens per call; nothing is cached or retried.
    ///
    /// # Errors
    ///
    /// - [`ClientError::InvalidMethod`] if the method is not accepted; no
    ///   transport is constructed
    /// - [`ClientError::MissingField`] / [`ClientError::InvalidAttachment`]
    ///   if an attachment cannot be normalized; nothing is sent
    /// - [`ClientError::Transport`] if the exchange itself fails
    ///
    /// A body that is not JSON is not an error; it is returned as
    /// [`ResponseData::Text`](crate::clients::ResponseData::Text).
    pub async fn request(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let prepared = self.prepare(request)?;

        match &self.transport {
            Some(shared) => {
                let mut transport = shared.lock().await;
                Self::exchange(&mut **transport, prepared).await
            }
            None => {
                let mut transport = ReqwestTransport::new();
                Self::exchange(&mut transport, prepared).await
            }
        }
    }

    /// Sends a GET request; arguments become the query string.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn get(&self, endpoint: &str, arguments: Arguments) -> Result<ApiResponse, ClientError> {
        self.send(HttpMethod::Get, endpoint, arguments).await
    }

    /// Sends a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn post(&self, endpoint: &str, arguments: Arguments) -> Result<ApiResponse, ClientError> {
        self.send(HttpMethod::Post, endpoint, arguments).await
    }

    /// Sends a PUT request with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn put(&self, endpoint: &str, arguments: Arguments) -> Result<ApiResponse, ClientError> {
        self.send(HttpMethod::Put, endpoint, arguments).await
    }

    /// Sends a PATCH request with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn patch(&self, endpoint: &str, arguments: Arguments) -> Result<ApiResponse, ClientError> {
        self.send(HttpMethod::Patch, endpoint, arguments).await
    }

    /// Sends a DELETE request.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn delete(&self, endpoint: &str) -> Result<ApiResponse, ClientError> {
        self.send(HttpMethod::Delete, endpoint, Arguments::new()).await
    }

    async fn send(
        &self,
        method: HttpMethod,
        endpoint: &str,
        arguments: Arguments,
    ) -> Result<ApiResponse, ClientError> {
        let request = ApiRequest::builder(method, endpoint)
            .arguments(arguments)
            .build()?;
        self.request(request).await
    }

    /// Assembles the URL, body and headers for a request without sending it.
    ///
    /// # Errors
    ///
    /// Returns the same validation errors as [`request`](Self::request).
    pub fn prepare(&self, request: ApiRequest) -> Result<PreparedRequest, ClientError> {
        let method = request.verify()?;
        let ApiRequest {
            endpoint,
            mut arguments,
            files,
            content_type,
            timeout,
            ..
        } = request;

        if !files.is_empty() {
            let attachments = attachments::normalize(&files)?;
            arguments.insert(
                ATTACHMENTS_KEY.to_string(),
                serde_json::to_value(attachments)?,
            );
        }

        let mut headers = vec![
            (API_TOKEN_HEADER.to_string(), self.api_token.as_ref().to_string()),
            ("Content-Type".to_string(), content_type),
            ("Accept".to_string(), "application/json".to_string()),
        ];

        let mut url = self.base_url.join(&endpoint);
        let body = if method == HttpMethod::Get && !arguments.is_empty() {
            url.push('?');
            url.push_str(&build_query(&arguments));
            None
        } else {
            let body = serde_json::to_string(&Value::Object(arguments))?;
            headers.push(("Content-Length".to_string(), body.len().to_string()));
            Some(body)
        };

        Ok(PreparedRequest {
            method,
            url,
            body,
            headers,
            timeout: timeout.unwrap_or_else(|| Duration::from_secs(self.timeout)),
        })
    }

    async fn exchange(
        transport: &mut dyn HttpTransport,
        prepared: PreparedRequest,
    ) -> Result<ApiResponse, ClientError> {
        let PreparedRequest {
            method,
            url,
            body,
            headers,
            timeout,
        } = prepared;

        tracing::debug!(%method, %url, has_body = body.is_some(), "sending THG Hosting API request");

        transport.apply(TransportOption::ReturnTransfer(true));
        transport.apply(TransportOption::Timeout(timeout));
        transport.apply(TransportOption::FollowLocation(true));
        transport.apply(TransportOption::CustomRequest(method));
        if let Some(body) = body {
            transport.apply(TransportOption::PostFields(body));
        }
        transport.apply(TransportOption::HttpHeader(headers));
        transport.apply(TransportOption::Url(url.clone()));

        let result = transport.execute().await;
        let info = transport.info(None);
        transport.close();

        match result {
            Ok(body) => Ok(ApiResponse::new(body, info)),
            Err(e) => {
                tracing::warn!(%method, %url, error = %e, "THG Hosting API request failed");
                Err(e.into())
            }
        }
    }
}
