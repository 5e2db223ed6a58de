//! Production transport backed by `reqwest`.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::redirect::Policy;
use serde_json::Value;

use super::{HttpTransport, InfoField, ResponseBody, TransportInfo, TransportOption};
use crate::clients::errors::TransportError;
use crate::clients::http_request::HttpMethod;

/// Maximum number of redirects followed when `FollowLocation(true)` is set.
pub const MAX_REDIRECTS: u32 = 10;

#[derive(Debug, Default)]
struct Settings {
    return_transfer: bool,
    timeout: Option<Duration>,
    follow_location: bool,
    method: Option<HttpMethod>,
    body: Option<String>,
    headers: Vec<(String, String)>,
    url: Option<String>,
}

/// [`HttpTransport`] performing one real HTTPS exchange.
///
/// A `reqwest::Client` (rustls) is built on `execute` and dropped on `close`.
/// `close` also clears every option and the last exchange's metadata, so one
/// instance can serve any number of exchanges in sequence.
///
/// # Example
///
/// ```rust,ignore
/// use thg_hosting::clients::{HttpMethod, HttpTransport, ReqwestTransport, TransportOption};
///
/// let mut transport = ReqwestTransport::new();
/// transport
///     .set_option(TransportOption::ReturnTransfer(true))
///     .set_option(TransportOption::CustomRequest(HttpMethod::Get))
///     .set_option(TransportOption::Url("https://example.com/".to_string()));
/// let body = transport.execute().await?;
/// let status = transport.info(Some(InfoField::HttpCode));
/// transport.close();
/// ```
#[derive(Debug, Default)]
pub struct ReqwestTransport {
    settings: Settings,
    client: Option<reqwest::Client>,
    info: TransportInfo,
}

impl ReqwestTransport {
    /// Creates an unconfigured transport.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn build_client(&self, redirects: Arc<AtomicU32>) -> Result<reqwest::Client, TransportError> {
        let policy = if self.settings.follow_location {
            Policy::custom(move |attempt| {
                let followed = u32::try_from(attempt.previous().len()).unwrap_or(u32::MAX);
                redirects.store(followed, Ordering::Relaxed);
                if followed > MAX_REDIRECTS {
                    attempt.error("too many redirects")
                } else {
                    attempt.follow()
                }
            })
        } else {
            Policy::none()
        };

        let mut builder = reqwest::Client::builder().use_rustls_tls().redirect(policy);
        if let Some(timeout) = self.settings.timeout.filter(|t| !t.is_zero()) {
            builder = builder.timeout(timeout);
        }
        Ok(builder.build()?)
    }

    fn header_map(&self) -> Result<HeaderMap, TransportError> {
        let mut headers = HeaderMap::new();
        for (name, value) in &self.settings.headers {
            let invalid = || TransportError::InvalidHeader { name: name.clone() };
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
            let header_value = HeaderValue::from_str(value).map_err(|_| invalid())?;
            headers.insert(header_name, header_value);
        }
        Ok(headers)
    }

    const fn reqwest_method(method: HttpMethod) -> reqwest::Method {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    fn apply(&mut self, option: TransportOption) {
        let settings = &mut self.settings;
        match option {
            TransportOption::ReturnTransfer(flag) => settings.return_transfer = flag,
            TransportOption::Timeout(timeout) => settings.timeout = Some(timeout),
            TransportOption::FollowLocation(flag) => settings.follow_location = flag,
            TransportOption::CustomRequest(method) => settings.method = Some(method),
            TransportOption::PostFields(body) => settings.body = Some(body),
            TransportOption::HttpHeader(headers) => settings.headers = headers,
            TransportOption::Url(url) => settings.url = Some(url),
        }
    }

    async fn execute(&mut self) -> Result<ResponseBody, TransportError> {
        let raw_url = self
            .settings
            .url
            .clone()
            .ok_or(TransportError::MissingOption { option: "URL" })?;
        let url = reqwest::Url::parse(&raw_url)
            .map_err(|_| TransportError::InvalidUrl { url: raw_url.clone() })?;
        let headers = self.header_map()?;

        let redirects = Arc::new(AtomicU32::new(0));
        let client = self.build_client(Arc::clone(&redirects))?;
        let method = Self::reqwest_method(self.settings.method.unwrap_or(HttpMethod::Get));

        let mut request = client.request(method, url).headers(headers);
        if let Some(body) = &self.settings.body {
            request = request.body(body.clone());
        }
        self.client = Some(client);

        self.info = TransportInfo {
            effective_url: raw_url,
            ..TransportInfo::default()
        };
        let started = Instant::now();

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                self.info.total_time = started.elapsed().as_secs_f64();
                return Err(e.into());
            }
        };

        self.info.http_code = response.status().as_u16();
        self.info.effective_url = response.url().to_string();
        self.info.content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(String::from);
        self.info.redirect_count = redirects.load(Ordering::Relaxed);

        let bytes = response.bytes().await;
        self.info.total_time = started.elapsed().as_secs_f64();
        let bytes = bytes?;
        self.info.size_download = bytes.len() as u64;

        if !self.settings.return_transfer {
            return Ok(ResponseBody::Text(String::new()));
        }
        Ok(ResponseBody::from_bytes(bytes.to_vec()))
    }

    fn info(&self, field: Option<InfoField>) -> Value {
        self.info.get(field)
    }

    fn close(&mut self) {
        self.client = None;
        self.settings = Settings::default();
        self.info = TransportInfo::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn configured(url: String, verb: HttpMethod) -> ReqwestTransport {
        let mut transport = ReqwestTransport::new();
        transport
            .set_option(TransportOption::ReturnTransfer(true))
            .set_option(TransportOption::Timeout(Duration::from_secs(5)))
            .set_option(TransportOption::FollowLocation(true))
            .set_option(TransportOption::CustomRequest(verb))
            .set_option(TransportOption::Url(url));
        transport
    }

    #[tokio::test]
    async fn test_execute_returns_body_and_metadata() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/servers/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(r#"{"status_code":200}"#, "application/json"),
            )
            .mount(&server)
            .await;

        let mut transport = configured(format!("{}/servers/", server.uri()), HttpMethod::Get);
        let body = transport.execute().await.unwrap();

        assert_eq!(body, ResponseBody::Text(r#"{"status_code":200}"#.to_string()));
        assert_eq!(transport.info(Some(InfoField::HttpCode)), 200);
        assert_eq!(transport.info(Some(InfoField::SizeDownload)), 19);
        assert_eq!(
            transport.info(Some(InfoField::ContentType)),
            "application/json"
        );
        transport.close();
    }

    #[tokio::test]
    async fn test_execute_sends_method_headers_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/tickets/9/"))
            .and(header("X-Api-Token", "abc"))
            .and(body_string(r#"{"priority":2}"#))
            .respond_with(ResponseTemplate::new(202).set_body_string("accepted"))
            .expect(1)
            .mount(&server)
            .await;

        let mut transport = configured(format!("{}/tickets/9/", server.uri()), HttpMethod::Patch);
        transport
            .set_option(TransportOption::HttpHeader(vec![(
                "X-Api-Token".to_string(),
                "abc".to_string(),
            )]))
            .set_option(TransportOption::PostFields(r#"{"priority":2}"#.to_string()));

        let body = transport.execute().await.unwrap();
        assert_eq!(body, ResponseBody::Text("accepted".to_string()));
        assert_eq!(transport.info(Some(InfoField::HttpCode)), 202);
    }

    #[tokio::test]
    async fn test_error_status_is_not_a_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(404).set_body_string("<html>missing</html>"))
            .mount(&server)
            .await;

        let mut transport = configured(format!("{}/ssh-keys/1/", server.uri()), HttpMethod::Delete);
        let body = transport.execute().await.unwrap();

        assert_eq!(body, ResponseBody::Text("<html>missing</html>".to_string()));
        assert_eq!(transport.info(Some(InfoField::HttpCode)), 404);
    }

    #[tokio::test]
    async fn test_follows_redirects_and_reports_effective_url() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/old/"))
            .respond_with(
                ResponseTemplate::new(302)
                    .insert_header("location", format!("{}/new/", server.uri()).as_str()),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/new/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("moved"))
            .mount(&server)
            .await;

        let mut transport = configured(format!("{}/old/", server.uri()), HttpMethod::Get);
        let body = transport.execute().await.unwrap();

        assert_eq!(body, ResponseBody::Text("moved".to_string()));
        assert_eq!(
            transport.info(Some(InfoField::EffectiveUrl)),
            format!("{}/new/", server.uri()).as_str()
        );
        assert_eq!(transport.info(Some(InfoField::RedirectCount)), 1);
    }

    #[tokio::test]
    async fn test_execute_requires_url() {
        let mut transport = ReqwestTransport::new();
        let result = transport.execute().await;
        assert!(matches!(
            result,
            Err(TransportError::MissingOption { option: "URL" })
        ));
    }

    #[tokio::test]
    async fn test_close_clears_options_and_metadata() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .mount(&server)
            .await;

        let mut transport = configured(format!("{}/status/", server.uri()), HttpMethod::Get);
        transport.set_option(TransportOption::PostFields("{}".to_string()));
        transport.execute().await.unwrap();
        transport.close();
        transport.close();

        assert_eq!(transport.info(Some(InfoField::HttpCode)), 0);
        assert!(transport.settings.body.is_none());
        assert!(matches!(
            transport.execute().await,
            Err(TransportError::MissingOption { option: "URL" })
        ));
    }

    #[tokio::test]
    async fn test_transport_is_reusable_after_close() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/first/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("one"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/second/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("two"))
            .mount(&server)
            .await;

        let mut transport = configured(format!("{}/first/", server.uri()), HttpMethod::Get);
        assert_eq!(transport.execute().await.unwrap(), ResponseBody::Text("one".to_string()));
        transport.close();

        transport
            .set_option(TransportOption::ReturnTransfer(true))
            .set_option(TransportOption::Url(format!("{}/second/", server.uri())));
        assert_eq!(transport.execute().await.unwrap(), ResponseBody::Text("two".to_string()));
        transport.close();
    }

    #[tokio::test]
    async fn test_connection_failure_surfaces_network_error() {
        let mut transport = configured("http://127.0.0.1:1/".to_string(), HttpMethod::Get);
        let result = transport.execute().await;
        assert!(matches!(result, Err(TransportError::Network(_))));
        assert_eq!(transport.info(Some(InfoField::HttpCode)), 0);
    }

    #[tokio::test]
    async fn test_invalid_header_is_rejected() {
        let mut transport = configured("http://127.0.0.1:1/".to_string(), HttpMethod::Get);
        transport.set_option(TransportOption::HttpHeader(vec![(
            "Bad Header".to_string(),
            "x".to_string(),
        )]));
        assert!(matches!(
            transport.execute().await,
            Err(TransportError::InvalidHeader { .. })
        ));
    }
}
