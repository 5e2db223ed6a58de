//! In-memory transport for exercising the client without network I/O.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use super::{HttpTransport, InfoField, ResponseBody, TransportInfo, TransportOption};
use crate::clients::errors::TransportError;
use crate::clients::http_request::HttpMethod;

/// A scripted outcome for one [`MockTransport`] exchange.
#[derive(Clone, Debug)]
pub struct MockResponse {
    body: Result<ResponseBody, String>,
    info: TransportInfo,
}

impl MockResponse {
    /// A 200 response with a text body.
    #[must_use]
    pub fn text(body: impl Into<String>) -> Self {
        Self {
            body: Ok(ResponseBody::Text(body.into())),
            info: TransportInfo {
                http_code: 200,
                ..TransportInfo::default()
            },
        }
    }

    /// A 200 response whose body is the serialized JSON value.
    #[must_use]
    pub fn json(value: &Value) -> Self {
        let mut response = Self::text(value.to_string());
        response.info.content_type = Some("application/json".to_string());
        response
    }

    /// A 200 response with a non-UTF-8 body.
    #[must_use]
    pub fn binary(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            body: Ok(ResponseBody::Binary(bytes.into())),
            info: TransportInfo {
                http_code: 200,
                ..TransportInfo::default()
            },
        }
    }

    /// An exchange that fails at the transport level.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            body: Err(message.into()),
            info: TransportInfo::default(),
        }
    }

    /// Sets the HTTP status reported by `info`.
    #[must_use]
    pub const fn with_status(mut self, status: u16) -> Self {
        self.info.http_code = status;
        self
    }
}

/// Options observed by one `execute` call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordedExchange {
    /// Every option applied before `execute`, in order.
    pub options: Vec<TransportOption>,
}

impl RecordedExchange {
    fn last<'a, T>(&'a self, pick: impl Fn(&'a TransportOption) -> Option<T>) -> Option<T> {
        self.options.iter().rev().find_map(pick)
    }

    /// The configured URL.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.last(|option| match option {
            TransportOption::Url(url) => Some(url.as_str()),
            _ => None,
        })
    }

    /// The configured method.
    #[must_use]
    pub fn method(&self) -> Option<HttpMethod> {
        self.last(|option| match option {
            TransportOption::CustomRequest(method) => Some(*method),
            _ => None,
        })
    }

    /// The configured body.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.last(|option| match option {
            TransportOption::PostFields(body) => Some(body.as_str()),
            _ => None,
        })
    }

    /// The body parsed as JSON.
    #[must_use]
    pub fn json_body(&self) -> Option<Value> {
        self.body().and_then(|body| serde_json::from_str(body).ok())
    }

    /// The configured headers.
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        self.last(|option| match option {
            TransportOption::HttpHeader(headers) => Some(headers.as_slice()),
            _ => None,
        })
        .unwrap_or_default()
    }

    /// Value of one header, matched case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers()
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// The configured timeout.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.last(|option| match option {
            TransportOption::Timeout(timeout) => Some(*timeout),
            _ => None,
        })
    }

    /// Whether redirect following was enabled.
    #[must_use]
    pub fn follow_location(&self) -> bool {
        self.last(|option| match option {
            TransportOption::FollowLocation(flag) => Some(*flag),
            _ => None,
        })
        .unwrap_or(false)
    }

    /// Whether return-buffering was enabled.
    #[must_use]
    pub fn return_transfer(&self) -> bool {
        self.last(|option| match option {
            TransportOption::ReturnTransfer(flag) => Some(*flag),
            _ => None,
        })
        .unwrap_or(false)
    }
}

#[derive(Debug, Default)]
struct MockState {
    responses: VecDeque<MockResponse>,
    default_response: Option<MockResponse>,
    pending: Vec<TransportOption>,
    exchanges: Vec<RecordedExchange>,
    info: TransportInfo,
    close_count: usize,
}

/// Shared view of a [`MockTransport`]'s recorded activity.
///
/// Obtain one with [`MockTransport::handle`] before handing the transport to
/// a client.
#[derive(Clone, Debug, Default)]
pub struct MockHandle {
    state: Arc<Mutex<MockState>>,
}

impl MockHandle {
    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queues a response for the next exchange.
    pub fn push_response(&self, response: MockResponse) {
        self.lock().responses.push_back(response);
    }

    /// All exchanges executed so far.
    #[must_use]
    pub fn exchanges(&self) -> Vec<RecordedExchange> {
        self.lock().exchanges.clone()
    }

    /// The most recent exchange.
    #[must_use]
    pub fn last_exchange(&self) -> Option<RecordedExchange> {
        self.lock().exchanges.last().cloned()
    }

    /// Number of `execute` calls.
    #[must_use]
    pub fn execute_count(&self) -> usize {
        self.lock().exchanges.len()
    }

    /// Number of `close` calls.
    #[must_use]
    pub fn close_count(&self) -> usize {
        self.lock().close_count
    }

    /// Options applied since the last `close`.
    #[must_use]
    pub fn pending_options(&self) -> Vec<TransportOption> {
        self.lock().pending.clone()
    }
}

/// Scripted [`HttpTransport`] that records every option and exchange.
///
/// Responses are served from a queue, then from the default response, then
/// as an empty `{}` body. `close` resets the pending options so the same
/// instance behaves like a fresh one on the next call.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use thg_hosting::clients::{MockResponse, MockTransport};
///
/// let transport = MockTransport::new().with_response(MockResponse::json(&json!({"data": []})));
/// let handle = transport.handle();
/// assert_eq!(handle.execute_count(), 0);
/// ```
#[derive(Debug, Default)]
pub struct MockTransport {
    handle: MockHandle,
}

impl MockTransport {
    /// Creates a mock with no scripted responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response.
    #[must_use]
    pub fn with_response(self, response: MockResponse) -> Self {
        self.handle.push_response(response);
        self
    }

    /// Sets the response served once the queue is empty.
    #[must_use]
    pub fn with_default_response(self, response: MockResponse) -> Self {
        self.handle.lock().default_response = Some(response);
        self
    }

    /// Returns a handle sharing this transport's recorded state.
    #[must_use]
    pub fn handle(&self) -> MockHandle {
        self.handle.clone()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    fn apply(&mut self, option: TransportOption) {
        self.handle.lock().pending.push(option);
    }

    async fn execute(&mut self) -> Result<ResponseBody, TransportError> {
        let body = {
            let mut state = self.handle.lock();
            let exchange = RecordedExchange {
                options: state.pending.clone(),
            };
            let response = state
                .responses
                .pop_front()
                .or_else(|| state.default_response.clone())
                .unwrap_or_else(|| MockResponse::text("{}"));

            let mut info = response.info;
            if let Some(url) = exchange.url() {
                info.effective_url = url.to_string();
            }
            if let Ok(ResponseBody::Text(text)) = &response.body {
                info.size_download = text.len() as u64;
            }
            state.info = info;
            state.exchanges.push(exchange);
            response.body
        };

        body.map_err(TransportError::Other)
    }

    fn info(&self, field: Option<InfoField>) -> Value {
        self.handle.lock().info.get(field)
    }

    fn close(&mut self) {
        let mut state = self.handle.lock();
        state.pending.clear();
        state.close_count += 1;
    }
}
