//! Request engine and transport layer for the THG Hosting API.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`ThgHostingClient`]: holds credentials and drives every request
//! - [`ApiRequest`]: a request to be sent to the API
//! - [`ApiResponse`]: the normalized `{data, info}` result
//! - [`HttpMethod`]: the five accepted methods
//! - [`HttpTransport`]: the pluggable single-exchange transport
//! - [`ReqwestTransport`] / [`MockTransport`]: production and test transports
//! - [`Attachment`]: an inline base64 file attachment
//!
//! # Example
//!
//! ```rust,ignore
//! use thg_hosting::clients::{ApiRequest, HttpMethod, ThgHostingClient};
//!
//! let client = ThgHostingClient::new("my-token", None, None)?;
//!
//! let request = ApiRequest::builder(HttpMethod::Get, "billing/invoices")
//!     .argument("offset", 0)
//!     .argument("limit", 25)
//!     .build()?;
//!
//! let response = client.request(request).await?;
//! println!("{:?}", response.info["http_code"]);
//! ```
//!
//! # Request encoding
//!
//! GET requests with arguments carry them in the query string. Every other
//! request (and a GET without arguments) carries a JSON body with a matching
//! `Content-Length` header. Nothing is retried.

mod attachments;
mod errors;
mod http_client;
mod http_request;
mod http_response;
mod transport;

pub use attachments::{normalize, Attachment, AttachmentRecord, FileInput, ATTACHMENTS_KEY};
pub use errors::{AttachmentField, ClientError, TransportError};
pub use http_client::{PreparedRequest, ThgHostingClient, API_TOKEN_HEADER};
pub use http_request::{
    build_query, ApiRequest, ApiRequestBuilder, Arguments, HttpMethod, CONTENT_JSON,
};
pub use http_response::{ApiResponse, ResponseData};
pub use transport::{
    HttpTransport, InfoField, MockHandle, MockResponse, MockTransport, RecordedExchange,
    ReqwestTransport, ResponseBody, TransportInfo, TransportOption,
};
