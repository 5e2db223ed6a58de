//! Error types for the request engine and transport layer.
//!
//! # Error Handling
//!
//! - [`ClientError`]: everything [`ThgHostingClient::request`](crate::ThgHostingClient::request)
//!   can fail with
//! - [`AttachmentField`]: which key an attachment record is missing
//! - [`TransportError`]: failures of a single HTTP exchange, passed through
//!   untranslated
//!
//! Local failures (bad method, bad attachment, bad timeout) are raised before
//! any network I/O and carry the provider-style status code returned by
//! [`ClientError::code`].
//!
//! # Example
//!
//! ```rust,ignore
//! use thg_hosting::{ClientError, ThgHostingClient};
//!
//! match client.request(request).await {
//!     Ok(response) => println!("{:?}", response.data),
//!     Err(ClientError::InvalidMethod { method }) => println!("bad verb {method}"),
//!     Err(ClientError::Transport(e)) => println!("network failure: {e}"),
//!     Err(e) => println!("code {:?}: {e}", e.code()),
//! }
//! ```

use std::fmt;

use thiserror::Error;

use crate::clients::http_request::HttpMethod;
use crate::error::ConfigError;

/// A required key of a pre-encoded attachment record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttachmentField {
    /// The base64-encoded file content.
    File,
    /// The file name.
    Name,
    /// The MIME type.
    Mime,
}

impl AttachmentField {
    /// Returns the record key for this field.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Name => "name",
            Self::Mime => "mime",
        }
    }
}

impl fmt::Display for AttachmentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::File => "File encoded into base64 was not found",
            Self::Name => "Name of the file was not found",
            Self::Mime => "Mime type of file was not found",
        };
        f.write_str(message)
    }
}

/// Errors returned by [`ThgHostingClient`](crate::ThgHostingClient).
#[derive(Debug, Error)]
pub enum ClientError {
    /// The HTTP method is not one of GET, POST, DELETE, PUT, PATCH.
    #[error("Not allowed method used: '{method}'. Allowed: {}", HttpMethod::allowed())]
    InvalidMethod {
        /// The rejected method, as given by the caller.
        method: String,
    },

    /// A pre-encoded attachment record lacks a required key.
    #[error("{field}")]
    MissingField {
        /// The first missing key, checked in `file`, `name`, `mime` order.
        field: AttachmentField,
    },

    /// An attachment is neither a readable file path nor a record.
    #[error("Passed file wasn't a path or a stream, couldn't be sent - cancelling request. {reason}")]
    InvalidAttachment {
        /// Why the attachment was rejected.
        reason: String,
    },

    /// A negative timeout was supplied.
    #[error("Timeout can't be lower than zero (got {timeout}).")]
    InvalidTimeout {
        /// The rejected timeout, in seconds.
        timeout: i64,
    },

    /// The client configuration is invalid.
    ///
    /// A negative timeout is reported as [`InvalidTimeout`](Self::InvalidTimeout)
    /// instead, whichever way it was supplied.
    #[error(transparent)]
    Config(ConfigError),

    /// The request arguments could not be encoded as JSON.
    #[error("Failed to encode request arguments: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The HTTP exchange itself failed.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl From<ConfigError> for ClientError {
    fn from(error: ConfigError) -> Self {
        match error {
            ConfigError::InvalidTimeout { timeout } => Self::InvalidTimeout { timeout },
            other => Self::Config(other),
        }
    }
}

impl ClientError {
    /// Returns the provider-style status code for local failures.
    ///
    /// Transport and serialization failures have no such code and return
    /// `None`.
    #[must_use]
    pub const fn code(&self) -> Option<u16> {
        match self {
            Self::InvalidMethod { .. } => Some(405),
            Self::MissingField { .. } => Some(404),
            Self::InvalidAttachment { .. } | Self::InvalidTimeout { .. } | Self::Config(_) => {
                Some(400)
            }
            Self::Serialization(_) | Self::Transport(_) => None,
        }
    }
}

/// Errors raised by an [`HttpTransport`](crate::clients::HttpTransport).
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network, TLS, or timeout failure reported by the HTTP stack.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The configured URL could not be parsed.
    #[error("Invalid request URL: {url}")]
    InvalidUrl {
        /// The rejected URL.
        url: String,
    },

    /// A configured header name or value is not valid HTTP.
    #[error("Invalid header: {name}")]
    InvalidHeader {
        /// The header name.
        name: String,
    },

    /// `execute` was called before a required option was set.
    #[error("Transport option {option} must be set before execute")]
    MissingOption {
        /// The missing option.
        option: &'static str,
    },

    /// A scripted failure from a test transport.
    #[error("{0}")]
    Other(String),
}
