//! Validated newtype wrappers for configuration values.
//!
//! These wrappers validate their contents on construction so that a
//! [`ClientConfig`](super::ClientConfig) can never hold an empty token or a
//! malformed base URL.

use crate::error::ConfigError;
use std::fmt;

/// A validated THG Hosting API token, sent as the `X-Api-Token` header.
///
/// # Security
///
/// The `Debug` implementation masks the value, displaying only
/// `ApiToken(*****)`, so the token cannot leak through debug logging of a
/// client or configuration.
///
/// # Example
///
/// ```rust
/// use thg_hosting::ApiToken;
///
/// let token = ApiToken::new("my-token").unwrap();
/// assert_eq!(token.as_ref(), "my-token");
/// assert_eq!(format!("{:?}", token), "ApiToken(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    /// Creates a new validated API token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiToken`] if the token is empty or
    /// whitespace only.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ConfigError::EmptyApiToken);
        }
        Ok(Self(token))
    }
}

impl AsRef<str> for ApiToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(*****)")
    }
}

/// A validated API base URL.
///
/// The stored URL always ends with exactly one `/`, so endpoint paths can be
/// appended directly.
///
/// # Example
///
/// ```rust
/// use thg_hosting::BaseUrl;
///
/// let url = BaseUrl::new("https://api.example.com/rest-api").unwrap();
/// assert_eq!(url.as_ref(), "https://api.example.com/rest-api/");
/// assert_eq!(url.scheme(), "https");
/// assert_eq!(url.host_name(), "api.example.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl BaseUrl {
    /// Production endpoint of the THG Hosting REST API.
    pub const DEFAULT: &'static str = "https://api.ingenuitycloudservices.com/rest-api/";

    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL has no `http`/`https`
    /// scheme or no host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = url.into();
        let invalid = || ConfigError::InvalidBaseUrl { url: raw.clone() };

        let trimmed = raw.trim();
        let scheme_end = trimmed.find("://").ok_or_else(invalid)?;
        let scheme = &trimmed[..scheme_end];
        if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
            return Err(invalid());
        }

        let host_start = scheme_end + 3;
        let remainder = &trimmed[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(trimmed.len(), |i| host_start + i);
        if host_end == host_start {
            return Err(invalid());
        }
        if trimmed[host_end..].contains(['?', '#']) {
            return Err(invalid());
        }

        let url = format!("{}/", trimmed.trim_end_matches('/'));

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }

    /// Joins an endpoint onto this base URL.
    ///
    /// Leading and trailing slashes of `endpoint` are trimmed and exactly one
    /// trailing slash is appended, which is the convention of the remote API.
    #[must_use]
    pub fn join(&self, endpoint: &str) -> String {
        let endpoint = endpoint.trim_matches('/');
        if endpoint.is_empty() {
            return self.url.clone();
        }
        format!("{}{endpoint}/", self.url)
    }
}

impl Default for BaseUrl {
    fn default() -> Self {
        Self {
            url: Self::DEFAULT.to_string(),
            scheme_end: 5,
            host_start: 8,
            host_end: 8 + "api.ingenuitycloudservices.com".len(),
        }
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}
