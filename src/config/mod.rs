//! Configuration types for the THG Hosting API client.
//!
//! # Overview
//!
//! - [`ClientConfig`]: settings used to construct a
//!   [`ThgHostingClient`](crate::ThgHostingClient)
//! - [`ClientConfigBuilder`]: a builder for [`ClientConfig`]
//! - [`ApiToken`]: a validated API token with masked debug output
//! - [`BaseUrl`]: a validated API base URL
//!
//! Configuration is always passed explicitly; switching between production
//! and a staging gateway is done by building a config with a different
//! [`BaseUrl`].
//!
//! # Example
//!
//! ```rust
//! use thg_hosting::{ApiToken, BaseUrl, ClientConfig};
//!
//! let config = ClientConfig::builder()
//!     .api_token(ApiToken::new("my-token").unwrap())
//!     .base_url(BaseUrl::new("https://staging.example.com/rest-api/").unwrap())
//!     .timeout(30)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.timeout(), 30);
//! ```

mod newtypes;

pub use newtypes::{ApiToken, BaseUrl};

use crate::error::ConfigError;

/// Default request timeout, in seconds.
pub const DEFAULT_TIMEOUT: u64 = 60;

/// Configuration for a [`ThgHostingClient`](crate::ThgHostingClient).
#[derive(Clone, Debug)]
pub struct ClientConfig {
    api_token: ApiToken,
    base_url: BaseUrl,
    timeout: u64,
}

impl ClientConfig {
    /// Creates a new builder for constructing a `ClientConfig`.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Returns the API token.
    #[must_use]
    pub const fn api_token(&self) -> &ApiToken {
        &self.api_token
    }

    /// Returns the API base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the default request timeout, in seconds.
    #[must_use]
    pub const fn timeout(&self) -> u64 {
        self.timeout
    }
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientConfig>();
};

/// Builder for [`ClientConfig`].
///
/// `api_token` is required. Defaults: [`BaseUrl::DEFAULT`] and a
/// [`DEFAULT_TIMEOUT`] of 60 seconds.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    api_token: Option<ApiToken>,
    base_url: Option<BaseUrl>,
    timeout: Option<i64>,
}

impl ClientConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API token (required).
    #[must_use]
    pub fn api_token(mut self, token: ApiToken) -> Self {
        self.api_token = Some(token);
        self
    }

    /// Sets the API base URL.
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the default request timeout, in seconds.
    ///
    /// Negative values are rejected by [`build`](Self::build).
    #[must_use]
    pub const fn timeout(mut self, seconds: i64) -> Self {
        self.timeout = Some(seconds);
        self
    }

    /// Builds the [`ClientConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `api_token` is not set,
    /// or [`ConfigError::InvalidTimeout`] if the timeout is negative.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let api_token = self
            .api_token
            .ok_or(ConfigError::MissingRequiredField { field: "api_token" })?;

        let timeout = match self.timeout {
            Some(seconds) => u64::try_from(seconds)
                .map_err(|_| ConfigError::InvalidTimeout { timeout: seconds })?,
            None => DEFAULT_TIMEOUT,
        };

        Ok(ClientConfig {
            api_token,
            base_url: self.base_url.unwrap_or_default(),
            timeout,
        })
    }
}
