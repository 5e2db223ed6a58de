//! # THG Hosting API Rust Client
//!
//! An async client for the THG Hosting (Ingenuity Cloud Services) REST API:
//! SSD VPS, dedicated servers, DNS, billing, support tickets, orders, users,
//! SSL certificates, Microsoft licenses and SSH keys.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ClientConfig`] and validated newtypes
//!   ([`ApiToken`], [`BaseUrl`])
//! - A single request engine, [`ThgHostingClient::request`], that validates
//!   the method, inlines base64 attachments, encodes arguments and normalizes
//!   every response into `{data, info}`
//! - A pluggable [`HttpTransport`](clients::HttpTransport) with a `reqwest`
//!   implementation and a scripted mock for tests
//! - Typed endpoint wrappers in [`api`]
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use thg_hosting::ThgHostingClient;
//!
//! let client = ThgHostingClient::new("your-api-token", None, None)?;
//!
//! let response = client.create_ssh_key("ssh-rsa AAAA...", "My Key").await?;
//! println!("status: {:?}", response.http_code());
//! println!("body: {:?}", response.data);
//! ```
//!
//! ## Raw Requests
//!
//! Any endpoint can be reached through the engine directly:
//!
//! ```rust,ignore
//! use thg_hosting::{ApiRequest, HttpMethod, ThgHostingClient};
//!
//! let client = ThgHostingClient::new("your-api-token", Some(30), None)?;
//!
//! let request = ApiRequest::builder(HttpMethod::Post, "tickets")
//!     .argument("subject", "Disk failure")
//!     .argument("body", "Drive 2 reports SMART errors")
//!     .file_path("/var/log/smart.log")
//!     .build()?;
//!
//! let response = client.request(request).await?;
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use thg_hosting::{ApiToken, BaseUrl, ClientConfig, ThgHostingClient};
//!
//! let config = ClientConfig::builder()
//!     .api_token(ApiToken::new("your-api-token").unwrap())
//!     .base_url(BaseUrl::new("https://staging.example.com/rest-api").unwrap())
//!     .timeout(30)
//!     .build()
//!     .unwrap();
//!
//! let client = ThgHostingClient::from_config(config);
//! assert_eq!(client.timeout(), 30);
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: configuration is instance-based
//! - **Fail-fast validation**: newtypes and requests validate on construction
//! - **Thread-safe**: the client is `Send + Sync`
//! - **One exchange per call**: no retries, caching or pooling

pub mod api;
pub mod clients;
pub mod config;
pub mod error;

// Re-export public types at crate root for convenience
pub use config::{ApiToken, BaseUrl, ClientConfig, ClientConfigBuilder, DEFAULT_TIMEOUT};
pub use error::ConfigError;

// Re-export engine types
pub use clients::{
    ApiRequest, ApiRequestBuilder, ApiResponse, Arguments, Attachment, AttachmentRecord,
    ClientError, FileInput, HttpMethod, ResponseData, ThgHostingClient, TransportError,
};

// Re-export endpoint parameter types
pub use api::{BillingServicesQuery, DnsRecord, NewSsdVpsServer, NewTicket, NewUser, ServiceUpgrade};
