//! Typed wrappers for the THG Hosting API endpoints.
//!
//! Each resource group adds methods to [`ThgHostingClient`]; every method
//! shapes its arguments, drops absent optionals and delegates to
//! [`ThgHostingClient::request`]. All wrappers return the raw
//! [`ApiResponse`](crate::clients::ApiResponse) envelope.
//!
//! | Group | Module |
//! |-------|--------|
//! | SSD VPS | [`ssd_vps`] |
//! | Billing | [`billing`] |
//! | DNS zones | [`dns`] |
//! | Dedicated servers | [`servers`] |
//! | Support tickets | [`tickets`] |
//! | Orders | [`orders`] |
//! | Users | [`users`] |
//! | SSL certificates | [`ssl`] |
//! | Microsoft licenses | [`licenses`] |
//! | SSH keys | [`ssh_keys`] |
//!
//! # Example
//!
//! ```rust,ignore
//! use thg_hosting::api::DnsRecord;
//! use thg_hosting::ThgHostingClient;
//!
//! let client = ThgHostingClient::new("my-token", None, None)?;
//! let record = DnsRecord::new("www", "10.0.0.1", 3600);
//! let response = client.add_record_to_dns_zone(12, "A", &record).await?;
//! ```
//!
//! [`ThgHostingClient`]: crate::clients::ThgHostingClient
//! [`ThgHostingClient::request`]: crate::clients::ThgHostingClient::request

pub mod billing;
pub mod dns;
pub mod licenses;
pub mod orders;
pub mod servers;
pub mod ssd_vps;
pub mod ssh_keys;
pub mod ssl;
pub mod tickets;
pub mod users;

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::clients::{Arguments, ClientError};

pub use billing::{BillingServicesQuery, ServiceUpgrade};
pub use dns::DnsRecord;
pub use ssd_vps::NewSsdVpsServer;
pub use tickets::NewTicket;
pub use users::NewUser;

/// Serializes a parameter struct into request arguments.
///
/// Fields skipped by serde are absent from the result.
pub(crate) fn to_arguments<T: Serialize>(params: &T) -> Result<Arguments, ClientError> {
    match serde_json::to_value(params)? {
        Value::Object(map) => Ok(map),
        _ => Ok(Arguments::new()),
    }
}

/// Serializes an optional flag as `1` / `0`.
#[allow(clippy::trivially_copy_pass_by_ref)]
pub(crate) fn serialize_flag<S: Serializer>(flag: &Option<bool>, serializer: S) -> Result<S::Ok, S::Error> {
    match flag {
        Some(flag) => serializer.serialize_u8(u8::from(*flag)),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::clients::{MockHandle, MockTransport, RecordedExchange, ThgHostingClient};

    pub const BASE: &str = "https://api.example.com/rest-api/";

    pub fn mock_client() -> (ThgHostingClient, MockHandle) {
        let transport = MockTransport::new();
        let handle = transport.handle();
        let mut client = ThgHostingClient::new("test-token", None, Some(BASE)).unwrap();
        client.set_transport(transport);
        (client, handle)
    }

    pub fn url(path: &str) -> String {
        format!("{BASE}{path}")
    }

    pub fn last(handle: &MockHandle) -> RecordedExchange {
        handle.last_exchange().expect("no exchange recorded")
    }
}
