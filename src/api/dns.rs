//! DNS zone and record endpoints.

use serde::Serialize;

use crate::api::to_arguments;
use crate::clients::{ApiResponse, Arguments, ClientError, ThgHostingClient};

/// A DNS record as sent to the add and update endpoints.
///
/// `service`, `protocol`, `port` and `weight` apply to SRV records,
/// `mx_priority` to MX records.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct DnsRecord {
    /// Record name, relative to the zone.
    pub host: String,
    /// Record value, such as an address or target.
    pub content: String,
    /// Time to live, in seconds.
    pub ttl: u32,
    /// SRV service name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    /// SRV protocol.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    /// SRV target port.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// SRV weight.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
    /// MX priority.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mx_priority: Option<u32>,
}

impl DnsRecord {
    /// Creates a record with the fields every type needs.
    #[must_use]
    pub fn new(host: impl Into<String>, content: impl Into<String>, ttl: u32) -> Self {
        Self {
            host: host.into(),
            content: content.into(),
            ttl,
            ..Self::default()
        }
    }

    /// Sets the SRV service name.
    #[must_use]
    pub fn service(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }

    /// Sets the SRV protocol.
    #[must_use]
    pub fn protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = Some(protocol.into());
        self
    }

    /// Sets the SRV port.
    #[must_use]
    pub const fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Sets the SRV weight.
    #[must_use]
    pub const fn weight(mut self, weight: u32) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Sets the MX priority.
    #[must_use]
    pub const fn mx_priority(mut self, priority: u32) -> Self {
        self.mx_priority = Some(priority);
        self
    }
}

impl ThgHostingClient {
    /// Lists DNS zones.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn get_dns_zones(&self) -> Result<ApiResponse, ClientError> {
        self.get("dns-zones", Arguments::new()).await
    }

    /// Creates a zone for `domain_name` pointing at `ip`.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn create_dns_zone(&self, domain_name: &str, ip: &str) -> Result<ApiResponse, ClientError> {
        let mut arguments = Arguments::new();
        arguments.insert("domain_name".to_string(), domain_name.into());
        arguments.insert("ip".to_string(), ip.into());
        self.post("dns-zones", arguments).await
    }

    /// Returns a DNS zone with its records.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn get_dns_zone_details(&self, zone_id: u64) -> Result<ApiResponse, ClientError> {
        self.get(&format!("dns-zones/{zone_id}"), Arguments::new())
            .await
    }

    /// Deletes a DNS zone.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn delete_dns_zone(&self, zone_id: u64) -> Result<ApiResponse, ClientError> {
        self.delete(&format!("dns-zones/{zone_id}")).await
    }

    /// Adds a record of `record_type` (A, AAAA, CNAME, MX, SRV, ...) to a
    /// zone. The protocol is sent lower-cased.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn add_record_to_dns_zone(
        &self,
        zone_id: u64,
        record_type: &str,
        record: &DnsRecord,
    ) -> Result<ApiResponse, ClientError> {
        let mut arguments = Arguments::new();
        arguments.insert("type".to_string(), record_type.into());
        arguments.extend(to_arguments(record)?);
        if let Some(protocol) = &record.protocol {
            arguments.insert("protocol".to_string(), protocol.to_lowercase().into());
        }
        self.post(&format!("dns-zones/{zone_id}/records"), arguments)
            .await
    }

    /// Replaces an existing record. The protocol is sent as given.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn update_dns_zone_record(
        &self,
        zone_id: u64,
        record_id: u64,
        record: &DnsRecord,
    ) -> Result<ApiResponse, ClientError> {
        self.put(
            &format!("dns-zones/{zone_id}/records/{record_id}"),
            to_arguments(record)?,
        )
        .await
    }

    /// Deletes a record from a DNS zone.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn delete_dns_zone_record(&self, zone_id: u64, record_id: u64) -> Result<ApiResponse, ClientError> {
        self.delete(&format!("dns-zones/{zone_id}/records/{record_id}"))
            .await
    }
}
