//! Billing endpoints: services, invoices and upgrades.

use serde::Serialize;
use serde_json::Value;

use crate::api::{serialize_flag, to_arguments};
use crate::clients::{ApiResponse, Arguments, ClientError, ThgHostingClient};

/// Filters for [`ThgHostingClient::get_billing_services`].
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct BillingServicesQuery {
    /// Include add-on services.
    #[serde(serialize_with = "serialize_flag", skip_serializing_if = "Option::is_none")]
    pub show_add_ons: Option<bool>,
    /// Field to sort by.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    /// Sort direction, `asc` or `desc`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    /// Number of services to skip.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    /// Maximum number of services returned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
}

/// An upgrade order for [`ThgHostingClient::upgrade_service`].
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ServiceUpgrade {
    /// The service being upgraded, sent as `service`.
    #[serde(rename = "service")]
    pub service_id: u64,
    /// Code of the add-on to order.
    pub addon_code: String,
    /// Code of the chosen add-on option.
    pub option_code: String,
    /// Free-form order notes.
    pub details: String,
    /// Number of units ordered.
    pub quantity: u32,
    /// IP count breakdown for IP add-ons.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_count: Option<Value>,
}

impl ServiceUpgrade {
    /// Creates an upgrade of quantity 1 with empty details.
    #[must_use]
    pub fn new(service_id: u64, addon_code: impl Into<String>, option_code: impl Into<String>) -> Self {
        Self {
            service_id,
            addon_code: addon_code.into(),
            option_code: option_code.into(),
            details: String::new(),
            quantity: 1,
            ip_count: None,
        }
    }

    /// Sets the order notes.
    #[must_use]
    pub fn details(mut self, details: impl Into<String>) -> Self {
        self.details = details.into();
        self
    }

    /// Sets the number of units.
    #[must_use]
    pub const fn quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Sets the IP count breakdown, passed through as given.
    #[must_use]
    pub fn ip_count(mut self, ip_count: Value) -> Self {
        self.ip_count = Some(ip_count);
        self
    }
}

impl ThgHostingClient {
    /// Returns the details of one billed service.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn get_service_details(&self, service_id: u64) -> Result<ApiResponse, ClientError> {
        self.get(&format!("billing/services/{service_id}"), Arguments::new())
            .await
    }

    /// Lists billed services.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn get_billing_services(&self, query: &BillingServicesQuery) -> Result<ApiResponse, ClientError> {
        self.get("billing/services", to_arguments(query)?).await
    }

    /// Lists invoices, paginated by `offset` / `limit`.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn get_billing_invoices(
        &self,
        offset: Option<u64>,
        limit: Option<u64>,
    ) -> Result<ApiResponse, ClientError> {
        let mut arguments = Arguments::new();
        if let Some(offset) = offset {
            arguments.insert("offset".to_string(), offset.into());
        }
        if let Some(limit) = limit {
            arguments.insert("limit".to_string(), limit.into());
        }
        self.get("billing/invoices", arguments).await
    }

    /// Lists the upgrades available for a service.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn get_billing_service_upgrades(&self, service_id: u64) -> Result<ApiResponse, ClientError> {
        self.get(
            &format!("billing/services/{service_id}/upgrades"),
            Arguments::new(),
        )
        .await
    }

    /// Orders a service upgrade.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn upgrade_service(&self, upgrade: &ServiceUpgrade) -> Result<ApiResponse, ClientError> {
        self.post("billing/services/upgrade/", to_arguments(upgrade)?)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::{last, mock_client, url};
    use crate::clients::HttpMethod;
    use serde_json::json;

    #[tokio::test]
    async fn test_billing_services_query_string() {
        let (client, handle) = mock_client();
        let query = BillingServicesQuery {
            show_add_ons: Some(true),
            sort_by: Some("name".to_string()),
            direction: Some("asc".to_string()),
            offset: None,
            limit: Some(10),
        };

        client.get_billing_services(&query).await.unwrap();

        let exchange = last(&handle);
        assert_eq!(
            exchange.url(),
            Some(url("billing/services/?show_add_ons=1&sort_by=name&direction=asc&limit=10").as_str())
        );
        assert!(exchange.body().is_none());
    }

    #[tokio::test]
    async fn test_billing_services_without_filters_sends_empty_body() {
        let (client, handle) = mock_client();
        client
            .get_billing_services(&BillingServicesQuery::default())
            .await
            .unwrap();
        assert_eq!(last(&handle).url(), Some(url("billing/services/").as_str()));
    }

    #[tokio::test]
    async fn test_invoices_pagination() {
        let (client, handle) = mock_client();
        client.get_billing_invoices(Some(20), Some(10)).await.unwrap();
        assert_eq!(
            last(&handle).url(),
            Some(url("billing/invoices/?offset=20&limit=10").as_str())
        );
    }

    #[tokio::test]
    async fn test_upgrade_service_defaults() {
        let (client, handle) = mock_client();
        client
            .upgrade_service(&ServiceUpgrade::new(5, "RAM", "RAM_16"))
            .await
            .unwrap();

        let exchange = last(&handle);
        assert_eq!(exchange.method(), Some(HttpMethod::Post));
        assert_eq!(exchange.url(), Some(url("billing/services/upgrade/").as_str()));
        assert_eq!(
            exchange.json_body(),
            Some(json!({
                "service": 5,
                "addon_code": "RAM",
                "option_code": "RAM_16",
                "details": "",
                "quantity": 1
            }))
        );
    }

    #[tokio::test]
    async fn test_upgrade_service_with_ip_count() {
        let (client, handle) = mock_client();
        let upgrade = ServiceUpgrade::new(5, "IP", "IPV4")
            .details("extra block")
            .quantity(2)
            .ip_count(json!({"ipv4": 8}));

        client.upgrade_service(&upgrade).await.unwrap();

        let body = last(&handle).json_body().unwrap();
        assert_eq!(body["quantity"], 2);
        assert_eq!(body["details"], "extra block");
        assert_eq!(body["ip_count"], json!({"ipv4": 8}));
    }
}
