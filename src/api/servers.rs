//! Dedicated server endpoints: details, bandwidth, IPMI, power, naming and
//! reverse DNS.

use crate::clients::{ApiResponse, Arguments, ClientError, ThgHostingClient};

impl ThgHostingClient {
    /// Lists dedicated servers.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn get_servers(&self) -> Result<ApiResponse, ClientError> {
        self.get("servers/", Arguments::new()).await
    }

    /// Returns a dedicated server.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn get_server_details(&self, server_id: &str) -> Result<ApiResponse, ClientError> {
        self.get(&format!("servers/{server_id}"), Arguments::new())
            .await
    }

    /// Returns the bandwidth graph, optionally bounded by period dates.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn get_server_bandwidth_graph(
        &self,
        server_id: &str,
        period_start: Option<&str>,
        period_end: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        let mut arguments = Arguments::new();
        if let Some(start) = period_start {
            arguments.insert("period_start".to_string(), start.into());
        }
        if let Some(end) = period_end {
            arguments.insert("period_end".to_string(), end.into());
        }
        self.get(&format!("servers/{server_id}/bandwidth-graph"), arguments)
            .await
    }

    /// Returns a server's IPMI connection details.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn get_server_ipmi_details(&self, server_id: &str) -> Result<ApiResponse, ClientError> {
        self.get(&format!("servers/{server_id}/ipmi"), Arguments::new())
            .await
    }

    /// Creates IPMI credentials for a server.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn create_server_ipmi_credentials(&self, server_id: &str) -> Result<ApiResponse, ClientError> {
        self.post(&format!("servers/{server_id}/ipmi"), Arguments::new())
            .await
    }

    /// Removes a server's IPMI credentials.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn delete_server_ipmi_credentials(&self, server_id: &str) -> Result<ApiResponse, ClientError> {
        self.delete(&format!("servers/{server_id}/ipmi")).await
    }

    /// Returns a server's power state.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn get_server_power_status(&self, server_id: &str) -> Result<ApiResponse, ClientError> {
        self.get(&format!("servers/{server_id}/power/status"), Arguments::new())
            .await
    }

    /// Powers a server on.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn power_on_server(&self, server_id: &str) -> Result<ApiResponse, ClientError> {
        self.post(&format!("servers/{server_id}/power/on"), Arguments::new())
            .await
    }

    /// Powers a server off.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn power_off_server(&self, server_id: &str) -> Result<ApiResponse, ClientError> {
        self.post(&format!("servers/{server_id}/power/off"), Arguments::new())
            .await
    }

    /// Reboots a server.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn reboot_server(&self, server_id: &str) -> Result<ApiResponse, ClientError> {
        self.post(&format!("servers/{server_id}/power/reboot"), Arguments::new())
            .await
    }

    /// Renames a server. `body` is sent as is.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn change_server_friendly_name(
        &self,
        server_id: &str,
        body: Arguments,
    ) -> Result<ApiResponse, ClientError> {
        self.put(&format!("servers/{server_id}/friendly-name"), body)
            .await
    }

    /// Sets the reverse DNS entry of one of the server's addresses. `body` is
    /// sent as is.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn set_rdns_entry_for_ip_address(
        &self,
        server_id: &str,
        ip_address: &str,
        body: Arguments,
    ) -> Result<ApiResponse, ClientError> {
        self.put(
            &format!("servers/{server_id}/ip-addresses/{ip_address}/rdns"),
            body,
        )
        .await
    }

    /// Lists servers available for immediate order.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn get_server_inventory(&self) -> Result<ApiResponse, ClientError> {
        self.get("server-orders/inventory", Arguments::new()).await
    }
}
