//! SSD VPS endpoints: plans, locations, servers, power and backups.

use serde::Serialize;

use crate::api::{serialize_flag, to_arguments};
use crate::clients::{ApiResponse, Arguments, ClientError, ThgHostingClient};

/// Parameters for [`ThgHostingClient::create_ssd_vps_server`].
///
/// When both `custom_template_id` and `os_component_code` are set, only the
/// custom template is sent.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct NewSsdVpsServer {
    /// Display label of the server.
    pub label: String,
    /// Hostname configured on the server.
    pub hostname: String,
    /// Initial root password.
    pub password: String,
    /// Plan to provision.
    pub service_plan_id: u64,
    /// Custom template to install from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_template_id: Option<u64>,
    /// Operating system to install.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os_component_code: Option<String>,
    /// Bill by the hour instead of monthly.
    #[serde(serialize_with = "serialize_flag", skip_serializing_if = "Option::is_none")]
    pub bill_hourly: Option<bool>,
    /// Enable automatic backups.
    #[serde(serialize_with = "serialize_flag", skip_serializing_if = "Option::is_none")]
    pub backups: Option<bool>,
}

impl NewSsdVpsServer {
    /// Creates the required part of a server order.
    #[must_use]
    pub fn new(
        label: impl Into<String>,
        hostname: impl Into<String>,
        password: impl Into<String>,
        service_plan_id: u64,
    ) -> Self {
        Self {
            label: label.into(),
            hostname: hostname.into(),
            password: password.into(),
            service_plan_id,
            ..Self::default()
        }
    }

    /// Sets the operating system to install.
    #[must_use]
    pub fn os_component_code(mut self, code: impl Into<String>) -> Self {
        self.os_component_code = Some(code.into());
        self
    }

    /// Installs from a custom template instead of an operating system.
    #[must_use]
    pub const fn custom_template_id(mut self, id: u64) -> Self {
        self.custom_template_id = Some(id);
        self
    }

    /// Chooses hourly billing.
    #[must_use]
    pub const fn bill_hourly(mut self, hourly: bool) -> Self {
        self.bill_hourly = Some(hourly);
        self
    }

    /// Enables or disables automatic backups.
    #[must_use]
    pub const fn backups(mut self, enabled: bool) -> Self {
        self.backups = Some(enabled);
        self
    }

    fn arguments(&self) -> Result<Arguments, ClientError> {
        let mut arguments = to_arguments(self)?;
        if self.custom_template_id.is_some() {
            arguments.remove("os_component_code");
        }
        Ok(arguments)
    }
}

fn server_path(location_id: u64, server_id: u64) -> String {
    format!("ssd-vps/locations/{location_id}/servers/{server_id}")
}

impl ThgHostingClient {
    /// Lists the available SSD VPS plans.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn get_ssd_vps_plans(&self) -> Result<ApiResponse, ClientError> {
        self.get("ssd-vps/plans", Arguments::new()).await
    }

    /// Lists SSD VPS locations.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn get_ssd_vps_locations(&self) -> Result<ApiResponse, ClientError> {
        self.get("ssd-vps/locations", Arguments::new()).await
    }

    /// Lists the custom templates available in a location.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn get_ssd_vps_custom_templates(&self, location_id: u64) -> Result<ApiResponse, ClientError> {
        self.get(
            &format!("ssd-vps/locations/{location_id}/templates/custom"),
            Arguments::new(),
        )
        .await
    }

    /// Orders a new SSD VPS server in a location.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn create_ssd_vps_server(
        &self,
        location_id: u64,
        server: &NewSsdVpsServer,
    ) -> Result<ApiResponse, ClientError> {
        self.post(
            &format!("ssd-vps/locations/{location_id}/servers"),
            server.arguments()?,
        )
        .await
    }

    /// Lists the operating systems available in a location.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn get_ssd_vps_oses(&self, location_id: u64) -> Result<ApiResponse, ClientError> {
        self.get(
            &format!("ssd-vps/locations/{location_id}/operating-systems"),
            Arguments::new(),
        )
        .await
    }

    /// Lists SSD VPS servers, optionally filtered by location.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn get_ssd_vps_servers(&self, location_id: Option<u64>) -> Result<ApiResponse, ClientError> {
        let mut arguments = Arguments::new();
        if let Some(location_id) = location_id {
            arguments.insert("location_id".to_string(), location_id.into());
        }
        self.get("ssd-vps/servers", arguments).await
    }

    /// Returns an SSD VPS server.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn get_ssd_vps_server_details(
        &self,
        location_id: u64,
        server_id: u64,
    ) -> Result<ApiResponse, ClientError> {
        self.get(&server_path(location_id, server_id), Arguments::new())
            .await
    }

    /// Deletes an SSD VPS server.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn delete_ssd_vps_server(
        &self,
        location_id: u64,
        server_id: u64,
    ) -> Result<ApiResponse, ClientError> {
        self.delete(&server_path(location_id, server_id)).await
    }

    /// Returns an SSD VPS server's status.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn get_ssd_vps_server_status(
        &self,
        location_id: u64,
        server_id: u64,
    ) -> Result<ApiResponse, ClientError> {
        self.get(
            &format!("{}/status", server_path(location_id, server_id)),
            Arguments::new(),
        )
        .await
    }

    /// Powers an SSD VPS server on.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn power_on_ssd_vps_server(
        &self,
        location_id: u64,
        server_id: u64,
    ) -> Result<ApiResponse, ClientError> {
        self.ssd_vps_power(location_id, server_id, "on").await
    }

    /// Powers an SSD VPS server off.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn power_off_ssd_vps_server(
        &self,
        location_id: u64,
        server_id: u64,
    ) -> Result<ApiResponse, ClientError> {
        self.ssd_vps_power(location_id, server_id, "off").await
    }

    /// Reboots an SSD VPS server.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn reboot_ssd_vps_server(
        &self,
        location_id: u64,
        server_id: u64,
    ) -> Result<ApiResponse, ClientError> {
        self.ssd_vps_power(location_id, server_id, "reboot").await
    }

    /// Reboots a server into recovery mode.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn reboot_ssd_vps_server_in_recovery_mode(
        &self,
        location_id: u64,
        server_id: u64,
    ) -> Result<ApiResponse, ClientError> {
        self.ssd_vps_power(location_id, server_id, "recovery-reboot")
            .await
    }

    async fn ssd_vps_power(
        &self,
        location_id: u64,
        server_id: u64,
        action: &str,
    ) -> Result<ApiResponse, ClientError> {
        self.post(
            &format!("{}/power/{action}", server_path(location_id, server_id)),
            Arguments::new(),
        )
        .await
    }

    /// Resets the root password. Without `new_password` the provider
    /// generates one.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn reset_ssd_vps_server_password(
        &self,
        location_id: u64,
        server_id: u64,
        new_password: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        let mut arguments = Arguments::new();
        if let Some(password) = new_password {
            arguments.insert("new_password".to_string(), password.into());
        }
        self.post(
            &format!("{}/password-reset", server_path(location_id, server_id)),
            arguments,
        )
        .await
    }

    /// Lists a server's backups.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn get_ssd_vps_server_backups(
        &self,
        location_id: u64,
        server_id: u64,
    ) -> Result<ApiResponse, ClientError> {
        self.get(
            &format!("{}/backups", server_path(location_id, server_id)),
            Arguments::new(),
        )
        .await
    }

    /// Attaches a note to a backup.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn add_ssd_vps_backup_note(
        &self,
        location_id: u64,
        server_id: u64,
        backup_id: u64,
        note: &str,
    ) -> Result<ApiResponse, ClientError> {
        let mut arguments = Arguments::new();
        arguments.insert("note".to_string(), note.into());
        self.post(
            &format!(
                "{}/backups/{backup_id}/note",
                server_path(location_id, server_id)
            ),
            arguments,
        )
        .await
    }

    /// Deletes a backup.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn delete_ssd_vps_backup(
        &self,
        location_id: u64,
        server_id: u64,
        backup_id: u64,
    ) -> Result<ApiResponse, ClientError> {
        self.delete(&format!(
            "{}/backups/{backup_id}",
            server_path(location_id, server_id)
        ))
        .await
    }

    /// Restores a server from a backup.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn restore_ssd_vps_backup(
        &self,
        location_id: u64,
        server_id: u64,
        backup_id: u64,
    ) -> Result<ApiResponse, ClientError> {
        self.post(
            &format!(
                "{}/backups/{backup_id}/restore",
                server_path(location_id, server_id)
            ),
            Arguments::new(),
        )
        .await
    }
}
