//! Microsoft license endpoints, scoped to a billed service.

use crate::clients::{ApiResponse, Arguments, ClientError, ThgHostingClient};

impl ThgHostingClient {
    /// Lists the Microsoft licenses attached to a service.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn get_microsoft_licenses(&self, service_id: u64) -> Result<ApiResponse, ClientError> {
        self.get(&format!("/services/{service_id}/licenses"), Arguments::new())
            .await
    }

    /// Returns one Microsoft license of a service.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn get_microsoft_license_details(
        &self,
        service_id: u64,
        license_id: u64,
    ) -> Result<ApiResponse, ClientError> {
        self.get(
            &format!("/services/{service_id}/licenses/{license_id}"),
            Arguments::new(),
        )
        .await
    }

    /// Cancels a Microsoft license.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn delete_microsoft_license(
        &self,
        service_id: u64,
        license_id: u64,
    ) -> Result<ApiResponse, ClientError> {
        self.delete(&format!("/services/{service_id}/licenses/{license_id}"))
            .await
    }

    /// Lists the license products that can be added to a service.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn get_microsoft_license_products(&self, service_id: u64) -> Result<ApiResponse, ClientError> {
        self.get(
            &format!("/services/{service_id}/ms-license-products"),
            Arguments::new(),
        )
        .await
    }
}
