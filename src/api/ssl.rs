//! SSL certificate endpoints.

use crate::clients::{ApiResponse, Arguments, ClientError, ThgHostingClient};

impl ThgHostingClient {
    /// Lists certificates. `collected` restricts the list to certificates
    /// that have been issued and collected.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn get_ssl_certificates(
        &self,
        offset: Option<u64>,
        limit: Option<u64>,
        collected: bool,
    ) -> Result<ApiResponse, ClientError> {
        let mut arguments = Arguments::new();
        if let Some(offset) = offset {
            arguments.insert("offset".to_string(), offset.into());
        }
        if let Some(limit) = limit {
            arguments.insert("limit".to_string(), limit.into());
        }
        if collected {
            arguments.insert("collected".to_string(), "true".into());
        }
        self.get("ssl", arguments).await
    }

    /// Requests a certificate for `domain` from a CSR.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn create_ssl_certificate(&self, domain: &str, csr: &str) -> Result<ApiResponse, ClientError> {
        let mut arguments = Arguments::new();
        arguments.insert("domain".to_string(), domain.into());
        arguments.insert("csr".to_string(), csr.into());
        self.post("ssl", arguments).await
    }

    /// Submits a certificate application with validation contact and server
    /// software.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn apply_ssl_certificate(
        &self,
        domain: &str,
        csr: &str,
        email: &str,
        server_software: u32,
    ) -> Result<ApiResponse, ClientError> {
        let mut arguments = Arguments::new();
        arguments.insert("domain".to_string(), domain.into());
        arguments.insert("csr".to_string(), csr.into());
        arguments.insert("email".to_string(), email.into());
        arguments.insert("serverSoftware".to_string(), server_software.into());
        self.post("ssl/apply", arguments).await
    }

    /// Downloads an issued certificate.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn download_ssl_certificate(&self, certificate_id: u64) -> Result<ApiResponse, ClientError> {
        self.get(&format!("ssl/{certificate_id}/download"), Arguments::new())
            .await
    }
}
