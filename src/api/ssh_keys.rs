//! SSH key endpoints.

use crate::clients::{ApiResponse, Arguments, ClientError, ThgHostingClient};

impl ThgHostingClient {
    /// Lists stored SSH keys.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn list_ssh_keys(&self) -> Result<ApiResponse, ClientError> {
        self.get("/ssh-keys", Arguments::new()).await
    }

    /// Stores a public key under `label`.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn create_ssh_key(&self, public_key: &str, label: &str) -> Result<ApiResponse, ClientError> {
        let mut arguments = Arguments::new();
        arguments.insert("public_key".to_string(), public_key.into());
        arguments.insert("label".to_string(), label.into());
        self.post("/ssh-keys", arguments).await
    }

    /// Renames a stored SSH key.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn update_ssh_key_label(&self, ssh_key_id: u64, label: &str) -> Result<ApiResponse, ClientError> {
        let mut arguments = Arguments::new();
        arguments.insert("label".to_string(), label.into());
        self.put(&format!("/ssh-keys/{ssh_key_id}"), arguments).await
    }

    /// Deletes a stored SSH key.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn delete_ssh_key(&self, ssh_key_id: u64) -> Result<ApiResponse, ClientError> {
        self.delete(&format!("/ssh-keys/{ssh_key_id}")).await
    }

    /// Returns one stored SSH key.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn get_ssh_key_by_id(&self, ssh_key_id: u64) -> Result<ApiResponse, ClientError> {
        self.get(&format!("/ssh-keys/{ssh_key_id}"), Arguments::new())
            .await
    }
}
