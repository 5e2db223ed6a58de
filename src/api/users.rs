//! Account user endpoints.

use serde::Serialize;

use crate::api::to_arguments;
use crate::clients::{ApiResponse, Arguments, ClientError, ThgHostingClient};

/// A user to invite with [`ThgHostingClient::add_user`].
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct NewUser {
    /// Address the invitation is sent to.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Roles granted to the user.
    pub roles: Vec<String>,
    /// Sent as the string `"1"` or `"0"`.
    #[serde(serialize_with = "serialize_two_fa")]
    pub two_fa_required: bool,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn serialize_two_fa<S: serde::Serializer>(required: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(if *required { "1" } else { "0" })
}

impl ThgHostingClient {
    /// Lists the account's users.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn get_user_list(&self) -> Result<ApiResponse, ClientError> {
        self.get("user", Arguments::new()).await
    }

    /// Lists the roles a user can be given.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn get_user_roles(&self) -> Result<ApiResponse, ClientError> {
        self.get("user/roles", Arguments::new()).await
    }

    /// Returns the user owning the API token.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn get_user(&self) -> Result<ApiResponse, ClientError> {
        self.get("user/details", Arguments::new()).await
    }

    /// Invites a user to the account.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn add_user(&self, user: &NewUser) -> Result<ApiResponse, ClientError> {
        self.post("user", to_arguments(user)?).await
    }
}
