//! Support ticket endpoints.

use serde::Serialize;

use crate::api::to_arguments;
use crate::clients::{ApiRequest, ApiResponse, Arguments, ClientError, FileInput, HttpMethod, ThgHostingClient};

const TICKETS_ENDPOINT: &str = "tickets/";

/// A new support ticket for [`ThgHostingClient::create_ticket`].
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct NewTicket {
    /// Message text of the ticket.
    pub body: String,
    /// Ticket subject line.
    pub subject: String,
    /// Department the ticket is filed under.
    pub department: u64,
    /// Ticket priority.
    pub priority: u32,
}

impl NewTicket {
    /// Creates a ticket in the default department with priority 0.
    #[must_use]
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            subject: subject.into(),
            ..Self::default()
        }
    }

    /// Files the ticket under another department.
    #[must_use]
    pub const fn department(mut self, department: u64) -> Self {
        self.department = department;
        self
    }

    /// Sets the ticket priority.
    #[must_use]
    pub const fn priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }
}

impl ThgHostingClient {
    /// Lists support tickets.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn get_tickets(&self) -> Result<ApiResponse, ClientError> {
        self.get(TICKETS_ENDPOINT, Arguments::new()).await
    }

    /// Opens a ticket, attaching `attachments` inline.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingField`] or
    /// [`ClientError::InvalidAttachment`] if an attachment cannot be read;
    /// otherwise see [`ThgHostingClient::request`].
    pub async fn create_ticket(
        &self,
        ticket: &NewTicket,
        attachments: Vec<FileInput>,
    ) -> Result<ApiResponse, ClientError> {
        let request = ApiRequest::builder(HttpMethod::Post, TICKETS_ENDPOINT)
            .arguments(to_arguments(ticket)?)
            .files(attachments)
            .build()?;
        self.request(request).await
    }

    /// Lists the departments a ticket can be filed under.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn get_ticket_departments(&self) -> Result<ApiResponse, ClientError> {
        self.get(&format!("{TICKETS_ENDPOINT}queues"), Arguments::new())
            .await
    }

    /// Returns a ticket with its replies.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn get_ticket_details(&self, ticket_id: u64) -> Result<ApiResponse, ClientError> {
        self.get(&format!("{TICKETS_ENDPOINT}{ticket_id}"), Arguments::new())
            .await
    }

    /// Changes a ticket's priority, closing it when `close` is set.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn update_ticket(&self, ticket_id: u64, priority: u32, close: bool) -> Result<ApiResponse, ClientError> {
        let mut arguments = Arguments::new();
        arguments.insert("priority".to_string(), priority.into());
        if close {
            arguments.insert("status".to_string(), "close".into());
        }
        self.put(&format!("{TICKETS_ENDPOINT}{ticket_id}"), arguments)
            .await
    }

    /// Replies to a ticket, attaching `attachments` inline.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingField`] or
    /// [`ClientError::InvalidAttachment`] if an attachment cannot be read;
    /// otherwise see [`ThgHostingClient::request`].
    pub async fn add_reply_to_ticket(
        &self,
        ticket_id: u64,
        body: &str,
        attachments: Vec<FileInput>,
    ) -> Result<ApiResponse, ClientError> {
        let request = ApiRequest::builder(
            HttpMethod::Post,
            format!("{TICKETS_ENDPOINT}{ticket_id}/comments"),
        )
        .argument("body", body)
        .files(attachments)
        .build()?;
        self.request(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::{last, mock_client, url};
    use crate::clients::{AttachmentField, AttachmentRecord};
    use serde_json::json;

    fn record(file: &str, name: &str, mime: &str) -> FileInput {
        AttachmentRecord {
            file: Some(file.to_string()),
            name: Some(name.to_string()),
            mime: Some(mime.to_string()),
        }
        .into()
    }

    #[tokio::test]
    async fn test_create_ticket_with_defaults_and_attachment() {
        let (client, handle) = mock_client();
        let ticket = NewTicket::new("Disk failure", "Drive 2 reports SMART errors");

        client
            .create_ticket(&ticket, vec![record("ZGF0YQ==", "smart.log", "text/plain")])
            .await
            .unwrap();

        let exchange = last(&handle);
        assert_eq!(exchange.url(), Some(url("tickets/").as_str()));
        assert_eq!(
            exchange.json_body(),
            Some(json!({
                "body": "Drive 2 reports SMART errors",
                "subject": "Disk failure",
                "department": 0,
                "priority": 0,
                "attachments": [{"file": "ZGF0YQ==", "mime": "text/plain", "name": "smart.log"}]
            }))
        );
    }

    #[tokio::test]
    async fn test_create_ticket_with_incomplete_attachment_sends_nothing() {
        let (client, handle) = mock_client();
        let attachment = AttachmentRecord {
            file: Some("ZGF0YQ==".to_string()),
            name: None,
            mime: None,
        };

        let result = client
            .create_ticket(&NewTicket::new("s", "b"), vec![attachment.into()])
            .await;

        assert!(matches!(
            result,
            Err(ClientError::MissingField { field: AttachmentField::Name })
        ));
        assert_eq!(handle.execute_count(), 0);
    }

    #[tokio::test]
    async fn test_update_ticket_close_flag() {
        let (client, handle) = mock_client();

        client.update_ticket(8, 2, true).await.unwrap();
        let exchange = last(&handle);
        assert_eq!(exchange.method(), Some(HttpMethod::Put));
        assert_eq!(exchange.url(), Some(url("tickets/8/").as_str()));
        assert_eq!(exchange.json_body(), Some(json!({"priority": 2, "status": "close"})));

        client.update_ticket(8, 1, false).await.unwrap();
        assert_eq!(last(&handle).json_body(), Some(json!({"priority": 1})));
    }

    #[tokio::test]
    async fn test_reply_goes_to_comments() {
        let (client, handle) = mock_client();
        client.add_reply_to_ticket(8, "Thanks!", Vec::new()).await.unwrap();

        let exchange = last(&handle);
        assert_eq!(exchange.url(), Some(url("tickets/8/comments/").as_str()));
        assert_eq!(exchange.json_body(), Some(json!({"body": "Thanks!"})));
    }

    #[tokio::test]
    async fn test_departments_path() {
        let (client, handle) = mock_client();
        client.get_ticket_departments().await.unwrap();
        assert_eq!(last(&handle).url(), Some(url("tickets/queues/").as_str()));
    }
}
