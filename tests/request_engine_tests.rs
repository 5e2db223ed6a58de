//! Integration tests for the request engine.
//!
//! These tests drive [`ThgHostingClient::request`] through the scripted
//! [`MockTransport`] and verify method validation, argument encoding,
//! headers, timeouts, response normalization and transport lifecycle.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use thg_hosting::clients::{
    ApiRequest, Arguments, ClientError, HttpMethod, MockHandle, MockResponse, MockTransport,
    ResponseData, ThgHostingClient,
};

const BASE: &str = "https://api.example.com/rest-api/";

/// Creates a client whose exchanges go to a fresh mock transport.
fn mocked_client(transport: MockTransport) -> (ThgHostingClient, MockHandle) {
    let handle = transport.handle();
    let mut client = ThgHostingClient::new("test-token", None, Some(BASE)).unwrap();
    client.set_transport(transport);
    (client, handle)
}

/// Builds a request without going through builder validation.
fn raw_request(method: &str, endpoint: &str, arguments: Arguments) -> ApiRequest {
    ApiRequest {
        method: method.to_string(),
        endpoint: endpoint.to_string(),
        arguments,
        files: Vec::new(),
        content_type: "application/json".to_string(),
        timeout: None,
    }
}

// ============================================================================
// Method validation
// ============================================================================

#[tokio::test]
async fn test_every_accepted_method_executes_once() {
    let (client, handle) = mocked_client(MockTransport::new());

    for method in HttpMethod::ALL {
        let request = ApiRequest::builder(method, "servers").build().unwrap();
        client.request(request).await.unwrap();
    }

    let methods: Vec<_> = handle
        .exchanges()
        .iter()
        .map(|exchange| exchange.method().unwrap())
        .collect();
    assert_eq!(methods, HttpMethod::ALL);
    assert_eq!(handle.close_count(), HttpMethod::ALL.len());
}

#[tokio::test]
async fn test_rejected_methods_never_reach_transport() {
    let (client, handle) = mocked_client(MockTransport::new());

    for method in ["get", "Post", "OPTIONS", "HEAD", ""] {
        let error = client
            .request(raw_request(method, "servers", Arguments::new()))
            .await
            .unwrap_err();

        assert_eq!(error.code(), Some(405));
        assert!(error.to_string().contains("GET, POST, DELETE, PUT, PATCH"));
        assert!(matches!(error, ClientError::InvalidMethod { method: m } if m == method));
    }

    assert_eq!(handle.execute_count(), 0);
    assert_eq!(handle.close_count(), 0);
}

// ============================================================================
// Encoding
// ============================================================================

#[tokio::test]
async fn test_get_arguments_go_to_query_string() {
    let (client, handle) = mocked_client(MockTransport::new());
    let request = ApiRequest::builder(HttpMethod::Get, "/billing/services/")
        .argument("show_add_ons", 1)
        .argument("sort_by", "next due")
        .build()
        .unwrap();

    client.request(request).await.unwrap();

    let exchange = handle.last_exchange().unwrap();
    assert_eq!(
        exchange.url(),
        Some("https://api.example.com/rest-api/billing/services/?show_add_ons=1&sort_by=next%20due")
    );
    assert_eq!(exchange.body(), None);
    assert_eq!(exchange.header("Content-Length"), None);
}

#[tokio::test]
async fn test_body_methods_send_json_with_length() {
    let (client, handle) = mocked_client(MockTransport::new());
    let request = ApiRequest::builder(HttpMethod::Patch, "tickets/3")
        .argument("priority", 2)
        .build()
        .unwrap();

    client.request(request).await.unwrap();

    let exchange = handle.last_exchange().unwrap();
    assert_eq!(exchange.url(), Some("https://api.example.com/rest-api/tickets/3/"));
    assert_eq!(exchange.body(), Some(r#"{"priority":2}"#));
    assert_eq!(exchange.header("Content-Length"), Some("14"));
}

#[tokio::test]
async fn test_standard_headers_and_options() {
    let (client, handle) = mocked_client(MockTransport::new());
    client.create_ssh_key("ssh-rsa AAAA", "My Key").await.unwrap();

    let exchange = handle.last_exchange().unwrap();
    assert_eq!(exchange.url(), Some("https://api.example.com/rest-api/ssh-keys/"));
    assert_eq!(exchange.method(), Some(HttpMethod::Post));
    assert_eq!(
        exchange.json_body(),
        Some(json!({"public_key": "ssh-rsa AAAA", "label": "My Key"}))
    );
    assert_eq!(exchange.header("X-Api-Token"), Some("test-token"));
    assert_eq!(exchange.header("Content-Type"), Some("application/json"));
    assert_eq!(exchange.header("Accept"), Some("application/json"));
    assert!(exchange.return_transfer());
    assert!(exchange.follow_location());
}

#[tokio::test]
async fn test_custom_content_type_is_forwarded() {
    let (client, handle) = mocked_client(MockTransport::new());
    let request = ApiRequest::builder(HttpMethod::Post, "orders")
        .content_type("application/vnd.api+json")
        .build()
        .unwrap();

    client.request(request).await.unwrap();

    let exchange = handle.last_exchange().unwrap();
    assert_eq!(exchange.header("Content-Type"), Some("application/vnd.api+json"));
}

#[tokio::test]
async fn test_identical_requests_produce_identical_exchanges() {
    let (client, handle) = mocked_client(MockTransport::new());
    let request = ApiRequest::builder(HttpMethod::Post, "dns-zones")
        .argument("domain_name", "example.com")
        .argument("ip", "10.0.0.1")
        .build()
        .unwrap();

    client.request(request.clone()).await.unwrap();
    client.request(request).await.unwrap();

    let exchanges = handle.exchanges();
    assert_eq!(exchanges.len(), 2);
    assert_eq!(exchanges[0], exchanges[1]);
}

// ============================================================================
// Timeouts
// ============================================================================

#[tokio::test]
async fn test_client_timeout_is_applied() {
    let (mut client, handle) = mocked_client(MockTransport::new());
    client.set_timeout(30).unwrap();

    client.get_dns_zones().await.unwrap();
    assert_eq!(
        handle.last_exchange().unwrap().timeout(),
        Some(Duration::from_secs(30))
    );

    client.set_timeout(0).unwrap();
    client.get_dns_zones().await.unwrap();
    assert_eq!(handle.last_exchange().unwrap().timeout(), Some(Duration::ZERO));
}

#[tokio::test]
async fn test_per_request_timeout_overrides_default() {
    let (client, handle) = mocked_client(MockTransport::new());
    let request = ApiRequest::builder(HttpMethod::Get, "ssd-vps/plans")
        .timeout(Duration::from_millis(1500))
        .build()
        .unwrap();

    client.request(request).await.unwrap();

    assert_eq!(
        handle.last_exchange().unwrap().timeout(),
        Some(Duration::from_millis(1500))
    );
    assert_eq!(client.timeout(), 60);
}

#[tokio::test]
async fn test_negative_timeout_is_rejected_without_side_effects() {
    let (mut client, handle) = mocked_client(MockTransport::new());

    let error = client.set_timeout(-5).unwrap_err();
    assert_eq!(error.code(), Some(400));
    assert_eq!(client.timeout(), 60);
    assert_eq!(handle.execute_count(), 0);
}

// ============================================================================
// Response normalization
// ============================================================================

#[tokio::test]
async fn test_json_response_is_decoded() {
    let body = json!({"status_code": 200, "message": "OK", "data": [{"id": 1}]});
    let (client, _handle) = mocked_client(MockTransport::new().with_response(MockResponse::json(&body)));

    let response = client.get_ssd_vps_plans().await.unwrap();

    assert_eq!(response.data, ResponseData::Json(body));
    assert_eq!(response.data.status_code(), Some(200));
    assert_eq!(response.data.message(), Some("OK"));
    assert_eq!(response.http_code(), Some(200));
    assert_eq!(
        response.effective_url(),
        Some("https://api.example.com/rest-api/ssd-vps/plans/")
    );
}

#[tokio::test]
async fn test_non_json_response_is_kept_verbatim() {
    let html = "<html><body>Service Unavailable</body></html>";
    let (client, _handle) =
        mocked_client(MockTransport::new().with_response(MockResponse::text(html).with_status(503)));

    let response = client.get_servers().await.unwrap();

    assert_eq!(response.data.as_text(), Some(html));
    assert_eq!(response.http_code(), Some(503));
    assert!(!response.is_success());
}

#[tokio::test]
async fn test_binary_response_passes_through() {
    let bytes = vec![0x50, 0x4b, 0x03, 0x04, 0xff];
    let (client, _handle) =
        mocked_client(MockTransport::new().with_response(MockResponse::binary(bytes.clone())));

    let response = client.download_ssl_certificate(4).await.unwrap();
    assert_eq!(response.data.as_bytes(), Some(bytes.as_slice()));
}

#[tokio::test]
async fn test_info_exposes_full_metadata() {
    let (client, _handle) = mocked_client(MockTransport::new().with_response(MockResponse::text("{}")));

    let response = client.get_user().await.unwrap();

    for key in ["http_code", "url", "content_type", "total_time", "size_download", "redirect_count"] {
        assert!(response.info.get(key).is_some(), "missing info key {key}");
    }
    assert_eq!(response.info["size_download"], 2);
}

// ============================================================================
// Transport lifecycle
// ============================================================================

#[tokio::test]
async fn test_transport_failure_is_reported_and_transport_closed() {
    let (client, handle) =
        mocked_client(MockTransport::new().with_response(MockResponse::failure("operation timed out")));

    let error = client.get_tickets().await.unwrap_err();

    assert!(matches!(error, ClientError::Transport(_)));
    assert!(error.to_string().contains("operation timed out"));
    assert_eq!(error.code(), None);
    assert_eq!(handle.close_count(), 1);
    assert!(handle.pending_options().is_empty());
}

#[tokio::test]
async fn test_override_transport_is_reused_across_calls() {
    let transport = MockTransport::new()
        .with_response(MockResponse::text("first"))
        .with_response(MockResponse::text("second"));
    let (client, handle) = mocked_client(transport);

    let first = client.get_user_roles().await.unwrap();
    let second = client.get_user_roles().await.unwrap();

    assert_eq!(first.data.as_text(), Some("first"));
    assert_eq!(second.data.as_text(), Some("second"));
    assert_eq!(handle.execute_count(), 2);
    assert_eq!(handle.close_count(), 2);
}

#[tokio::test]
async fn test_concurrent_requests_share_one_client() {
    let (client, handle) = mocked_client(MockTransport::new());
    let client = Arc::new(client);

    let tasks: Vec<_> = (0..8)
        .map(|id| {
            let client = Arc::clone(&client);
            tokio::spawn(async move { client.get_ssh_key_by_id(id).await })
        })
        .collect();

    for task in tasks {
        task.await.unwrap().unwrap();
    }

    assert_eq!(handle.execute_count(), 8);
    for exchange in handle.exchanges() {
        let options = &exchange.options;
        assert_eq!(options.len(), 7, "options leaked between exchanges");
    }
}
