//! Integration tests for the Hyperwallet client using wiremock
//!
//! These tests run the full façade against a mocked API server, verifying
//! request shapes (paths, auth, headers, payloads), response wrapping,
//! pagination behavior, and that validation failures never reach the wire.

use hyperwallet::{Client, CollectionSlice, Config, Error};
use serde_json::{json, Value};
use wiremock::matchers::{basic_auth, body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Client wired to a mock server.
fn test_client(server: &MockServer) -> Client {
    let config = Config::with_server("test-user", "test-pass", "prg-1", &server.uri())
        .expect("config should build");
    Client::new(config).expect("client should build")
}

/// A page of user objects with sequential tokens starting at `start`.
fn user_page(start: usize, count: usize) -> Value {
    let data: Vec<Value> = (start..start + count)
        .map(|i| json!({"token": format!("usr-{i}"), "status": "ACTIVATED"}))
        .collect();
    json!({ "data": data })
}

#[tokio::test]
async fn create_user_injects_the_program_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v3/users"))
        .and(body_partial_json(json!({
            "profileType": "INDIVIDUAL",
            "programToken": "prg-1"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "token": "usr-new",
            "profileType": "INDIVIDUAL"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let user = client
        .create_user(json!({"profileType": "INDIVIDUAL"}))
        .await
        .expect("create should succeed");

    assert_eq!(user.token(), Some("usr-new"));
}

#[tokio::test]
async fn create_user_keeps_a_caller_supplied_program_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v3/users"))
        .and(body_partial_json(json!({"programToken": "prg-2"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"token": "usr-new"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    client
        .create_user(json!({"profileType": "INDIVIDUAL", "programToken": "prg-2"}))
        .await
        .expect("create should succeed");
}

#[tokio::test]
async fn requests_authenticate_with_basic_auth() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v3/users/usr-1"))
        .and(basic_auth("test-user", "test-pass"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "usr-1"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let user = client.retrieve_user("usr-1").await.expect("retrieve should succeed");

    assert_eq!(user.token(), Some("usr-1"));
}

#[tokio::test]
async fn missing_token_fails_before_any_request() {
    let server = MockServer::start().await;
    let client = test_client(&server);

    let err = client.retrieve_user("").await.unwrap_err();
    assert!(matches!(err, Error::MissingArgument("userToken")));

    let err = client.retrieve_payment("").await.unwrap_err();
    assert!(matches!(err, Error::MissingArgument("paymentToken")));

    let err = client
        .update_bank_account("usr-1", "", json!({"branchId": "1"}))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::MissingArgument("bankAccountToken")));

    let received = server.received_requests().await.unwrap();
    assert!(received.is_empty());
}

#[tokio::test]
async fn empty_payload_fails_before_any_request() {
    let server = MockServer::start().await;
    let client = test_client(&server);

    let err = client.create_user(json!({})).await.unwrap_err();
    assert!(matches!(err, Error::MissingArgument("data")));

    let received = server.received_requests().await.unwrap();
    assert!(received.is_empty());
}

#[tokio::test]
async fn get_users_pages_through_the_collection() {
    let server = MockServer::start().await;

    // 250 users behind the listing; a maximum of 120 needs the pages at
    // offsets 0 and 100, truncated to 120 items.
    Mock::given(method("GET"))
        .and(path("/rest/v3/users"))
        .and(query_param("offset", "0"))
        .and(query_param("limit", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_page(0, 100)))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v3/users"))
        .and(query_param("offset", "100"))
        .and(query_param("limit", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_page(100, 100)))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let users = client
        .get_users(CollectionSlice::new(0, Some(120)))
        .await
        .expect("get should succeed");

    assert_eq!(users.len(), 120);
    assert_eq!(users[0].token(), Some("usr-0"));
    assert_eq!(users[119].token(), Some("usr-119"));
}

#[tokio::test]
async fn get_users_stops_on_a_short_page() {
    let server = MockServer::start().await;

    // 50 users in total: the short first page signals the end of the
    // data, so a huge maximum still means exactly one fetch.
    Mock::given(method("GET"))
        .and(path("/rest/v3/users"))
        .and(query_param("offset", "0"))
        .and(query_param("limit", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_page(0, 50)))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let users = client
        .get_users(CollectionSlice::new(0, Some(1000)))
        .await
        .expect("get should succeed");

    assert_eq!(users.len(), 50);
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn zero_maximum_issues_no_requests() {
    let server = MockServer::start().await;
    let client = test_client(&server);

    let users = client
        .get_users(CollectionSlice::new(0, Some(0)))
        .await
        .expect("get should succeed");

    assert!(users.is_empty());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn get_bank_accounts_scopes_pages_to_the_user() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v3/users/usr-1/bank-accounts"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"token": "trm-1", "type": "BANK_ACCOUNT"},
                {"token": "trm-2", "type": "BANK_ACCOUNT"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let accounts = client
        .get_bank_accounts("usr-1", CollectionSlice::default())
        .await
        .expect("get should succeed");

    assert_eq!(accounts.len(), 2);
    assert_eq!(accounts[1].token(), Some("trm-2"));
}

#[tokio::test]
async fn listing_without_a_data_field_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v3/webhook-notifications"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 0})))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let webhooks = client.list_webhooks(None).await.expect("list should succeed");

    assert!(webhooks.is_empty());
}

#[tokio::test]
async fn list_params_pass_through_to_the_wire() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v3/payments"))
        .and(query_param("currency", "USD"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"token": "pmt-1", "currency": "USD"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let params = hyperwallet::QueryParams::from([("currency".to_string(), "USD".to_string())]);
    let payments = client
        .list_payments(Some(&params))
        .await
        .expect("list should succeed");

    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0].get_str("currency"), Some("USD"));
}

#[tokio::test]
async fn api_errors_surface_the_error_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v3/users/usr-missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "errors": [{
                "code": "RESOURCE_NOT_FOUND",
                "message": "The requested resource was not found"
            }]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.retrieve_user("usr-missing").await.unwrap_err();

    match err {
        Error::Api { status, code, message } => {
            assert_eq!(status.as_u16(), 404);
            assert_eq!(code.as_deref(), Some("RESOURCE_NOT_FOUND"));
            assert_eq!(
                message.as_deref(),
                Some("The requested resource was not found")
            );
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn api_errors_with_multibyte_bodies_are_returned_not_panicked() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v3/users/usr-1"))
        .respond_with(ResponseTemplate::new(400).set_body_string("\u{20ac}".repeat(100)))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.retrieve_user("usr-1").await.unwrap_err();

    match err {
        Error::Api { status, code, message } => {
            assert_eq!(status.as_u16(), 400);
            assert!(code.is_none());
            assert!(message.is_none());
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn pagination_failure_discards_earlier_pages() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v3/users"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_page(0, 100)))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v3/users"))
        .and(query_param("offset", "100"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "errors": [{"code": "SYSTEM_ERROR", "message": "try again"}]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client
        .get_users(CollectionSlice::new(0, None))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Api { status, .. } if status.as_u16() == 500));
}

#[tokio::test]
async fn update_user_puts_the_payload() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/rest/v3/users/usr-1"))
        .and(body_partial_json(json!({"firstName": "Ada"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "usr-1",
            "firstName": "Ada"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let user = client
        .update_user("usr-1", json!({"firstName": "Ada"}))
        .await
        .expect("update should succeed");

    assert_eq!(user.get_str("firstName"), Some("Ada"));
}

#[tokio::test]
async fn create_transfer_method_sends_the_cache_token_header() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v3/users/usr-1/transfer-methods"))
        .and(header("Json-Cache-Token", "tmc-12345"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "token": "trm-9",
            "type": "BANK_ACCOUNT"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let response = client
        .create_transfer_method("usr-1", "tmc-12345", &json!({"transferMethodCountry": "US"}))
        .await
        .expect("create should succeed");

    assert_eq!(response["token"], "trm-9");
}

#[tokio::test]
async fn transfer_method_configuration_requires_all_params() {
    let server = MockServer::start().await;
    let client = test_client(&server);

    let mut params = hyperwallet::QueryParams::new();
    params.insert("userToken".to_string(), "usr-1".to_string());
    params.insert("country".to_string(), "US".to_string());

    let err = client
        .retrieve_transfer_method_configuration(&params)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::MissingArgument("currency")));

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn status_transition_reads_return_the_raw_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(
            "/rest/v3/users/usr-1/bank-accounts/trm-1/status-transitions/sts-1",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "sts-1",
            "transition": "DE_ACTIVATED"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let response = client
        .retrieve_bank_account_status_transition("usr-1", "trm-1", "sts-1")
        .await
        .expect("retrieve should succeed");

    assert_eq!(response["transition"], "DE_ACTIVATED");
}

#[tokio::test]
async fn retrieve_program_returns_the_raw_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v3/programs/prg-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "prg-1",
            "name": "Engineering Payouts"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let program = client.retrieve_program("prg-1").await.expect("retrieve should succeed");

    assert_eq!(program["name"], "Engineering Payouts");
}
