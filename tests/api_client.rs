//! Integration tests for the TransactionHub API binding against a mock server

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hubcli::api::types::{AccountId, AmountRequest, ReportConfigRequest};
use hubcli::api::{ApiError, HubClient};
use hubcli::session::Session;
use hubcli::split::{SplitInput, SplitState};

fn session_for(server: &MockServer) -> Session {
    Session {
        token: "abc123".to_string(),
        user_id: 1,
        username: "operator".to_string(),
        host: server.uri(),
    }
}

#[tokio::test]
async fn login_returns_token_and_identity() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/login/"))
        .and(body_json(json!({"username": "operator", "password": "hunter2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "abc123",
            "user_id": 7,
            "username": "operator"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = HubClient::new(&server.uri()).unwrap();
    let response = client.login("operator", "hunter2").await.unwrap();

    assert_eq!(response.token, "abc123");
    assert_eq!(response.user_id, 7);
    assert_eq!(response.username, "operator");
}

#[tokio::test]
async fn authenticated_calls_send_token_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/clients/"))
        .and(header("Authorization", "Token abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Acme", "phone": "555-0100"},
            {"id": 2, "name": "Globex"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = HubClient::with_session(&server.uri(), &session_for(&server)).unwrap();
    let clients = client.clients().await.unwrap();

    assert_eq!(clients.len(), 2);
    assert_eq!(clients[0].name, "Acme");
    assert_eq!(clients[1].phone, None);
}

#[tokio::test]
async fn unauthorized_is_classified() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/mobile-dashboard/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Invalid token."
        })))
        .mount(&server)
        .await;

    let client = HubClient::with_session(&server.uri(), &session_for(&server)).unwrap();
    let err = client.dashboard().await.unwrap_err();

    assert!(matches!(err, ApiError::Unauthorized { .. }));
    assert!(err.to_string().contains("hubcli login"));
}

#[tokio::test]
async fn server_errors_carry_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/transactions/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = HubClient::with_session(&server.uri(), &session_for(&server)).unwrap();
    let err = client.transactions().await.unwrap_err();

    match err {
        ApiError::Status { status, body } => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected Status error, got {:?}", other),
    }
}

#[tokio::test]
async fn delete_handles_empty_body() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/transactions/9/"))
        .and(header("Authorization", "Token abc123"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = HubClient::with_session(&server.uri(), &session_for(&server)).unwrap();
    client.delete_transaction(9).await.unwrap();
}

#[tokio::test]
async fn funding_posts_amount_and_note() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/accounts/3/funding/"))
        .and(body_json(json!({"amount": 1500.0, "note": "wire"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 11,
            "account": 3,
            "transaction_type": "funding",
            "amount": 1500.0,
            "note": "wire"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = HubClient::with_session(&server.uri(), &session_for(&server)).unwrap();
    let tx = client
        .record_funding(
            AccountId(3),
            &AmountRequest {
                amount: "1500".parse().unwrap(),
                note: Some("wire".to_string()),
            },
        )
        .await
        .unwrap();

    assert_eq!(tx.id, 11);
    assert_eq!(tx.account, AccountId(3));
}

#[tokio::test]
async fn report_config_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/accounts/5/report-config/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "friend_percentage": 40.0,
            "my_own_percentage": 60.0,
            "my_total_percentage": 100.0
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/accounts/5/report-config/"))
        .and(body_json(json!({"friend_percentage": 30.0, "my_own_percentage": 70.0})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "friend_percentage": 30.0,
            "my_own_percentage": 70.0,
            "my_total_percentage": 100.0
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = HubClient::with_session(&server.uri(), &session_for(&server)).unwrap();

    let config = client.report_config(AccountId(5)).await.unwrap();
    assert_eq!(config.my_total_percentage, 100.0);

    // Derive the new split the way the set command does
    let state = SplitState::from_config(&config).apply(SplitInput::CompanyChanged(30.0));
    state.check_submit().unwrap();

    let updated = client
        .update_report_config(
            AccountId(5),
            &ReportConfigRequest {
                friend_percentage: state.company,
                my_own_percentage: state.my_own,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.friend_percentage, 30.0);
}

#[tokio::test]
async fn rejected_split_never_reaches_the_server() {
    let server = MockServer::start().await;

    // Any POST would trip this zero-call expectation
    Mock::given(method("POST"))
        .and(path("/api/accounts/5/report-config/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = HubClient::with_session(&server.uri(), &session_for(&server)).unwrap();

    // total 100, company 30, my_own 50: off by 20, gate rejects
    let mut state = SplitState::new(100.0, 0.0, 0.0);
    state.company = 30.0;
    state.my_own = 50.0;

    if state.check_submit().is_ok() {
        client
            .update_report_config(
                AccountId(5),
                &ReportConfigRequest {
                    friend_percentage: state.company,
                    my_own_percentage: state.my_own,
                },
            )
            .await
            .unwrap();
    }

    assert!(state.check_submit().is_err());
    // MockServer verifies the expect(0) on drop
}
